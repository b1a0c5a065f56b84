use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{instrument, trace};

use super::ProviderError;
use super::metrics::RequestMetrics;
use crate::tracking::RiotId;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct RiotClient {
    http: reqwest::Client,
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    /// Riot API Key
    api_key: String,
    base_url: Option<String>,
    metrics: Arc<RequestMetrics>,
    /// Identity key -> (puuid, identity as spelled by Riot)
    pub(super) accounts: RwLock<HashMap<String, (String, RiotId)>>,
}

impl RiotClient {
    pub fn new(api_key: String, rate_limit_per_second: NonZeroU32) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ProviderError::Transport)?;

        Ok(Self {
            http,
            limiter: RateLimiter::direct(Quota::per_second(rate_limit_per_second)),
            api_key,
            base_url: None,
            metrics: RequestMetrics::new("riot"),
            accounts: RwLock::new(HashMap::new()),
        })
    }

    /// Send every request to `base_url` instead of the Riot hosts.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.metrics.clone()
    }

    /// Root URL for a routing value such as `euw1` or `europe`.
    pub(super) fn host(&self, routing: &str) -> String {
        match &self.base_url {
            Some(base) => base.clone(),
            None => format!("https://{routing}.api.riotgames.com"),
        }
    }

    #[instrument(skip(self), level = "trace")]
    pub(super) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        self.limiter.until_ready().await;
        self.metrics.inc();

        let result = self.send(url).await;
        if result.is_err() {
            self.metrics.inc_failure();
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let res = self
            .http
            .get(url)
            .header("X-Riot-Token", &self.api_key)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = res.status();
        trace!(%status, url, "riot response");

        if status.is_success() {
            res.json().await.map_err(ProviderError::from_body)
        } else {
            Err(ProviderError::from_status(status))
        }
    }
}
