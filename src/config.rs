use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::AppError;
use crate::riot::Region;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub riot_api_key: String,
    pub database_url: String,
    pub polling_interval_secs: u64,
    pub poll_pacing: Duration,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub rank_points_threshold: i32,
    pub session_ttl: chrono::Duration,
    pub max_tracked_players: usize,
    pub default_region: Region,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_POLLING_INTERVAL_SECS: u64 = 300;
        const DEFAULT_POLL_PACING_MILLIS: u64 = 1_000;
        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
        const DEFAULT_RANK_POINTS_THRESHOLD: i32 = 20;
        const DEFAULT_SESSION_TTL_MINUTES: i64 = 30;
        const DEFAULT_MAX_TRACKED_PLAYERS: usize = 8;

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| AppError::Config("DISCORD_TOKEN must be set".into()))?;

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:tft-tracker.db".into());

        let polling_interval_secs = parsed_var("POLLING_INTERVAL_SECS")
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_POLLING_INTERVAL_SECS);

        let poll_pacing = Duration::from_millis(
            parsed_var("POLL_PACING_MILLIS").unwrap_or(DEFAULT_POLL_PACING_MILLIS),
        );

        let riot_rate_limit_per_second = parsed_var("RIOT_RATE_LIMIT_PER_SECOND")
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RIOT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let rank_points_threshold =
            parsed_var("RANK_POINTS_THRESHOLD").unwrap_or(DEFAULT_RANK_POINTS_THRESHOLD);

        let session_ttl = chrono::Duration::minutes(
            parsed_var("SESSION_TTL_MINUTES").unwrap_or(DEFAULT_SESSION_TTL_MINUTES),
        );

        let max_tracked_players =
            parsed_var("MAX_TRACKED_PLAYERS").unwrap_or(DEFAULT_MAX_TRACKED_PLAYERS);

        let default_region = match env::var("DEFAULT_REGION") {
            Ok(value) => value
                .parse()
                .map_err(|_| AppError::Config(format!("DEFAULT_REGION is invalid: {value}")))?,
            Err(_) => Region::Vn,
        };

        Ok(Self {
            discord_token,
            riot_api_key,
            database_url,
            polling_interval_secs,
            poll_pacing,
            riot_rate_limit_per_second,
            rank_points_threshold,
            session_ttl,
            max_tracked_players,
            default_region,
        })
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
