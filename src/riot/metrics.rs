use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{Instrument, info_span};

/// Counters for requests sent to the Riot API.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    count: AtomicU64,
    failures: AtomicU64,
    name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub failures: u64,
    pub per_minute: f64,
}

impl RequestMetrics {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            count: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            name,
        })
    }

    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.count.load(Ordering::Relaxed);
        let elapsed_min = self.start.elapsed().as_secs_f64() / 60.0;

        MetricsSnapshot {
            total,
            failures: self.failures.load(Ordering::Relaxed),
            per_minute: if elapsed_min > 0.0 {
                total as f64 / elapsed_min
            } else {
                0.0
            },
        }
    }

    /// Log the counters every `every` until the task is dropped.
    pub async fn log_loop(self: Arc<Self>, every: Duration) {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;

        loop {
            interval.tick().await;
            let span = info_span!("📊", client = self.name);
            async {
                let snapshot = self.snapshot();
                tracing::info!(
                    failures = snapshot.failures,
                    "{} requests executed (avg {:.2} req/min)",
                    snapshot.total,
                    snapshot.per_minute
                );
            }
            .instrument(span)
            .await
        }
    }
}
