use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info_span, Instrument};

/// Counters for outbound Riot API traffic: calls actually issued and calls
/// refused by the local rate budget before leaving the process.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    issued: AtomicU64,
    rejected: AtomicU64,
    name: &'static str,
}

impl RequestMetrics {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            issued: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            name,
        })
    }

    pub fn inc(&self) {
        self.issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub async fn log_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            let span = info_span!("📊 ", client = self.name);
            async {
                interval.tick().await;
                let issued = self.issued.load(Ordering::Relaxed);
                let rejected = self.rejected.load(Ordering::Relaxed);
                let elapsed_min = self.start.elapsed().as_secs_f64() / 60.0;
                let avg = if elapsed_min > 0.0 {
                    issued as f64 / elapsed_min
                } else {
                    0.0
                };
                tracing::info!(
                    "{} requests executed, {} rejected by budget (avg {:.2} req/min)",
                    issued,
                    rejected,
                    avg
                );
            }
            .instrument(span)
            .await
        }
    }
}
