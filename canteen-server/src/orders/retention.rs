//! Order retention sweeper
//!
//! Orders are only retained for a fixed window (12 hours by default); the
//! store has no TTL of its own, so a periodic worker deletes expired
//! records. The workflow core never depends on this running: a swept
//! order simply surfaces as not-found on the next lookup.

use chrono::Utc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::db::repository::OrderRepository;

pub struct RetentionSweeper {
    orders: OrderRepository,
    /// Orders older than this are eligible for removal
    window: chrono::Duration,
    /// Pause between sweeps
    interval: Duration,
}

impl RetentionSweeper {
    pub fn new(db: Surreal<Db>, window_hours: i64, interval_secs: u64) -> Self {
        Self {
            orders: OrderRepository::new(db),
            window: chrono::Duration::hours(window_hours),
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Run until cancelled. Spawn in the background.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            window_hours = self.window.num_hours(),
            "Retention sweeper started"
        );
        let mut ticker = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Retention sweeper shutting down");
                    break;
                }

                _ = ticker.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// One sweep pass. Failures are logged and retried on the next tick.
    pub async fn sweep_once(&self) {
        let cutoff = (Utc::now() - self.window).timestamp_millis();
        match self.orders.delete_expired(cutoff).await {
            Ok(0) => {}
            Ok(removed) => {
                tracing::info!(count = removed, "Expired orders removed");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Retention sweep failed");
            }
        }
    }
}
