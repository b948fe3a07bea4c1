//! Background warmer for the per-world location cache.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::find_location::LocationFinder;
use crate::infrastructure::cache::LocationCache;
use crate::infrastructure::zones::ZoneDirectory;

/// Outcome of one warming pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmReport {
    /// Worlds searched this pass
    pub searched: usize,
    /// Locations added to the cache
    pub filled: usize,
    /// Worlds skipped because their queue was already full
    pub skipped: usize,
}

pub struct CacheWarmer {
    zones: Arc<ZoneDirectory>,
    finder: Arc<LocationFinder>,
    cache: Arc<LocationCache>,
}

impl CacheWarmer {
    pub fn new(
        zones: Arc<ZoneDirectory>,
        finder: Arc<LocationFinder>,
        cache: Arc<LocationCache>,
    ) -> Self {
        Self {
            zones,
            finder,
            cache,
        }
    }

    /// Runs the finder once for every enabled world whose queue has room.
    pub async fn run_once(&self) -> WarmReport {
        let zones = self.zones.clone();
        self.cache
            .retain_worlds(|world| zones.get(world).is_some_and(|zone| zone.is_enabled()));

        let enabled = self.zones.enabled_worlds();
        let pending: Vec<_> = enabled
            .iter()
            .filter(|(world, _)| !self.cache.is_full(world))
            .collect();
        let mut report = WarmReport {
            searched: pending.len(),
            skipped: enabled.len() - pending.len(),
            ..WarmReport::default()
        };

        let results = join_all(pending.into_iter().map(|(world, zone)| async move {
            (world, self.finder.find(world, zone).await)
        }))
        .await;

        for (world, result) in results {
            match result {
                Ok(pos) => {
                    if self.cache.push(world, pos) {
                        report.filled += 1;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        world = %world,
                        error = %e,
                        "Cache warm search failed, retrying next interval"
                    );
                }
            }
        }
        report
    }

    /// Warms the cache every `interval` until `cancel_token` fires.
    pub async fn run_worker(
        self: Arc<Self>,
        interval: Duration,
        initial_delay: Duration,
        cancel_token: CancellationToken,
    ) {
        tracing::info!(
            interval_secs = interval.as_secs(),
            capacity = self.cache.capacity(),
            "Starting location cache warmer"
        );

        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::info!("Location cache warmer shutting down");
                return;
            }
            _ = tokio::time::sleep(initial_delay) => {}
        }

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::info!("Location cache warmer shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = cancel_token.cancelled() => {
                            tracing::info!("Location cache warmer shutting down");
                            break;
                        }
                        report = self.run_once() => {
                            tracing::debug!(
                                searched = report.searched,
                                filled = report.filled,
                                skipped = report.skipped,
                                "Cache warm pass finished"
                            );
                        }
                    }
                }
            }
        }
    }
}
