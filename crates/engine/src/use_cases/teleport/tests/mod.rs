//! Orchestrator scenarios run against the in-memory harness.

mod force_tests;
mod request_tests;

use std::time::Duration;

use wildwarp_domain::WorldZoneConfig;

/// Zone around the origin with no extra delay, a 30 s cooldown and `price`.
fn priced_zone(price: f64) -> WorldZoneConfig {
    WorldZoneConfig::new(100, 200)
        .and_then(|z| z.with_delay_secs(0))
        .and_then(|z| z.with_cooldown_secs(30))
        .and_then(|z| z.with_price(price))
        .unwrap()
}

/// Just short of the 17-tick timeline.
const BEFORE_COMPLETION: Duration = Duration::from_millis(16_500);

/// Just past the 17-tick timeline.
const AFTER_COMPLETION: Duration = Duration::from_millis(17_500);
