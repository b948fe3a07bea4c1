//! Application configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use wildwarp_domain::{StatusEffect, ZoneDefaults};

/// Application configuration loaded from environment
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Cosmetic countdown settings
    pub effects: EffectsConfig,
    /// Location cache warmer settings
    pub cache: CacheConfig,
    /// Location search and movement settings
    pub search: SearchConfig,
    /// Settings applied to worlds missing from the zone file
    pub zone_defaults: ZoneDefaults,
    /// Optional JSON file with per-world zone entries
    pub zones_file: Option<PathBuf>,
    /// Effects applied after a successful teleport
    pub post_teleport: PostTeleportConfig,
}

#[derive(Debug, Clone)]
pub struct EffectsConfig {
    /// When false the timeline is paced silently
    pub enabled: bool,
    /// Stage messages go to the action bar instead of chat
    pub use_action_bar: bool,
    /// Countdown numbers flash as titles
    pub countdown_titles: bool,
    /// Period of one timeline tick
    pub tick_interval: Duration,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_action_bar: true,
            countdown_titles: true,
            tick_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub capacity: usize,
    pub warm_interval: Duration,
    pub initial_delay: Duration,
    /// Cached entries older than this are discarded instead of used
    pub max_age: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            warm_interval: Duration::from_secs(30),
            initial_delay: Duration::from_secs(5),
            max_age: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Columns sampled before a search gives up
    pub max_attempts: u32,
    /// Squared distance a player may drift from the origin while charging up
    pub move_tolerance_sq: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            move_tolerance_sq: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostTeleportConfig {
    pub show_location: bool,
    pub status_effects: Vec<StatusEffect>,
    /// Food points removed after arrival
    pub hunger: u32,
    /// Health points removed after arrival
    pub damage: f64,
}

impl Default for PostTeleportConfig {
    fn default() -> Self {
        Self {
            show_location: true,
            status_effects: Vec::new(),
            hunger: 0,
            damage: 0.0,
        }
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = ZoneDefaults::default();
        let zone_defaults = ZoneDefaults {
            min_radius: var_or("WILDWARP_DEFAULT_MIN_RADIUS", defaults.min_radius),
            max_radius: var_or("WILDWARP_DEFAULT_MAX_RADIUS", defaults.max_radius),
            delay_secs: var_or("WILDWARP_DEFAULT_DELAY", defaults.delay_secs),
            cooldown_secs: var_or("WILDWARP_DEFAULT_COOLDOWN", defaults.cooldown_secs),
            price: var_or("WILDWARP_DEFAULT_PRICE", defaults.price),
        };
        zone_defaults
            .zone()
            .context("WILDWARP_DEFAULT_* values do not form a valid zone")?;

        let tick_ms: u64 = var_or("WILDWARP_TICK_INTERVAL_MS", 1000);
        if tick_ms == 0 {
            anyhow::bail!("WILDWARP_TICK_INTERVAL_MS must be greater than 0");
        }

        Ok(Self {
            effects: EffectsConfig {
                enabled: var_or("WILDWARP_EFFECTS_ENABLED", true),
                use_action_bar: var_or("WILDWARP_USE_ACTION_BAR", true),
                countdown_titles: var_or("WILDWARP_COUNTDOWN_TITLES", true),
                tick_interval: Duration::from_millis(tick_ms),
            },
            cache: CacheConfig {
                capacity: var_or("WILDWARP_CACHE_CAPACITY", 10),
                warm_interval: Duration::from_secs(
                    var_or("WILDWARP_CACHE_WARM_INTERVAL_SECS", 30u64).max(1),
                ),
                initial_delay: Duration::from_secs(var_or("WILDWARP_CACHE_INITIAL_DELAY_SECS", 5)),
                max_age: Duration::from_secs(var_or("WILDWARP_CACHE_MAX_AGE_SECS", 300)),
            },
            search: SearchConfig {
                max_attempts: var_or("WILDWARP_MAX_ATTEMPTS", 30u32).max(1),
                move_tolerance_sq: var_or("WILDWARP_MOVE_TOLERANCE_SQ", 0.1),
            },
            zone_defaults,
            zones_file: env::var("WILDWARP_ZONES_FILE").ok().map(PathBuf::from),
            post_teleport: PostTeleportConfig {
                show_location: var_or("WILDWARP_POST_SHOW_LOCATION", true),
                status_effects: parse_status_effects(
                    &env::var("WILDWARP_POST_EFFECTS").unwrap_or_default(),
                ),
                hunger: var_or("WILDWARP_POST_HUNGER", 0),
                damage: var_or("WILDWARP_POST_DAMAGE", 0.0),
            },
        })
    }
}

/// Parses `KIND:SECONDS:AMPLIFIER` entries separated by commas.
///
/// Malformed entries are skipped with a warning.
pub fn parse_status_effects(raw: &str) -> Vec<StatusEffect> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|entry| {
            let mut parts = entry.split(':');
            let kind = parts.next()?.trim();
            let duration_secs = parts.next().and_then(|d| d.trim().parse().ok());
            let amplifier = parts.next().map_or(Some(0), |a| a.trim().parse().ok());
            match (kind.is_empty(), duration_secs, amplifier) {
                (false, Some(duration_secs), Some(amplifier)) => Some(StatusEffect {
                    kind: kind.to_ascii_uppercase(),
                    duration_secs,
                    amplifier,
                }),
                _ => {
                    tracing::warn!(entry = %entry, "Ignoring malformed status effect");
                    None
                }
            }
        })
        .collect()
}
