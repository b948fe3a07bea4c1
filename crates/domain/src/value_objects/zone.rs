//! Per-world teleport zone configuration.

use std::collections::BTreeSet;
use std::f64::consts::TAU;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Center;

/// Immutable zone settings for one world.
///
/// Built through validated constructors: radii are non-negative with
/// `min_radius <= max_radius`, delay and cooldown are non-negative, price is a
/// finite non-negative amount.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldZoneConfig {
    min_radius: u32,
    max_radius: u32,
    delay_secs: u32,
    cooldown_secs: u32,
    price: f64,
    enabled: bool,
    center: Center,
    forbidden_biomes: BTreeSet<String>,
}

fn non_negative(field: &str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::validation(format!(
            "{field} must be >= 0, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| DomainError::validation(format!("{field} is too large: {value}")))
}

impl WorldZoneConfig {
    /// Enabled zone around the origin with no delay, cooldown or price.
    pub fn new(min_radius: i64, max_radius: i64) -> Result<Self, DomainError> {
        let min_radius = non_negative("min radius", min_radius)?;
        let max_radius = non_negative("max radius", max_radius)?;
        if min_radius > max_radius {
            return Err(DomainError::validation(format!(
                "min radius {min_radius} exceeds max radius {max_radius}"
            )));
        }
        Ok(Self {
            min_radius,
            max_radius,
            delay_secs: 0,
            cooldown_secs: 0,
            price: 0.0,
            enabled: true,
            center: Center::ORIGIN,
            forbidden_biomes: BTreeSet::new(),
        })
    }

    pub fn with_delay_secs(mut self, delay: i64) -> Result<Self, DomainError> {
        self.delay_secs = non_negative("delay", delay)?;
        Ok(self)
    }

    pub fn with_cooldown_secs(mut self, cooldown: i64) -> Result<Self, DomainError> {
        self.cooldown_secs = non_negative("cooldown", cooldown)?;
        Ok(self)
    }

    pub fn with_price(mut self, price: f64) -> Result<Self, DomainError> {
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a finite amount >= 0, got {price}"
            )));
        }
        self.price = price;
        Ok(self)
    }

    pub fn with_center(mut self, center: Center) -> Self {
        self.center = center;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_forbidden_biomes<I, S>(mut self, biomes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forbidden_biomes = biomes
            .into_iter()
            .map(|b| b.as_ref().trim().to_ascii_uppercase())
            .filter(|b| !b.is_empty())
            .collect();
        self
    }

    pub fn min_radius(&self) -> u32 {
        self.min_radius
    }

    pub fn max_radius(&self) -> u32 {
        self.max_radius
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.delay_secs))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(u64::from(self.cooldown_secs))
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn center(&self) -> Center {
        self.center
    }

    pub fn forbidden_biomes(&self) -> &BTreeSet<String> {
        &self.forbidden_biomes
    }

    /// Biome tags compare case-insensitively.
    pub fn is_biome_forbidden(&self, biome: &str) -> bool {
        !self.forbidden_biomes.is_empty()
            && self
                .forbidden_biomes
                .contains(&biome.trim().to_ascii_uppercase())
    }

    /// Maps two unit samples in `[0, 1)` to a column of the annulus.
    ///
    /// The radius is uniform in `[min_radius, max_radius]`, the angle uniform
    /// in `[0, 2pi)`.
    pub fn sample_column(&self, radius_unit: f64, angle_unit: f64) -> (i32, i32) {
        let min = f64::from(self.min_radius);
        let max = f64::from(self.max_radius);
        let radius = min + radius_unit.clamp(0.0, 1.0) * (max - min);
        let angle = angle_unit.clamp(0.0, 1.0) * TAU;
        let x = f64::from(self.center.x) + radius * angle.cos();
        let z = f64::from(self.center.z) + radius * angle.sin();
        (x.floor() as i32, z.floor() as i32)
    }
}

/// Global defaults applied to zone entries that omit a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDefaults {
    pub min_radius: i64,
    pub max_radius: i64,
    pub delay_secs: i64,
    pub cooldown_secs: i64,
    pub price: f64,
}

impl Default for ZoneDefaults {
    fn default() -> Self {
        Self {
            min_radius: 100,
            max_radius: 5000,
            delay_secs: 5,
            cooldown_secs: 30,
            price: 0.0,
        }
    }
}

impl ZoneDefaults {
    pub fn zone(&self) -> Result<WorldZoneConfig, DomainError> {
        ZoneEntry::default().resolve(self)
    }
}

/// Raw zone entry as read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ZoneEntry {
    pub enabled: Option<bool>,
    pub min_radius: Option<i64>,
    pub max_radius: Option<i64>,
    pub delay: Option<i64>,
    pub cooldown: Option<i64>,
    pub price: Option<f64>,
    pub center: Option<Center>,
    pub forbidden_biomes: Vec<String>,
}

impl ZoneEntry {
    pub fn resolve(&self, defaults: &ZoneDefaults) -> Result<WorldZoneConfig, DomainError> {
        Ok(WorldZoneConfig::new(
            self.min_radius.unwrap_or(defaults.min_radius),
            self.max_radius.unwrap_or(defaults.max_radius),
        )?
        .with_delay_secs(self.delay.unwrap_or(defaults.delay_secs))?
        .with_cooldown_secs(self.cooldown.unwrap_or(defaults.cooldown_secs))?
        .with_price(self.price.unwrap_or(defaults.price))?
        .with_center(self.center.unwrap_or_default())
        .with_enabled(self.enabled.unwrap_or(true))
        .with_forbidden_biomes(&self.forbidden_biomes))
    }
}
