//! Per-world zone directory with wholesale reload.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use anyhow::Context;
use wildwarp_domain::{WorldName, WorldZoneConfig, ZoneDefaults, ZoneEntry};

type ZoneMap = HashMap<WorldName, Arc<WorldZoneConfig>>;

/// Holds the zone configuration of every world.
///
/// Lookups hand out `Arc` snapshots, so a reload never changes a zone under
/// a caller that already looked it up.
#[derive(Default)]
pub struct ZoneDirectory {
    zones: RwLock<Arc<ZoneMap>>,
}

impl ZoneDirectory {
    pub fn new(zones: impl IntoIterator<Item = (WorldName, WorldZoneConfig)>) -> Self {
        let directory = Self::default();
        directory.reload(zones);
        directory
    }

    pub fn get(&self, world: &WorldName) -> Option<Arc<WorldZoneConfig>> {
        self.snapshot().get(world).cloned()
    }

    /// Enabled worlds, sorted by name.
    pub fn enabled_worlds(&self) -> Vec<(WorldName, Arc<WorldZoneConfig>)> {
        let mut worlds: Vec<_> = self
            .snapshot()
            .iter()
            .filter(|(_, zone)| zone.is_enabled())
            .map(|(name, zone)| (name.clone(), zone.clone()))
            .collect();
        worlds.sort_by(|a, b| a.0.cmp(&b.0));
        worlds
    }

    /// Replaces the whole directory.
    pub fn reload(&self, zones: impl IntoIterator<Item = (WorldName, WorldZoneConfig)>) {
        let map: ZoneMap = zones
            .into_iter()
            .map(|(name, zone)| (name, Arc::new(zone)))
            .collect();
        tracing::info!(worlds = map.len(), "Zone directory loaded");
        *self.zones.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(map);
    }

    /// Reloads from `source`. On failure the current zones stay in place.
    pub fn reload_from(&self, source: &ZoneSource) -> anyhow::Result<usize> {
        let zones = source.load()?;
        let count = zones.len();
        self.reload(zones);
        Ok(count)
    }

    fn snapshot(&self) -> Arc<ZoneMap> {
        self.zones
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Where zone configuration comes from.
#[derive(Debug, Clone)]
pub enum ZoneSource {
    /// A JSON zone file resolved against the global defaults
    File { path: PathBuf, defaults: ZoneDefaults },
    /// The global defaults applied to a fixed list of worlds
    Defaults {
        worlds: Vec<WorldName>,
        defaults: ZoneDefaults,
    },
}

impl ZoneSource {
    pub fn load(&self) -> anyhow::Result<Vec<(WorldName, WorldZoneConfig)>> {
        match self {
            Self::File { path, defaults } => load_zone_file(path, defaults),
            Self::Defaults { worlds, defaults } => {
                let zone = defaults.zone()?;
                Ok(worlds
                    .iter()
                    .map(|name| (name.clone(), zone.clone()))
                    .collect())
            }
        }
    }
}

/// Reads a JSON object of `world name -> zone entry` and resolves every entry
/// against `defaults`.
pub fn load_zone_file(
    path: &Path,
    defaults: &ZoneDefaults,
) -> anyhow::Result<Vec<(WorldName, WorldZoneConfig)>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading zone file {}", path.display()))?;
    parse_zones(&raw, defaults).with_context(|| format!("parsing zone file {}", path.display()))
}

fn parse_zones(
    raw: &str,
    defaults: &ZoneDefaults,
) -> anyhow::Result<Vec<(WorldName, WorldZoneConfig)>> {
    let entries: HashMap<String, ZoneEntry> = serde_json::from_str(raw)?;
    let mut zones = Vec::with_capacity(entries.len());
    for (name, entry) in entries {
        let zone = entry
            .resolve(defaults)
            .with_context(|| format!("invalid zone for world {name}"))?;
        zones.push((WorldName::from(name), zone));
    }
    Ok(zones)
}
