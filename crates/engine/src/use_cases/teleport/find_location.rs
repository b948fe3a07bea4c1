//! Random safe-location search.
//!
//! Samples columns uniformly inside the zone's annulus and resolves a height
//! with the world's vertical strategy. Every scan runs on the blocking pool.

use std::sync::Arc;

use wildwarp_domain::{
    is_safe, BlockLookup, BlockPos, HeightSource, Material, VerticalStrategy, WorldName,
    WorldZoneConfig,
};

use super::error::FindLocationError;
use crate::infrastructure::ports::{RandomPort, WorldPort};

/// Adapts the world port to the domain's block lookup for a single world.
struct WorldView<'a> {
    port: &'a dyn WorldPort,
    world: &'a WorldName,
}

impl BlockLookup for WorldView<'_> {
    fn material_at(&self, pos: BlockPos) -> Option<Material> {
        self.port.material_at(self.world, pos)
    }

    fn highest_solid_y(&self, x: i32, z: i32) -> Option<i32> {
        self.port.highest_solid_y(self.world, x, z)
    }
}

impl WorldView<'_> {
    /// Safe to stand on and outside the zone's forbidden biomes.
    fn acceptable(&self, zone: &WorldZoneConfig, pos: BlockPos) -> bool {
        if !is_safe(self, pos) {
            return false;
        }
        match self.port.biome_at(self.world, pos) {
            Some(biome) => !zone.is_biome_forbidden(&biome),
            None => true,
        }
    }
}

pub struct LocationFinder {
    world: Arc<dyn WorldPort>,
    random: Arc<dyn RandomPort>,
    max_attempts: u32,
}

impl LocationFinder {
    /// Attempts made when nothing else is configured.
    pub const DEFAULT_ATTEMPTS: u32 = 30;

    pub fn new(world: Arc<dyn WorldPort>, random: Arc<dyn RandomPort>, max_attempts: u32) -> Self {
        Self {
            world,
            random,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the first acceptable standing cell, or `NotFound` once every
    /// attempt is spent.
    pub async fn find(
        &self,
        world: &WorldName,
        zone: &Arc<WorldZoneConfig>,
    ) -> Result<BlockPos, FindLocationError> {
        let info = self.world.world_info(world)?;
        let strategy = Arc::new(VerticalStrategy::for_environment(
            info.environment,
            info.bounds,
        ));

        for attempt in 1..=self.max_attempts {
            let (x, z) = zone.sample_column(self.random.gen_unit(), self.random.gen_unit());
            match self.probe(world, zone, &strategy, x, z).await {
                Ok(Some(pos)) => {
                    tracing::debug!(world = %world, attempt, pos = %pos, "Safe location found");
                    return Ok(pos);
                }
                Ok(None) => {
                    tracing::debug!(world = %world, attempt, x, z, "Column rejected");
                }
                Err(e) => {
                    tracing::error!(world = %world, attempt, error = %e, "Column scan task failed");
                }
            }
        }

        tracing::debug!(world = %world, attempts = self.max_attempts, "Search exhausted");
        Err(FindLocationError::NotFound {
            attempts: self.max_attempts,
        })
    }

    /// Re-checks a previously vetted cell against the current world state.
    pub async fn revalidate(
        &self,
        world: &WorldName,
        zone: &Arc<WorldZoneConfig>,
        pos: BlockPos,
    ) -> bool {
        let port = self.world.clone();
        let world = world.clone();
        let zone = zone.clone();
        tokio::task::spawn_blocking(move || {
            WorldView {
                port: port.as_ref(),
                world: &world,
            }
            .acceptable(&zone, pos)
        })
        .await
        .unwrap_or(false)
    }

    async fn probe(
        &self,
        world: &WorldName,
        zone: &Arc<WorldZoneConfig>,
        strategy: &Arc<VerticalStrategy>,
        x: i32,
        z: i32,
    ) -> Result<Option<BlockPos>, tokio::task::JoinError> {
        let port = self.world.clone();
        let world = world.clone();
        let zone = zone.clone();
        let strategy = strategy.clone();
        tokio::task::spawn_blocking(move || {
            let view = WorldView {
                port: port.as_ref(),
                world: &world,
            };
            let resolution = strategy.resolve(&view, x, z);
            if resolution.source == HeightSource::Fallback && !strategy.quiet_fallback {
                tracing::debug!(world = %world, x, z, y = resolution.y, "Using fallback height");
            }
            let pos = BlockPos::new(x, resolution.y, z);
            view.acceptable(&zone, pos).then_some(pos)
        })
        .await
    }
}
