//! Scripted worlds for finder and orchestrator tests.

use wildwarp_domain::{BlockPos, Environment, Material, WorldBounds, WorldInfo, WorldName};

use crate::infrastructure::ports::{WorldError, WorldPort};

/// A single world where every column has the same layering.
pub struct ScriptedWorld {
    info: WorldInfo,
    column: fn(BlockPos) -> Material,
    biome: Option<String>,
}

impl ScriptedWorld {
    pub fn new(name: &str, environment: Environment, column: fn(BlockPos) -> Material) -> Self {
        Self {
            info: WorldInfo {
                name: WorldName::from(name),
                environment,
                bounds: WorldBounds::new(-64, 320),
            },
            column,
            biome: None,
        }
    }

    /// Stone below y=64 and air above: every column is safe at y=64.
    pub fn flat(name: &str) -> Self {
        Self::new(name, Environment::Overworld, |pos| {
            if pos.y < 64 {
                Material::Stone
            } else {
                Material::Air
            }
        })
    }

    /// Lava from bottom to top: no column is ever safe.
    pub fn lava(name: &str) -> Self {
        Self::new(name, Environment::Overworld, |_| Material::Lava)
    }

    pub fn name(&self) -> &WorldName {
        &self.info.name
    }

    pub fn with_biome(mut self, biome: &str) -> Self {
        self.biome = Some(biome.to_string());
        self
    }
}

impl WorldPort for ScriptedWorld {
    fn world_info(&self, world: &WorldName) -> Result<WorldInfo, WorldError> {
        if world == &self.info.name {
            Ok(self.info.clone())
        } else {
            Err(WorldError::NotLoaded(world.clone()))
        }
    }

    fn material_at(&self, world: &WorldName, pos: BlockPos) -> Option<Material> {
        let bounds = self.info.bounds;
        if world != &self.info.name || pos.y < bounds.min_y || pos.y >= bounds.max_y {
            return None;
        }
        Some((self.column)(pos))
    }

    fn highest_solid_y(&self, world: &WorldName, x: i32, z: i32) -> Option<i32> {
        let bounds = self.info.bounds;
        (bounds.min_y..bounds.max_y).rev().find(|&y| {
            self.material_at(world, BlockPos::new(x, y, z))
                .is_some_and(Material::is_solid)
        })
    }

    fn biome_at(&self, world: &WorldName, _pos: BlockPos) -> Option<String> {
        (world == &self.info.name)
            .then(|| self.biome.clone())
            .flatten()
    }
}
