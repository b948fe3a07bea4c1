//! Deterministic demo terrain.
//!
//! Stands in for a real world service when running the engine on its own:
//! rolling overworld hills with oceans, beaches and lava pools, a nether
//! cavern band over a lava sea, and end islands around the origin. Heights
//! come from octaves of simplex noise seeded from the demo seed.

use std::collections::HashMap;

use noise::{NoiseFn, Simplex};
use wildwarp_domain::{
    BlockPos, Environment, Material, WorldBounds, WorldInfo, WorldName, SEA_LEVEL,
};

use crate::infrastructure::ports::{WorldError, WorldPort};

/// Octave settings for one fBm height field.
#[derive(Debug, Clone, Copy)]
struct Octaves {
    count: u32,
    base_frequency: f64,
    amplitude: f64,
}

impl Octaves {
    const LACUNARITY: f64 = 2.0;
    const PERSISTENCE: f64 = 0.5;

    /// Sums `count` octaves of `noise`, each doubling in frequency and halving
    /// in amplitude.
    fn sample(self, noise: &Simplex, x: i32, z: i32) -> f64 {
        let (x, z) = (f64::from(x), f64::from(z));
        let mut total = 0.0;
        let mut frequency = self.base_frequency;
        let mut amplitude = self.amplitude;
        for _ in 0..self.count {
            total += noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= Self::LACUNARITY;
            amplitude *= Self::PERSISTENCE;
        }
        total
    }
}

const HILLS: Octaves = Octaves {
    count: 4,
    base_frequency: 0.01,
    amplitude: 4.0,
};
const CAVERN: Octaves = Octaves {
    count: 3,
    base_frequency: 0.03,
    amplitude: 4.0,
};
const ISLAND_TOP: Octaves = Octaves {
    count: 2,
    base_frequency: 0.05,
    amplitude: 2.0,
};

pub struct GeneratedTerrain {
    worlds: HashMap<WorldName, WorldInfo>,
    /// Column heights
    height: Simplex,
    /// Surface features and biome regions
    detail: Simplex,
}

impl GeneratedTerrain {
    pub fn new(seed: u64) -> Self {
        Self {
            worlds: HashMap::new(),
            height: Simplex::new(seed as u32),
            detail: Simplex::new((seed >> 32) as u32 ^ 0x5EED),
        }
    }

    /// Overworld, nether and end named the way a vanilla server names them.
    pub fn vanilla(seed: u64) -> Self {
        Self::new(seed)
            .with_world("world", Environment::Overworld, WorldBounds::new(-64, 320))
            .with_world("world_nether", Environment::Nether, WorldBounds::new(0, 128))
            .with_world("world_the_end", Environment::End, WorldBounds::new(0, 256))
    }

    pub fn with_world(
        mut self,
        name: impl Into<WorldName>,
        environment: Environment,
        bounds: WorldBounds,
    ) -> Self {
        let name = name.into();
        self.worlds.insert(
            name.clone(),
            WorldInfo {
                name,
                environment,
                bounds,
            },
        );
        self
    }

    /// Single-octave feature noise in roughly `[-1, 1]`.
    fn feature(&self, x: i32, z: i32, frequency: f64) -> f64 {
        self.detail.get([f64::from(x) * frequency, f64::from(z) * frequency])
    }

    /// Surface height, mostly a few blocks above sea level.
    fn overworld_height(&self, x: i32, z: i32) -> i32 {
        70 + HILLS.sample(&self.height, x, z) as i32
    }

    fn overworld(&self, info: &WorldInfo, pos: BlockPos) -> Material {
        if pos.y == info.bounds.min_y {
            return Material::Bedrock;
        }
        let h = self.overworld_height(pos.x, pos.z);
        let roll = self.feature(pos.x, pos.z, 0.37);
        match pos.y {
            y if y < h - 3 => Material::Stone,
            y if y < h => Material::Dirt,
            y if y == h && roll > 0.85 => Material::Lava,
            y if y == h && h <= SEA_LEVEL => Material::Sand,
            y if y == h => Material::Grass,
            y if y < SEA_LEVEL => Material::Water,
            y if y == h + 1 && (0.6..0.7).contains(&roll) => Material::TallGrass,
            _ => Material::Air,
        }
    }

    fn nether(&self, info: &WorldInfo, pos: BlockPos) -> Material {
        if pos.y <= info.bounds.min_y || pos.y >= info.bounds.max_y - 1 {
            return Material::Bedrock;
        }
        let floor = 44 + CAVERN.sample(&self.height, pos.x, pos.z) as i32;
        let ceiling = floor + 18 + (5.0 * self.feature(pos.x, pos.z, 0.02)) as i32;
        let roll = self.feature(pos.x, pos.z, 0.41);
        match pos.y {
            y if y < floor => Material::Netherrack,
            y if y == floor && roll > 0.8 => Material::Magma,
            y if y == floor && roll < -0.6 => Material::SoulSand,
            y if y == floor => Material::Netherrack,
            y if y < 32 => Material::Lava,
            y if y <= ceiling => Material::Air,
            _ => Material::Netherrack,
        }
    }

    fn end(&self, pos: BlockPos) -> Material {
        let (fx, fz) = (f64::from(pos.x), f64::from(pos.z));
        let dist = (fx * fx + fz * fz).sqrt();
        let island = dist < 180.0 || (dist > 1000.0 && self.feature(pos.x, pos.z, 0.004) > 0.3);
        if !island {
            return Material::Air;
        }
        let top = 52 + ISLAND_TOP.sample(&self.height, pos.x, pos.z) as i32;
        if pos.y >= 40 && pos.y <= top {
            Material::EndStone
        } else {
            Material::Air
        }
    }
}

impl WorldPort for GeneratedTerrain {
    fn world_info(&self, world: &WorldName) -> Result<WorldInfo, WorldError> {
        self.worlds
            .get(world)
            .cloned()
            .ok_or_else(|| WorldError::NotLoaded(world.clone()))
    }

    fn material_at(&self, world: &WorldName, pos: BlockPos) -> Option<Material> {
        let info = self.worlds.get(world)?;
        if pos.y < info.bounds.min_y || pos.y >= info.bounds.max_y {
            return None;
        }
        Some(match info.environment {
            Environment::Overworld => self.overworld(info, pos),
            Environment::Nether => self.nether(info, pos),
            Environment::End => self.end(pos),
        })
    }

    fn highest_solid_y(&self, world: &WorldName, x: i32, z: i32) -> Option<i32> {
        let info = self.worlds.get(world)?;
        (info.bounds.min_y..info.bounds.max_y)
            .rev()
            .find(|&y| {
                self.material_at(world, BlockPos::new(x, y, z))
                    .is_some_and(Material::is_solid)
            })
    }

    fn biome_at(&self, world: &WorldName, pos: BlockPos) -> Option<String> {
        let info = self.worlds.get(world)?;
        let biome = match info.environment {
            Environment::Overworld => {
                let h = self.overworld_height(pos.x, pos.z);
                if h < SEA_LEVEL - 3 {
                    "OCEAN"
                } else if h <= SEA_LEVEL {
                    "BEACH"
                } else if self.feature(pos.x, pos.z, 0.005) >= 0.0 {
                    "PLAINS"
                } else {
                    "FOREST"
                }
            }
            Environment::Nether => "NETHER_WASTES",
            Environment::End => "THE_END",
        };
        Some(biome.to_string())
    }
}

#[cfg(test)]
mod tests {
    use wildwarp_domain::{is_safe, VerticalStrategy};

    use super::*;

    struct View<'a>(&'a GeneratedTerrain, WorldName);

    impl wildwarp_domain::BlockLookup for View<'_> {
        fn material_at(&self, pos: BlockPos) -> Option<Material> {
            self.0.material_at(&self.1, pos)
        }

        fn highest_solid_y(&self, x: i32, z: i32) -> Option<i32> {
            self.0.highest_solid_y(&self.1, x, z)
        }
    }

    #[test]
    fn unknown_world_is_not_loaded() {
        let terrain = GeneratedTerrain::vanilla(7);
        assert!(matches!(
            terrain.world_info(&WorldName::from("creative")),
            Err(WorldError::NotLoaded(_))
        ));
    }

    #[test]
    fn cells_outside_the_build_volume_are_unavailable() {
        let terrain = GeneratedTerrain::vanilla(7);
        let world = WorldName::from("world");
        assert!(terrain.material_at(&world, BlockPos::new(0, 320, 0)).is_none());
        assert_eq!(
            terrain.material_at(&world, BlockPos::new(0, -64, 0)),
            Some(Material::Bedrock)
        );
    }

    #[test]
    fn overworld_has_safe_columns() {
        let terrain = GeneratedTerrain::vanilla(7);
        let info = terrain.world_info(&WorldName::from("world")).unwrap();
        let strategy = VerticalStrategy::for_environment(info.environment, info.bounds);
        let view = View(&terrain, info.name.clone());
        let safe = (0..50)
            .map(|i| (i * 37, i * -53))
            .filter(|&(x, z)| is_safe(&view, BlockPos::new(x, strategy.resolve(&view, x, z).y, z)))
            .count();
        assert!(safe > 10, "only {safe} of 50 columns were safe");
    }

    #[test]
    fn same_seed_builds_the_same_terrain() {
        let a = GeneratedTerrain::vanilla(11);
        let b = GeneratedTerrain::vanilla(11);
        let world = WorldName::from("world");
        for i in 0..20 {
            let (x, z) = (i * 41, i * -29);
            assert_eq!(a.highest_solid_y(&world, x, z), b.highest_solid_y(&world, x, z));
            assert_eq!(
                a.biome_at(&world, BlockPos::new(x, 64, z)),
                b.biome_at(&world, BlockPos::new(x, 64, z))
            );
        }
    }

    #[test]
    fn nether_cavern_floor_sits_inside_the_scan_band() {
        let terrain = GeneratedTerrain::vanilla(7);
        let info = terrain.world_info(&WorldName::from("world_nether")).unwrap();
        let strategy = VerticalStrategy::for_environment(info.environment, info.bounds);
        let view = View(&terrain, info.name.clone());
        let y = strategy.resolve(&view, 100, 100).y;
        assert!((31..=119).contains(&y));
    }
}
