//! Block classification used by the safety rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Air,
    CaveAir,
    Stone,
    Dirt,
    Grass,
    Sand,
    RedSand,
    Gravel,
    Snow,
    PowderSnow,
    Ice,
    Water,
    Lava,
    Fire,
    SoulFire,
    Magma,
    Cactus,
    Campfire,
    SoulCampfire,
    PointedDripstone,
    Anvil,
    Tnt,
    Netherrack,
    SoulSand,
    EndStone,
    Obsidian,
    Bedrock,
    Leaves,
    Log,
    TallGrass,
    Flower,
}

impl Material {
    pub fn is_air(self) -> bool {
        matches!(self, Self::Air | Self::CaveAir)
    }

    pub fn is_liquid(self) -> bool {
        matches!(self, Self::Water | Self::Lava)
    }

    /// Whether an entity can stand on top of this block.
    pub fn is_solid(self) -> bool {
        !matches!(
            self,
            Self::Air
                | Self::CaveAir
                | Self::Water
                | Self::Lava
                | Self::Fire
                | Self::SoulFire
                | Self::PowderSnow
                | Self::TallGrass
                | Self::Flower
        )
    }

    /// Blocks that fall under gravity.
    pub fn is_falling(self) -> bool {
        matches!(self, Self::Sand | Self::RedSand | Self::Gravel | Self::Anvil)
    }

    /// Blocks that hurt, burn, sink, fall or explode under a standing entity.
    pub fn is_hazard(self) -> bool {
        self.is_falling()
            || matches!(
                self,
                Self::Lava
                    | Self::Fire
                    | Self::SoulFire
                    | Self::Magma
                    | Self::Cactus
                    | Self::PowderSnow
                    | Self::Campfire
                    | Self::SoulCampfire
                    | Self::PointedDripstone
                    | Self::Tnt
            )
    }
}
