//! Occupation-safety rules for a standing position.
//!
//! A position `(x, y, z)` names the cell an entity's feet occupy. The checks
//! are pure over a [`BlockLookup`]; the answer is best-effort because the
//! world may change between the check and the relocation.

use crate::value_objects::{BlockPos, Material};

/// Read access to block materials of one world.
///
/// `None` means the cell is unavailable (unloaded, outside the world); such
/// cells never count as safe.
pub trait BlockLookup {
    fn material_at(&self, pos: BlockPos) -> Option<Material>;

    /// Y of the highest solid block in the column, if the world can tell.
    fn highest_solid_y(&self, _x: i32, _z: i32) -> Option<i32> {
        None
    }
}

impl<F> BlockLookup for F
where
    F: Fn(BlockPos) -> Option<Material>,
{
    fn material_at(&self, pos: BlockPos) -> Option<Material> {
        self(pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyLevel {
    Standard,
    Strict,
}

impl SafetyLevel {
    pub fn check<W: BlockLookup + ?Sized>(self, world: &W, pos: BlockPos) -> bool {
        match self {
            Self::Standard => is_safe(world, pos),
            Self::Strict => is_strictly_safe(world, pos),
        }
    }
}

/// Ground is solid and harmless; feet and head cells are empty air.
pub fn is_safe<W: BlockLookup + ?Sized>(world: &W, pos: BlockPos) -> bool {
    let Some(ground) = world.material_at(pos.below()) else {
        return false;
    };
    if !ground.is_solid() || ground.is_hazard() || ground.is_liquid() {
        return false;
    }
    let open = |cell: BlockPos| {
        world
            .material_at(cell)
            .is_some_and(|m| m.is_air() && !m.is_liquid())
    };
    open(pos) && open(pos.above())
}

/// [`is_safe`] plus the 3x3 ring around the column: no liquid or hazard in
/// the ground ring, no hazard at feet height, nothing solid at head height.
pub fn is_strictly_safe<W: BlockLookup + ?Sized>(world: &W, pos: BlockPos) -> bool {
    if !is_safe(world, pos) {
        return false;
    }
    for dx in -1..=1 {
        for dz in -1..=1 {
            let ground = world.material_at(pos.offset(dx, -1, dz));
            if missing_or(ground, |m| m.is_liquid() || m.is_hazard()) {
                return false;
            }
            if dx == 0 && dz == 0 {
                continue;
            }
            let feet = world.material_at(pos.offset(dx, 0, dz));
            if missing_or(feet, Material::is_hazard) {
                return false;
            }
            let head = world.material_at(pos.offset(dx, 1, dz));
            if missing_or(head, Material::is_solid) {
                return false;
            }
        }
    }
    true
}

fn missing_or(cell: Option<Material>, bad: impl Fn(Material) -> bool) -> bool {
    match cell {
        Some(m) => bad(m),
        None => true,
    }
}
