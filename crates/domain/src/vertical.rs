//! Vertical search strategies keyed by environment.
//!
//! Each strategy is a ranked list of scan ranges plus fallbacks. Resolution
//! walks the ranges in order and takes the first height that passes the range's
//! safety level. The chosen height is re-validated once; on failure the
//! environment's fallback height is substituted rather than retrying.

use crate::safety::{is_safe, BlockLookup, SafetyLevel};
use crate::value_objects::{BlockPos, Environment, WorldBounds};

/// Sea level of overworld-like environments.
pub const SEA_LEVEL: i32 = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    Down,
    Up,
}

/// Inclusive band of feet heights visited in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    pub from: i32,
    pub to: i32,
    pub direction: ScanDirection,
    pub level: SafetyLevel,
}

impl ScanRange {
    pub const fn down(from: i32, to: i32) -> Self {
        Self {
            from,
            to,
            direction: ScanDirection::Down,
            level: SafetyLevel::Standard,
        }
    }

    pub const fn up(from: i32, to: i32) -> Self {
        Self {
            from,
            to,
            direction: ScanDirection::Up,
            level: SafetyLevel::Standard,
        }
    }

    pub const fn strict(mut self) -> Self {
        self.level = SafetyLevel::Strict;
        self
    }

    /// Restricts the band to heights where feet, head and ground all exist.
    fn clamped(self, bounds: WorldBounds) -> Self {
        let lo = bounds.min_y + 1;
        let hi = bounds.max_y - 2;
        Self {
            from: self.from.clamp(lo, hi),
            to: self.to.clamp(lo, hi),
            ..self
        }
    }

    pub fn heights(&self) -> Box<dyn Iterator<Item = i32>> {
        match self.direction {
            ScanDirection::Down if self.from >= self.to => Box::new((self.to..=self.from).rev()),
            ScanDirection::Up if self.from <= self.to => Box::new(self.from..=self.to),
            _ => Box::new(std::iter::empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightSource {
    /// Found by the scan range with this rank (0-based).
    Scan(usize),
    /// Highest solid block of the column, plus one.
    Surface,
    /// Per-environment fallback height.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightResolution {
    pub y: i32,
    pub source: HeightSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerticalStrategy {
    pub environment: Environment,
    pub scans: Vec<ScanRange>,
    /// Try the column's highest solid block before the fallback height.
    pub surface_fallback: bool,
    pub fallback_height: i32,
    /// Accept the fallback height without reporting it.
    pub quiet_fallback: bool,
}

impl VerticalStrategy {
    pub fn for_environment(environment: Environment, bounds: WorldBounds) -> Self {
        let (scans, surface_fallback, fallback_height, quiet_fallback) = match environment {
            Environment::Overworld => {
                let top = bounds.max_y - 2;
                let bottom = bounds.min_y + 1;
                (
                    vec![
                        ScanRange::down(top, bottom),
                        ScanRange::up(SEA_LEVEL, top),
                        ScanRange::down(top, bottom).strict(),
                    ],
                    true,
                    SEA_LEVEL,
                    false,
                )
            }
            Environment::Nether => (
                vec![ScanRange::down(100, 31), ScanRange::up(31, 119)],
                false,
                64,
                false,
            ),
            Environment::End => (
                vec![ScanRange::down(100, 41), ScanRange::down(60, 41)],
                false,
                48,
                true,
            ),
        };
        Self {
            environment,
            scans: scans.into_iter().map(|s| s.clamped(bounds)).collect(),
            surface_fallback,
            fallback_height,
            quiet_fallback,
        }
    }

    pub fn resolve<W: BlockLookup + ?Sized>(&self, world: &W, x: i32, z: i32) -> HeightResolution {
        let chosen = self
            .scans
            .iter()
            .enumerate()
            .find_map(|(rank, scan)| {
                scan.heights()
                    .find(|&y| scan.level.check(world, BlockPos::new(x, y, z)))
                    .map(|y| HeightResolution {
                        y,
                        source: HeightSource::Scan(rank),
                    })
            })
            .or_else(|| self.surface(world, x, z))
            .unwrap_or(HeightResolution {
                y: self.fallback_height,
                source: HeightSource::Fallback,
            });

        if chosen.source != HeightSource::Fallback
            && !is_safe(world, BlockPos::new(x, chosen.y, z))
        {
            return HeightResolution {
                y: self.fallback_height,
                source: HeightSource::Fallback,
            };
        }
        chosen
    }

    fn surface<W: BlockLookup + ?Sized>(
        &self,
        world: &W,
        x: i32,
        z: i32,
    ) -> Option<HeightResolution> {
        if !self.surface_fallback {
            return None;
        }
        let y = world.highest_solid_y(x, z)? + 1;
        is_safe(world, BlockPos::new(x, y, z)).then_some(HeightResolution {
            y,
            source: HeightSource::Surface,
        })
    }
}
