//! Cosmetic countdown timeline.
//!
//! The timeline is an ordered list of stage descriptors measured in ticks.
//! Its length is computed from the stages; the sequencer completes on the
//! first tick at or past the end.

use std::time::Duration;

use crate::messages::SoundCue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Ambient stage with cycling message variants.
    Flavor { stage: u8, variants: u8 },
    /// Lead-in tick followed by a numeric countdown.
    Countdown { from: u8 },
    /// Final flash and sound right before completion.
    Flash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDescriptor {
    pub kind: StageKind,
    pub ticks: u32,
}

/// What to render on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectCue {
    Flavor { stage: u8, variant: u8 },
    CountdownLeadIn,
    Countdown(u8),
    Flash,
}

impl EffectCue {
    pub fn sound(self) -> SoundCue {
        match self {
            Self::Flavor { stage, .. } => SoundCue::Stage(stage),
            Self::CountdownLeadIn | Self::Countdown(_) => SoundCue::CountdownTick,
            Self::Flash => SoundCue::Teleport,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectTimeline {
    stages: Vec<StageDescriptor>,
}

impl EffectTimeline {
    pub fn new(stages: Vec<StageDescriptor>) -> Self {
        Self { stages }
    }

    /// Four ambient stages of three ticks, a four-tick countdown and a flash.
    pub fn standard() -> Self {
        let flavor = |stage| StageDescriptor {
            kind: StageKind::Flavor { stage, variants: 3 },
            ticks: 3,
        };
        Self::new(vec![
            flavor(1),
            flavor(2),
            flavor(3),
            flavor(4),
            StageDescriptor {
                kind: StageKind::Countdown { from: 3 },
                ticks: 4,
            },
            StageDescriptor {
                kind: StageKind::Flash,
                ticks: 1,
            },
        ])
    }

    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    pub fn total_ticks(&self) -> u32 {
        self.stages.iter().map(|s| s.ticks).sum()
    }

    pub fn duration(&self, tick_interval: Duration) -> Duration {
        tick_interval.saturating_mul(self.total_ticks())
    }

    /// Cue for tick `tick`, or `None` past the end of the timeline.
    pub fn cue_at(&self, tick: u32) -> Option<EffectCue> {
        let mut start = 0;
        for stage in &self.stages {
            if tick < start + stage.ticks {
                let offset = tick - start;
                return Some(match stage.kind {
                    StageKind::Flavor { stage, variants } => EffectCue::Flavor {
                        stage,
                        variant: (offset % u32::from(variants.max(1))) as u8,
                    },
                    StageKind::Countdown { .. } if offset == 0 => EffectCue::CountdownLeadIn,
                    StageKind::Countdown { from } => {
                        EffectCue::Countdown(from.saturating_sub((offset - 1) as u8).max(1))
                    }
                    StageKind::Flash => EffectCue::Flash,
                });
            }
            start += stage.ticks;
        }
        None
    }
}

impl Default for EffectTimeline {
    fn default() -> Self {
        Self::standard()
    }
}
