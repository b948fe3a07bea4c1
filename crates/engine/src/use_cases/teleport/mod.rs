//! Teleport use cases.

mod cancel;
mod effects;
mod error;
mod find_location;
mod orchestrator;
mod post_effects;
mod warm_cache;

#[cfg(test)]
mod tests;

pub use effects::{EffectSequencer, SequenceOutcome};
pub use error::{FindLocationError, TeleportError};
pub use find_location::LocationFinder;
pub use orchestrator::{OrchestratorSettings, TeleportOrchestrator, TeleportStarted};
pub use post_effects::PostTeleportEffects;
pub use warm_cache::{CacheWarmer, WarmReport};

use std::sync::Arc;

/// Container for teleport use cases.
pub struct TeleportUseCases {
    pub orchestrator: Arc<TeleportOrchestrator>,
    pub warmer: Arc<CacheWarmer>,
}

impl TeleportUseCases {
    pub fn new(orchestrator: Arc<TeleportOrchestrator>, warmer: Arc<CacheWarmer>) -> Self {
        Self {
            orchestrator,
            warmer,
        }
    }
}
