//! Application state and composition.

use std::sync::Arc;

use wildwarp_domain::EffectTimeline;

use crate::api::PlayerEventHandler;
use crate::infrastructure::{
    cache::LocationCache,
    config::AppConfig,
    ports::{ClockPort, MessagePort, PlayerPort, RandomPort, WalletPort, WorldPort},
    zones::ZoneDirectory,
};
use crate::stores::{CooldownLedger, SessionRegistry};
use crate::use_cases::teleport::{
    CacheWarmer, EffectSequencer, LocationFinder, OrchestratorSettings, PostTeleportEffects,
    TeleportOrchestrator, TeleportUseCases,
};

/// Main application state.
///
/// Holds the runtime stores and use cases. Passed to the host's event and
/// command handlers.
pub struct App {
    pub zones: Arc<ZoneDirectory>,
    pub stores: Stores,
    pub use_cases: UseCases,
    pub events: Arc<PlayerEventHandler>,
}

/// External services the engine talks to.
pub struct Ports {
    pub wallet: Arc<dyn WalletPort>,
    pub world: Arc<dyn WorldPort>,
    pub players: Arc<dyn PlayerPort>,
    pub messages: Arc<dyn MessagePort>,
    pub clock: Arc<dyn ClockPort>,
    pub random: Arc<dyn RandomPort>,
}

/// In-memory runtime state.
pub struct Stores {
    pub sessions: Arc<SessionRegistry>,
    pub cooldowns: Arc<CooldownLedger>,
    pub cache: Arc<LocationCache>,
}

/// Container for all use cases.
pub struct UseCases {
    pub teleport: TeleportUseCases,
}

impl App {
    pub fn new(config: &AppConfig, zones: Arc<ZoneDirectory>, ports: Ports) -> Self {
        let stores = Stores {
            sessions: Arc::new(SessionRegistry::new()),
            cooldowns: Arc::new(CooldownLedger::new()),
            cache: Arc::new(LocationCache::new(config.cache.capacity)),
        };

        let finder = Arc::new(LocationFinder::new(
            ports.world.clone(),
            ports.random.clone(),
            config.search.max_attempts,
        ));
        let sequencer = Arc::new(EffectSequencer::new(
            ports.messages.clone(),
            EffectTimeline::standard(),
            config.effects.clone(),
        ));
        let post_effects = Arc::new(PostTeleportEffects::new(
            ports.players.clone(),
            ports.world.clone(),
            ports.messages.clone(),
            config.post_teleport.clone(),
        ));

        let orchestrator = Arc::new(TeleportOrchestrator::new(
            zones.clone(),
            stores.sessions.clone(),
            stores.cooldowns.clone(),
            stores.cache.clone(),
            finder.clone(),
            sequencer,
            post_effects,
            ports.wallet,
            ports.players,
            ports.messages,
            ports.clock,
            OrchestratorSettings {
                cache_max_age: config.cache.max_age,
                move_tolerance_sq: config.search.move_tolerance_sq,
                effects: config.effects.clone(),
            },
        ));
        let warmer = Arc::new(CacheWarmer::new(
            zones.clone(),
            finder,
            stores.cache.clone(),
        ));
        let events = Arc::new(PlayerEventHandler::new(orchestrator.clone()));

        Self {
            zones,
            stores,
            use_cases: UseCases {
                teleport: TeleportUseCases::new(orchestrator, warmer),
            },
            events,
        }
    }

    pub fn orchestrator(&self) -> &Arc<TeleportOrchestrator> {
        &self.use_cases.teleport.orchestrator
    }
}
