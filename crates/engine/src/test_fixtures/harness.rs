//! A fully wired orchestrator over in-memory adapters and a paused clock.

use std::sync::Arc;

use chrono::Utc;
use wildwarp_domain::{Location, PlayerId, Position, WorldName, WorldZoneConfig};

use super::{RecordingMessenger, ScriptedWorld};
use crate::app::{App, Ports};
use crate::infrastructure::clock::{FixedClock, SequenceRandom};
use crate::infrastructure::config::{AppConfig, EffectsConfig, PostTeleportConfig};
use crate::infrastructure::players::InMemoryPlayers;
use crate::infrastructure::ports::WalletPort;
use crate::infrastructure::wallet::InMemoryWallet;
use crate::infrastructure::zones::ZoneDirectory;
use crate::use_cases::teleport::TeleportOrchestrator;

pub struct HarnessOptions {
    pub zone: WorldZoneConfig,
    pub world: ScriptedWorld,
    pub effects: EffectsConfig,
    pub post_teleport: PostTeleportConfig,
    pub wallet_enabled: bool,
    /// Replaces the in-memory wallet, e.g. with a mock
    pub wallet: Option<Arc<dyn WalletPort>>,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            zone: WorldZoneConfig::new(100, 200)
                .and_then(|z| z.with_delay_secs(0))
                .and_then(|z| z.with_cooldown_secs(30))
                .unwrap(),
            world: ScriptedWorld::flat("world"),
            effects: EffectsConfig::default(),
            post_teleport: PostTeleportConfig {
                show_location: false,
                ..PostTeleportConfig::default()
            },
            wallet_enabled: true,
            wallet: None,
        }
    }
}

pub struct Harness {
    pub app: App,
    pub orchestrator: Arc<TeleportOrchestrator>,
    pub players: Arc<InMemoryPlayers>,
    pub wallet: Arc<InMemoryWallet>,
    pub messages: Arc<RecordingMessenger>,
    pub clock: Arc<FixedClock>,
    pub random: Arc<SequenceRandom>,
    pub world: WorldName,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(HarnessOptions::default())
    }

    pub fn with(options: HarnessOptions) -> Self {
        let world = options.world.name().clone();
        let players = Arc::new(InMemoryPlayers::new());
        let wallet = Arc::new(InMemoryWallet::new(options.wallet_enabled));
        let messages = Arc::new(RecordingMessenger::default());
        let clock = Arc::new(FixedClock::at(Utc::now()));
        let random = Arc::new(SequenceRandom::new(vec![0.5, 0.25]));

        let config = AppConfig {
            effects: options.effects,
            post_teleport: options.post_teleport,
            ..AppConfig::default()
        };
        let zones = Arc::new(ZoneDirectory::new([(world.clone(), options.zone)]));
        let wallet_port: Arc<dyn WalletPort> = match options.wallet {
            Some(port) => port,
            None => wallet.clone(),
        };
        let app = App::new(
            &config,
            zones,
            Ports {
                wallet: wallet_port,
                world: Arc::new(options.world),
                players: players.clone(),
                messages: messages.clone(),
                clock: clock.clone(),
                random: random.clone(),
            },
        );

        Self {
            orchestrator: app.orchestrator().clone(),
            app,
            players,
            wallet,
            messages,
            clock,
            random,
            world,
        }
    }

    pub fn spawn_point(&self) -> Location {
        Location::new(self.world.clone(), Position::new(0.5, 64.0, 0.5))
    }

    /// Joins a player at the spawn point with `balance` in their account.
    pub fn join(&self, name: &str, balance: f64) -> PlayerId {
        let player = self.players.join(name, self.spawn_point());
        self.wallet.deposit(player, balance);
        player
    }
}
