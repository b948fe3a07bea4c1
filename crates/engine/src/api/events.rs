//! Player lifecycle events that can interrupt a teleport.
//!
//! The host forwards movement, disconnect and death notifications through a
//! bounded channel; the handler turns each one into a cancellation check.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wildwarp_domain::{Location, PlayerId};

use crate::use_cases::teleport::TeleportOrchestrator;

/// Buffer size of the host -> engine event channel.
pub const EVENT_CHANNEL_BUFFER: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Moved { player: PlayerId, to: Location },
    Disconnected { player: PlayerId },
    Died { player: PlayerId },
}

impl PlayerEvent {
    pub fn player(&self) -> PlayerId {
        match self {
            Self::Moved { player, .. } | Self::Disconnected { player } | Self::Died { player } => {
                *player
            }
        }
    }
}

pub struct PlayerEventHandler {
    orchestrator: Arc<TeleportOrchestrator>,
}

impl PlayerEventHandler {
    pub fn new(orchestrator: Arc<TeleportOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Returns `true` when the event cancelled a teleport.
    pub async fn handle(&self, event: PlayerEvent) -> bool {
        match event {
            PlayerEvent::Moved { player, to } => self.orchestrator.handle_move(player, &to).await,
            PlayerEvent::Disconnected { player } => {
                self.orchestrator.handle_disconnect(player).await
            }
            PlayerEvent::Died { player } => self.orchestrator.handle_death(player).await,
        }
    }

    /// Consumes events until the channel closes or `cancel_token` fires.
    pub async fn run(
        self: Arc<Self>,
        mut events: mpsc::Receiver<PlayerEvent>,
        cancel_token: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    tracing::info!("Player event loop shutting down");
                    break;
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        tracing::info!("Player event channel closed");
                        break;
                    };
                    let player = event.player();
                    if self.handle(event).await {
                        tracing::debug!(player_id = %player, "Event cancelled a teleport");
                    }
                }
            }
        }
    }
}
