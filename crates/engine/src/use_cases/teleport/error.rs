//! Teleport use case errors.

use wildwarp_domain::{DomainError, Message, MessageKey, WorldName};

use crate::infrastructure::ports::{PlayerError, WalletError, WorldError};

/// Errors from the location search.
#[derive(Debug, thiserror::Error)]
pub enum FindLocationError {
    #[error("No safe location found after {attempts} attempts")]
    NotFound { attempts: u32 },

    #[error("World unavailable: {0}")]
    WorldUnavailable(#[from] WorldError),

    /// The world's zone was removed by a reload while the search was pending.
    #[error("No teleport zone for world {0}")]
    ZoneUnavailable(WorldName),
}

/// Errors from requesting, forcing or completing a teleport.
#[derive(Debug, thiserror::Error)]
pub enum TeleportError {
    #[error("World {0} has no teleport zone")]
    ZoneNotConfigured(WorldName),

    #[error("Teleport is disabled in world {0}")]
    ZoneDisabled(WorldName),

    #[error("Player is already teleporting")]
    AlreadyTeleporting,

    #[error("Cooldown active: {remaining_secs}s remaining")]
    Cooldown { remaining_secs: u64 },

    #[error("Insufficient funds: teleport costs {price}")]
    InsufficientFunds { price: String },

    #[error("Debit failed: {0}")]
    DebitFailed(#[source] WalletError),

    #[error("Player is offline")]
    PlayerOffline,

    #[error("Issuer may not teleport other players")]
    NotPermitted,

    #[error("Player {0} is protected from being teleported by others")]
    TargetProtected(String),

    #[error("Teleport was cancelled")]
    Cancelled,

    #[error(transparent)]
    Search(#[from] FindLocationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl TeleportError {
    /// Player-facing notice for a rejection, `None` when the player is not told.
    pub fn rejection_message(&self) -> Option<Message> {
        let message = match self {
            Self::ZoneNotConfigured(_) => Message::new(MessageKey::WorldNotConfigured),
            Self::ZoneDisabled(_) => Message::new(MessageKey::WorldDisabled),
            Self::AlreadyTeleporting => Message::new(MessageKey::AlreadyTeleporting),
            Self::Cooldown { remaining_secs } => {
                Message::new(MessageKey::Cooldown).with("time", remaining_secs)
            }
            Self::InsufficientFunds { price } => {
                Message::new(MessageKey::NotEnoughMoney).with("price", price)
            }
            Self::TargetProtected(name) => {
                Message::new(MessageKey::PlayerProtected).with("player", name)
            }
            Self::Search(_) => Message::new(MessageKey::UnsafeLocation),
            Self::DebitFailed(_)
            | Self::PlayerOffline
            | Self::NotPermitted
            | Self::Cancelled
            | Self::Domain(_)
            | Self::Player(_)
            | Self::Wallet(_) => return None,
        };
        Some(message)
    }
}
