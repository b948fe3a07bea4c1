//! Error types for port operations.

use wildwarp_domain::{PlayerId, WorldName};

/// Wallet operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WalletError {
    #[error("Insufficient funds for {player}: needed {needed}")]
    InsufficientFunds { player: PlayerId, needed: f64 },

    #[error("Unknown account: {0}")]
    UnknownAccount(PlayerId),

    /// Economy backend failed or is unreachable.
    #[error("Wallet unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerError {
    #[error("Player {0} is offline")]
    Offline(PlayerId),

    #[error("Relocation of {player} failed: {message}")]
    RelocationFailed { player: PlayerId, message: String },
}

impl PlayerError {
    pub fn relocation_failed(player: PlayerId, message: impl ToString) -> Self {
        Self::RelocationFailed {
            player,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum WorldError {
    #[error("World not loaded: {0}")]
    NotLoaded(WorldName),
}
