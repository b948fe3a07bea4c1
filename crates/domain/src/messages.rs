//! Player-facing message keys and sound cues.
//!
//! The engine only names what to say; wording, colours and localization live
//! in the messaging service behind the key.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// `{delay}`
    TeleportStarted,
    TeleportSuccess,
    /// `{reason}`
    TeleportCancelled,
    CancelTitle,
    /// `{time}`
    Cooldown,
    UnsafeLocation,
    WorldDisabled,
    WorldNotConfigured,
    /// `{price}`
    NotEnoughMoney,
    /// `{price}`
    MoneyWithdrawn,
    /// `{price}`
    MoneyRefunded,
    AlreadyTeleporting,
    /// `{player}`, `{world}`
    PlayerTeleported,
    /// `{player}`
    PlayerProtected,
    StageFlavor { stage: u8, variant: u8 },
    CountdownLeadIn,
    /// `{count}`
    Countdown,
    TeleportFlash,
    /// `{x}`, `{y}`, `{z}`, `{world}`, `{biome}`
    LocationInfo,
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeleportStarted => f.write_str("teleport-started"),
            Self::TeleportSuccess => f.write_str("teleport-success"),
            Self::TeleportCancelled => f.write_str("teleport-cancelled"),
            Self::CancelTitle => f.write_str("effects.cancel-title"),
            Self::Cooldown => f.write_str("cooldown"),
            Self::UnsafeLocation => f.write_str("unsafe-location"),
            Self::WorldDisabled => f.write_str("world-disabled"),
            Self::WorldNotConfigured => f.write_str("world-not-configured"),
            Self::NotEnoughMoney => f.write_str("not-enough-money"),
            Self::MoneyWithdrawn => f.write_str("money-withdrawn"),
            Self::MoneyRefunded => f.write_str("money-refunded"),
            Self::AlreadyTeleporting => f.write_str("already-teleporting"),
            Self::PlayerTeleported => f.write_str("player-teleported"),
            Self::PlayerProtected => f.write_str("player-protected"),
            Self::StageFlavor { stage, variant } => {
                write!(f, "effects.stage-{stage}.{}", variant + 1)
            }
            Self::CountdownLeadIn => f.write_str("effects.countdown-lead-in"),
            Self::Countdown => f.write_str("effects.countdown"),
            Self::TeleportFlash => f.write_str("effects.teleport"),
            Self::LocationInfo => f.write_str("location-info"),
        }
    }
}

/// Where a message is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[default]
    Chat,
    ActionBar,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub key: MessageKey,
    pub channel: Channel,
    pub placeholders: Vec<(String, String)>,
}

impl Message {
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            channel: Channel::Chat,
            placeholders: Vec::new(),
        }
    }

    pub fn on(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.placeholders.push((name.into(), value.to_string()));
        self
    }

    pub fn placeholder(&self, name: &str) -> Option<&str> {
        self.placeholders
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Ambient sound of flavor stage 1..=4.
    Stage(u8),
    CountdownTick,
    Teleport,
    Cancel,
}
