//! TeleportSession entity - One in-flight teleport per player
//!
//! A session exists from the moment a request passes validation until it is
//! relocated or cancelled. Its phase only moves forward:
//!
//! ```text
//! Charging -> EffectsRunning -> LocatingTarget -> Relocated
//!     \              \                \
//!      +--------------+----------------+--> Cancelled
//! ```

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{PlayerId, SessionId, WorldName};
use crate::value_objects::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeleportPhase {
    Charging,
    EffectsRunning,
    LocatingTarget,
    Relocated,
    Cancelled,
}

impl TeleportPhase {
    pub fn can_transition_to(self, next: TeleportPhase) -> bool {
        use TeleportPhase::*;
        matches!(
            (self, next),
            (Charging, EffectsRunning)
                | (EffectsRunning, LocatingTarget)
                | (LocatingTarget, Relocated)
                | (Charging | EffectsRunning | LocatingTarget, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Relocated | Self::Cancelled)
    }
}

impl fmt::Display for TeleportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Charging => "Charging",
            Self::EffectsRunning => "EffectsRunning",
            Self::LocatingTarget => "LocatingTarget",
            Self::Relocated => "Relocated",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Why a session was torn down before relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    Moved,
    Disconnected,
    Died,
    Requested,
    Shutdown,
}

impl CancelReason {
    /// Value of the `reason` placeholder in cancel notices.
    pub fn as_placeholder(self) -> &'static str {
        match self {
            Self::Moved => "movement",
            Self::Disconnected => "disconnect",
            Self::Died => "death",
            Self::Requested => "request",
            Self::Shutdown => "shutdown",
        }
    }

    /// A disconnected player has nobody to tell.
    pub fn notifies_player(self) -> bool {
        !matches!(self, Self::Disconnected)
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_placeholder())
    }
}

/// `max(configured_delay, cosmetic_timeline_duration)`
pub fn effective_delay(configured: Duration, timeline: Duration) -> Duration {
    configured.max(timeline)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleportSession {
    id: SessionId,
    player_id: PlayerId,
    /// Where the player stood when the request was accepted
    origin: Location,
    /// World the player will be relocated into
    target_world: WorldName,
    effective_delay: Duration,
    /// Amount debited for this session, refundable until relocation
    charged: f64,
    started_at: DateTime<Utc>,
    phase: TeleportPhase,
}

impl TeleportSession {
    pub fn begin(
        player_id: PlayerId,
        origin: Location,
        target_world: WorldName,
        effective_delay: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            player_id,
            origin,
            target_world,
            effective_delay,
            charged: 0.0,
            started_at: now,
            phase: TeleportPhase::Charging,
        }
    }

    // Read accessors
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    pub fn target_world(&self) -> &WorldName {
        &self.target_world
    }

    pub fn effective_delay(&self) -> Duration {
        self.effective_delay
    }

    pub fn charged(&self) -> f64 {
        self.charged
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }

    /// Records the debited amount. Only valid while charging.
    pub fn record_charge(&mut self, amount: f64) -> Result<(), DomainError> {
        if self.phase != TeleportPhase::Charging {
            return Err(DomainError::invalid_state_transition(format!(
                "cannot charge a session in phase {}",
                self.phase
            )));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(format!(
                "charge must be a finite amount >= 0, got {amount}"
            )));
        }
        self.charged = amount;
        Ok(())
    }

    pub fn transition(&mut self, next: TeleportPhase) -> Result<(), DomainError> {
        if !self.phase.can_transition_to(next) {
            return Err(DomainError::invalid_state_transition(format!(
                "{} -> {}",
                self.phase, next
            )));
        }
        self.phase = next;
        Ok(())
    }

    /// True when `to` is further than the tolerance from the origin, or in a
    /// different world.
    pub fn moved_beyond(&self, to: &Location, tolerance_sq: f64) -> bool {
        match self.origin.distance_squared(to) {
            Some(d) => d > tolerance_sq,
            None => true,
        }
    }
}
