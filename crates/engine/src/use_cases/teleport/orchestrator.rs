//! Teleport orchestrator.
//!
//! Drives a session through `Charging -> EffectsRunning -> LocatingTarget ->
//! Relocated`. Each stage runs as a continuation that first re-checks that the
//! session is still registered under the same id; whichever path removes the
//! registry entry (completion or cancellation) decides the session's fate.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wildwarp_domain::{
    effective_delay, Capability, Location, Message, MessageKey, PlayerId, Position, SessionId,
    TeleportPhase, TeleportSession, WorldName,
};

use super::effects::EffectSequencer;
use super::error::{FindLocationError, TeleportError};
use super::find_location::LocationFinder;
use super::post_effects::PostTeleportEffects;
use crate::infrastructure::cache::LocationCache;
use crate::infrastructure::config::EffectsConfig;
use crate::infrastructure::ports::{ClockPort, MessagePort, PlayerPort, WalletPort};
use crate::infrastructure::zones::ZoneDirectory;
use crate::stores::{CooldownLedger, SessionRegistry};

/// Tunables the orchestrator reads on every session.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    /// Cached locations older than this are discarded
    pub cache_max_age: Duration,
    /// Squared distance a player may drift before the session is cancelled
    pub move_tolerance_sq: f64,
    pub effects: EffectsConfig,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            cache_max_age: Duration::from_secs(300),
            move_tolerance_sq: 0.1,
            effects: EffectsConfig::default(),
        }
    }
}

/// Result of an accepted teleport request.
#[derive(Debug, Clone, PartialEq)]
pub struct TeleportStarted {
    pub session_id: SessionId,
    pub effective_delay: Duration,
    /// Amount debited, refunded if the session is cancelled
    pub charged: f64,
}

pub struct TeleportOrchestrator {
    zones: Arc<ZoneDirectory>,
    sessions: Arc<SessionRegistry>,
    cooldowns: Arc<CooldownLedger>,
    cache: Arc<LocationCache>,
    finder: Arc<LocationFinder>,
    sequencer: Arc<EffectSequencer>,
    post_effects: Arc<PostTeleportEffects>,
    wallet: Arc<dyn WalletPort>,
    players: Arc<dyn PlayerPort>,
    messages: Arc<dyn MessagePort>,
    clock: Arc<dyn ClockPort>,
    settings: OrchestratorSettings,
}

impl TeleportOrchestrator {
    pub fn new(
        zones: Arc<ZoneDirectory>,
        sessions: Arc<SessionRegistry>,
        cooldowns: Arc<CooldownLedger>,
        cache: Arc<LocationCache>,
        finder: Arc<LocationFinder>,
        sequencer: Arc<EffectSequencer>,
        post_effects: Arc<PostTeleportEffects>,
        wallet: Arc<dyn WalletPort>,
        players: Arc<dyn PlayerPort>,
        messages: Arc<dyn MessagePort>,
        clock: Arc<dyn ClockPort>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            zones,
            sessions,
            cooldowns,
            cache,
            finder,
            sequencer,
            post_effects,
            wallet,
            players,
            messages,
            clock,
            settings,
        }
    }

    pub fn is_teleporting(&self, player: PlayerId) -> bool {
        self.sessions.contains(player)
    }

    /// Handles a player's own teleport request.
    ///
    /// Rejections have no side effects beyond the notice sent to the player.
    pub async fn request(
        self: &Arc<Self>,
        player: PlayerId,
    ) -> Result<TeleportStarted, TeleportError> {
        let result = self.begin(player).await;
        match &result {
            Ok(started) => {
                tracing::info!(
                    player_id = %player,
                    session_id = %started.session_id,
                    delay_secs = started.effective_delay.as_secs(),
                    charged = started.charged,
                    "Teleport session started"
                );
            }
            Err(e) => {
                tracing::debug!(player_id = %player, error = %e, "Teleport request rejected");
                if let Some(message) = e.rejection_message() {
                    self.messages.send(player, message).await;
                }
            }
        }
        result
    }

    async fn begin(self: &Arc<Self>, player: PlayerId) -> Result<TeleportStarted, TeleportError> {
        // 1. The player must be connected; their world selects the zone
        let snapshot = self
            .players
            .snapshot(player)
            .await?
            .ok_or(TeleportError::PlayerOffline)?;
        let world = snapshot.location.world.clone();

        // 2. Zone configured and enabled
        let zone = self
            .zones
            .get(&world)
            .ok_or_else(|| TeleportError::ZoneNotConfigured(world.clone()))?;
        if !zone.is_enabled() {
            return Err(TeleportError::ZoneDisabled(world));
        }

        // 3. Single flight (re-checked atomically at reservation)
        if self.sessions.contains(player) {
            return Err(TeleportError::AlreadyTeleporting);
        }

        // 4. Cooldown, unless bypassed
        if let Some(left) = self
            .cooldowns
            .remaining(player, zone.cooldown(), self.clock.now())
        {
            if !self
                .players
                .has_capability(player, Capability::BypassCooldown)
                .await
            {
                return Err(TeleportError::Cooldown {
                    remaining_secs: left.as_secs(),
                });
            }
        }

        // 5. Affordability; a disabled wallet makes every teleport free
        let price = if self.wallet.is_enabled() {
            zone.price()
        } else {
            0.0
        };
        if price > 0.0 && !self.wallet.has_funds(player, price).await? {
            return Err(TeleportError::InsufficientFunds {
                price: self.wallet.format(price),
            });
        }

        // 6. Register the session in Charging
        let delay = effective_delay(zone.delay(), self.sequencer.timeline_duration());
        let session = TeleportSession::begin(
            player,
            snapshot.location,
            world,
            delay,
            self.clock.now(),
        );
        let session_id = session.id();
        let cancel = self
            .sessions
            .reserve(session.clone())
            .map_err(|_| TeleportError::AlreadyTeleporting)?;

        // 7. Debit; failure leaves no session behind
        if price > 0.0 {
            if let Err(e) = self.wallet.debit(player, price).await {
                self.sessions.remove_session(player, session_id);
                tracing::warn!(player_id = %player, error = %e, "Debit failed, teleport aborted");
                return Err(TeleportError::DebitFailed(e));
            }
            let withdrawn =
                Message::new(MessageKey::MoneyWithdrawn).with("price", self.wallet.format(price));
            self.messages.send(player, withdrawn).await;
        }

        // 8. Charging -> EffectsRunning, unless cancelled while debiting
        let promoted = self.sessions.update(player, session_id, |s| {
            s.record_charge(price)?;
            s.transition(TeleportPhase::EffectsRunning)
        });
        match promoted {
            Some(Ok(())) => {}
            None => {
                self.refund(player, price).await;
                return Err(TeleportError::Cancelled);
            }
            Some(Err(e)) => {
                self.sessions.remove_session(player, session_id);
                self.refund(player, price).await;
                return Err(e.into());
            }
        }

        // 9. Cosmetics first; the search only runs once they complete
        let started = Message::new(MessageKey::TeleportStarted).with("delay", delay.as_secs());
        self.messages.send(player, started).await;

        let this = self.clone();
        let token = cancel.clone();
        self.sequencer.start(&session, &cancel, move || async move {
            this.after_effects(player, session_id, token).await;
        });

        Ok(TeleportStarted {
            session_id,
            effective_delay: delay,
            charged: price,
        })
    }

    /// Continuation fired by the sequencer once the timeline completes.
    async fn after_effects(
        &self,
        player: PlayerId,
        session_id: SessionId,
        cancel: CancellationToken,
    ) {
        let Some(world) = self.enter_search(player, session_id) else {
            tracing::debug!(player_id = %player, "Session ended before the search started");
            return;
        };

        let located = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(player_id = %player, "Search abandoned, session cancelled");
                return;
            }
            located = self.locate(&world) => located,
        };

        // Completion claims the session; losing the claim means a cancel won.
        let Some(entry) = self.sessions.remove_session(player, session_id) else {
            return;
        };

        match located {
            Ok(target) => {
                if self.relocate(&entry.session, &target).await.is_ok() {
                    self.messages
                        .send(player, Message::new(MessageKey::TeleportSuccess))
                        .await;
                    self.post_effects.apply(player, &target).await;
                }
            }
            Err(e) => {
                tracing::info!(
                    player_id = %player,
                    world = %world,
                    error = %e,
                    "No safe location, session closed without refund"
                );
                self.messages
                    .send(player, Message::new(MessageKey::UnsafeLocation))
                    .await;
            }
        }
    }

    /// EffectsRunning -> LocatingTarget. `None` when the session is gone.
    fn enter_search(&self, player: PlayerId, session_id: SessionId) -> Option<WorldName> {
        self.sessions
            .update(player, session_id, |s| {
                s.transition(TeleportPhase::LocatingTarget)
                    .map(|()| s.target_world().clone())
            })?
            .ok()
    }

    /// A fresh cached location if one still checks out, otherwise a new search.
    async fn locate(&self, world: &WorldName) -> Result<Location, FindLocationError> {
        let zone = self
            .zones
            .get(world)
            .ok_or_else(|| FindLocationError::ZoneUnavailable(world.clone()))?;

        while let Some(cached) = self.cache.pop(world) {
            if cached.age() > self.settings.cache_max_age {
                tracing::debug!(
                    world = %world,
                    pos = %cached.pos,
                    "Discarding stale cached location"
                );
                continue;
            }
            if self.finder.revalidate(world, &zone, cached.pos).await {
                tracing::debug!(world = %world, pos = %cached.pos, "Using cached location");
                return Ok(Location::new(world.clone(), Position::standing_on(cached.pos)));
            }
            tracing::debug!(world = %world, pos = %cached.pos, "Cached location no longer safe");
        }

        let pos = self.finder.find(world, &zone).await?;
        Ok(Location::new(world.clone(), Position::standing_on(pos)))
    }

    /// Moves the player and starts their cooldown. A failed move refunds.
    async fn relocate(
        &self,
        session: &TeleportSession,
        target: &Location,
    ) -> Result<(), TeleportError> {
        let player = session.player_id();
        match self.players.relocate(player, target).await {
            Ok(()) => {
                self.cooldowns.record(player, self.clock.now());
                tracing::info!(player_id = %player, target = %target, "Player relocated");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(player_id = %player, error = %e, "Relocation failed");
                self.refund(player, session.charged()).await;
                self.messages
                    .send(player, Message::new(MessageKey::UnsafeLocation))
                    .await;
                Err(e.into())
            }
        }
    }

    /// Credits `amount` back. A failed credit is logged and otherwise ignored.
    pub(super) async fn refund(&self, player: PlayerId, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        match self.wallet.credit(player, amount).await {
            Ok(()) => {
                tracing::info!(player_id = %player, amount, "Teleport cost refunded");
                let refunded = Message::new(MessageKey::MoneyRefunded)
                    .with("price", self.wallet.format(amount));
                self.messages.send(player, refunded).await;
            }
            Err(e) => {
                tracing::warn!(player_id = %player, amount, error = %e, "Refund failed");
            }
        }
    }

    /// Teleports `target` straight into `world`, without cosmetics or cost.
    ///
    /// `issuer` is `None` for the console. A player issuer needs the
    /// `TeleportOthers` capability to move anyone but themself, and may not
    /// move players protected from others.
    pub async fn force_teleport(
        &self,
        issuer: Option<PlayerId>,
        target: PlayerId,
        world: &WorldName,
    ) -> Result<Location, TeleportError> {
        let result = self.force(issuer, target, world).await;
        match (&result, issuer) {
            (Ok(location), _) => {
                tracing::info!(player_id = %target, target = %location, "Forced teleport complete");
            }
            (Err(e), Some(issuer)) => {
                tracing::debug!(player_id = %target, error = %e, "Forced teleport rejected");
                if let Some(message) = e.rejection_message() {
                    self.messages.send(issuer, message).await;
                }
            }
            (Err(e), None) => {
                tracing::info!(player_id = %target, error = %e, "Forced teleport rejected");
            }
        }
        result
    }

    async fn force(
        &self,
        issuer: Option<PlayerId>,
        target: PlayerId,
        world: &WorldName,
    ) -> Result<Location, TeleportError> {
        let snapshot = self
            .players
            .snapshot(target)
            .await?
            .ok_or(TeleportError::PlayerOffline)?;

        if let Some(issuer) = issuer.filter(|i| *i != target) {
            if !self
                .players
                .has_capability(issuer, Capability::TeleportOthers)
                .await
            {
                return Err(TeleportError::NotPermitted);
            }
            if self
                .players
                .has_capability(target, Capability::ProtectedFromOthers)
                .await
            {
                return Err(TeleportError::TargetProtected(snapshot.name));
            }
        }

        let zone = self
            .zones
            .get(world)
            .ok_or_else(|| TeleportError::ZoneNotConfigured(world.clone()))?;
        if !zone.is_enabled() {
            return Err(TeleportError::ZoneDisabled(world.clone()));
        }

        let session = TeleportSession::begin(
            target,
            snapshot.location,
            world.clone(),
            Duration::ZERO,
            self.clock.now(),
        );
        let session_id = session.id();
        let cancel = self
            .sessions
            .reserve(session)
            .map_err(|_| TeleportError::AlreadyTeleporting)?;

        let entered = self.sessions.update(target, session_id, |s| {
            s.transition(TeleportPhase::EffectsRunning)?;
            s.transition(TeleportPhase::LocatingTarget)
        });
        if let Some(Err(e)) = entered {
            self.sessions.remove_session(target, session_id);
            return Err(e.into());
        }

        let located = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TeleportError::Cancelled),
            located = self.locate(world) => located,
        };
        let entry = self
            .sessions
            .remove_session(target, session_id)
            .ok_or(TeleportError::Cancelled)?;
        let location = located?;

        self.relocate(&entry.session, &location).await?;
        self.messages
            .send(target, Message::new(MessageKey::TeleportSuccess))
            .await;
        if let Some(issuer) = issuer.filter(|i| *i != target) {
            let notice = Message::new(MessageKey::PlayerTeleported)
                .with("player", &snapshot.name)
                .with("world", world);
            self.messages.send(issuer, notice).await;
        }
        Ok(location)
    }

    /// A safe location in `world`, without touching any session or the cache.
    pub async fn random_location(&self, world: &WorldName) -> Result<Location, TeleportError> {
        let zone = self
            .zones
            .get(world)
            .ok_or_else(|| TeleportError::ZoneNotConfigured(world.clone()))?;
        let pos = self.finder.find(world, &zone).await?;
        Ok(Location::new(world.clone(), Position::standing_on(pos)))
    }

    pub(super) fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub(super) fn sequencer(&self) -> &EffectSequencer {
        &self.sequencer
    }

    pub(super) fn messages(&self) -> &dyn MessagePort {
        self.messages.as_ref()
    }

    pub(super) fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }
}
