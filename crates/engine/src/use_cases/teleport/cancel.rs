//! Out-of-band cancellation: movement, disconnect, death, explicit request
//! and shutdown.

use wildwarp_domain::{
    CancelReason, Channel, Location, Message, MessageKey, PlayerId, SoundCue, TeleportPhase,
};

use super::orchestrator::TeleportOrchestrator;

impl TeleportOrchestrator {
    /// Tears down the player's session, refunding whatever it charged.
    ///
    /// Returns `false` when there was nothing to cancel; calling it again is
    /// harmless.
    pub async fn cancel(&self, player: PlayerId, reason: CancelReason) -> bool {
        let Some(entry) = self.sessions().remove(player) else {
            self.sequencer().cancel(player);
            return false;
        };
        entry.cancel.cancel();
        self.sequencer().cancel(player);

        let mut session = entry.session;
        let phase = session.phase();
        if let Err(e) = session.transition(TeleportPhase::Cancelled) {
            tracing::debug!(
                player_id = %player,
                error = %e,
                "Cancelled session from unexpected phase"
            );
        }
        tracing::info!(
            player_id = %player,
            session_id = %session.id(),
            reason = %reason,
            phase = %phase,
            "Teleport cancelled"
        );

        self.refund(player, session.charged()).await;
        if reason.notifies_player() {
            self.notify_cancelled(player, reason).await;
        }
        true
    }

    /// Cancels the session if the player left the tolerance around its origin.
    pub async fn handle_move(&self, player: PlayerId, to: &Location) -> bool {
        let Some(session) = self.sessions().get(player) else {
            return false;
        };
        if !session.moved_beyond(to, self.settings().move_tolerance_sq) {
            return false;
        }
        self.cancel(player, CancelReason::Moved).await
    }

    pub async fn handle_disconnect(&self, player: PlayerId) -> bool {
        self.cancel(player, CancelReason::Disconnected).await
    }

    pub async fn handle_death(&self, player: PlayerId) -> bool {
        self.cancel(player, CancelReason::Died).await
    }

    /// Cancels every session and refunds held amounts. Returns how many
    /// sessions were torn down.
    pub async fn shutdown(&self) -> usize {
        let mut cancelled = 0;
        for player in self.sessions().players() {
            if self.cancel(player, CancelReason::Shutdown).await {
                cancelled += 1;
            }
        }
        tracing::info!(cancelled, "Teleport sessions shut down");
        cancelled
    }

    async fn notify_cancelled(&self, player: PlayerId, reason: CancelReason) {
        let notice = Message::new(MessageKey::TeleportCancelled).with("reason", reason);
        let effects = &self.settings().effects;
        if effects.enabled && effects.use_action_bar {
            self.messages()
                .send(player, notice.clone().on(Channel::ActionBar))
                .await;
        }
        self.messages().send(player, notice).await;

        if effects.enabled {
            self.messages()
                .send(player, Message::new(MessageKey::CancelTitle).on(Channel::Title))
                .await;
            self.messages().play_sound(player, SoundCue::Cancel).await;
        }
    }
}
