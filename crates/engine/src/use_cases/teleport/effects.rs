//! Effect sequencer: paces the cosmetic countdown and gates relocation.
//!
//! One task per session ticks through the timeline on a fixed interval. The
//! task owns a child of the session's cancellation token; completion fires
//! only if the task can still remove its own running entry, so a cancel that
//! lands on the same tick always wins.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use wildwarp_domain::{
    Channel, EffectCue, EffectTimeline, Message, MessageKey, PlayerId, SessionId, TeleportSession,
};

use crate::infrastructure::config::EffectsConfig;
use crate::infrastructure::ports::MessagePort;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    Completed,
    Cancelled,
}

struct Running {
    session_id: SessionId,
    cancel: CancellationToken,
}

pub struct EffectSequencer {
    messages: Arc<dyn MessagePort>,
    timeline: EffectTimeline,
    config: EffectsConfig,
    running: DashMap<PlayerId, Running>,
}

impl EffectSequencer {
    pub fn new(
        messages: Arc<dyn MessagePort>,
        timeline: EffectTimeline,
        config: EffectsConfig,
    ) -> Self {
        Self {
            messages,
            timeline,
            config,
            running: DashMap::new(),
        }
    }

    /// Wall time of the full timeline at the configured tick rate.
    pub fn timeline_duration(&self) -> Duration {
        self.timeline.duration(self.config.tick_interval)
    }

    /// Ticks until completion: the timeline, held longer if the effective
    /// delay needs more.
    pub fn ticks_for(&self, effective_delay: Duration) -> u32 {
        let interval = self.config.tick_interval.as_millis().max(1);
        let hold = effective_delay.as_millis().div_ceil(interval);
        let hold = u32::try_from(hold).unwrap_or(u32::MAX);
        self.timeline.total_ticks().max(hold)
    }

    pub fn is_running(&self, player: PlayerId) -> bool {
        self.running.contains_key(&player)
    }

    /// Starts the timeline for `session`. `on_complete` runs at most once,
    /// after the last tick, unless the sequence was cancelled first.
    pub fn start<F, Fut>(
        self: &Arc<Self>,
        session: &TeleportSession,
        parent: &CancellationToken,
        on_complete: F,
    ) -> JoinHandle<SequenceOutcome>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let player = session.player_id();
        let session_id = session.id();
        let cancel = parent.child_token();
        let total_ticks = self.ticks_for(session.effective_delay());

        if let Some(stale) = self.running.insert(
            player,
            Running {
                session_id,
                cancel: cancel.clone(),
            },
        ) {
            stale.cancel.cancel();
        }

        let this = self.clone();
        tokio::spawn(async move {
            let outcome = this.run(player, total_ticks, &cancel).await;
            let claimed = this
                .running
                .remove_if(&player, |_, r| r.session_id == session_id)
                .is_some();

            if outcome == SequenceOutcome::Completed && claimed && !cancel.is_cancelled() {
                tracing::debug!(
                    player_id = %player,
                    session_id = %session_id,
                    "Effect timeline complete"
                );
                on_complete().await;
                SequenceOutcome::Completed
            } else {
                tracing::debug!(
                    player_id = %player,
                    session_id = %session_id,
                    "Effect timeline cancelled"
                );
                SequenceOutcome::Cancelled
            }
        })
    }

    /// Stops the player's sequence. Returns `false` when nothing was running.
    pub fn cancel(&self, player: PlayerId) -> bool {
        match self.running.remove(&player) {
            Some((_, running)) => {
                running.cancel.cancel();
                true
            }
            None => false,
        }
    }

    async fn run(
        &self,
        player: PlayerId,
        total_ticks: u32,
        cancel: &CancellationToken,
    ) -> SequenceOutcome {
        let mut ticker = tokio::time::interval(self.config.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for tick in 0..=total_ticks {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return SequenceOutcome::Cancelled,
                _ = ticker.tick() => {}
            }
            if tick == total_ticks {
                break;
            }
            if !self.config.enabled {
                continue;
            }
            if let Some(cue) = self.timeline.cue_at(tick) {
                self.render(player, cue).await;
            }
        }

        if cancel.is_cancelled() {
            SequenceOutcome::Cancelled
        } else {
            SequenceOutcome::Completed
        }
    }

    async fn render(&self, player: PlayerId, cue: EffectCue) {
        let channel = if self.config.use_action_bar {
            Channel::ActionBar
        } else {
            Channel::Chat
        };

        match cue {
            EffectCue::Flavor { stage, variant } => {
                let key = MessageKey::StageFlavor { stage, variant };
                self.messages
                    .send(player, Message::new(key).on(channel))
                    .await;
            }
            EffectCue::CountdownLeadIn => {
                self.messages
                    .send(player, Message::new(MessageKey::CountdownLeadIn).on(channel))
                    .await;
            }
            EffectCue::Countdown(count) => {
                if self.config.countdown_titles {
                    let title = Message::new(MessageKey::Countdown)
                        .on(Channel::Title)
                        .with("count", count);
                    self.messages.send(player, title).await;
                }
                let line = Message::new(MessageKey::Countdown)
                    .on(channel)
                    .with("count", count);
                self.messages.send(player, line).await;
            }
            EffectCue::Flash => {
                if self.config.countdown_titles {
                    self.messages
                        .send(player, Message::new(MessageKey::TeleportFlash).on(Channel::Title))
                        .await;
                }
                self.messages
                    .send(player, Message::new(MessageKey::TeleportFlash).on(channel))
                    .await;
            }
        }
        self.messages.play_sound(player, cue.sound()).await;
    }
}
