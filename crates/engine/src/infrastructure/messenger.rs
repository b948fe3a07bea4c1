//! Messaging adapter that writes every message to the log.

use async_trait::async_trait;
use wildwarp_domain::{Message, PlayerId, SoundCue};

use crate::infrastructure::ports::MessagePort;

#[derive(Default)]
pub struct TracingMessenger;

impl TracingMessenger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessagePort for TracingMessenger {
    async fn send(&self, player: PlayerId, message: Message) {
        let placeholders = message
            .placeholders
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            player_id = %player,
            key = %message.key,
            channel = ?message.channel,
            placeholders = %placeholders,
            "Message"
        );
    }

    async fn play_sound(&self, player: PlayerId, sound: SoundCue) {
        tracing::debug!(player_id = %player, sound = ?sound, "Sound");
    }
}
