//! Messenger that records everything it is asked to deliver.

use std::sync::Mutex;

use async_trait::async_trait;
use wildwarp_domain::{Message, MessageKey, PlayerId, SoundCue};

use crate::infrastructure::ports::MessagePort;

#[derive(Default)]
pub struct RecordingMessenger {
    messages: Mutex<Vec<(PlayerId, Message)>>,
    sounds: Mutex<Vec<(PlayerId, SoundCue)>>,
}

impl RecordingMessenger {
    pub fn messages_for(&self, player: PlayerId) -> Vec<Message> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Keys of chat messages, in delivery order.
    pub fn chat_keys_for(&self, player: PlayerId) -> Vec<MessageKey> {
        self.messages_for(player)
            .into_iter()
            .filter(|m| m.channel == wildwarp_domain::Channel::Chat)
            .map(|m| m.key)
            .collect()
    }

    /// Chat messages with `key`.
    pub fn find(&self, player: PlayerId, key: MessageKey) -> Vec<Message> {
        self.messages_for(player)
            .into_iter()
            .filter(|m| m.key == key && m.channel == wildwarp_domain::Channel::Chat)
            .collect()
    }

    pub fn count(&self, player: PlayerId, key: MessageKey) -> usize {
        self.find(player, key).len()
    }

    pub fn sounds_for(&self, player: PlayerId) -> Vec<SoundCue> {
        self.sounds
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, s)| *s)
            .collect()
    }
}

#[async_trait]
impl MessagePort for RecordingMessenger {
    async fn send(&self, player: PlayerId, message: Message) {
        self.messages.lock().unwrap().push((player, message));
    }

    async fn play_sound(&self, player: PlayerId, sound: SoundCue) {
        self.sounds.lock().unwrap().push((player, sound));
    }
}
