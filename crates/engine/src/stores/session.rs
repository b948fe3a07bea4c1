//! Session registry: player id -> in-flight teleport session.
//!
//! Existence of an entry is the "is teleporting" flag. Every continuation that
//! acts on a session first checks that the entry still holds the same session
//! id; removal is the single point where a session's fate is decided, so the
//! entry is removed exactly once whichever path gets there first.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use wildwarp_domain::{PlayerId, SessionId, TeleportSession};

/// A registered session with the token that tears down its pending work.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub session: TeleportSession,
    pub cancel: CancellationToken,
}

#[derive(Debug, thiserror::Error)]
#[error("Player {0} already has an active teleport session")]
pub struct AlreadyActive(pub PlayerId);

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<PlayerId, SessionEntry>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the session unless the player already has one.
    pub fn reserve(&self, session: TeleportSession) -> Result<CancellationToken, AlreadyActive> {
        match self.sessions.entry(session.player_id()) {
            Entry::Occupied(_) => Err(AlreadyActive(session.player_id())),
            Entry::Vacant(slot) => {
                let cancel = CancellationToken::new();
                slot.insert(SessionEntry {
                    session,
                    cancel: cancel.clone(),
                });
                Ok(cancel)
            }
        }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.sessions.contains_key(&player)
    }

    pub fn get(&self, player: PlayerId) -> Option<TeleportSession> {
        self.sessions.get(&player).map(|e| e.session.clone())
    }

    /// Runs `f` on the session if it is still the one identified by `session_id`.
    pub fn update<T>(
        &self,
        player: PlayerId,
        session_id: SessionId,
        f: impl FnOnce(&mut TeleportSession) -> T,
    ) -> Option<T> {
        let mut entry = self.sessions.get_mut(&player)?;
        if entry.session.id() != session_id {
            return None;
        }
        Some(f(&mut entry.session))
    }

    /// Removes whatever session the player has.
    pub fn remove(&self, player: PlayerId) -> Option<SessionEntry> {
        self.sessions.remove(&player).map(|(_, entry)| entry)
    }

    /// Removes the player's session only if it is `session_id`.
    pub fn remove_session(&self, player: PlayerId, session_id: SessionId) -> Option<SessionEntry> {
        self.sessions
            .remove_if(&player, |_, entry| entry.session.id() == session_id)
            .map(|(_, entry)| entry)
    }

    pub fn players(&self) -> Vec<PlayerId> {
        self.sessions.iter().map(|e| *e.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
