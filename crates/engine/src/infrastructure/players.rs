//! In-memory player directory used by the demo server and tests.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;
use wildwarp_domain::{
    Capability, Location, PlayerId, PlayerSnapshot, StatusEffect, VitalsChange,
};

use crate::infrastructure::ports::{PlayerError, PlayerPort};

const MAX_FOOD: u32 = 20;
const MAX_HEALTH: f64 = 20.0;
const MIN_FOOD: u32 = 1;
const MIN_HEALTH: f64 = 0.5;

struct PlayerRecord {
    snapshot: PlayerSnapshot,
    online: bool,
    capabilities: HashSet<Capability>,
    food: u32,
    health: f64,
    effects: Vec<StatusEffect>,
}

#[derive(Default)]
pub struct InMemoryPlayers {
    players: DashMap<PlayerId, PlayerRecord>,
}

impl InMemoryPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connected, living player and returns its id.
    pub fn join(&self, name: impl Into<String>, location: Location) -> PlayerId {
        let id = PlayerId::new();
        self.players.insert(
            id,
            PlayerRecord {
                snapshot: PlayerSnapshot {
                    id,
                    name: name.into(),
                    location,
                    alive: true,
                },
                online: true,
                capabilities: HashSet::new(),
                food: MAX_FOOD,
                health: MAX_HEALTH,
                effects: Vec::new(),
            },
        );
        id
    }

    pub fn grant(&self, player: PlayerId, capability: Capability) {
        if let Some(mut record) = self.players.get_mut(&player) {
            record.capabilities.insert(capability);
        }
    }

    pub fn move_to(&self, player: PlayerId, location: Location) {
        if let Some(mut record) = self.players.get_mut(&player) {
            record.snapshot.location = location;
        }
    }

    pub fn disconnect(&self, player: PlayerId) {
        if let Some(mut record) = self.players.get_mut(&player) {
            record.online = false;
        }
    }

    pub fn kill(&self, player: PlayerId) {
        if let Some(mut record) = self.players.get_mut(&player) {
            record.snapshot.alive = false;
        }
    }

    pub fn location(&self, player: PlayerId) -> Option<Location> {
        self.players
            .get(&player)
            .map(|r| r.snapshot.location.clone())
    }

    /// `(food, health)`
    pub fn vitals(&self, player: PlayerId) -> Option<(u32, f64)> {
        self.players.get(&player).map(|r| (r.food, r.health))
    }

    pub fn effects(&self, player: PlayerId) -> Vec<StatusEffect> {
        self.players
            .get(&player)
            .map(|r| r.effects.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PlayerPort for InMemoryPlayers {
    async fn snapshot(&self, player: PlayerId) -> Result<Option<PlayerSnapshot>, PlayerError> {
        Ok(self
            .players
            .get(&player)
            .filter(|r| r.online)
            .map(|r| r.snapshot.clone()))
    }

    async fn has_capability(&self, player: PlayerId, capability: Capability) -> bool {
        self.players
            .get(&player)
            .is_some_and(|r| r.capabilities.contains(&capability))
    }

    async fn relocate(&self, player: PlayerId, target: &Location) -> Result<(), PlayerError> {
        let mut record = self
            .players
            .get_mut(&player)
            .filter(|r| r.online)
            .ok_or(PlayerError::Offline(player))?;
        record.snapshot.location = target.clone();
        Ok(())
    }

    async fn apply_status_effect(
        &self,
        player: PlayerId,
        effect: &StatusEffect,
    ) -> Result<(), PlayerError> {
        let mut record = self
            .players
            .get_mut(&player)
            .ok_or(PlayerError::Offline(player))?;
        record.effects.push(effect.clone());
        Ok(())
    }

    async fn adjust_vitals(
        &self,
        player: PlayerId,
        change: VitalsChange,
    ) -> Result<(), PlayerError> {
        let mut record = self
            .players
            .get_mut(&player)
            .ok_or(PlayerError::Offline(player))?;
        match change {
            VitalsChange::Hunger(amount) => {
                record.food = record.food.saturating_sub(amount).max(MIN_FOOD);
            }
            VitalsChange::Damage(amount) => {
                record.health = (record.health - amount).max(MIN_HEALTH);
            }
        }
        Ok(())
    }
}
