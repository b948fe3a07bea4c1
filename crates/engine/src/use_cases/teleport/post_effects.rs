//! Effects applied to a player right after a successful relocation.

use std::sync::Arc;

use wildwarp_domain::{Location, Message, MessageKey, PlayerId, VitalsChange};

use crate::infrastructure::config::PostTeleportConfig;
use crate::infrastructure::ports::{MessagePort, PlayerPort, WorldPort};

pub struct PostTeleportEffects {
    players: Arc<dyn PlayerPort>,
    world: Arc<dyn WorldPort>,
    messages: Arc<dyn MessagePort>,
    config: PostTeleportConfig,
}

impl PostTeleportEffects {
    pub fn new(
        players: Arc<dyn PlayerPort>,
        world: Arc<dyn WorldPort>,
        messages: Arc<dyn MessagePort>,
        config: PostTeleportConfig,
    ) -> Self {
        Self {
            players,
            world,
            messages,
            config,
        }
    }

    /// Applies status effects, vitals changes and the location notice.
    ///
    /// Failures are logged; the teleport itself already succeeded.
    pub async fn apply(&self, player: PlayerId, target: &Location) {
        for effect in &self.config.status_effects {
            if let Err(e) = self.players.apply_status_effect(player, effect).await {
                tracing::warn!(
                    player_id = %player,
                    effect = %effect.kind,
                    error = %e,
                    "Failed to apply status effect"
                );
            }
        }

        let mut changes = Vec::new();
        if self.config.hunger > 0 {
            changes.push(VitalsChange::Hunger(self.config.hunger));
        }
        if self.config.damage > 0.0 {
            changes.push(VitalsChange::Damage(self.config.damage));
        }
        for change in changes {
            if let Err(e) = self.players.adjust_vitals(player, change).await {
                tracing::warn!(
                    player_id = %player,
                    change = ?change,
                    error = %e,
                    "Failed to adjust vitals"
                );
            }
        }

        if self.config.show_location {
            let cell = target.position.block();
            let world = self.world.clone();
            let name = target.world.clone();
            let biome = tokio::task::spawn_blocking(move || world.biome_at(&name, cell))
                .await
                .ok()
                .flatten()
                .unwrap_or_else(|| "UNKNOWN".to_string());
            let info = Message::new(MessageKey::LocationInfo)
                .with("x", cell.x)
                .with("y", cell.y)
                .with("z", cell.z)
                .with("world", &target.world)
                .with("biome", biome);
            self.messages.send(player, info).await;
        }
    }
}
