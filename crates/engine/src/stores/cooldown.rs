//! Cooldown ledger: player id -> last successful teleport.
//!
//! Written only on successful relocation, read on every request. In-memory
//! only; a restart forgets every cooldown.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use wildwarp_domain::PlayerId;

#[derive(Default)]
pub struct CooldownLedger {
    last: DashMap<PlayerId, DateTime<Utc>>,
}

impl CooldownLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, player: PlayerId, at: DateTime<Utc>) {
        self.last.insert(player, at);
    }

    pub fn last(&self, player: PlayerId) -> Option<DateTime<Utc>> {
        self.last.get(&player).map(|t| *t)
    }

    /// Time left before `player` may teleport again, `None` when ready.
    pub fn remaining(
        &self,
        player: PlayerId,
        cooldown: Duration,
        now: DateTime<Utc>,
    ) -> Option<Duration> {
        let last = self.last(player)?;
        let cooldown = chrono::Duration::from_std(cooldown).ok()?;
        (last + cooldown - now).to_std().ok().filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_player_is_ready() {
        let ledger = CooldownLedger::new();
        assert_eq!(
            ledger.remaining(PlayerId::new(), Duration::from_secs(30), Utc::now()),
            None
        );
    }

    #[test]
    fn reports_time_left() {
        let ledger = CooldownLedger::new();
        let player = PlayerId::new();
        let t0 = Utc::now();
        ledger.record(player, t0);

        let left = ledger
            .remaining(player, Duration::from_secs(30), t0 + chrono::Duration::seconds(5))
            .unwrap();
        assert_eq!(left.as_secs(), 25);
    }

    #[test]
    fn expires_after_the_cooldown() {
        let ledger = CooldownLedger::new();
        let player = PlayerId::new();
        let t0 = Utc::now();
        ledger.record(player, t0);
        let later = t0 + chrono::Duration::seconds(30);
        assert_eq!(ledger.remaining(player, Duration::from_secs(30), later), None);
        assert_eq!(ledger.last(player), Some(t0));
    }
}
