//! In-memory wallet used by the demo server and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use wildwarp_domain::PlayerId;

use crate::infrastructure::ports::{WalletError, WalletPort};

pub struct InMemoryWallet {
    balances: DashMap<PlayerId, f64>,
    enabled: bool,
    symbol: String,
}

impl InMemoryWallet {
    pub fn new(enabled: bool) -> Self {
        Self {
            balances: DashMap::new(),
            enabled,
            symbol: "$".to_string(),
        }
    }

    pub fn deposit(&self, player: PlayerId, amount: f64) {
        *self.balances.entry(player).or_insert(0.0) += amount;
    }

    pub fn balance(&self, player: PlayerId) -> f64 {
        self.balances.get(&player).map_or(0.0, |b| *b)
    }
}

#[async_trait]
impl WalletPort for InMemoryWallet {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn has_funds(&self, player: PlayerId, amount: f64) -> Result<bool, WalletError> {
        Ok(self.balance(player) >= amount)
    }

    async fn debit(&self, player: PlayerId, amount: f64) -> Result<(), WalletError> {
        let mut balance = self
            .balances
            .get_mut(&player)
            .ok_or(WalletError::UnknownAccount(player))?;
        if *balance < amount {
            return Err(WalletError::InsufficientFunds {
                player,
                needed: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }

    async fn credit(&self, player: PlayerId, amount: f64) -> Result<(), WalletError> {
        self.deposit(player, amount);
        Ok(())
    }

    fn format(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol, amount)
    }
}
