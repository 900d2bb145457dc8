use crate::errors::TokenError;
use crate::traits::TokenModule;
use crate::types::{Address, Amount};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Balance map standing in for the bridged token when the service runs on its own.
#[derive(Debug, Default)]
pub struct InMemoryToken {
    balances: Mutex<HashMap<Address, Amount>>,
}

impl InMemoryToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances(balances: impl IntoIterator<Item = (Address, Amount)>) -> Self {
        Self {
            balances: Mutex::new(balances.into_iter().collect()),
        }
    }

    pub fn balance_of(&self, account: &Address) -> Result<Amount, TokenError> {
        let balances = self.lock()?;
        Ok(balances.get(account).copied().unwrap_or_default())
    }

    pub fn total_supply(&self) -> Result<Amount, TokenError> {
        let balances = self.lock()?;
        Ok(balances.values().fold(0, |acc, balance| acc.saturating_add(*balance)))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Address, Amount>>, TokenError> {
        self.balances
            .lock()
            .map_err(|e| TokenError::Unavailable(format!("balance map poisoned: {e}")))
    }
}

impl TokenModule for InMemoryToken {
    fn burn(&self, account: Address, amount: Amount) -> Result<(), TokenError> {
        let mut balances = self.lock()?;
        let balance = balances.get(&account).copied().unwrap_or_default();
        let remaining = balance.checked_sub(amount).ok_or(TokenError::InsufficientBalance {
            account,
            balance,
            requested: amount,
        })?;
        balances.insert(account, remaining);
        debug!(%account, amount, remaining, "Burned tokens");
        Ok(())
    }

    fn mint(&self, account: Address, amount: Amount) -> Result<(), TokenError> {
        let mut balances = self.lock()?;
        let balance = balances.get(&account).copied().unwrap_or_default();
        let updated = balance
            .checked_add(amount)
            .ok_or(TokenError::BalanceOverflow { account })?;
        balances.insert(account, updated);
        debug!(%account, amount, balance = updated, "Minted tokens");
        Ok(())
    }
}
