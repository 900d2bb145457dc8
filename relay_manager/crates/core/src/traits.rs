use crate::errors::TokenError;
use crate::types::{Address, Amount};

/// Token contract the manager burns from on deposit and mints through on release.
pub trait TokenModule: Send + Sync {
    fn burn(&self, account: Address, amount: Amount) -> Result<(), TokenError>;
    fn mint(&self, account: Address, amount: Amount) -> Result<(), TokenError>;
}

pub trait AccessControl: Send + Sync {
    fn is_operator(&self, caller: Address) -> bool;
}
