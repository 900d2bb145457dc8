use crate::errors::RelayError;
use crate::types::{Address, Amount, TransferKey};
use std::collections::HashSet;

/// Net and fee parts of an outbound transfer, `net + fee == amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub net: Amount,
    pub fee: Amount,
}

/// Replay record of released transfers plus the fee parameters.
#[derive(Debug, Clone)]
pub struct TransferLedger {
    processed: HashSet<TransferKey>,
    admin_fee: Amount,
    bridge_wallet: Address,
}

impl TransferLedger {
    pub fn new(admin_fee: Amount, bridge_wallet: Address) -> Result<Self, RelayError> {
        Self::ensure_valid_admin_fee(admin_fee)?;
        Self::ensure_valid_bridge_wallet(&bridge_wallet)?;
        Ok(Self {
            processed: HashSet::new(),
            admin_fee,
            bridge_wallet,
        })
    }

    pub fn admin_fee(&self) -> Amount {
        self.admin_fee
    }

    pub fn bridge_wallet(&self) -> Address {
        self.bridge_wallet
    }

    pub fn is_processed(&self, key: &TransferKey) -> bool {
        self.processed.contains(key)
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn ensure_unprocessed(&self, key: &TransferKey) -> Result<(), RelayError> {
        if self.is_processed(key) {
            return Err(RelayError::TransferNonceAlreadyProcessed(*key));
        }
        Ok(())
    }

    pub fn split(&self, amount: Amount) -> Result<FeeSplit, RelayError> {
        let net = amount.checked_sub(self.admin_fee).ok_or(RelayError::TransferAmountInvalid {
            amount,
            admin_fee: self.admin_fee,
        })?;
        Ok(FeeSplit {
            net,
            fee: self.admin_fee,
        })
    }

    pub fn ensure_valid_deposit(&self, receiver: &Address, amount: Amount) -> Result<(), RelayError> {
        if receiver.is_zero() {
            return Err(RelayError::ReceiverZero);
        }
        if amount <= self.admin_fee {
            return Err(RelayError::DepositAmountInvalid {
                amount,
                admin_fee: self.admin_fee,
            });
        }
        Ok(())
    }

    pub fn ensure_valid_admin_fee(fee: Amount) -> Result<(), RelayError> {
        if fee == 0 {
            return Err(RelayError::AdminFeeInvalid);
        }
        Ok(())
    }

    pub fn ensure_valid_bridge_wallet(wallet: &Address) -> Result<(), RelayError> {
        if wallet.is_zero() {
            return Err(RelayError::BridgeWalletAddressInvalid);
        }
        Ok(())
    }

    /// Keys are never unmarked.
    pub(crate) fn mark_processed(&mut self, key: TransferKey) {
        self.processed.insert(key);
    }

    pub(crate) fn set_admin_fee(&mut self, fee: Amount) -> Result<(), RelayError> {
        Self::ensure_valid_admin_fee(fee)?;
        self.admin_fee = fee;
        Ok(())
    }

    pub(crate) fn set_bridge_wallet(&mut self, wallet: Address) -> Result<(), RelayError> {
        Self::ensure_valid_bridge_wallet(&wallet)?;
        self.bridge_wallet = wallet;
        Ok(())
    }
}
