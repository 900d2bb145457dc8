use crate::errors::RelayError;
use crate::types::Address;
use std::collections::BTreeSet;

/// Quorum membership and threshold.
///
/// Invariants held after every successful call: members are unique and non-zero, `1 <= threshold <= len()`.
/// The `ensure_*` checks never mutate, callers run them before quorum verification and apply the change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerRegistry {
    signers: BTreeSet<Address>,
    threshold: u32,
}

impl SignerRegistry {
    pub fn new(signers: impl IntoIterator<Item = Address>, threshold: u32) -> Result<Self, RelayError> {
        let mut registry = Self {
            signers: BTreeSet::new(),
            threshold: 0,
        };
        for signer in signers {
            registry.ensure_can_add(&signer)?;
            registry.signers.insert(signer);
        }
        registry.ensure_valid_threshold(threshold)?;
        registry.threshold = threshold;
        Ok(registry)
    }

    /// Member count, saturating at `u32::MAX`.
    pub fn len(&self) -> u32 {
        saturating_count(self.signers.len())
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn is_member(&self, account: &Address) -> bool {
        self.signers.contains(account)
    }

    /// Members in ascending order.
    pub fn signers(&self) -> impl Iterator<Item = &Address> {
        self.signers.iter()
    }

    pub fn ensure_can_add(&self, candidate: &Address) -> Result<(), RelayError> {
        if candidate.is_zero() {
            return Err(RelayError::SignerInvalid {
                account: *candidate,
                reason: "zero address",
            });
        }
        if self.is_member(candidate) {
            return Err(RelayError::SignerInvalid {
                account: *candidate,
                reason: "already a signer",
            });
        }
        Ok(())
    }

    pub fn ensure_can_remove(&self, member: &Address) -> Result<(), RelayError> {
        if !self.is_member(member) {
            return Err(RelayError::SignerInvalid {
                account: *member,
                reason: "not a signer",
            });
        }
        let signer_count_after = self.len() - 1;
        if signer_count_after < self.threshold {
            return Err(RelayError::ThresholdUnsatisfiable {
                threshold: self.threshold,
                signer_count_after,
            });
        }
        Ok(())
    }

    pub fn ensure_valid_threshold(&self, threshold: u32) -> Result<(), RelayError> {
        if threshold == 0 || threshold > self.len() {
            return Err(RelayError::ThresholdInvalid {
                threshold,
                signer_count: self.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn add(&mut self, candidate: Address) -> Result<(), RelayError> {
        self.ensure_can_add(&candidate)?;
        self.signers.insert(candidate);
        Ok(())
    }

    pub(crate) fn remove(&mut self, member: &Address) -> Result<(), RelayError> {
        self.ensure_can_remove(member)?;
        self.signers.remove(member);
        Ok(())
    }

    pub(crate) fn set_threshold(&mut self, threshold: u32) -> Result<(), RelayError> {
        self.ensure_valid_threshold(threshold)?;
        self.threshold = threshold;
        Ok(())
    }
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
