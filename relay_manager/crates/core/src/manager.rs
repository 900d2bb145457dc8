use crate::errors::RelayError;
use crate::events::{EventLog, RecordedEvent, RelayEvent};
use crate::ledger::TransferLedger;
use crate::message::CanonicalMessage;
use crate::recovery::SignerRecovery;
use crate::registry::SignerRegistry;
use crate::traits::{AccessControl, TokenModule};
use crate::types::{Address, Amount, ChainId, Digest, RelaySignature, TransferKey};
use crate::verifier::QuorumVerifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Founding state of a relay manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitParams {
    #[serde(with = "serde_str")]
    pub admin_fee: Amount,
    pub bridge_wallet: Address,
    pub threshold: u32,
    pub signers: Vec<Address>,
}

/// Point-in-time view of the manager, returned by the state query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayState {
    pub signers: Vec<Address>,
    pub signer_length: u32,
    pub threshold: u32,
    #[serde(with = "serde_str")]
    pub admin_fee: Amount,
    pub bridge_wallet: Address,
    pub processed_transfers: usize,
    pub last_event_sequence: u64,
}

/// Owns the signer registry, the transfer ledger and the event log, and is the only way to change them.
///
/// Every mutating call runs all of its checks and collaborator calls before touching state, so a rejected call leaves
/// no trace. The one exception is a `send` whose fee mint and net revert both fail, which consumes its transfer key.
/// Calls must be serialized by the owner, the processor actor does that for the service.
pub struct RelayManager {
    registry: SignerRegistry,
    ledger: TransferLedger,
    events: EventLog,
    token: Arc<dyn TokenModule>,
    access: Arc<dyn AccessControl>,
    recovery: Arc<dyn SignerRecovery>,
}

impl RelayManager {
    pub fn new(
        params: InitParams,
        token: Arc<dyn TokenModule>,
        access: Arc<dyn AccessControl>,
        recovery: Arc<dyn SignerRecovery>,
    ) -> Result<Self, RelayError> {
        let registry = SignerRegistry::new(params.signers, params.threshold)?;
        let ledger = TransferLedger::new(params.admin_fee, params.bridge_wallet)?;
        info!(
            signers = registry.len(),
            threshold = registry.threshold(),
            admin_fee = ledger.admin_fee(),
            bridge_wallet = %ledger.bridge_wallet(),
            "Relay manager initialized"
        );
        Ok(Self {
            registry,
            ledger,
            events: EventLog::new(),
            token,
            access,
            recovery,
        })
    }

    #[instrument(skip(self, signatures), level = "debug", err)]
    pub fn add_signer(
        &mut self,
        caller: Address,
        candidate: Address,
        signatures: &[RelaySignature],
    ) -> Result<RecordedEvent, RelayError> {
        self.ensure_operator(caller)?;
        self.registry.ensure_can_add(&candidate)?;
        self.verify_quorum(&CanonicalMessage::AddSigner(candidate), signatures)?;

        self.registry.add(candidate)?;
        Ok(self.events.push(RelayEvent::SignerAdded { account: candidate }))
    }

    #[instrument(skip(self, signatures), level = "debug", err)]
    pub fn remove_signer(
        &mut self,
        caller: Address,
        member: Address,
        signatures: &[RelaySignature],
    ) -> Result<RecordedEvent, RelayError> {
        self.ensure_operator(caller)?;
        self.registry.ensure_can_remove(&member)?;
        self.verify_quorum(&CanonicalMessage::RemoveSigner(member), signatures)?;

        self.registry.remove(&member)?;
        Ok(self.events.push(RelayEvent::SignerRemoved { account: member }))
    }

    #[instrument(skip(self, signatures), level = "debug", err)]
    pub fn set_threshold(
        &mut self,
        caller: Address,
        threshold: u32,
        signatures: &[RelaySignature],
    ) -> Result<RecordedEvent, RelayError> {
        self.ensure_operator(caller)?;
        self.registry.ensure_valid_threshold(threshold)?;
        self.verify_quorum(&CanonicalMessage::SetThreshold(threshold), signatures)?;

        self.registry.set_threshold(threshold)?;
        Ok(self.events.push(RelayEvent::ThresholdChanged { value: threshold }))
    }

    #[instrument(skip(self, signatures), level = "debug", err)]
    pub fn set_admin_fee(
        &mut self,
        caller: Address,
        admin_fee: Amount,
        signatures: &[RelaySignature],
    ) -> Result<RecordedEvent, RelayError> {
        self.ensure_operator(caller)?;
        TransferLedger::ensure_valid_admin_fee(admin_fee)?;
        self.verify_quorum(&CanonicalMessage::SetAdminFee(admin_fee), signatures)?;

        self.ledger.set_admin_fee(admin_fee)?;
        Ok(self.events.push(RelayEvent::AdminFeeChanged { value: admin_fee }))
    }

    #[instrument(skip(self, signatures), level = "debug", err)]
    pub fn set_bridge_wallet(
        &mut self,
        caller: Address,
        wallet: Address,
        signatures: &[RelaySignature],
    ) -> Result<RecordedEvent, RelayError> {
        self.ensure_operator(caller)?;
        TransferLedger::ensure_valid_bridge_wallet(&wallet)?;
        self.verify_quorum(&CanonicalMessage::SetBridgeWallet(wallet), signatures)?;

        self.ledger.set_bridge_wallet(wallet)?;
        Ok(self.events.push(RelayEvent::BridgeWalletChanged { account: wallet }))
    }

    /// Releases a bridged transfer: `amount - admin_fee` to `dest`, `admin_fee` to the bridge wallet.
    ///
    /// The replay check runs first so an exact repeat is rejected whatever signatures come with it.
    #[instrument(skip(self, signatures), level = "debug", err)]
    pub fn send(&mut self, key: TransferKey, signatures: &[RelaySignature]) -> Result<RecordedEvent, RelayError> {
        self.ledger.ensure_unprocessed(&key)?;
        let split = self.ledger.split(key.amount)?;
        self.verify_quorum(&CanonicalMessage::from(key), signatures)?;

        let bridge_wallet = self.ledger.bridge_wallet();
        self.token.mint(key.dest, split.net).map_err(|source| RelayError::MintFailed {
            account: key.dest,
            amount: split.net,
            source,
        })?;
        if let Err(fee_mint_error) = self.token.mint(bridge_wallet, split.fee) {
            warn!(%key, error = %fee_mint_error, "Fee mint failed, reverting net mint");
            if let Err(revert_error) = self.token.burn(key.dest, split.net) {
                // Net amount stays with `dest`, the transfer counts as released.
                self.ledger.mark_processed(key);
                error!(%key, net = split.net, error = %revert_error, "Failed to revert net mint, transfer marked processed");
                return Err(RelayError::ReleaseIrreversible {
                    key,
                    fee_mint_error,
                    revert_error,
                });
            }
            return Err(RelayError::MintFailed {
                account: bridge_wallet,
                amount: split.fee,
                source: fee_mint_error,
            });
        }

        self.ledger.mark_processed(key);
        debug!(%key, net = split.net, fee = split.fee, "Transfer released");
        Ok(self.events.push(RelayEvent::Sent {
            source: key.source,
            dest: key.dest,
            amount: key.amount,
            nonce: key.nonce,
        }))
    }

    /// Burns `amount` from `caller` and records the deposit for the relayer.
    #[instrument(skip(self), level = "debug", err)]
    pub fn deposit(
        &mut self,
        caller: Address,
        receiver: Address,
        amount: Amount,
        dest_chain_id: ChainId,
    ) -> Result<RecordedEvent, RelayError> {
        self.ledger.ensure_valid_deposit(&receiver, amount)?;
        self.token.burn(caller, amount).map_err(|source| RelayError::BurnFailed {
            account: caller,
            amount,
            source,
        })?;

        Ok(self.events.push(RelayEvent::Deposited {
            from: caller,
            to: receiver,
            amount,
            dest_chain_id,
        }))
    }

    pub fn signer_length(&self) -> u32 {
        self.registry.len()
    }

    pub fn is_signer(&self, account: &Address) -> bool {
        self.registry.is_member(account)
    }

    pub fn signers(&self) -> Vec<Address> {
        self.registry.signers().copied().collect()
    }

    pub fn threshold(&self) -> u32 {
        self.registry.threshold()
    }

    pub fn admin_fee(&self) -> Amount {
        self.ledger.admin_fee()
    }

    pub fn bridge_wallet(&self) -> Address {
        self.ledger.bridge_wallet()
    }

    pub fn is_processed(&self, key: &TransferKey) -> bool {
        self.ledger.is_processed(key)
    }

    pub fn events(&self) -> &[RecordedEvent] {
        self.events.all()
    }

    pub fn events_since(&self, sequence: u64) -> &[RecordedEvent] {
        self.events.since(sequence)
    }

    pub fn message_digest(message: &CanonicalMessage) -> Digest {
        message.digest()
    }

    pub fn state(&self) -> RelayState {
        RelayState {
            signers: self.signers(),
            signer_length: self.signer_length(),
            threshold: self.threshold(),
            admin_fee: self.admin_fee(),
            bridge_wallet: self.bridge_wallet(),
            processed_transfers: self.ledger.processed_count(),
            last_event_sequence: self.events.last_sequence(),
        }
    }

    fn ensure_operator(&self, caller: Address) -> Result<(), RelayError> {
        if !self.access.is_operator(caller) {
            return Err(RelayError::CallerNotOperator(caller));
        }
        Ok(())
    }

    fn verify_quorum(&self, message: &CanonicalMessage, signatures: &[RelaySignature]) -> Result<(), RelayError> {
        let recovered = QuorumVerifier::new(self.recovery.as_ref()).verify(&message.digest(), signatures, &self.registry)?;
        debug!(operation = message.operation(), signers = ?recovered, "Quorum verified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TokenError;
    use crate::recovery::EthereumRecovery;
    use crate::signer::{LocalSigner, sign_in_quorum_order};
    use mockall::{mock, predicate::eq};

    mock! {
        pub Token {}
        impl TokenModule for Token {
            fn burn(&self, account: Address, amount: Amount) -> Result<(), TokenError>;
            fn mint(&self, account: Address, amount: Amount) -> Result<(), TokenError>;
        }
    }

    mock! {
        pub Access {}
        impl AccessControl for Access {
            fn is_operator(&self, caller: Address) -> bool;
        }
    }

    const WALLET: Address = Address([0x77; 20]);
    const OPERATOR: Address = Address([0x0a; 20]);

    fn manager(signer: &LocalSigner, token: MockToken, access: MockAccess) -> RelayManager {
        RelayManager::new(
            InitParams {
                admin_fee: 5,
                bridge_wallet: WALLET,
                threshold: 1,
                signers: vec![signer.address()],
            },
            Arc::new(token),
            Arc::new(access),
            Arc::new(EthereumRecovery),
        )
        .unwrap()
    }

    fn transfer() -> TransferKey {
        TransferKey {
            source: Address([0xa1; 20]),
            dest: Address([0xb0; 20]),
            amount: 100,
            nonce: 0,
        }
    }

    #[test]
    fn test_operator_check_runs_before_anything_else() {
        let signer = LocalSigner::from_secret_bytes([1; 32]).unwrap();
        let mut access = MockAccess::new();
        access.expect_is_operator().returning(|_| false);
        let mut manager = manager(&signer, MockToken::new(), access);

        let err = manager.set_admin_fee(Address([0xee; 20]), 0, &[]).unwrap_err();
        assert_eq!(err, RelayError::CallerNotOperator(Address([0xee; 20])));
        assert!(manager.events().is_empty());
    }

    #[test]
    fn test_send_mints_net_and_fee() {
        let signer = LocalSigner::from_secret_bytes([1; 32]).unwrap();
        let key = transfer();
        let mut token = MockToken::new();
        token
            .expect_mint()
            .with(eq(key.dest), eq(95))
            .times(1)
            .returning(|_, _| Ok(()));
        token
            .expect_mint()
            .with(eq(WALLET), eq(5))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut manager = manager(&signer, token, MockAccess::new());

        let signatures = sign_in_quorum_order(&[&signer], &CanonicalMessage::from(key));
        let record = manager.send(key, &signatures).unwrap();
        assert_eq!(record.sequence, 1);
        assert!(manager.is_processed(&key));
    }

    #[test]
    fn test_fee_mint_failure_reverts_net_mint() {
        let signer = LocalSigner::from_secret_bytes([1; 32]).unwrap();
        let key = transfer();
        let mut token = MockToken::new();
        token
            .expect_mint()
            .with(eq(key.dest), eq(95))
            .times(1)
            .returning(|_, _| Ok(()));
        token
            .expect_mint()
            .with(eq(WALLET), eq(5))
            .times(1)
            .returning(|_, _| Err(TokenError::Unavailable("paused".to_string())));
        token
            .expect_burn()
            .with(eq(key.dest), eq(95))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut manager = manager(&signer, token, MockAccess::new());

        let signatures = sign_in_quorum_order(&[&signer], &CanonicalMessage::from(key));
        let err = manager.send(key, &signatures).unwrap_err();
        assert!(matches!(err, RelayError::MintFailed { account: WALLET, amount: 5, .. }));
        assert!(err.is_retryable());
        assert!(!manager.is_processed(&key));
        assert!(manager.events().is_empty());
    }

    #[test]
    fn test_failed_revert_consumes_transfer() {
        let signer = LocalSigner::from_secret_bytes([1; 32]).unwrap();
        let key = transfer();
        let mut token = MockToken::new();
        token
            .expect_mint()
            .with(eq(key.dest), eq(95))
            .times(1)
            .returning(|_, _| Ok(()));
        token
            .expect_mint()
            .with(eq(WALLET), eq(5))
            .times(1)
            .returning(|_, _| Err(TokenError::Unavailable("paused".to_string())));
        token
            .expect_burn()
            .with(eq(key.dest), eq(95))
            .times(1)
            .returning(|_, _| Err(TokenError::Unavailable("paused".to_string())));
        let mut manager = manager(&signer, token, MockAccess::new());

        let signatures = sign_in_quorum_order(&[&signer], &CanonicalMessage::from(key));
        let err = manager.send(key, &signatures).unwrap_err();
        assert_eq!(
            err,
            RelayError::ReleaseIrreversible {
                key,
                fee_mint_error: TokenError::Unavailable("paused".to_string()),
                revert_error: TokenError::Unavailable("paused".to_string()),
            }
        );
        assert!(!err.is_retryable());
        assert!(manager.is_processed(&key));
        assert!(manager.events().is_empty());

        let retry = manager.send(key, &signatures).unwrap_err();
        assert_eq!(retry, RelayError::TransferNonceAlreadyProcessed(key));
    }

    #[test]
    fn test_burn_failure_leaves_no_record() {
        let signer = LocalSigner::from_secret_bytes([1; 32]).unwrap();
        let mut token = MockToken::new();
        token
            .expect_burn()
            .times(1)
            .returning(|account, amount| {
                Err(TokenError::InsufficientBalance {
                    account,
                    balance: 0,
                    requested: amount,
                })
            });
        let mut manager = manager(&signer, token, MockAccess::new());

        let err = manager.deposit(Address([0xa1; 20]), Address([0xb0; 20]), 100, 56).unwrap_err();
        assert!(matches!(err, RelayError::BurnFailed { amount: 100, .. }));
        assert!(manager.events().is_empty());
    }

    #[test]
    fn test_argument_validation_precedes_quorum() {
        let signer = LocalSigner::from_secret_bytes([1; 32]).unwrap();
        let mut access = MockAccess::new();
        access.expect_is_operator().with(eq(OPERATOR)).returning(|_| true);
        let mut manager = manager(&signer, MockToken::new(), access);

        assert_eq!(manager.set_admin_fee(OPERATOR, 0, &[]), Err(RelayError::AdminFeeInvalid));
        assert_eq!(
            manager.set_bridge_wallet(OPERATOR, Address::ZERO, &[]),
            Err(RelayError::BridgeWalletAddressInvalid)
        );
        assert!(matches!(
            manager.add_signer(OPERATOR, signer.address(), &[]),
            Err(RelayError::SignerInvalid { .. })
        ));
        assert!(matches!(
            manager.set_threshold(OPERATOR, 2, &[]),
            Err(RelayError::ThresholdInvalid { .. })
        ));
    }

    #[test]
    fn test_init_rejects_invalid_founding_state() {
        let build = |params: InitParams| {
            RelayManager::new(
                params,
                Arc::new(MockToken::new()),
                Arc::new(MockAccess::new()),
                Arc::new(EthereumRecovery),
            )
            .err()
        };
        let valid = InitParams {
            admin_fee: 5,
            bridge_wallet: WALLET,
            threshold: 1,
            signers: vec![Address([1; 20])],
        };

        assert_eq!(
            build(InitParams {
                admin_fee: 0,
                ..valid.clone()
            }),
            Some(RelayError::AdminFeeInvalid)
        );
        assert_eq!(
            build(InitParams {
                bridge_wallet: Address::ZERO,
                ..valid.clone()
            }),
            Some(RelayError::BridgeWalletAddressInvalid)
        );
        assert!(matches!(
            build(InitParams {
                signers: vec![],
                ..valid.clone()
            }),
            Some(RelayError::ThresholdInvalid { .. })
        ));
        assert!(matches!(
            build(InitParams {
                threshold: 2,
                ..valid.clone()
            }),
            Some(RelayError::ThresholdInvalid { .. })
        ));
        assert_eq!(build(valid), None);
    }
}
