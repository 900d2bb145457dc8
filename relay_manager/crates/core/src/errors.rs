use crate::types::{Address, Amount, TransferKey};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Invalid length, expected: {expected} bytes, got: {got}")]
    InvalidLength { expected: usize, got: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyError {
    #[error("Failed to decode private key: {0}")]
    Parse(#[from] ParseError),
    #[error("Occurred error with Elliptic Curve secp256k1, err: {0}")]
    Secp256k1(#[from] secp256k1::Error),
}

/// Why a signature list failed quorum verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Not enough signatures, got: {got}, threshold: {threshold}")]
    InsufficientSignatures { got: usize, threshold: u32 },
    #[error("Signer at position {position} is not strictly ascending: {previous} >= {current}")]
    NotAscending {
        position: usize,
        previous: Address,
        current: Address,
    },
    #[error("Recovered signer {signer} at position {position} is not registered")]
    UnknownSigner { position: usize, signer: Address },
    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),
    #[error("Signature 's' value is in the upper half of the curve order")]
    MalleableSignature,
    #[error("Failed to recover signer: {0}")]
    RecoveryFailed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Insufficient balance of {account}, balance: {balance}, requested: {requested}")]
    InsufficientBalance {
        account: Address,
        balance: Amount,
        requested: Amount,
    },
    #[error("Balance of {account} overflows")]
    BalanceOverflow { account: Address },
    #[error("Token module unavailable: {0}")]
    Unavailable(String),
}

/// Why a request could not be attributed to the caller it claims.
#[derive(Error, Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CallerAuthError {
    #[error("Missing header {0}")]
    MissingHeader(&'static str),
    #[error("Invalid header {header}: {reason}")]
    InvalidHeader { header: &'static str, reason: String },
    #[error("Failed to read request body: {0}")]
    InvalidBody(String),
    #[error("Invalid caller signature: {0}")]
    CallerSignatureInvalid(#[from] SignatureError),
    #[error("Nonce {nonce} of {caller} has to exceed its last accepted nonce {last}")]
    StaleNonce { caller: Address, nonce: u64, last: u64 },
    #[error("Request claims caller {claimed} but is signed by {authenticated}")]
    CallerMismatch { claimed: Address, authenticated: Address },
    #[error("Caller nonce registry unavailable: {0}")]
    Unavailable(String),
}

impl CallerAuthError {
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

/// Every way a relay manager call can be rejected.
///
/// Each variant is terminal except [`RelayError::BurnFailed`] and [`RelayError::MintFailed`], which come from the token
/// module and may succeed on retry. [`RelayError::ReleaseIrreversible`] also comes from the token module but is terminal:
/// the net amount already reached its destination and the transfer is consumed.
#[derive(Error, Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayError {
    #[error("Signer {account} is invalid: {reason}")]
    SignerInvalid { account: Address, reason: &'static str },
    #[error("Threshold {threshold} is invalid for {signer_count} signers")]
    ThresholdInvalid { threshold: u32, signer_count: u32 },
    #[error("Threshold {threshold} can't be met by {signer_count_after} signers")]
    ThresholdUnsatisfiable { threshold: u32, signer_count_after: u32 },
    #[error("Invalid signature: {0}")]
    SignatureInvalid(#[from] SignatureError),
    #[error("Transfer {0} is already processed")]
    TransferNonceAlreadyProcessed(TransferKey),
    #[error("Transfer amount {amount} is lower than admin fee {admin_fee}")]
    TransferAmountInvalid { amount: Amount, admin_fee: Amount },
    #[error("Deposit amount {amount} has to exceed admin fee {admin_fee}")]
    DepositAmountInvalid { amount: Amount, admin_fee: Amount },
    #[error("Receiver is the zero address")]
    ReceiverZero,
    #[error("Admin fee has to be positive")]
    AdminFeeInvalid,
    #[error("Bridge wallet is the zero address")]
    BridgeWalletAddressInvalid,
    #[error("Caller {0} has no operator role")]
    CallerNotOperator(Address),
    #[error("Failed to burn {amount} from {account}: {source}")]
    BurnFailed {
        account: Address,
        amount: Amount,
        #[source]
        source: TokenError,
    },
    #[error("Failed to mint {amount} to {account}: {source}")]
    MintFailed {
        account: Address,
        amount: Amount,
        #[source]
        source: TokenError,
    },
    #[error("Transfer {key} was released without its fee, fee mint failed: {fee_mint_error}, net revert failed: {revert_error}")]
    ReleaseIrreversible {
        key: TransferKey,
        fee_mint_error: TokenError,
        revert_error: TokenError,
    },
}

impl RelayError {
    /// Stable name of the failure, e.g. `TRANSFER_NONCE_ALREADY_PROCESSED`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, RelayError::BurnFailed { .. } | RelayError::MintFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(RelayError::ReceiverZero.code(), "RECEIVER_ZERO");
        assert_eq!(RelayError::CallerNotOperator(Address::ZERO).code(), "CALLER_NOT_OPERATOR");
        assert_eq!(
            RelayError::SignatureInvalid(SignatureError::MalleableSignature).code(),
            "SIGNATURE_INVALID"
        );
        let key = TransferKey {
            source: Address::ZERO,
            dest: Address::ZERO,
            amount: 1,
            nonce: 0,
        };
        assert_eq!(
            RelayError::TransferNonceAlreadyProcessed(key).code(),
            "TRANSFER_NONCE_ALREADY_PROCESSED"
        );
        assert_eq!(RelayError::BridgeWalletAddressInvalid.code(), "BRIDGE_WALLET_ADDRESS_INVALID");
    }

    #[test]
    fn test_only_token_failures_are_retryable() {
        let token_failure = RelayError::MintFailed {
            account: Address::ZERO,
            amount: 1,
            source: TokenError::Unavailable("rpc down".to_string()),
        };
        assert!(token_failure.is_retryable());
        let partial_release = RelayError::ReleaseIrreversible {
            key: TransferKey {
                source: Address::ZERO,
                dest: Address([1; 20]),
                amount: 100,
                nonce: 0,
            },
            fee_mint_error: TokenError::Unavailable("rpc down".to_string()),
            revert_error: TokenError::Unavailable("rpc down".to_string()),
        };
        assert!(!partial_release.is_retryable());
        assert_eq!(partial_release.code(), "RELEASE_IRREVERSIBLE");
        assert!(!RelayError::AdminFeeInvalid.is_retryable());
        assert!(
            !RelayError::SignatureInvalid(SignatureError::InsufficientSignatures { got: 0, threshold: 1 }).is_retryable()
        );
    }
}
