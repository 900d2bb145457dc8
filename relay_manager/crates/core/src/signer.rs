use crate::caller_auth::request_digest;
use crate::errors::{KeyError, ParseError};
use crate::message::{CanonicalMessage, signing_digest};
use crate::recovery::address_from_public_key;
use crate::types::{Address, Digest, RelaySignature};
use secp256k1::{Message, PublicKey, SECP256K1, SecretKey};

/// Holds one secp256k1 key and produces relay signatures with it.
///
/// Used by the signing tool and by tests; key storage is left to whoever constructs it.
pub struct LocalSigner {
    secret_key: SecretKey,
    address: Address,
}

impl LocalSigner {
    pub fn new(private_key_hex: &str) -> Result<Self, KeyError> {
        let trimmed = private_key_hex.trim();
        let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(stripped).map_err(ParseError::from)?;
        let secret_key = SecretKey::from_slice(&bytes)?;
        Ok(Self::from_secret_key(secret_key))
    }

    pub fn from_secret_bytes(bytes: [u8; 32]) -> Result<Self, KeyError> {
        Ok(Self::from_secret_key(SecretKey::from_slice(&bytes)?))
    }

    fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(SECP256K1, &secret_key);
        Self {
            secret_key,
            address: address_from_public_key(&public_key),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs an already prefixed digest, `v` is emitted as 27/28.
    pub fn sign_digest(&self, signing_digest: &Digest) -> RelaySignature {
        let message = Message::from_digest(*signing_digest);
        let signature = SECP256K1.sign_ecdsa_recoverable(&message, &self.secret_key);
        let (recovery_id, compact) = signature.serialize_compact();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[0..32]);
        s.copy_from_slice(&compact[32..64]);
        let v = 27 + recovery_id.to_i32() as u8;

        RelaySignature::from_parts(r, s, v)
    }

    pub fn sign_message(&self, message: &CanonicalMessage) -> RelaySignature {
        self.sign_digest(&message.signing_digest())
    }

    /// Signs an HTTP request as its caller, see [`request_digest`].
    pub fn sign_request(&self, path: &str, caller_nonce: u64, body: &[u8]) -> RelaySignature {
        self.sign_digest(&signing_digest(&request_digest(path, caller_nonce, body)))
    }
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner").field("address", &self.address).finish_non_exhaustive()
    }
}

/// Signs `message` with every signer and orders the result by ascending signer address, the order verification expects.
pub fn sign_in_quorum_order(signers: &[&LocalSigner], message: &CanonicalMessage) -> Vec<RelaySignature> {
    let mut signed = signers
        .iter()
        .map(|signer| (signer.address(), signer.sign_message(message)))
        .collect::<Vec<_>>();
    signed.sort_by_key(|(address, _)| *address);
    signed.into_iter().map(|(_, signature)| signature).collect()
}
