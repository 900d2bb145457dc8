use crate::errors::SignatureError;
use crate::message::keccak256;
use crate::types::{Address, Digest, RelaySignature};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, SECP256K1};

/// Recovers the signer identity of one signature over a signing digest.
///
/// Quorum logic only talks to this trait, so another signature scheme can be plugged in without touching it.
pub trait SignerRecovery: Send + Sync {
    fn recover(&self, signing_digest: &Digest, signature: &RelaySignature) -> Result<Address, SignatureError>;
}

/// secp256k1 recovery with Ethereum-style addresses (`keccak256(pubkey)[12..]`).
#[derive(Debug, Default, Clone, Copy)]
pub struct EthereumRecovery;

impl SignerRecovery for EthereumRecovery {
    fn recover(&self, signing_digest: &Digest, signature: &RelaySignature) -> Result<Address, SignatureError> {
        let recovery_id = match signature.v() {
            27 | 28 => signature.v() - 27,
            0 | 1 => signature.v(),
            other => return Err(SignatureError::InvalidRecoveryId(other)),
        };
        let recovery_id = RecoveryId::from_i32(i32::from(recovery_id))
            .map_err(|_| SignatureError::InvalidRecoveryId(signature.v()))?;
        let recoverable = RecoverableSignature::from_compact(signature.compact(), recovery_id)
            .map_err(|e| SignatureError::RecoveryFailed(e.to_string()))?;

        let standard = recoverable.to_standard();
        let mut normalized = standard;
        normalized.normalize_s();
        if normalized != standard {
            return Err(SignatureError::MalleableSignature);
        }

        let message = Message::from_digest(*signing_digest);
        let public_key = SECP256K1
            .recover_ecdsa(&message, &recoverable)
            .map_err(|e| SignatureError::RecoveryFailed(e.to_string()))?;

        Ok(address_from_public_key(&public_key))
    }
}

pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..32]);
    Address(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::CanonicalMessage;
    use crate::signer::LocalSigner;

    // secp256k1 group order n
    const CURVE_ORDER: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xba, 0xae,
        0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
    ];

    fn sub_from_order(s: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = i16::from(CURVE_ORDER[i]) - i16::from(s[i]) - borrow;
            borrow = 0;
            if diff < 0 {
                diff += 256;
                borrow = 1;
            }
            out[i] = diff as u8;
        }
        out
    }

    #[test]
    fn test_recovers_signing_address() {
        let signer = LocalSigner::new("0x34cee9ead792f332d133b1bfc7a915438e41bc42cec0ef3f4f79b74877a16012").unwrap();
        let message = CanonicalMessage::AddSigner("0x6Fda6B0E6Adf2664D9b30199A54B77b050874656".parse().unwrap());
        let signature = signer.sign_message(&message);

        let recovered = EthereumRecovery.recover(&message.signing_digest(), &signature).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_other_digest_recovers_other_address() {
        let signer = LocalSigner::from_secret_bytes([7; 32]).unwrap();
        let signature = signer.sign_message(&CanonicalMessage::SetThreshold(1));

        let recovered = EthereumRecovery
            .recover(&CanonicalMessage::SetThreshold(2).signing_digest(), &signature)
            .unwrap_or(Address::ZERO);
        assert_ne!(recovered, signer.address());
    }

    #[test]
    fn test_raw_recovery_id_is_accepted() {
        let signer = LocalSigner::from_secret_bytes([9; 32]).unwrap();
        let message = CanonicalMessage::SetAdminFee(5);
        let mut signature = signer.sign_message(&message);
        signature.0[64] -= 27;

        let recovered = EthereumRecovery.recover(&message.signing_digest(), &signature).unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[test]
    fn test_bad_recovery_id_is_rejected() {
        let signer = LocalSigner::from_secret_bytes([9; 32]).unwrap();
        let message = CanonicalMessage::SetAdminFee(5);
        let mut signature = signer.sign_message(&message);
        signature.0[64] = 35;

        let err = EthereumRecovery.recover(&message.signing_digest(), &signature).unwrap_err();
        assert_eq!(err, SignatureError::InvalidRecoveryId(35));
    }

    #[test]
    fn test_high_s_twin_is_rejected() {
        let signer = LocalSigner::from_secret_bytes([3; 32]).unwrap();
        let message = CanonicalMessage::SetBridgeWallet(Address([0x55; 20]));
        let signature = signer.sign_message(&message);

        let mut r = [0u8; 32];
        r.copy_from_slice(&signature.0[0..32]);
        let high_s = sub_from_order(&signature.0[32..64]);
        let flipped_v = if signature.v() == 27 { 28 } else { 27 };
        let twin = RelaySignature::from_parts(r, high_s, flipped_v);

        let err = EthereumRecovery.recover(&message.signing_digest(), &twin).unwrap_err();
        assert_eq!(err, SignatureError::MalleableSignature);
    }
}
