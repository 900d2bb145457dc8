use crate::types::{Address, Amount, Digest, Nonce, TransferKey};
use sha3::{Digest as _, Keccak256};

/// Domain prefix mixed into every signing digest, binds a signature to personal-message signing of a 32-byte hash.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

pub const WORD_LENGTH: usize = 32;

pub fn keccak256(data: &[u8]) -> Digest {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Left-pads an integer into a 32-byte big-endian word.
pub fn encode_word(value: u128) -> [u8; WORD_LENGTH] {
    let mut word = [0u8; WORD_LENGTH];
    word[WORD_LENGTH - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// `keccak256(prefix || message_digest)`, the digest signers actually sign.
pub fn signing_digest(message_digest: &Digest) -> Digest {
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(message_digest);
    hasher.finalize().into()
}

/// Arguments of a privileged call in the exact field order signers sign over.
///
/// Addresses are packed as 20 bytes, integers as 32-byte words, without any length prefix. Note that operations sharing
/// an argument type share an encoding, e.g. `AddSigner(a)` and `RemoveSigner(a)` produce the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalMessage {
    AddSigner(Address),
    RemoveSigner(Address),
    SetThreshold(u32),
    SetAdminFee(Amount),
    SetBridgeWallet(Address),
    Send {
        source: Address,
        dest: Address,
        amount: Amount,
        nonce: Nonce,
    },
}

impl CanonicalMessage {
    pub fn encode(&self) -> Vec<u8> {
        match self {
            CanonicalMessage::AddSigner(account)
            | CanonicalMessage::RemoveSigner(account)
            | CanonicalMessage::SetBridgeWallet(account) => account.as_bytes().to_vec(),
            CanonicalMessage::SetThreshold(threshold) => encode_word(u128::from(*threshold)).to_vec(),
            CanonicalMessage::SetAdminFee(fee) => encode_word(*fee).to_vec(),
            CanonicalMessage::Send {
                source,
                dest,
                amount,
                nonce,
            } => {
                let mut bytes = Vec::with_capacity(2 * 20 + 2 * WORD_LENGTH);
                bytes.extend_from_slice(source.as_bytes());
                bytes.extend_from_slice(dest.as_bytes());
                bytes.extend_from_slice(&encode_word(*amount));
                bytes.extend_from_slice(&encode_word(*nonce));
                bytes
            }
        }
    }

    pub fn digest(&self) -> Digest {
        keccak256(&self.encode())
    }

    pub fn signing_digest(&self) -> Digest {
        signing_digest(&self.digest())
    }

    pub fn operation(&self) -> &'static str {
        match self {
            CanonicalMessage::AddSigner(_) => "add_signer",
            CanonicalMessage::RemoveSigner(_) => "remove_signer",
            CanonicalMessage::SetThreshold(_) => "set_threshold",
            CanonicalMessage::SetAdminFee(_) => "set_admin_fee",
            CanonicalMessage::SetBridgeWallet(_) => "set_bridge_wallet",
            CanonicalMessage::Send { .. } => "send",
        }
    }
}

impl From<TransferKey> for CanonicalMessage {
    fn from(key: TransferKey) -> Self {
        CanonicalMessage::Send {
            source: key.source,
            dest: key.dest,
            amount: key.amount,
            nonce: key.nonce,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_of_empty_input() {
        assert_eq!(
            hex::encode(keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_word_is_big_endian_and_left_padded() {
        let word = encode_word(0x0102);
        assert_eq!(&word[..30], &[0u8; 30]);
        assert_eq!(&word[30..], &[0x01, 0x02]);
        assert_eq!(encode_word(u128::MAX)[..16], [0u8; 16]);
    }

    #[test]
    fn test_send_packs_addresses_without_padding() {
        let source = Address([0xaa; 20]);
        let dest = Address([0xbb; 20]);
        let encoded = CanonicalMessage::Send {
            source,
            dest,
            amount: 100,
            nonce: 7,
        }
        .encode();

        assert_eq!(encoded.len(), 104);
        assert_eq!(&encoded[0..20], source.as_bytes());
        assert_eq!(&encoded[20..40], dest.as_bytes());
        assert_eq!(encoded[71], 100);
        assert_eq!(encoded[103], 7);
    }

    #[test]
    fn test_single_argument_encodings() {
        let account = Address([0x42; 20]);
        assert_eq!(CanonicalMessage::AddSigner(account).encode(), account.as_bytes().to_vec());
        assert_eq!(
            CanonicalMessage::SetThreshold(3).encode(),
            CanonicalMessage::SetAdminFee(3).encode()
        );
        assert_eq!(CanonicalMessage::SetThreshold(3).encode().len(), 32);
    }

    #[test]
    fn test_signing_digest_differs_from_message_digest() {
        let message = CanonicalMessage::SetAdminFee(5);
        let digest = message.digest();
        let mut prefixed = SIGNED_MESSAGE_PREFIX.to_vec();
        prefixed.extend_from_slice(&digest);
        assert_eq!(message.signing_digest(), keccak256(&prefixed));
        assert_ne!(message.signing_digest(), digest);
    }
}
