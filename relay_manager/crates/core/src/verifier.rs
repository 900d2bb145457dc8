use crate::errors::SignatureError;
use crate::message::signing_digest;
use crate::recovery::SignerRecovery;
use crate::registry::SignerRegistry;
use crate::types::{Address, Digest, RelaySignature};
use tracing::trace;

/// Checks a signature list against the current quorum in a single pass.
///
/// Recovered signers must be strictly ascending, which rejects duplicates without an auxiliary set.
pub struct QuorumVerifier<'a> {
    recovery: &'a dyn SignerRecovery,
}

impl<'a> QuorumVerifier<'a> {
    pub fn new(recovery: &'a dyn SignerRecovery) -> Self {
        Self { recovery }
    }

    /// Returns the recovered signers in the order they were supplied.
    pub fn verify(
        &self,
        message_digest: &Digest,
        signatures: &[RelaySignature],
        registry: &SignerRegistry,
    ) -> Result<Vec<Address>, SignatureError> {
        if signatures.len() < registry.threshold() as usize {
            return Err(SignatureError::InsufficientSignatures {
                got: signatures.len(),
                threshold: registry.threshold(),
            });
        }

        let digest = signing_digest(message_digest);
        let mut recovered = Vec::with_capacity(signatures.len());
        let mut previous = Address::ZERO;

        for (position, signature) in signatures.iter().enumerate() {
            let signer = self.recovery.recover(&digest, signature)?;
            if signer <= previous {
                return Err(SignatureError::NotAscending {
                    position,
                    previous,
                    current: signer,
                });
            }
            if !registry.is_member(&signer) {
                return Err(SignatureError::UnknownSigner { position, signer });
            }
            trace!(position, %signer, "Recovered quorum signer");
            previous = signer;
            recovered.push(signer);
        }

        Ok(recovered)
    }
}
