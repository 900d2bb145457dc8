use crate::errors::CallerAuthError;
use crate::message::{keccak256, signing_digest};
use crate::recovery::SignerRecovery;
use crate::types::{Address, Digest, RelaySignature};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// `keccak256(path || caller_nonce || keccak256(body))`, the digest a caller signs for one HTTP request.
/// The path is the only variable-length part, so the packing is unambiguous.
pub fn request_digest(path: &str, caller_nonce: u64, body: &[u8]) -> Digest {
    let mut bytes = Vec::with_capacity(path.len() + 8 + 32);
    bytes.extend_from_slice(path.as_bytes());
    bytes.extend_from_slice(&caller_nonce.to_be_bytes());
    bytes.extend_from_slice(&keccak256(body));
    keccak256(&bytes)
}

/// Attributes requests to the account that signed them.
///
/// Each account's nonces have to be strictly increasing; a nonce is consumed once its signature recovers, whatever the
/// outcome of the call it authorized.
pub struct CallerAuthenticator {
    recovery: Arc<dyn SignerRecovery>,
    last_nonces: Mutex<HashMap<Address, u64>>,
}

impl CallerAuthenticator {
    pub fn new(recovery: Arc<dyn SignerRecovery>) -> Self {
        Self {
            recovery,
            last_nonces: Mutex::new(HashMap::new()),
        }
    }

    pub fn authenticate(
        &self,
        path: &str,
        caller_nonce: u64,
        body: &[u8],
        signature: &RelaySignature,
    ) -> Result<Address, CallerAuthError> {
        let digest = signing_digest(&request_digest(path, caller_nonce, body));
        let caller = self.recovery.recover(&digest, signature)?;

        let mut last_nonces = self.lock()?;
        if let Some(last) = last_nonces.get(&caller).copied().filter(|last| caller_nonce <= *last) {
            return Err(CallerAuthError::StaleNonce {
                caller,
                nonce: caller_nonce,
                last,
            });
        }
        last_nonces.insert(caller, caller_nonce);
        debug!(%caller, caller_nonce, path, "Caller authenticated");
        Ok(caller)
    }

    pub fn last_nonce(&self, caller: &Address) -> Result<Option<u64>, CallerAuthError> {
        Ok(self.lock()?.get(caller).copied())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Address, u64>>, CallerAuthError> {
        self.last_nonces
            .lock()
            .map_err(|e| CallerAuthError::Unavailable(format!("nonce map poisoned: {e}")))
    }
}

impl std::fmt::Debug for CallerAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallerAuthenticator").finish_non_exhaustive()
    }
}
