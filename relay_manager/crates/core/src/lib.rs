//! Threshold-multisignature authorization for bridge relays.
//!
//! Every privileged change (signer set, threshold, fee, bridge wallet, outbound fund release) is accepted only
//! when a quorum of registered signers approved the exact canonical message of the call. See [`manager::RelayManager`]
//! for the entry points.

pub mod access;
pub mod caller_auth;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod manager;
pub mod message;
pub mod recovery;
pub mod registry;
pub mod signer;
pub mod token;
pub mod traits;
pub mod types;
pub mod verifier;
