pub mod add_signer;
pub mod deposit;
pub mod events;
pub mod healthcheck;
pub mod is_processed;
pub mod remove_signer;
pub mod send;
pub mod set_admin_fee;
pub mod set_bridge_wallet;
pub mod set_threshold;
pub mod state;
