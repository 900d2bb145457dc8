pub mod errors;
pub mod handlers;
pub mod init;
pub mod middleware;

pub use init::{AppState, RelayApi, create_app};
