pub mod errors;
pub mod init;
pub mod relay_processor;
pub mod relay_sender;
pub mod types;
