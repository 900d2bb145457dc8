pub mod fixtures;
pub mod mock;
