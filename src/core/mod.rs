pub mod config;
pub mod errors;
pub mod handle;
pub mod kernel;
pub mod types;
