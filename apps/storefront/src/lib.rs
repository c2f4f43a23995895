pub mod config;
pub mod errors;
pub mod host;
pub mod jobs;
pub mod jumbo;
pub mod layout;
pub mod van;
