pub mod types;
pub mod directory;
pub mod config;
pub mod clock;
pub mod error;
pub mod stats;
