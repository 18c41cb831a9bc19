//! Shared configuration model for all Dockhand crates

pub mod config;
pub mod nginx;

// Re-export commonly used types
pub use config::*;

// Re-export external dependencies
pub use serde;
pub use uuid;
