pub mod api;
pub mod audit;
pub mod chain;
pub mod compliance;
pub mod config;
pub mod error;
pub mod identity;

pub use error::AuditError;
