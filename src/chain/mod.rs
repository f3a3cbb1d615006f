//! Mock Chain
//!
//! Advisory telemetry for the simulated ledger network. Values are random
//! placeholders and never participate in record integrity.

pub mod telemetry;
pub mod types;

pub use telemetry::{ChainTelemetry, MockTelemetry};
pub use types::{BlockSummary, DataIntegrityHealth, NetworkStatus};
