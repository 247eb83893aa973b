//! Append-only, hash-linked measurement ledger.
//!
//! This crate is the heart of CFL. It provides:
//! - `Record`, a sealed ledger entry whose digest covers its own fields
//! - `Ledger`, the single-writer in-memory chain plus its measurement series
//! - `SharedLedger`, the locked wrapper a multi-request caller writes through
//! - Chain validation, deterministic replay, and display projections
//! - Cumulative series and threshold detection over recorded measurements

pub mod error;
pub mod ledger;
pub mod projection;
pub mod record;
pub mod replay;
pub mod series;
pub mod shared;
pub mod traits;
pub mod validation;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use projection::{ChainEntry, ChainView, ProjectionBuilder};
pub use record::Record;
pub use replay::{derive_measurements, ReplayEngine, ReplayResult};
pub use series::{
    alert_message, compute_cumulative_series, detect_threshold_crossing, CumulativeSeries,
    DEFAULT_THRESHOLD,
};
pub use shared::SharedLedger;
pub use traits::LedgerReader;
pub use validation::{ChainValidator, ValidationReport, Violation, ViolationKind};
