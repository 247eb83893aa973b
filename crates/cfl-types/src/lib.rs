//! Foundation types for the carbon footprint ledger (CFL).
//!
//! Every other CFL crate depends on `cfl-types`.
//!
//! # Key Types
//!
//! - [`Digest`]: 256-bit integrity digest of a ledger record
//! - [`Timestamp`]: wall-clock milliseconds captured at record creation
//! - [`Payload`]: closed set of record contents (genesis marker or measurement)

pub mod digest;
pub mod error;
pub mod payload;
pub mod temporal;

pub use digest::Digest;
pub use error::TypeError;
pub use payload::{Payload, GENESIS_SENTINEL};
pub use temporal::Timestamp;
