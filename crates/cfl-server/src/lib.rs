//! HTTP server for the carbon footprint ledger.
//!
//! Accepts footprint transactions, lists the hash-linked chain, and serves
//! the cumulative series with its threshold alert and a footprint calculator.

pub mod calculator;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use calculator::{CalculatorForm, FootprintEstimate, FootprintInputs};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::CflServer;
pub use state::AppState;
