//! Cryptographic primitives for the carbon footprint ledger.
//!
//! Provides domain-separated BLAKE3 hashing over canonical (key-sorted) JSON
//! and hash chain verification for anything that links to a predecessor.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainError, ChainLink, HashChainVerifier};
pub use hasher::{ContentHasher, HasherError};
