use cfl_types::Digest;
use serde::Serialize;
use tracing::warn;

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::record::Record;
use crate::traits::LedgerReader;

/// Result of rebuilding a ledger from its stored records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayResult {
    /// Records whose rebuilt digest matched the stored one.
    pub records_replayed: u64,
    /// First index whose rebuilt digest differs from the stored one.
    pub diverged_at: Option<u64>,
    /// Digest of the last record whose rebuilt digest matched (zero if none).
    pub head: Digest,
    /// Measurement values carried by the stored records, in order.
    pub derived_measurements: Vec<i64>,
    /// Whether the stored measurement series equals `derived_measurements`.
    pub aligned: bool,
}

impl ReplayResult {
    pub fn converged(&self) -> bool {
        self.diverged_at.is_none()
    }
}

/// Deterministic replay of a stored chain.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Rebuild a fresh ledger from the stored records' timestamps, payloads,
    /// and nonces, re-running the append protocol, and compare digests.
    pub fn replay<R: LedgerReader>(reader: &R) -> Result<ReplayResult, LedgerError> {
        let records = reader.read_records()?;
        let measurements = reader.read_measurements()?;
        let (genesis, rest) = records.split_first().ok_or(LedgerError::EmptyLedger)?;

        let mut rebuilt = Ledger::with_genesis_timestamp(genesis.timestamp())?;
        let mut diverged_at = None;
        let mut replayed = 0u64;
        let mut head = Digest::zero();

        if genesis.is_sealed() && rebuilt.tail().digest() == genesis.digest() {
            replayed = 1;
            head = genesis.digest();
            for stored in rest {
                if stored.index() != rebuilt.next_index() {
                    diverged_at = Some(rebuilt.next_index());
                    break;
                }
                let candidate = Record::new(
                    stored.index(),
                    stored.timestamp(),
                    stored.payload(),
                    Digest::zero(),
                    stored.nonce(),
                )?;
                let digest = rebuilt.append(candidate)?.digest();
                if digest != stored.digest() {
                    diverged_at = Some(stored.index());
                    break;
                }
                replayed += 1;
                head = digest;
            }
        } else {
            diverged_at = Some(0);
        }

        if let Some(index) = diverged_at {
            warn!(index, "replay diverged from stored chain");
        }

        let derived_measurements = derive_measurements(&records);
        Ok(ReplayResult {
            records_replayed: replayed,
            diverged_at,
            head,
            aligned: derived_measurements == measurements,
            derived_measurements,
        })
    }
}

/// The measurement values carried by record payloads, genesis excluded.
pub fn derive_measurements(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|record| record.payload().measurement())
        .collect()
}
