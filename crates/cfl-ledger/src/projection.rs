use cfl_types::{Digest, Timestamp};
use serde::Serialize;

use crate::error::LedgerError;
use crate::record::Record;
use crate::traits::LedgerReader;

/// One row of the display listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainEntry {
    pub index: u64,
    pub timestamp: Timestamp,
    pub data: String,
    pub digest: Digest,
    pub previous_digest: Digest,
}

impl From<&Record> for ChainEntry {
    fn from(record: &Record) -> Self {
        Self {
            index: record.index(),
            timestamp: record.timestamp(),
            data: record.payload().to_string(),
            digest: record.digest(),
            previous_digest: record.previous_digest(),
        }
    }
}

/// The chain listed newest first, as shown to users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainView {
    pub length: u64,
    pub head: Option<Digest>,
    pub entries: Vec<ChainEntry>,
}

/// Deterministic projection builders.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    pub fn chain_view<R: LedgerReader>(reader: &R) -> Result<ChainView, LedgerError> {
        let records = reader.read_records()?;
        Ok(ChainView {
            length: records.len() as u64,
            head: records.last().map(Record::digest),
            entries: records.iter().rev().map(ChainEntry::from).collect(),
        })
    }
}
