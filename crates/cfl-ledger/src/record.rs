use serde::Serialize;

use cfl_crypto::{ChainLink, ContentHasher, HasherError};
use cfl_types::{Digest, Payload, Timestamp};

use crate::error::LedgerError;

/// One sealed ledger entry.
///
/// `digest` always covers the current values of the other five fields. The
/// only field that ever changes after construction is `previous_digest`,
/// and only inside [`crate::Ledger::append`], which re-seals in the same step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub(crate) index: u64,
    pub(crate) timestamp: Timestamp,
    pub(crate) payload: Payload,
    pub(crate) previous_digest: Digest,
    pub(crate) nonce: u64,
    pub(crate) digest: Digest,
}

/// Everything the digest covers. Keys are sorted by the canonical hasher.
#[derive(Serialize)]
struct SealInput<'a> {
    index: u64,
    timestamp: Timestamp,
    payload: &'a Payload,
    previous_digest: Digest,
    nonce: u64,
}

impl Record {
    /// Build a record and seal it over the given fields.
    pub fn new(
        index: u64,
        timestamp: Timestamp,
        payload: Payload,
        previous_digest: Digest,
        nonce: u64,
    ) -> Result<Self, LedgerError> {
        let mut record = Self {
            index,
            timestamp,
            payload,
            previous_digest,
            nonce,
            digest: Digest::zero(),
        };
        record.digest = record.compute_digest()?;
        Ok(record)
    }

    /// The genesis record: index 0, genesis payload, zero predecessor.
    pub fn genesis(timestamp: Timestamp) -> Result<Self, LedgerError> {
        Self::new(0, timestamp, Payload::Genesis, Digest::zero(), 0)
    }

    /// A measurement candidate stamped now, with a placeholder predecessor.
    ///
    /// The predecessor is filled in when the candidate is appended.
    pub fn candidate(index: u64, value: i64) -> Result<Self, LedgerError> {
        Self::new(
            index,
            Timestamp::now(),
            Payload::Measurement(value),
            Digest::zero(),
            0,
        )
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn payload(&self) -> Payload {
        self.payload
    }

    pub fn previous_digest(&self) -> Digest {
        self.previous_digest
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// Recompute the digest from the current field values.
    pub fn compute_digest(&self) -> Result<Digest, LedgerError> {
        Ok(self.seal_digest()?)
    }

    /// `true` if the stored digest matches the current field values.
    pub fn is_sealed(&self) -> bool {
        matches!(self.seal_digest(), Ok(digest) if digest == self.digest)
    }

    /// Point this record at a new predecessor and re-seal it.
    pub(crate) fn link_to(&mut self, previous_digest: Digest) -> Result<(), LedgerError> {
        self.previous_digest = previous_digest;
        self.digest = self.compute_digest()?;
        Ok(())
    }

    fn seal_digest(&self) -> Result<Digest, HasherError> {
        ContentHasher::RECORD.hash_canonical(&SealInput {
            index: self.index,
            timestamp: self.timestamp,
            payload: &self.payload,
            previous_digest: self.previous_digest,
            nonce: self.nonce,
        })
    }
}

impl ChainLink for Record {
    fn position(&self) -> u64 {
        self.index
    }

    fn digest(&self) -> Digest {
        self.digest
    }

    fn previous_digest(&self) -> Digest {
        self.previous_digest
    }

    fn recompute_digest(&self) -> Result<Digest, HasherError> {
        self.seal_digest()
    }
}
