use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::record::Record;
use crate::traits::LedgerReader;

/// A [`Ledger`] behind a read/write lock, for callers serving concurrent
/// requests.
///
/// Every mutation holds the write guard for its whole read-tail → append →
/// record sequence, so concurrent submitters can never link to the same tail.
pub struct SharedLedger {
    inner: RwLock<Ledger>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: RwLock::new(ledger),
        }
    }

    /// Append a measurement record and record its value under one write guard.
    pub fn submit(&self, value: i64) -> Result<Record, LedgerError> {
        let mut ledger = self.write()?;
        let record = ledger.append_measurement(value)?.clone();
        debug!(index = record.index(), value, "measurement submitted");
        Ok(record)
    }

    /// Append a caller-built candidate.
    pub fn append(&self, candidate: Record) -> Result<Record, LedgerError> {
        let mut ledger = self.write()?;
        Ok(ledger.append(candidate)?.clone())
    }

    pub fn record_measurement(&self, value: i64) -> Result<(), LedgerError> {
        self.write()?.record_measurement(value);
        Ok(())
    }

    pub fn tail(&self) -> Result<Record, LedgerError> {
        Ok(self.read()?.tail().clone())
    }

    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.len())
    }

    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        self.read()?.verify_chain()
    }

    /// A point-in-time copy of the whole ledger.
    pub fn snapshot(&self) -> Result<Ledger, LedgerError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl LedgerReader for SharedLedger {
    fn read_records(&self) -> Result<Vec<Record>, LedgerError> {
        Ok(self.read()?.records().to_vec())
    }

    fn read_measurements(&self) -> Result<Vec<i64>, LedgerError> {
        Ok(self.read()?.measurements().to_vec())
    }
}
