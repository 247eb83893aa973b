use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::record::Record;

/// Read boundary used by validation, replay, and projections.
pub trait LedgerReader: Send + Sync {
    /// All records in append order, genesis first.
    fn read_records(&self) -> Result<Vec<Record>, LedgerError>;

    /// The measurement series in the order it was recorded.
    fn read_measurements(&self) -> Result<Vec<i64>, LedgerError>;
}

impl LedgerReader for Ledger {
    fn read_records(&self) -> Result<Vec<Record>, LedgerError> {
        Ok(self.records().to_vec())
    }

    fn read_measurements(&self) -> Result<Vec<i64>, LedgerError> {
        Ok(self.measurements().to_vec())
    }
}
