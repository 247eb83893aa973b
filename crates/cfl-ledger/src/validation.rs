use cfl_crypto::{ChainError, HashChainVerifier};
use serde::Serialize;

use crate::error::LedgerError;
use crate::replay::derive_measurements;
use crate::traits::LedgerReader;

/// Result of validating a whole ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub record_count: u64,
    pub measurement_count: u64,
    pub hash_chain_valid: bool,
    pub sequence_contiguous: bool,
    /// Whether the measurement series equals the values carried by
    /// `records[1..]`. Informational: the two sequences are appended
    /// independently, so drift is not an integrity violation.
    pub measurements_aligned: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if no integrity violation was found.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The earliest violating record index, if any.
    pub fn first_violation(&self) -> Option<u64> {
        self.violations.iter().map(|v| v.index).min()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    IndexGap,
    GenesisLink,
    BrokenLink,
    HashMismatch,
    Unhashable,
}

impl From<ChainError> for Violation {
    fn from(error: ChainError) -> Self {
        let kind = match &error {
            ChainError::IndexGap { .. } => ViolationKind::IndexGap,
            ChainError::GenesisLink => ViolationKind::GenesisLink,
            ChainError::BrokenLink { .. } => ViolationKind::BrokenLink,
            ChainError::HashMismatch { .. } => ViolationKind::HashMismatch,
            ChainError::Hasher { .. } => ViolationKind::Unhashable,
        };
        Self {
            index: error.index() as u64,
            kind,
            description: error.to_string(),
        }
    }
}

/// Whole-ledger integrity validator that reports every violation.
pub struct ChainValidator;

impl ChainValidator {
    pub fn validate<R: LedgerReader>(reader: &R) -> Result<ValidationReport, LedgerError> {
        let records = reader.read_records()?;
        let measurements = reader.read_measurements()?;

        let violations: Vec<Violation> = HashChainVerifier::violations(&records)
            .into_iter()
            .map(Violation::from)
            .collect();

        let sequence_contiguous = !violations
            .iter()
            .any(|v| v.kind == ViolationKind::IndexGap);
        let hash_chain_valid = !violations.iter().any(|v| {
            matches!(
                v.kind,
                ViolationKind::GenesisLink
                    | ViolationKind::BrokenLink
                    | ViolationKind::HashMismatch
                    | ViolationKind::Unhashable
            )
        });

        Ok(ValidationReport {
            record_count: records.len() as u64,
            measurement_count: measurements.len() as u64,
            hash_chain_valid,
            sequence_contiguous,
            measurements_aligned: derive_measurements(&records) == measurements,
            violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use cfl_types::{Digest, Payload, Timestamp};

    use crate::ledger::Ledger;
    use crate::record::Record;

    use super::*;

    fn ledger_with(values: &[i64]) -> Ledger {
        let mut ledger = Ledger::with_genesis_timestamp(Timestamp::from_millis(0)).unwrap();
        for value in values {
            ledger.append_measurement(*value).unwrap();
        }
        ledger
    }

    /// A reader over arbitrary records, for feeding the validator forged chains.
    struct Forged(Vec<Record>, Vec<i64>);

    impl LedgerReader for Forged {
        fn read_records(&self) -> Result<Vec<Record>, LedgerError> {
            Ok(self.0.clone())
        }
        fn read_measurements(&self) -> Result<Vec<i64>, LedgerError> {
            Ok(self.1.clone())
        }
    }

    #[test]
    fn untouched_ledger_is_valid() {
        let ledger = ledger_with(&[5, 10, 20]);
        let report = ChainValidator::validate(&ledger).unwrap();
        assert!(report.is_valid());
        assert!(report.hash_chain_valid);
        assert!(report.sequence_contiguous);
        assert!(report.measurements_aligned);
        assert_eq!(report.record_count, 4);
        assert_eq!(report.measurement_count, 3);
        assert_eq!(report.first_violation(), None);
    }

    #[test]
    fn reports_every_tampered_record() {
        let ledger = ledger_with(&[1, 2, 3, 4]);
        let mut records = ledger.records().to_vec();
        records[1].payload = Payload::Measurement(100);
        records[3].nonce = 7;

        let report =
            ChainValidator::validate(&Forged(records, ledger.measurements().to_vec())).unwrap();
        assert!(!report.is_valid());
        assert!(!report.hash_chain_valid);
        assert!(report.sequence_contiguous);
        assert_eq!(report.first_violation(), Some(1));

        let indices: Vec<u64> = report.violations.iter().map(|v| v.index).collect();
        assert_eq!(indices, vec![1, 3]);
        assert!(report
            .violations
            .iter()
            .all(|v| v.kind == ViolationKind::HashMismatch));
    }

    #[test]
    fn reindexed_record_is_a_sequence_gap() {
        let ledger = ledger_with(&[1, 2]);
        let mut records = ledger.records().to_vec();
        records[2] = Record::new(
            9,
            records[2].timestamp(),
            records[2].payload(),
            records[1].digest(),
            0,
        )
        .unwrap();

        let report = ChainValidator::validate(&Forged(records, vec![1, 2])).unwrap();
        assert!(!report.sequence_contiguous);
        assert!(report.hash_chain_valid);
        assert_eq!(report.violations[0].kind, ViolationKind::IndexGap);
    }

    #[test]
    fn forged_genesis_link_is_reported() {
        let genesis = Record::new(
            0,
            Timestamp::from_millis(0),
            Payload::Genesis,
            Digest::from_hash([1; 32]),
            0,
        )
        .unwrap();
        let report = ChainValidator::validate(&Forged(vec![genesis], vec![])).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::GenesisLink);
    }

    #[test]
    fn drifted_measurements_are_flagged_but_not_invalid() {
        let mut ledger = ledger_with(&[3]);
        ledger.record_measurement(4);

        let report = ChainValidator::validate(&ledger).unwrap();
        assert!(report.is_valid());
        assert!(!report.measurements_aligned);
    }
}
