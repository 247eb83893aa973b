use cfl_crypto::HashChainVerifier;
use cfl_types::{Digest, Timestamp};
use tracing::{debug, warn};

use crate::error::LedgerError;
use crate::record::Record;

/// Single-writer, in-memory hash-linked ledger.
///
/// Holds the ordered records (genesis first, never empty) and the raw
/// measurement series. Mutation needs `&mut self`; callers that serve
/// concurrent requests go through [`crate::SharedLedger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<Record>,
    measurements: Vec<i64>,
}

impl Ledger {
    /// Create a ledger seeded with a genesis record stamped now.
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_genesis_timestamp(Timestamp::now())
    }

    /// Create a ledger whose genesis record carries the given timestamp.
    pub fn with_genesis_timestamp(timestamp: Timestamp) -> Result<Self, LedgerError> {
        let genesis = Record::genesis(timestamp)?;
        debug!(digest = %genesis.digest().short_hex(), "ledger created");
        Ok(Self {
            records: vec![genesis],
            measurements: Vec::new(),
        })
    }

    /// The most recently appended record.
    pub fn tail(&self) -> &Record {
        match self.records.last() {
            Some(record) => record,
            None => unreachable!("ledger always holds its genesis record"),
        }
    }

    /// Number of records, genesis included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index the next appended record must carry.
    pub fn next_index(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn get(&self, index: u64) -> Option<&Record> {
        usize::try_from(index)
            .ok()
            .and_then(|position| self.records.get(position))
    }

    pub fn find_by_digest(&self, digest: &Digest) -> Option<&Record> {
        self.records.iter().find(|record| record.digest() == *digest)
    }

    /// Link `candidate` to the current tail, re-seal it, and publish it.
    ///
    /// The candidate's `previous_digest` is overwritten; whatever it held is
    /// a placeholder. Fails with [`LedgerError::OutOfSequence`] when the
    /// candidate's index is not the next position.
    pub fn append(&mut self, mut candidate: Record) -> Result<&Record, LedgerError> {
        let expected = self.next_index();
        if candidate.index() != expected {
            return Err(LedgerError::OutOfSequence {
                expected,
                found: candidate.index(),
            });
        }

        candidate.link_to(self.tail().digest())?;
        debug!(
            index = candidate.index(),
            digest = %candidate.digest().short_hex(),
            "record appended"
        );
        self.records.push(candidate);
        Ok(self.tail())
    }

    /// Append a value to the measurement series.
    ///
    /// Independent of [`Ledger::append`]: nothing ties the new entry to a
    /// record position.
    pub fn record_measurement(&mut self, value: i64) {
        debug!(value, position = self.measurements.len(), "measurement recorded");
        self.measurements.push(value);
    }

    /// Append a measurement record and track its value in one step.
    ///
    /// Keeps `measurements[i]` aligned with `records[i + 1]`.
    pub fn append_measurement(&mut self, value: i64) -> Result<&Record, LedgerError> {
        let candidate = Record::candidate(self.next_index(), value)?;
        self.append(candidate)?;
        self.record_measurement(value);
        Ok(self.tail())
    }

    /// Records in append order, genesis first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Measurements in the order they were recorded.
    pub fn measurements(&self) -> &[i64] {
        &self.measurements
    }

    /// Walk the chain and fail on the first linkage or digest violation.
    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        HashChainVerifier::verify_chain(&self.records).map_err(|error| {
            warn!(index = error.index(), %error, "chain verification failed");
            LedgerError::from(error)
        })
    }
}

#[cfg(test)]
mod tests {
    use cfl_types::Payload;
    use proptest::prelude::*;

    use super::*;

    fn ledger() -> Ledger {
        Ledger::with_genesis_timestamp(Timestamp::from_millis(1_000)).unwrap()
    }

    #[test]
    fn new_ledger_holds_only_genesis() {
        let ledger = ledger();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.measurements().is_empty());
        let genesis = ledger.tail();
        assert_eq!(genesis.index(), 0);
        assert_eq!(genesis.payload(), Payload::Genesis);
        assert!(genesis.previous_digest().is_zero());
        ledger.verify_chain().unwrap();
    }

    #[test]
    fn append_links_to_previous_tail() {
        let mut ledger = ledger();
        let genesis_digest = ledger.tail().digest();

        let first = ledger
            .append(Record::candidate(1, 42).unwrap())
            .unwrap()
            .clone();
        assert_eq!(first.index(), 1);
        assert_eq!(first.previous_digest(), genesis_digest);

        let second = ledger
            .append(Record::candidate(2, 7).unwrap())
            .unwrap()
            .clone();
        assert_eq!(second.index(), 2);
        assert_eq!(second.previous_digest(), first.digest());

        ledger.verify_chain().unwrap();
    }

    #[test]
    fn append_overwrites_placeholder_link() {
        let mut ledger = ledger();
        let bogus = Record::new(
            1,
            Timestamp::from_millis(2_000),
            Payload::Measurement(3),
            Digest::from_hash([0xee; 32]),
            0,
        )
        .unwrap();

        let appended = ledger.append(bogus).unwrap().clone();
        assert_eq!(appended.previous_digest(), ledger.records()[0].digest());
        assert!(appended.is_sealed());
    }

    #[test]
    fn out_of_sequence_candidate_is_rejected() {
        let mut ledger = ledger();
        let err = ledger.append(Record::candidate(5, 1).unwrap()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::OutOfSequence {
                expected: 1,
                found: 5
            }
        );
        assert_eq!(ledger.len(), 1);

        let err = ledger.append(Record::candidate(0, 1).unwrap()).unwrap_err();
        assert!(matches!(err, LedgerError::OutOfSequence { expected: 1, found: 0 }));
    }

    #[test]
    fn measurements_are_tracked_independently() {
        let mut ledger = ledger();
        ledger.append(Record::candidate(1, 10).unwrap()).unwrap();
        assert!(ledger.measurements().is_empty());

        ledger.record_measurement(10);
        ledger.record_measurement(99);
        assert_eq!(ledger.measurements(), &[10, 99]);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn append_measurement_updates_both_sequences() {
        let mut ledger = ledger();
        ledger.append_measurement(5).unwrap();
        ledger.append_measurement(8).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.measurements(), &[5, 8]);
        assert_eq!(ledger.records()[2].payload(), Payload::Measurement(8));
        ledger.verify_chain().unwrap();
    }

    #[test]
    fn lookups_by_index_and_digest() {
        let mut ledger = ledger();
        let digest = ledger.append_measurement(12).unwrap().digest();

        assert_eq!(ledger.get(1).map(Record::digest), Some(digest));
        assert!(ledger.get(2).is_none());
        assert_eq!(ledger.find_by_digest(&digest).map(Record::index), Some(1));
        assert!(ledger.find_by_digest(&Digest::from_hash([1; 32])).is_none());
    }

    #[test]
    fn tampering_any_field_is_detected_at_that_index() {
        type Tamper = fn(&mut Record);
        let tampers: [(&str, Tamper); 6] = [
            ("index", |r| r.index += 10),
            ("timestamp", |r| r.timestamp = Timestamp::from_millis(1)),
            ("payload", |r| r.payload = Payload::Measurement(1_000)),
            ("previous_digest", |r| r.previous_digest = Digest::from_hash([3; 32])),
            ("nonce", |r| r.nonce += 1),
            ("digest", |r| r.digest = Digest::from_hash([4; 32])),
        ];

        for target in 0..3usize {
            for (field, tamper) in tampers {
                let mut ledger = ledger();
                for value in [1, 2, 3] {
                    ledger.append_measurement(value).unwrap();
                }
                tamper(&mut ledger.records[target]);

                match ledger.verify_chain() {
                    Err(LedgerError::ChainIntegrityViolation { index, .. }) => {
                        assert_eq!(index, target as u64, "tampered {field} at {target}")
                    }
                    other => panic!("tampered {field} at {target} went unnoticed: {other:?}"),
                }
            }
        }
    }

    proptest! {
        #[test]
        fn appended_chains_are_always_linked(values in proptest::collection::vec(any::<i64>(), 0..40)) {
            let mut ledger = ledger();
            for value in &values {
                ledger.append_measurement(*value).unwrap();
            }

            let records = ledger.records();
            prop_assert_eq!(records.len(), values.len() + 1);
            for (i, record) in records.iter().enumerate() {
                prop_assert_eq!(record.index(), i as u64);
                if i > 0 {
                    prop_assert_eq!(record.previous_digest(), records[i - 1].digest());
                }
            }
            prop_assert!(ledger.verify_chain().is_ok());
        }
    }
}
