use cfl_types::Digest;
use serde_json::{Map, Value};

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"cfl-record-v1"`) that is
/// prepended to every hash computation, so identical bytes hashed for
/// different purposes never produce the same digest.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for ledger records.
    pub const RECORD: Self = Self {
        domain: "cfl-record-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Digest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash the canonical JSON form of a serializable value.
    ///
    /// Object keys are sorted lexicographically at every depth before
    /// encoding, so the digest does not depend on field declaration order.
    pub fn hash_canonical<T: serde::Serialize>(&self, value: &T) -> Result<Digest, HasherError> {
        let bytes = canonical_json(value)?;
        Ok(self.hash(&bytes))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &Digest) -> bool {
        self.hash(data) == *expected
    }
}

/// Encode a value as JSON with lexicographically sorted object keys.
pub fn canonical_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, HasherError> {
    let value =
        serde_json::to_value(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
    serde_json::to_vec(&sort_keys(value)).map_err(|e| HasherError::Serialization(e.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Errors from hashing operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
