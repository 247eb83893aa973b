use cfl_types::Digest;

use crate::hasher::HasherError;

/// Trait for entries that participate in a hash chain.
pub trait ChainLink {
    /// Position the entry claims to occupy (0 for genesis).
    fn position(&self) -> u64;
    /// The entry's stored digest.
    fn digest(&self) -> Digest;
    /// The stored digest of the predecessor (zero for genesis).
    fn previous_digest(&self) -> Digest;
    /// Digest recomputed from the entry's current field values.
    fn recompute_digest(&self) -> Result<Digest, HasherError>;
}

/// Hash chain integrity verifier.
///
/// A chain is valid when:
/// 1. Entry `i` claims position `i`
/// 2. The first entry links to the zero digest
/// 3. Every later entry links to its predecessor's stored digest
/// 4. Every stored digest matches the digest recomputed from current fields
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain, stopping at the first violation.
    pub fn verify_chain(links: &[impl ChainLink]) -> Result<(), ChainError> {
        for index in 0..links.len() {
            if let Some(error) = Self::check_entry(links, index).into_iter().next() {
                return Err(error);
            }
        }
        Ok(())
    }

    /// Collect every violation in the chain, in position order.
    pub fn violations(links: &[impl ChainLink]) -> Vec<ChainError> {
        (0..links.len())
            .flat_map(|index| Self::check_entry(links, index))
            .collect()
    }

    fn check_entry(links: &[impl ChainLink], index: usize) -> Vec<ChainError> {
        let mut found = Vec::new();
        let entry = &links[index];

        if entry.position() != index as u64 {
            found.push(ChainError::IndexGap {
                index,
                found: entry.position(),
            });
        }

        if index == 0 {
            if !entry.previous_digest().is_zero() {
                found.push(ChainError::GenesisLink);
            }
        } else if entry.previous_digest() != links[index - 1].digest() {
            found.push(ChainError::BrokenLink { index });
        }

        match entry.recompute_digest() {
            Ok(computed) if computed == entry.digest() => {}
            Ok(_) => found.push(ChainError::HashMismatch { index }),
            Err(source) => found.push(ChainError::Hasher { index, source }),
        }

        found
    }
}

/// Errors from chain verification.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("index gap at position {index}: entry claims index {found}")]
    IndexGap { index: usize, found: u64 },

    #[error("genesis entry does not link to the zero digest")]
    GenesisLink,

    #[error("broken link at index {index}: previous digest does not match")]
    BrokenLink { index: usize },

    #[error("hash mismatch at index {index}: computed digest differs from stored")]
    HashMismatch { index: usize },

    #[error("cannot recompute digest at index {index}: {source}")]
    Hasher { index: usize, source: HasherError },
}

impl ChainError {
    /// Chain position the violation was found at.
    pub fn index(&self) -> usize {
        match self {
            Self::GenesisLink => 0,
            Self::IndexGap { index, .. }
            | Self::BrokenLink { index }
            | Self::HashMismatch { index }
            | Self::Hasher { index, .. } => *index,
        }
    }
}
