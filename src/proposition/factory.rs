//! Factories that turn arbitrary strings into valid [`PropositionId`]s.

use crate::proposition::id::PropositionId;
use sha2::{Digest, Sha256};

/// Sentinel id returned whenever a raw string fails validation and the
/// caller has not asked for a guaranteed-unique replacement.
pub const FALLBACK_PROPOSITION_ID: &str = "system_fallback_proposition";

/// Three-stage fallback id construction: accept if valid, else the shared
/// sentinel, else (only via [`create_unique`](PropositionIdFactory::create_unique))
/// a fresh UUID-derived id.
///
/// Stateless and `Send + Sync`: every method is safe to call concurrently
/// from any number of threads on distinct inputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropositionIdFactory;

impl PropositionIdFactory {
    pub fn new() -> Self {
        PropositionIdFactory
    }

    /// Stage 1+2 of the fallback: accept `raw` if valid, else the sentinel.
    pub fn create(&self, raw: &str) -> PropositionId {
        PropositionId::new(raw).unwrap_or_else(|_| PropositionId::new_unchecked(FALLBACK_PROPOSITION_ID))
    }

    /// Like [`create`](Self::create), but stage 3 trades the shared sentinel
    /// for a freshly generated UUID-derived id whenever `raw` is invalid, so
    /// that repeated calls with distinct invalid inputs never collide.
    ///
    /// Deterministic per input string when that input is itself valid;
    /// uniqueness across distinct invalid inputs comes from the UUID's own
    /// randomness, not from `raw`.
    pub fn create_unique(&self, raw: &str) -> PropositionId {
        if let Ok(id) = PropositionId::new(raw) {
            return id;
        }
        let uuid = uuid::Uuid::new_v4();
        // hyphens are valid PropositionId characters, so the UUID's own
        // hyphenated textual form is already a legal id.
        PropositionId::new_unchecked(format!("prop-{uuid}"))
    }
}

/// Deterministically derives ids of the form `prop_<hex>` from any string
/// seed, including the empty seed, arbitrary Unicode, and multi-kilobyte
/// seeds. Same seed always produces the same id; distinct seeds produce
/// distinct ids up to SHA-256 collision.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeededPropositionIdFactory;

impl SeededPropositionIdFactory {
    pub fn new() -> Self {
        SeededPropositionIdFactory
    }

    pub fn create_seeded(&self, seed: &str) -> PropositionId {
        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().take(6).map(|b| format!("{b:02x}")).collect();
        PropositionId::new_unchecked(format!("prop_{hex}"))
    }
}
