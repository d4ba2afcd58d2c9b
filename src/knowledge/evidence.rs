//! Evidence databases: decoding ground-atom identifiers into constants

use crate::logic::{Constant, Signature};
use std::collections::HashMap;
use thiserror::Error;

/// Identifier of a ground atom inside an evidence database.
pub type AtomId = u64;

/// Failure reported by an evidence database when decoding an atom id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct DecodeError {
    pub reason: String,
}

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        DecodeError {
            reason: reason.into(),
        }
    }
}

/// Decoder of ground-atom identifiers for one predicate signature.
///
/// Implementations are in-memory and shared read-only across worker
/// threads, hence `Send + Sync`.
pub trait EvidenceDb: Send + Sync {
    /// Decode an atom id into the ordered constants of the ground atom.
    fn decode(&self, atom_id: AtomId) -> Result<Vec<Constant>, DecodeError>;
}

/// Registry of evidence databases keyed by predicate signature.
#[derive(Default)]
pub struct Evidence {
    databases: HashMap<Signature, Box<dyn EvidenceDb>>,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, signature: Signature, db: impl EvidenceDb + 'static) {
        self.databases.insert(signature, Box::new(db));
    }

    pub fn db(&self, signature: &Signature) -> Option<&dyn EvidenceDb> {
        self.databases.get(signature).map(|db| db.as_ref())
    }
}

/// In-memory evidence database backed by a hash map.
#[derive(Debug, Clone, Default)]
pub struct MemoryEvidenceDb {
    atoms: HashMap<AtomId, Vec<Constant>>,
}

impl MemoryEvidenceDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, atom_id: AtomId, constants: Vec<Constant>) {
        self.atoms.insert(atom_id, constants);
    }
}

impl EvidenceDb for MemoryEvidenceDb {
    fn decode(&self, atom_id: AtomId) -> Result<Vec<Constant>, DecodeError> {
        self.atoms
            .get(&atom_id)
            .cloned()
            .ok_or_else(|| DecodeError::new(format!("unknown atom id {}", atom_id)))
    }
}
