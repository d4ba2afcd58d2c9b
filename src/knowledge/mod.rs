//! Knowledge-base surface supplied by the learner: predicate schemas,
//! mode declarations, domain constants, evidence databases, and
//! hypergraph paths.
//!
//! Everything here is read-only for the duration of a construction call
//! and may be shared across worker threads.

pub mod evidence;
pub mod path;
pub mod schema;

// Re-export commonly used types
pub use evidence::{AtomId, DecodeError, Evidence, EvidenceDb, MemoryEvidenceDb};
pub use path::HPath;
pub use schema::{ConstantsSet, DomainConstants, ModeDeclarations, Placemarker, PredicateSchema};
