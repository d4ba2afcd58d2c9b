//! Error types for clause construction

use crate::knowledge::AtomId;
use crate::logic::Signature;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClauseGenError {
    /// A path referenced a predicate signature missing from the schema.
    #[error("predicate {0} is not present in the schema")]
    MissingSchema(Signature),

    /// The evidence database refused to decode a ground atom.
    #[error("cannot decode atom {atom_id} of {signature}: {cause}")]
    EvidenceDecode {
        signature: Signature,
        atom_id: AtomId,
        cause: String,
    },

    /// Existential elimination required constants for a domain that has
    /// none.
    #[error("no constants defined for domain '{0}'")]
    MissingDomain(String),

    /// The distributor was handed a construct outside negation normal
    /// form.
    #[error("construct is not in negation normal form: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, ClauseGenError>;
