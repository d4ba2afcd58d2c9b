//! Hypergraph paths: ordered ground-atom sequences seeding clause
//! construction

use super::evidence::AtomId;
use crate::logic::Signature;

/// An ordered, non-empty sequence of ground atoms discovered by the
/// hypergraph search, each identified by its evidence atom id and
/// predicate signature.
///
/// The Horn builder heads the final element of the ordering; the definite
/// builder walks the ordering reversed, so the same element is visited
/// first there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HPath {
    steps: Vec<(AtomId, Signature)>,
}

impl HPath {
    /// Returns `None` when `steps` is empty.
    pub fn new(steps: Vec<(AtomId, Signature)>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(HPath { steps })
        }
    }

    pub fn steps(&self) -> &[(AtomId, Signature)] {
        &self.steps
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}
