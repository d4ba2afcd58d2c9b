//! Logical data model: terms, literals, formulas, and clauses
//!
//! This module provides the fundamental types shared by CNF compilation
//! and path-driven clause construction.

pub mod clause;
pub mod equivalence;
pub mod formula;
pub mod literal;
pub mod term;

// Re-export commonly used types
pub use clause::Clause;
pub use equivalence::{alpha_equivalent, canonical_key};
pub use formula::{
    DefiniteClause, Formula, Quantifier, Weight, WeightedDefiniteClause, WeightedFormula,
};
pub use literal::{Atom, Literal, Signature};
pub use term::{Constant, FunctionSymbol, Term, Variable};
