//! Clausegen: clause construction for Markov Logic Network structure learning
//!
//! This library compiles first-order formulas into clausal form and
//! synthesizes clauses from relational hypergraph paths under
//! mode-declaration policies. It is the clause-constructor core of a
//! structure learner: the formula parser, the hypergraph search, and the
//! weight learner are external collaborators.

pub mod cnf;
pub mod construct;
pub mod error;
pub mod knowledge;
pub mod logic;

// Re-export commonly used types from logic
pub use logic::{
    alpha_equivalent, canonical_key, Atom, Clause, Constant, DefiniteClause, Formula,
    FunctionSymbol, Literal, Quantifier, Signature, Term, Variable, Weight,
    WeightedDefiniteClause, WeightedFormula,
};

// Re-export the knowledge-base surface
pub use knowledge::{
    AtomId, ConstantsSet, DecodeError, DomainConstants, Evidence, EvidenceDb, HPath,
    MemoryEvidenceDb, ModeDeclarations, Placemarker, PredicateSchema,
};

// Re-export the CNF pipeline
pub use cnf::{make_cnf, FormulaInput};

// Re-export the path-driven builders
pub use construct::{
    clauses, definite_clauses, ClauseKind, FunctionIntroduction, NoFunctionIntroduction,
};

pub use error::{ClauseGenError, Result};
