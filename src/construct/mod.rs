//! Clause synthesis from hypergraph paths
//!
//! Paths are walked once per clause family: the Horn walk heads the
//! final path element, the definite walk traverses the reversed
//! ordering. Variabilization honors mode declarations and reuses
//! variables for co-occurring constants within a path.

pub mod builder;
mod variabilize;

pub use builder::{
    clauses, definite_clauses, ClauseKind, FunctionIntroduction, NoFunctionIntroduction,
};
