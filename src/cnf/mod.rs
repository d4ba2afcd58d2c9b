//! CNF compilation pipeline
//!
//! Orchestrates per-formula normalization, hybrid distribution, and
//! clause extraction. Formulas are independent of one another, so the
//! per-formula map runs on a rayon worker pool; reduction happens in
//! input order, which keeps both the output clause set and the first
//! surfaced error deterministic.

pub mod distribute;
pub mod extract;
pub mod normalize;


pub use distribute::{generic_distribute, hybrid_distribute};
pub use extract::extract_clauses;
pub use normalize::normalize;

use crate::error::Result;
use crate::knowledge::DomainConstants;
use crate::logic::equivalence::canonical_key;
use crate::logic::{Clause, DefiniteClause, Formula, Weight, WeightedFormula};
use rayon::prelude::*;
use std::collections::HashSet;

/// A formula handed to [`make_cnf`]: weighted, definite, or a bare
/// construct.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaInput {
    Weighted(WeightedFormula),
    Definite(DefiniteClause),
    Construct(Formula),
}

impl From<WeightedFormula> for FormulaInput {
    fn from(formula: WeightedFormula) -> Self {
        FormulaInput::Weighted(formula)
    }
}

impl From<DefiniteClause> for FormulaInput {
    fn from(clause: DefiniteClause) -> Self {
        FormulaInput::Definite(clause)
    }
}

impl From<Formula> for FormulaInput {
    fn from(formula: Formula) -> Self {
        FormulaInput::Construct(formula)
    }
}

impl FormulaInput {
    /// Weight and construct to compile: definite clauses become hard
    /// `body ⇒ head` implications, bare constructs compile hard, and
    /// weighted formulas keep their weight.
    fn into_weighted(self) -> (Weight, Formula) {
        match self {
            FormulaInput::Weighted(wf) => (wf.weight, wf.formula),
            FormulaInput::Definite(dc) => (Weight::Hard, dc.to_implication()),
            FormulaInput::Construct(f) => (Weight::Hard, f),
        }
    }
}

/// Compile a set of formulas into a duplicate-free clause set.
///
/// The clause *set* is deterministic for a given input set; the returned
/// order follows input order with first-seen de-duplication. The first
/// error by input index wins.
pub fn make_cnf<I>(inputs: I, constants: &DomainConstants) -> Result<Vec<Clause>>
where
    I: IntoIterator,
    I::Item: Into<FormulaInput>,
{
    let inputs: Vec<FormulaInput> = inputs.into_iter().map(Into::into).collect();
    log::debug!("compiling {} formulas to CNF", inputs.len());

    let compiled: Vec<Result<Vec<Clause>>> = inputs
        .into_par_iter()
        .map(|input| compile_formula(input, constants))
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut clauses = Vec::new();
    for result in compiled {
        for clause in result? {
            if seen.insert(canonical_key(&clause)) {
                clauses.push(clause);
            }
        }
    }

    log::debug!("CNF compilation produced {} clauses", clauses.len());
    Ok(clauses)
}

fn compile_formula(input: FormulaInput, constants: &DomainConstants) -> Result<Vec<Clause>> {
    let (weight, construct) = input.into_weighted();
    let normalized = normalize(construct, constants)?;
    let distributed = hybrid_distribute(normalized)?;
    Ok(extract_clauses(&distributed, weight))
}
