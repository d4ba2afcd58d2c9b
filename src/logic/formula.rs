//! First-order formula constructs and their weighted wrappers
//!
//! This module provides the construct tree for full first-order formulas
//! before conversion to clausal form, the weight attached to formulas and
//! clauses, and definite clauses (`head :- body`).

use super::literal::Atom;
use super::term::Variable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Forall,
    Exists,
}

/// First-order formula construct
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Biconditional
    Iff(Box<Formula>, Box<Formula>),
    /// Quantified formula
    Quantified(Quantifier, Variable, Box<Formula>),
}

impl Formula {
    pub fn atom(atom: Atom) -> Self {
        Formula::Atom(atom)
    }

    pub fn not(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(premise: Formula, conclusion: Formula) -> Self {
        Formula::Implies(Box::new(premise), Box::new(conclusion))
    }

    pub fn iff(left: Formula, right: Formula) -> Self {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    pub fn exists(variable: Variable, body: Formula) -> Self {
        Formula::Quantified(Quantifier::Exists, variable, Box::new(body))
    }

    pub fn forall(variable: Variable, body: Formula) -> Self {
        Formula::Quantified(Quantifier::Forall, variable, Box::new(body))
    }

    /// An atom or a negated atom
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(inner) => matches!(inner.as_ref(), Formula::Atom(_)),
            _ => false,
        }
    }

    /// Get all free variables in the formula
    pub fn free_variables(&self) -> HashSet<Variable> {
        match self {
            Formula::Atom(atom) => {
                let mut vars = HashSet::new();
                atom.collect_variables(&mut vars);
                vars
            }
            Formula::Not(inner) => inner.free_variables(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            Formula::Quantified(_, var, inner) => {
                let mut vars = inner.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Check if the formula is closed (no free variables)
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Forall => write!(f, "∀"),
            Quantifier::Exists => write!(f, "∃"),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(atom) => write!(f, "{}", atom),
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Atom(atom) => write!(f, "~{}", atom),
                other => write!(f, "~({})", other),
            },
            Formula::And(f1, f2) => write!(f, "({} ∧ {})", f1, f2),
            Formula::Or(f1, f2) => write!(f, "({} ∨ {})", f1, f2),
            Formula::Implies(f1, f2) => write!(f, "({} ⇒ {})", f1, f2),
            Formula::Iff(f1, f2) => write!(f, "({} ⇔ {})", f1, f2),
            Formula::Quantified(q, v, inner) => write!(f, "{}{}.{}", q, v, inner),
        }
    }
}

/// Weight of a formula or clause; hard formulas hold in every world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Weight {
    Hard,
    Soft(f64),
}

impl Weight {
    pub fn is_hard(&self) -> bool {
        matches!(self, Weight::Hard)
    }

    pub fn value(&self) -> f64 {
        match self {
            Weight::Hard => f64::INFINITY,
            Weight::Soft(w) => *w,
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Hard => write!(f, "∞"),
            Weight::Soft(w) => write!(f, "{}", w),
        }
    }
}

/// A formula construct paired with its weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedFormula {
    pub weight: Weight,
    pub formula: Formula,
}

impl WeightedFormula {
    pub fn hard(formula: Formula) -> Self {
        WeightedFormula {
            weight: Weight::Hard,
            formula,
        }
    }

    pub fn soft(weight: f64, formula: Formula) -> Self {
        WeightedFormula {
            weight: Weight::Soft(weight),
            formula,
        }
    }
}

impl fmt::Display for WeightedFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weight, self.formula)
    }
}

/// A definite clause `head :- body`: an atomic head implied by a
/// conjunction of atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefiniteClause {
    head: Atom,
    body: Formula,
}

impl DefiniteClause {
    /// Returns `None` unless `body` is a conjunction of atoms.
    pub fn new(head: Atom, body: Formula) -> Option<Self> {
        fn conjunctive(formula: &Formula) -> bool {
            match formula {
                Formula::Atom(_) => true,
                Formula::And(f1, f2) => conjunctive(f1) && conjunctive(f2),
                _ => false,
            }
        }

        if conjunctive(&body) {
            Some(DefiniteClause { head, body })
        } else {
            None
        }
    }

    /// Build from a head and a non-empty list of body atoms.
    pub fn from_atoms(head: Atom, body: Vec<Atom>) -> Option<Self> {
        let mut rest = body.into_iter().rev();
        let last = rest.next()?;
        let body = rest.fold(Formula::Atom(last), |acc, atom| {
            Formula::And(Box::new(Formula::Atom(atom)), Box::new(acc))
        });
        Some(DefiniteClause { head, body })
    }

    pub fn head(&self) -> &Atom {
        &self.head
    }

    pub fn body(&self) -> &Formula {
        &self.body
    }

    /// Body atoms in conjunction order
    pub fn body_atoms(&self) -> Vec<&Atom> {
        fn collect<'a>(formula: &'a Formula, out: &mut Vec<&'a Atom>) {
            match formula {
                Formula::Atom(atom) => out.push(atom),
                Formula::And(f1, f2) => {
                    collect(f1, out);
                    collect(f2, out);
                }
                _ => unreachable!("definite clause bodies are conjunctions of atoms"),
            }
        }

        let mut atoms = Vec::new();
        collect(&self.body, &mut atoms);
        atoms
    }

    /// Same head and same body atom set, regardless of conjunction order
    pub fn same_literals(&self, other: &DefiniteClause) -> bool {
        if self.head != other.head {
            return false;
        }
        let mine: HashSet<&Atom> = self.body_atoms().into_iter().collect();
        let theirs: HashSet<&Atom> = other.body_atoms().into_iter().collect();
        mine == theirs
    }

    /// The implication `body ⇒ head` equivalent to this clause
    pub fn to_implication(&self) -> Formula {
        Formula::Implies(
            Box::new(self.body.clone()),
            Box::new(Formula::Atom(self.head.clone())),
        )
    }
}

impl fmt::Display for DefiniteClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :- ", self.head)?;
        for (i, atom) in self.body_atoms().iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}

/// A definite clause paired with a soft weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedDefiniteClause {
    pub weight: f64,
    pub clause: DefiniteClause,
}

impl WeightedDefiniteClause {
    pub fn new(weight: f64, clause: DefiniteClause) -> Self {
        WeightedDefiniteClause { weight, clause }
    }

    /// Literal-set equality on the underlying clauses
    pub fn same_literals(&self, other: &WeightedDefiniteClause) -> bool {
        self.clause.same_literals(&other.clause)
    }
}

impl fmt::Display for WeightedDefiniteClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.weight, self.clause)
    }
}
