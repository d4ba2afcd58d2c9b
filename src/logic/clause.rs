//! Clauses: weighted disjunctions of literals

use super::formula::Weight;
use super::literal::Literal;
use super::term::Variable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A clause (disjunction of literals) with a weight.
///
/// Literals carry set semantics: exact duplicates are removed on
/// construction, first occurrence order is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    literals: Vec<Literal>,
    weight: Weight,
}

impl Clause {
    /// Create a new clause, dropping exact duplicate literals
    pub fn new(literals: Vec<Literal>, weight: Weight) -> Self {
        let mut unique: Vec<Literal> = Vec::with_capacity(literals.len());
        for literal in literals {
            if !unique.contains(&literal) {
                unique.push(literal);
            }
        }
        Clause {
            literals: unique,
            weight,
        }
    }

    /// Create a hard clause
    pub fn hard(literals: Vec<Literal>) -> Self {
        Clause::new(literals, Weight::Hard)
    }

    /// Create a soft clause
    pub fn soft(weight: f64, literals: Vec<Literal>) -> Self {
        Clause::new(literals, Weight::Soft(weight))
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Check if this clause is empty (contradiction)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// At most one positive literal
    pub fn is_horn(&self) -> bool {
        self.literals.iter().filter(|lit| lit.polarity).count() <= 1
    }

    /// No variables in any literal
    pub fn is_ground(&self) -> bool {
        self.literals.iter().all(|lit| lit.atom.is_ground())
    }

    /// Check if this clause is a tautology (contains complementary literals)
    pub fn is_tautology(&self) -> bool {
        for i in 0..self.literals.len() {
            for j in (i + 1)..self.literals.len() {
                if self.literals[i].atom == self.literals[j].atom
                    && self.literals[i].polarity != self.literals[j].polarity
                {
                    return true;
                }
            }
        }
        false
    }

    /// Collect all variables occurring in the clause
    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        for literal in &self.literals {
            literal.collect_variables(&mut vars);
        }
        vars
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "⊥");
        }
        if let Weight::Soft(w) = self.weight {
            write!(f, "{} ", w)?;
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", lit)?;
        }
        // hard clauses end with a period
        if self.weight.is_hard() {
            write!(f, ".")?;
        }
        Ok(())
    }
}
