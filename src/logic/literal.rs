//! Atoms and literals in first-order logic

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate signature: symbol plus arity, displayed `symbol/arity`.
///
/// Schemas, mode declarations, and evidence databases are all keyed by
/// signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub arity: usize,
}

impl Signature {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Signature {
            name: name.into(),
            arity,
        }
    }
}

/// An atomic formula (predicate applied to terms)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub signature: Signature,
    pub args: Vec<Term>,
}

impl Atom {
    /// Build an atom from a predicate symbol and its arguments; the
    /// signature arity is the argument count.
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        let signature = Signature::new(predicate, args.len());
        Atom { signature, args }
    }

    /// Check whether every argument is ground
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// Collect all variables in this atom
    pub fn collect_variables(&self, vars: &mut std::collections::HashSet<Variable>) {
        for arg in &self.args {
            arg.collect_variables(vars);
        }
    }
}

/// A literal (positive or negative atom)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub atom: Atom,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    /// Create a new positive literal
    pub fn positive(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: true,
        }
    }

    /// Create a new negative literal
    pub fn negative(atom: Atom) -> Self {
        Literal {
            atom,
            polarity: false,
        }
    }

    /// Get the complement of this literal
    pub fn complement(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            polarity: !self.polarity,
        }
    }

    /// Collect all variables in this literal
    pub fn collect_variables(&self, vars: &mut std::collections::HashSet<Variable>) {
        self.atom.collect_variables(vars);
    }
}

// Display implementations

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.signature.name);
        }
        write!(f, "{}(", self.signature.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "~")?;
        }
        write!(f, "{}", self.atom)
    }
}
