//! Terms in first-order logic

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed variable: every variable ranges over a named finite domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub domain: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            domain: domain.into(),
        }
    }
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

/// A function symbol with arity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub name: String,
    pub arity: usize,
}

impl FunctionSymbol {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        FunctionSymbol {
            name: name.into(),
            arity,
        }
    }
}

/// A term in first-order logic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
    Function(FunctionSymbol, Vec<Term>),
}

impl Term {
    /// Get all variables in this term
    pub fn variables(&self) -> Vec<Variable> {
        match self {
            Term::Variable(v) => vec![v.clone()],
            Term::Constant(_) => vec![],
            Term::Function(_, args) => args.iter().flat_map(|arg| arg.variables()).collect(),
        }
    }

    /// Collect all variables in this term
    pub fn collect_variables(&self, vars: &mut std::collections::HashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Check whether this term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Function(_, args) => args.iter().all(Term::is_ground),
        }
    }
}

// Display implementations for pretty printing

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Function(func, args) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
