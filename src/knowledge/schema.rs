//! Predicate schemas, mode declarations, and domain constants

use crate::logic::Signature;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Argument domains of each known predicate, keyed by signature.
#[derive(Debug, Clone, Default)]
pub struct PredicateSchema {
    domains: HashMap<Signature, Vec<String>>,
}

impl PredicateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, signature: Signature, domains: Vec<String>) {
        self.domains.insert(signature, domains);
    }

    pub fn get(&self, signature: &Signature) -> Option<&[String]> {
        self.domains.get(signature).map(Vec::as_slice)
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.domains.contains_key(signature)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl FromIterator<(Signature, Vec<String>)> for PredicateSchema {
    fn from_iter<I: IntoIterator<Item = (Signature, Vec<String>)>>(iter: I) -> Self {
        PredicateSchema {
            domains: iter.into_iter().collect(),
        }
    }
}

/// Per-argument mode flags controlling variabilization.
///
/// A `constant` position keeps its ground constant; `input`/`output`
/// guide the hypergraph search and are carried through for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placemarker {
    pub constant: bool,
    pub input: bool,
    pub output: bool,
}

impl Placemarker {
    pub const INPUT: Placemarker = Placemarker {
        constant: false,
        input: true,
        output: false,
    };

    pub const OUTPUT: Placemarker = Placemarker {
        constant: false,
        input: false,
        output: true,
    };

    pub const CONSTANT: Placemarker = Placemarker {
        constant: true,
        input: false,
        output: false,
    };
}

/// Mode declarations keyed by predicate signature.
#[derive(Debug, Clone, Default)]
pub struct ModeDeclarations {
    placemarkers: HashMap<Signature, Vec<Placemarker>>,
}

impl ModeDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, signature: Signature, placemarkers: Vec<Placemarker>) {
        self.placemarkers.insert(signature, placemarkers);
    }

    pub fn get(&self, signature: &Signature) -> Option<&[Placemarker]> {
        self.placemarkers.get(signature).map(Vec::as_slice)
    }
}

impl FromIterator<(Signature, Vec<Placemarker>)> for ModeDeclarations {
    fn from_iter<I: IntoIterator<Item = (Signature, Vec<Placemarker>)>>(iter: I) -> Self {
        ModeDeclarations {
            placemarkers: iter.into_iter().collect(),
        }
    }
}

/// Ordered set of the constant symbols of one domain.
#[derive(Debug, Clone, Default)]
pub struct ConstantsSet {
    symbols: IndexSet<String>,
}

impl ConstantsSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, returning `false` when it was already present
    pub fn insert(&mut self, symbol: impl Into<String>) -> bool {
        self.symbols.insert(symbol.into())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Symbols in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ConstantsSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ConstantsSet {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Constants of every known domain.
#[derive(Debug, Clone, Default)]
pub struct DomainConstants {
    domains: HashMap<String, ConstantsSet>,
}

impl DomainConstants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, domain: impl Into<String>, constants: ConstantsSet) {
        self.domains.insert(domain.into(), constants);
    }

    pub fn get(&self, domain: &str) -> Option<&ConstantsSet> {
        self.domains.get(domain)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }
}

impl FromIterator<(String, ConstantsSet)> for DomainConstants {
    fn from_iter<I: IntoIterator<Item = (String, ConstantsSet)>>(iter: I) -> Self {
        DomainConstants {
            domains: iter.into_iter().collect(),
        }
    }
}
