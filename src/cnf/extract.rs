//! Clause extraction from distributed constructs

use crate::logic::equivalence::canonical_key;
use crate::logic::{Clause, Formula, Literal, Weight};
use std::collections::HashSet;

/// Split a top-level conjunction of disjunctions into clauses carrying
/// `weight`, dropping tautologies and α-equivalent duplicates.
///
/// The input comes from the distributor and is guaranteed clausal;
/// anything else is an internal invariant violation.
pub fn extract_clauses(formula: &Formula, weight: Weight) -> Vec<Clause> {
    let mut conjuncts = Vec::new();
    collect_conjuncts(formula, &mut conjuncts);

    let mut seen: HashSet<String> = HashSet::new();
    let mut clauses = Vec::new();
    for conjunct in conjuncts {
        let clause = Clause::new(collect_literals(conjunct), weight);
        if clause.is_tautology() {
            continue;
        }
        if seen.insert(canonical_key(&clause)) {
            clauses.push(clause);
        }
    }
    clauses
}

fn collect_conjuncts<'a>(formula: &'a Formula, out: &mut Vec<&'a Formula>) {
    match formula {
        Formula::And(f1, f2) => {
            collect_conjuncts(f1, out);
            collect_conjuncts(f2, out);
        }
        other => out.push(other),
    }
}

fn collect_literals(formula: &Formula) -> Vec<Literal> {
    let mut stack: Vec<&Formula> = vec![formula];
    let mut literals: Vec<Literal> = Vec::new();

    while let Some(formula) = stack.pop() {
        match formula {
            Formula::Or(f1, f2) => {
                stack.push(f2);
                stack.push(f1);
            }

            Formula::Atom(atom) => literals.push(Literal::positive(atom.clone())),

            Formula::Not(inner) => match inner.as_ref() {
                Formula::Atom(atom) => literals.push(Literal::negative(atom.clone())),
                other => panic!("negation of a non-atom in a clause position: {}", other),
            },

            other => panic!("non-disjunctive construct in a clause position: {}", other),
        }
    }

    literals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::Atom;

    fn atom(name: &str) -> Formula {
        Formula::Atom(Atom::new(name, vec![]))
    }

    #[test]
    fn test_conjunction_splits_into_clauses() {
        // (a ∨ b) ∧ c -> two clauses
        let formula = Formula::and(Formula::or(atom("a"), atom("b")), atom("c"));
        let clauses = extract_clauses(&formula, Weight::Hard);
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].len(), 2);
        assert_eq!(clauses[1].len(), 1);
        assert!(clauses.iter().all(|c| c.weight().is_hard()));
    }

    #[test]
    fn test_tautologies_are_dropped() {
        // (a ∨ ~a) ∧ b -> only {b}
        let formula = Formula::and(
            Formula::or(atom("a"), Formula::not(atom("a"))),
            atom("b"),
        );
        let clauses = extract_clauses(&formula, Weight::Hard);
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].is_unit());
    }

    #[test]
    fn test_duplicate_clauses_are_dropped() {
        // (a ∨ b) ∧ (b ∨ a) -> one clause
        let formula = Formula::and(
            Formula::or(atom("a"), atom("b")),
            Formula::or(atom("b"), atom("a")),
        );
        let clauses = extract_clauses(&formula, Weight::Soft(2.0));
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].weight(), Weight::Soft(2.0));
    }

    #[test]
    fn test_single_literal_formula() {
        let clauses = extract_clauses(&Formula::not(atom("a")), Weight::Hard);
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].is_unit());
        assert!(!clauses[0].literals()[0].polarity);
    }
}
