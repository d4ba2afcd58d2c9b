//! Normalization of first-order constructs ahead of distribution
//!
//! Applies, in fixed order: implication removal, negation pushing (NNF),
//! standardization of bound variables, existential elimination over
//! domain constants, and universal dropping. Skolemization happens
//! upstream in this system; domains are finite, so existentials ground
//! out as disjunctions over the bound variable's constants.

use crate::error::{ClauseGenError, Result};
use crate::knowledge::DomainConstants;
use crate::logic::{Atom, Constant, Formula, Quantifier, Term, Variable};
use std::collections::{HashMap, HashSet};

/// Normalize a construct for distribution.
///
/// Fails with [`ClauseGenError::MissingDomain`] when an existential
/// quantifier binds a variable whose domain has no constants.
pub fn normalize(formula: Formula, constants: &DomainConstants) -> Result<Formula> {
    let formula = remove_implications(formula);
    let formula = push_negations(formula);
    let formula = standardize_apart(formula);
    let formula = eliminate_existentials(formula, constants)?;
    Ok(drop_universals(formula))
}

/// Rewrite `A ⇒ B` to `¬A ∨ B` and `A ⇔ B` to `(¬A ∨ B) ∧ (A ∨ ¬B)`
fn remove_implications(formula: Formula) -> Formula {
    match formula {
        Formula::Implies(premise, conclusion) => Formula::or(
            Formula::not(remove_implications(*premise)),
            remove_implications(*conclusion),
        ),
        Formula::Iff(left, right) => {
            let left = remove_implications(*left);
            let right = remove_implications(*right);
            Formula::and(
                Formula::or(Formula::not(left.clone()), right.clone()),
                Formula::or(left, Formula::not(right)),
            )
        }
        Formula::Not(inner) => Formula::not(remove_implications(*inner)),
        Formula::And(f1, f2) => {
            Formula::and(remove_implications(*f1), remove_implications(*f2))
        }
        Formula::Or(f1, f2) => Formula::or(remove_implications(*f1), remove_implications(*f2)),
        Formula::Quantified(q, var, inner) => {
            Formula::Quantified(q, var, Box::new(remove_implications(*inner)))
        }
        Formula::Atom(_) => formula,
    }
}

/// Push negations down to atoms using an iterative work stack
fn push_negations(formula: Formula) -> Formula {
    enum WorkItem {
        Process(Formula, bool), // (formula, negate)
        CombineAnd,
        CombineOr,
        CombineQuantified(Quantifier, Variable),
    }

    let mut stack: Vec<WorkItem> = vec![WorkItem::Process(formula, false)];
    let mut results: Vec<Formula> = Vec::new();

    while let Some(item) = stack.pop() {
        match item {
            WorkItem::Process(formula, negate) => match (formula, negate) {
                // Atom - base case
                (Formula::Atom(a), false) => results.push(Formula::Atom(a)),
                (Formula::Atom(a), true) => results.push(Formula::not(Formula::Atom(a))),

                // Double negation - just flip and continue
                (Formula::Not(inner), neg) => {
                    stack.push(WorkItem::Process(*inner, !neg));
                }

                (Formula::And(f1, f2), false) => {
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(*f2, false));
                    stack.push(WorkItem::Process(*f1, false));
                }
                (Formula::And(f1, f2), true) => {
                    // De Morgan: ~(A & B) = ~A | ~B
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(*f2, true));
                    stack.push(WorkItem::Process(*f1, true));
                }

                (Formula::Or(f1, f2), false) => {
                    stack.push(WorkItem::CombineOr);
                    stack.push(WorkItem::Process(*f2, false));
                    stack.push(WorkItem::Process(*f1, false));
                }
                (Formula::Or(f1, f2), true) => {
                    // De Morgan: ~(A | B) = ~A & ~B
                    stack.push(WorkItem::CombineAnd);
                    stack.push(WorkItem::Process(*f2, true));
                    stack.push(WorkItem::Process(*f1, true));
                }

                (Formula::Quantified(q, var, inner), false) => {
                    stack.push(WorkItem::CombineQuantified(q, var));
                    stack.push(WorkItem::Process(*inner, false));
                }
                (Formula::Quantified(q, var, inner), true) => {
                    // ~(∀x.P) = ∃x.~P and ~(∃x.P) = ∀x.~P
                    let dual = match q {
                        Quantifier::Forall => Quantifier::Exists,
                        Quantifier::Exists => Quantifier::Forall,
                    };
                    stack.push(WorkItem::CombineQuantified(dual, var));
                    stack.push(WorkItem::Process(*inner, true));
                }

                (Formula::Implies(_, _), _) | (Formula::Iff(_, _), _) => {
                    unreachable!("implications are removed before negation pushing")
                }
            },

            WorkItem::CombineAnd => {
                let child2 = results.pop().unwrap();
                let child1 = results.pop().unwrap();
                results.push(Formula::and(child1, child2));
            }

            WorkItem::CombineOr => {
                let child2 = results.pop().unwrap();
                let child1 = results.pop().unwrap();
                results.push(Formula::or(child1, child2));
            }

            WorkItem::CombineQuantified(q, var) => {
                let child = results.pop().unwrap();
                results.push(Formula::Quantified(q, var, Box::new(child)));
            }
        }
    }

    results.pop().unwrap()
}

/// Rename bound variables so each quantifier binds a unique name.
///
/// Fresh names are `V<n>`, skipping names already present anywhere in
/// the formula; free variables are left untouched.
fn standardize_apart(formula: Formula) -> Formula {
    let mut used = HashSet::new();
    collect_variable_names(&formula, &mut used);

    let mut counter = 0;
    rename_bound(formula, &mut counter, &HashMap::new(), &used)
}

fn collect_variable_names(formula: &Formula, names: &mut HashSet<String>) {
    match formula {
        Formula::Atom(atom) => {
            let mut vars = HashSet::new();
            atom.collect_variables(&mut vars);
            names.extend(vars.into_iter().map(|v| v.name));
        }
        Formula::Not(inner) => collect_variable_names(inner, names),
        Formula::And(f1, f2)
        | Formula::Or(f1, f2)
        | Formula::Implies(f1, f2)
        | Formula::Iff(f1, f2) => {
            collect_variable_names(f1, names);
            collect_variable_names(f2, names);
        }
        Formula::Quantified(_, var, inner) => {
            names.insert(var.name.clone());
            collect_variable_names(inner, names);
        }
    }
}

fn fresh_name(counter: &mut usize, used: &HashSet<String>) -> String {
    loop {
        let name = format!("V{}", *counter);
        *counter += 1;
        if !used.contains(&name) {
            return name;
        }
    }
}

fn rename_bound(
    formula: Formula,
    counter: &mut usize,
    renaming: &HashMap<Variable, Variable>,
    used: &HashSet<String>,
) -> Formula {
    match formula {
        Formula::Atom(atom) => {
            let args = atom
                .args
                .into_iter()
                .map(|t| rename_term(t, renaming))
                .collect();
            Formula::Atom(Atom {
                signature: atom.signature,
                args,
            })
        }

        Formula::Not(inner) => Formula::not(rename_bound(*inner, counter, renaming, used)),

        Formula::And(f1, f2) => Formula::and(
            rename_bound(*f1, counter, renaming, used),
            rename_bound(*f2, counter, renaming, used),
        ),

        Formula::Or(f1, f2) => Formula::or(
            rename_bound(*f1, counter, renaming, used),
            rename_bound(*f2, counter, renaming, used),
        ),

        Formula::Quantified(q, var, inner) => {
            let fresh = Variable::new(fresh_name(counter, used), var.domain.clone());
            let mut renaming = renaming.clone();
            renaming.insert(var, fresh.clone());
            Formula::Quantified(q, fresh, Box::new(rename_bound(*inner, counter, &renaming, used)))
        }

        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are removed before standardization")
        }
    }
}

fn rename_term(term: Term, renaming: &HashMap<Variable, Variable>) -> Term {
    match term {
        Term::Variable(v) => match renaming.get(&v) {
            Some(fresh) => Term::Variable(fresh.clone()),
            None => Term::Variable(v),
        },
        Term::Constant(c) => Term::Constant(c),
        Term::Function(f, args) => Term::Function(
            f,
            args.into_iter().map(|a| rename_term(a, renaming)).collect(),
        ),
    }
}

/// Replace each existential with the disjunction of its body over the
/// bound variable's domain constants
fn eliminate_existentials(formula: Formula, constants: &DomainConstants) -> Result<Formula> {
    match formula {
        Formula::Quantified(Quantifier::Exists, var, inner) => {
            let body = eliminate_existentials(*inner, constants)?;
            let domain = constants
                .get(&var.domain)
                .ok_or_else(|| ClauseGenError::MissingDomain(var.domain.clone()))?;

            let mut grounded: Option<Formula> = None;
            for symbol in domain.iter() {
                let disjunct =
                    substitute(&body, &var, &Term::Constant(Constant::new(symbol)));
                grounded = Some(match grounded {
                    None => disjunct,
                    Some(acc) => Formula::or(acc, disjunct),
                });
            }
            // an empty domain leaves nothing to disjoin over
            grounded.ok_or_else(|| ClauseGenError::MissingDomain(var.domain.clone()))
        }

        Formula::Quantified(Quantifier::Forall, var, inner) => Ok(Formula::Quantified(
            Quantifier::Forall,
            var,
            Box::new(eliminate_existentials(*inner, constants)?),
        )),

        Formula::Not(inner) => Ok(Formula::not(eliminate_existentials(*inner, constants)?)),

        Formula::And(f1, f2) => Ok(Formula::and(
            eliminate_existentials(*f1, constants)?,
            eliminate_existentials(*f2, constants)?,
        )),

        Formula::Or(f1, f2) => Ok(Formula::or(
            eliminate_existentials(*f1, constants)?,
            eliminate_existentials(*f2, constants)?,
        )),

        Formula::Atom(_) => Ok(formula),

        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are removed before quantifier elimination")
        }
    }
}

fn substitute(formula: &Formula, var: &Variable, replacement: &Term) -> Formula {
    match formula {
        Formula::Atom(atom) => Formula::Atom(Atom {
            signature: atom.signature.clone(),
            args: atom
                .args
                .iter()
                .map(|t| substitute_term(t, var, replacement))
                .collect(),
        }),

        Formula::Not(inner) => Formula::not(substitute(inner, var, replacement)),

        Formula::And(f1, f2) => Formula::and(
            substitute(f1, var, replacement),
            substitute(f2, var, replacement),
        ),

        Formula::Or(f1, f2) => Formula::or(
            substitute(f1, var, replacement),
            substitute(f2, var, replacement),
        ),

        Formula::Quantified(q, v, inner) => {
            if v == var {
                // variable is rebound here, the substitution stops
                formula.clone()
            } else {
                Formula::Quantified(*q, v.clone(), Box::new(substitute(inner, var, replacement)))
            }
        }

        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are removed before substitution")
        }
    }
}

fn substitute_term(term: &Term, var: &Variable, replacement: &Term) -> Term {
    match term {
        Term::Variable(v) => {
            if v == var {
                replacement.clone()
            } else {
                term.clone()
            }
        }
        Term::Constant(_) => term.clone(),
        Term::Function(f, args) => Term::Function(
            f.clone(),
            args.iter()
                .map(|a| substitute_term(a, var, replacement))
                .collect(),
        ),
    }
}

/// Drop universal quantifiers: clausal variables are implicitly universal
fn drop_universals(formula: Formula) -> Formula {
    match formula {
        Formula::Quantified(Quantifier::Forall, _, inner) => drop_universals(*inner),
        Formula::Not(inner) => Formula::not(drop_universals(*inner)),
        Formula::And(f1, f2) => Formula::and(drop_universals(*f1), drop_universals(*f2)),
        Formula::Or(f1, f2) => Formula::or(drop_universals(*f1), drop_universals(*f2)),
        Formula::Atom(_) => formula,
        Formula::Quantified(Quantifier::Exists, _, _) => {
            unreachable!("existentials are eliminated before universal dropping")
        }
        Formula::Implies(_, _) | Formula::Iff(_, _) => {
            unreachable!("implications are removed before universal dropping")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::ConstantsSet;

    fn atom(name: &str) -> Formula {
        Formula::Atom(Atom::new(name, vec![]))
    }

    fn atom_of(name: &str, var: &Variable) -> Formula {
        Formula::Atom(Atom::new(name, vec![Term::Variable(var.clone())]))
    }

    fn no_constants() -> DomainConstants {
        DomainConstants::new()
    }

    #[test]
    fn test_implication_removal() {
        let formula = Formula::implies(atom("p"), atom("q"));
        let normalized = normalize(formula, &no_constants()).unwrap();
        assert_eq!(normalized, Formula::or(Formula::not(atom("p")), atom("q")));
    }

    #[test]
    fn test_iff_expansion() {
        let formula = Formula::iff(atom("p"), atom("q"));
        let normalized = normalize(formula, &no_constants()).unwrap();
        assert_eq!(
            normalized,
            Formula::and(
                Formula::or(Formula::not(atom("p")), atom("q")),
                Formula::or(atom("p"), Formula::not(atom("q"))),
            )
        );
    }

    #[test]
    fn test_de_morgan() {
        // ~(p & q) -> ~p | ~q
        let formula = Formula::not(Formula::and(atom("p"), atom("q")));
        let normalized = normalize(formula, &no_constants()).unwrap();
        assert_eq!(
            normalized,
            Formula::or(Formula::not(atom("p")), Formula::not(atom("q")))
        );
    }

    #[test]
    fn test_double_negation() {
        let formula = Formula::not(Formula::not(atom("p")));
        let normalized = normalize(formula, &no_constants()).unwrap();
        assert_eq!(normalized, atom("p"));
    }

    #[test]
    fn test_negated_quantifier_flips() {
        // ~(∀x.p(x)) over domain {A} -> ~p(A)
        let x = Variable::new("x", "person");
        let formula = Formula::not(Formula::forall(x.clone(), atom_of("p", &x)));

        let mut constants = DomainConstants::new();
        constants.insert("person", ConstantsSet::from_iter(["A"]));

        let normalized = normalize(formula, &constants).unwrap();
        assert_eq!(
            normalized,
            Formula::not(Formula::Atom(Atom::new(
                "p",
                vec![Term::Constant(Constant::new("A"))]
            )))
        );
    }

    #[test]
    fn test_standardization_gives_distinct_bound_names() {
        // ∀x.p(x) ∧ ∃x.q(x): the two binders must not share a name
        let x = Variable::new("x", "person");
        let formula = Formula::and(
            Formula::forall(x.clone(), atom_of("p", &x)),
            Formula::exists(x.clone(), atom_of("q", &x)),
        );

        let mut constants = DomainConstants::new();
        constants.insert("person", ConstantsSet::from_iter(["A", "B"]));

        let normalized = normalize(formula, &constants).unwrap();
        match normalized {
            Formula::And(left, right) => {
                // left: p over a renamed universal variable
                let left_vars = left.free_variables();
                assert_eq!(left_vars.len(), 1);
                assert_ne!(left_vars.iter().next().unwrap().name, "x");
                // right: q grounded over both constants
                assert_eq!(
                    *right,
                    Formula::or(
                        Formula::Atom(Atom::new(
                            "q",
                            vec![Term::Constant(Constant::new("A"))]
                        )),
                        Formula::Atom(Atom::new(
                            "q",
                            vec![Term::Constant(Constant::new("B"))]
                        )),
                    )
                );
            }
            other => panic!("expected conjunction, got {}", other),
        }
    }

    #[test]
    fn test_existential_elimination_over_constants() {
        let x = Variable::new("x", "person");
        let formula = Formula::exists(x.clone(), atom_of("smokes", &x));

        let mut constants = DomainConstants::new();
        constants.insert("person", ConstantsSet::from_iter(["Anna", "Bob"]));

        let normalized = normalize(formula, &constants).unwrap();
        assert_eq!(
            normalized,
            Formula::or(
                Formula::Atom(Atom::new(
                    "smokes",
                    vec![Term::Constant(Constant::new("Anna"))]
                )),
                Formula::Atom(Atom::new(
                    "smokes",
                    vec![Term::Constant(Constant::new("Bob"))]
                )),
            )
        );
    }

    #[test]
    fn test_missing_domain_is_reported() {
        let x = Variable::new("x", "city");
        let formula = Formula::exists(x.clone(), atom_of("rainy", &x));
        let err = normalize(formula, &no_constants()).unwrap_err();
        assert_eq!(err, ClauseGenError::MissingDomain("city".to_string()));
    }

    #[test]
    fn test_empty_domain_is_reported() {
        let x = Variable::new("x", "city");
        let formula = Formula::exists(x.clone(), atom_of("rainy", &x));
        let mut constants = DomainConstants::new();
        constants.insert("city", ConstantsSet::new());
        let err = normalize(formula, &constants).unwrap_err();
        assert_eq!(err, ClauseGenError::MissingDomain("city".to_string()));
    }

    #[test]
    fn test_universals_are_dropped() {
        let x = Variable::new("x", "person");
        let formula = Formula::forall(x.clone(), atom_of("p", &x));
        let normalized = normalize(formula, &no_constants()).unwrap();
        let expected_var = normalized.free_variables();
        assert_eq!(expected_var.len(), 1);
        assert!(matches!(normalized, Formula::Atom(_)));
    }
}
