//! Integration tests for CNF compilation

use clausegen::{
    alpha_equivalent, make_cnf, Atom, Clause, ClauseGenError, ConstantsSet, DefiniteClause,
    DomainConstants, Formula, FormulaInput, Term, Variable, Weight, WeightedFormula,
};

fn prop(name: &str) -> Formula {
    Formula::Atom(Atom::new(name, vec![]))
}

fn var_atom(name: &str, var: &str) -> Atom {
    Atom::new(name, vec![Term::Variable(Variable::new(var, "thing"))])
}

fn no_constants() -> DomainConstants {
    DomainConstants::new()
}

/// Rebuild the conjunction of a clause set as a single construct
fn conjunction_of(clauses: &[Clause]) -> Formula {
    let mut result: Option<Formula> = None;
    for clause in clauses {
        let mut disjunction: Option<Formula> = None;
        for literal in clause.literals() {
            let formula = if literal.polarity {
                Formula::Atom(literal.atom.clone())
            } else {
                Formula::not(Formula::Atom(literal.atom.clone()))
            };
            disjunction = Some(match disjunction {
                None => formula,
                Some(acc) => Formula::or(acc, formula),
            });
        }
        let clause_formula = disjunction.expect("clauses are non-empty");
        result = Some(match result {
            None => clause_formula,
            Some(acc) => Formula::and(acc, clause_formula),
        });
    }
    result.expect("clause set is non-empty")
}

#[test]
fn test_identity_on_a_disjunction() {
    // {a ∨ b} hard -> one hard clause {+a, +b}
    let input = WeightedFormula::hard(Formula::or(prop("a"), prop("b")));
    let clauses = make_cnf(vec![input], &no_constants()).unwrap();

    assert_eq!(clauses.len(), 1);
    let clause = &clauses[0];
    assert!(clause.weight().is_hard());
    assert_eq!(clause.len(), 2);
    assert!(clause.literals().iter().all(|lit| lit.polarity));
}

#[test]
fn test_fast_distribution_of_two_groups() {
    // (a ∧ b) ∨ (c ∧ d) hard -> {a,c}, {a,d}, {b,c}, {b,d}
    let input = WeightedFormula::hard(Formula::or(
        Formula::and(prop("a"), prop("b")),
        Formula::and(prop("c"), prop("d")),
    ));
    let clauses = make_cnf(vec![input], &no_constants()).unwrap();

    assert_eq!(clauses.len(), 4);
    let mut sets: Vec<Vec<String>> = clauses
        .iter()
        .map(|clause| {
            let mut names: Vec<String> = clause
                .literals()
                .iter()
                .map(|lit| lit.atom.signature.name.clone())
                .collect();
            names.sort();
            names
        })
        .collect();
    sets.sort();
    assert_eq!(
        sets,
        vec![
            vec!["a".to_string(), "c".to_string()],
            vec!["a".to_string(), "d".to_string()],
            vec!["b".to_string(), "c".to_string()],
            vec!["b".to_string(), "d".to_string()],
        ]
    );
    assert!(clauses.iter().all(|clause| clause.weight().is_hard()));
}

#[test]
fn test_prefix_atoms_reach_every_clause() {
    // e ∨ (a ∧ b) ∨ f -> {e,f,a}, {e,f,b}
    let input = Formula::or(
        Formula::or(prop("e"), Formula::and(prop("a"), prop("b"))),
        prop("f"),
    );
    let clauses = make_cnf(vec![input], &no_constants()).unwrap();

    assert_eq!(clauses.len(), 2);
    for clause in &clauses {
        assert_eq!(clause.len(), 3);
        let names: Vec<&str> = clause
            .literals()
            .iter()
            .map(|lit| lit.atom.signature.name.as_str())
            .collect();
        assert!(names.contains(&"e"));
        assert!(names.contains(&"f"));
    }
}

#[test]
fn test_definite_clause_becomes_horn() {
    // head(x) :- p(x), q(x) -> {~p(x), ~q(x), +head(x)} hard
    let clause = DefiniteClause::from_atoms(
        var_atom("head", "x"),
        vec![var_atom("p", "x"), var_atom("q", "x")],
    )
    .unwrap();
    let clauses = make_cnf(vec![clause], &no_constants()).unwrap();

    assert_eq!(clauses.len(), 1);
    let clause = &clauses[0];
    assert!(clause.weight().is_hard());
    assert_eq!(clause.len(), 3);
    assert!(clause.is_horn());
    for literal in clause.literals() {
        let name = literal.atom.signature.name.as_str();
        assert_eq!(literal.polarity, name == "head");
    }
}

#[test]
fn test_empty_input_yields_empty_output() {
    let clauses = make_cnf(Vec::<FormulaInput>::new(), &no_constants()).unwrap();
    assert!(clauses.is_empty());
}

#[test]
fn test_single_literal_formula() {
    let clauses = make_cnf(vec![Formula::not(prop("a"))], &no_constants()).unwrap();
    assert_eq!(clauses.len(), 1);
    assert!(clauses[0].is_unit());
    assert!(!clauses[0].literals()[0].polarity);
}

#[test]
fn test_compilation_is_idempotent_on_clause_sets() {
    let input = Formula::or(
        Formula::and(prop("a"), prop("b")),
        Formula::and(prop("c"), prop("d")),
    );
    let first = make_cnf(vec![input], &no_constants()).unwrap();

    let second = make_cnf(vec![conjunction_of(&first)], &no_constants()).unwrap();
    assert_eq!(second.len(), first.len());
    for clause in &second {
        assert!(first.iter().any(|original| alpha_equivalent(original, clause)));
    }
}

#[test]
fn test_tautologies_never_appear() {
    // p ∨ ~p compiles away entirely
    let input = Formula::or(prop("p"), Formula::not(prop("p")));
    let clauses = make_cnf(vec![input], &no_constants()).unwrap();
    assert!(clauses.is_empty());
}

#[test]
fn test_existential_over_a_domain() {
    // ∃x. smokes(x) compiles against its constants, missing domain errors
    let x = Variable::new("x", "person");
    let good = Formula::exists(
        x.clone(),
        Formula::Atom(Atom::new("smokes", vec![Term::Variable(x.clone())])),
    );

    let mut constants = DomainConstants::new();
    constants.insert("person", ConstantsSet::from_iter(["Anna", "Bob"]));
    let clauses = make_cnf(vec![good.clone()], &constants).unwrap();
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].len(), 2);

    let err = make_cnf(vec![good], &no_constants()).unwrap_err();
    assert_eq!(err, ClauseGenError::MissingDomain("person".to_string()));
}

#[test]
fn test_mixed_weights_survive_compilation() {
    let inputs = vec![
        FormulaInput::from(WeightedFormula::soft(1.5, Formula::implies(prop("p"), prop("q")))),
        FormulaInput::from(WeightedFormula::hard(prop("r"))),
    ];
    let clauses = make_cnf(inputs, &no_constants()).unwrap();
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0].weight(), Weight::Soft(1.5));
    assert_eq!(clauses[0].len(), 2);
    assert!(clauses[1].weight().is_hard());
}
