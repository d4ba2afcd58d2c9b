//! Horn, conjunction, and definite clause assembly from paths

use super::variabilize::{definite_walk, horn_walk};
use crate::error::Result;
use crate::knowledge::{Evidence, HPath, ModeDeclarations, PredicateSchema};
use crate::logic::equivalence::canonical_key;
use crate::logic::{Clause, DefiniteClause, WeightedDefiniteClause};
use std::collections::HashSet;

/// Which clause forms [`clauses`] emits per path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Horn,
    Conjunction,
    Both,
}

impl ClauseKind {
    fn includes_horn(self) -> bool {
        matches!(self, ClauseKind::Horn | ClauseKind::Both)
    }

    fn includes_conjunction(self) -> bool {
        matches!(self, ClauseKind::Conjunction | ClauseKind::Both)
    }
}

/// Post-processor replacing auxiliary predicates with functional terms.
///
/// Supplied by the caller and invoked exactly once per
/// [`definite_clauses`] run, after all paths are processed.
pub trait FunctionIntroduction {
    fn introduce_functions(
        &self,
        clauses: Vec<WeightedDefiniteClause>,
    ) -> Vec<WeightedDefiniteClause>;
}

/// Identity formatter for pipelines without function introduction
pub struct NoFunctionIntroduction;

impl FunctionIntroduction for NoFunctionIntroduction {
    fn introduce_functions(
        &self,
        clauses: Vec<WeightedDefiniteClause>,
    ) -> Vec<WeightedDefiniteClause> {
        clauses
    }
}

/// Build unit-weight clauses from paths.
///
/// Per path: the conjunction form (`body ∪ {+head}`) and/or the Horn
/// form (`body ∪ {¬head}`), conjunction first. A candidate is emitted
/// only when no clause in the accumulating result or in `preexisting`
/// is α-equivalent to it; the result keeps first-seen order. The first
/// variabilization error short-circuits the whole run.
pub fn clauses(
    paths: &[HPath],
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &Evidence,
    kind: ClauseKind,
    preexisting: &[Clause],
) -> Result<Vec<Clause>> {
    let mut seen: HashSet<String> = preexisting.iter().map(canonical_key).collect();
    let mut result = Vec::new();

    for path in paths {
        let walk = horn_walk(path, schema, modes, evidence)?;

        if kind.includes_conjunction() {
            let mut literals = walk.body.clone();
            literals.push(walk.head_positive.clone());
            push_unique(Clause::soft(1.0, literals), &mut seen, &mut result);
        }
        if kind.includes_horn() {
            let mut literals = walk.body;
            literals.push(walk.head_negative);
            push_unique(Clause::soft(1.0, literals), &mut seen, &mut result);
        }
    }

    log::debug!(
        "built {} clauses from {} paths",
        result.len(),
        paths.len()
    );
    Ok(result)
}

fn push_unique(clause: Clause, seen: &mut HashSet<String>, result: &mut Vec<Clause>) {
    if seen.insert(canonical_key(&clause)) {
        result.push(clause);
    } else {
        log::trace!("skipping α-equivalent clause {}", clause);
    }
}

/// Build weighted definite clauses from paths.
///
/// Per path: `1.0 head :- body`, de-duplicated within the run by
/// literal-set equality. Function introduction runs once over the full
/// set, then entries whose literal set matches a `preexisting` clause
/// are dropped. Paths of length 1 have no body and cannot form a
/// definite clause; they are skipped.
pub fn definite_clauses(
    paths: &[HPath],
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &Evidence,
    formatter: &dyn FunctionIntroduction,
    preexisting: &[WeightedDefiniteClause],
) -> Result<Vec<WeightedDefiniteClause>> {
    let mut built: Vec<WeightedDefiniteClause> = Vec::new();

    for path in paths {
        let walk = definite_walk(path, schema, modes, evidence)?;
        let Some(clause) = DefiniteClause::from_atoms(walk.head, walk.body) else {
            log::debug!("skipping bodiless path of length {}", path.len());
            continue;
        };
        let candidate = WeightedDefiniteClause::new(1.0, clause);
        if !built.iter().any(|existing| existing.same_literals(&candidate)) {
            built.push(candidate);
        }
    }

    let formatted = formatter.introduce_functions(built);
    Ok(formatted
        .into_iter()
        .filter(|clause| {
            !preexisting
                .iter()
                .any(|existing| existing.same_literals(clause))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::MemoryEvidenceDb;
    use crate::logic::{Atom, Constant, Signature, Term, Variable};

    fn unary(name: &str) -> Signature {
        Signature::new(name, 1)
    }

    fn fixture() -> (PredicateSchema, ModeDeclarations, Evidence) {
        let mut schema = PredicateSchema::new();
        let mut evidence = Evidence::new();
        for (id, name) in [(1, "p"), (2, "q"), (3, "r")] {
            schema.insert(unary(name), vec!["obj".to_string()]);
            let mut db = MemoryEvidenceDb::new();
            db.insert(id, vec![Constant::new("C")]);
            evidence.insert(unary(name), db);
        }
        (schema, ModeDeclarations::new(), evidence)
    }

    fn path() -> HPath {
        HPath::new(vec![(1, unary("p")), (2, unary("q")), (3, unary("r"))]).unwrap()
    }

    #[test]
    fn test_conjunction_precedes_horn() {
        let (schema, modes, evidence) = fixture();
        let result = clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            ClauseKind::Both,
            &[],
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        assert!(result[0].literals().last().unwrap().polarity);
        assert!(!result[1].literals().last().unwrap().polarity);
        assert!(result[1].is_horn());
    }

    #[test]
    fn test_duplicate_paths_collapse() {
        let (schema, modes, evidence) = fixture();
        let result = clauses(
            &[path(), path()],
            &schema,
            &modes,
            &evidence,
            ClauseKind::Horn,
            &[],
        )
        .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_preexisting_clauses_are_skipped() {
        let (schema, modes, evidence) = fixture();
        let first = clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            ClauseKind::Both,
            &[],
        )
        .unwrap();

        let second = clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            ClauseKind::Both,
            &first,
        )
        .unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_definite_clause_shape() {
        let (schema, modes, evidence) = fixture();
        let result = definite_clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            &NoFunctionIntroduction,
            &[],
        )
        .unwrap();

        assert_eq!(result.len(), 1);
        let clause = &result[0].clause;
        assert_eq!(clause.head().signature, unary("r"));
        assert_eq!(clause.body_atoms().len(), 2);
        assert_eq!(result[0].weight, 1.0);
    }

    #[test]
    fn test_definite_preexisting_filtering() {
        let (schema, modes, evidence) = fixture();
        let first = definite_clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            &NoFunctionIntroduction,
            &[],
        )
        .unwrap();
        let second = definite_clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            &NoFunctionIntroduction,
            &first,
        )
        .unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_bodiless_paths_are_skipped() {
        let (schema, modes, evidence) = fixture();
        let short = HPath::new(vec![(3, unary("r"))]).unwrap();
        let result = definite_clauses(
            &[short],
            &schema,
            &modes,
            &evidence,
            &NoFunctionIntroduction,
            &[],
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_formatter_runs_once_over_the_full_set() {
        struct HeadRenamer;
        impl FunctionIntroduction for HeadRenamer {
            fn introduce_functions(
                &self,
                clauses: Vec<WeightedDefiniteClause>,
            ) -> Vec<WeightedDefiniteClause> {
                clauses
                    .into_iter()
                    .map(|wdc| {
                        let head = Atom::new(
                            "rewritten",
                            vec![Term::Variable(Variable::new("vo1", "obj"))],
                        );
                        let body: Vec<Atom> =
                            wdc.clause.body_atoms().into_iter().cloned().collect();
                        WeightedDefiniteClause::new(
                            wdc.weight,
                            DefiniteClause::from_atoms(head, body).unwrap(),
                        )
                    })
                    .collect()
            }
        }

        let (schema, modes, evidence) = fixture();
        let result = definite_clauses(
            &[path()],
            &schema,
            &modes,
            &evidence,
            &HeadRenamer,
            &[],
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].clause.head().signature, unary("rewritten"));
    }
}
