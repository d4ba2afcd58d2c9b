//! α-equivalence of clauses
//!
//! Two clauses are α-equivalent when a domain-preserving bijective
//! renaming of variables maps the literal set of one onto the literal set
//! of the other. Clauses are canonicalized by sorting literals under a
//! variable-insensitive ordering and renumbering variables in
//! first-occurrence order; equal canonical renderings mean α-equivalent
//! clauses. The canonical rendering doubles as a hash key for clause-set
//! de-duplication.

use super::clause::Clause;
use super::literal::Literal;
use super::term::{Term, Variable};
use std::collections::HashMap;

/// Canonical rendering of a clause, stable under variable renaming and
/// literal reordering. The weight does not participate: two clauses with
/// the same literal set canonicalize identically.
pub fn canonical_key(clause: &Clause) -> String {
    let mut ordered: Vec<&Literal> = clause.literals().iter().collect();
    ordered.sort_by_cached_key(|literal| skeleton(literal));

    let mut renaming: HashMap<&Variable, String> = HashMap::new();
    for literal in &ordered {
        for arg in &literal.atom.args {
            number_term(arg, &mut renaming);
        }
    }

    let mut rendered: Vec<String> = ordered
        .iter()
        .map(|literal| render(literal, &renaming))
        .collect();
    rendered.sort();
    rendered.join(" | ")
}

/// α-equivalence test via canonical keys
pub fn alpha_equivalent(left: &Clause, right: &Clause) -> bool {
    left.literals().len() == right.literals().len() && canonical_key(left) == canonical_key(right)
}

/// Assign `domain#n` names in first-occurrence order; the numbering is a
/// domain-preserving bijection on the clause's variables.
fn number_term<'a>(term: &'a Term, renaming: &mut HashMap<&'a Variable, String>) {
    match term {
        Term::Variable(v) => {
            let next = renaming.len();
            renaming
                .entry(v)
                .or_insert_with(|| format!("{}#{}", v.domain, next));
        }
        Term::Constant(_) => {}
        Term::Function(_, args) => {
            for arg in args {
                number_term(arg, renaming);
            }
        }
    }
}

/// Variable-insensitive literal ordering key: polarity, signature, and
/// term shape with variables reduced to their domains.
fn skeleton(literal: &Literal) -> String {
    let mut out = String::new();
    out.push(if literal.polarity { '+' } else { '-' });
    out.push_str(&literal.atom.signature.name);
    out.push('/');
    out.push_str(&literal.atom.signature.arity.to_string());
    out.push('(');
    for (i, arg) in literal.atom.args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        skeleton_term(arg, &mut out);
    }
    out.push(')');
    out
}

fn skeleton_term(term: &Term, out: &mut String) {
    match term {
        Term::Variable(v) => {
            out.push('?');
            out.push_str(&v.domain);
        }
        Term::Constant(c) => out.push_str(&c.name),
        Term::Function(f, args) => {
            out.push_str(&f.name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                skeleton_term(arg, out);
            }
            out.push(')');
        }
    }
}

fn render(literal: &Literal, renaming: &HashMap<&Variable, String>) -> String {
    let mut out = String::new();
    out.push(if literal.polarity { '+' } else { '-' });
    out.push_str(&literal.atom.signature.name);
    out.push('/');
    out.push_str(&literal.atom.signature.arity.to_string());
    out.push('(');
    for (i, arg) in literal.atom.args.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        render_term(arg, renaming, &mut out);
    }
    out.push(')');
    out
}

fn render_term(term: &Term, renaming: &HashMap<&Variable, String>, out: &mut String) {
    match term {
        Term::Variable(v) => out.push_str(&renaming[v]),
        Term::Constant(c) => out.push_str(&c.name),
        Term::Function(f, args) => {
            out.push_str(&f.name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render_term(arg, renaming, out);
            }
            out.push(')');
        }
    }
}
