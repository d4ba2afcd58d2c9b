//! Path variabilization under mode declarations
//!
//! Walks a path's ground atoms and maps constants to fresh or reused
//! variables. All scratch state (per-domain counters, constant
//! bindings) is scoped to a single path: two walks never share
//! variables.

use crate::error::{ClauseGenError, Result};
use crate::knowledge::{AtomId, Evidence, HPath, ModeDeclarations, PredicateSchema};
use crate::logic::{Atom, Constant, Literal, Signature, Term, Variable};
use std::collections::HashMap;

/// Call-scoped allocator: per-domain counters and per-path
/// constant→variable bindings.
///
/// Fresh variables are named `v<d><n>` where `d` is the first letter of
/// the domain and `n` counts per domain from 1, so naming is
/// deterministic given a traversal order.
#[derive(Default)]
struct VariableAllocator {
    counters: HashMap<String, usize>,
    bindings: HashMap<String, Variable>,
}

impl VariableAllocator {
    fn bind(&mut self, constant: &Constant, domain: &str) -> Variable {
        if let Some(variable) = self.bindings.get(&constant.name) {
            return variable.clone();
        }
        let counter = self.counters.entry(domain.to_string()).or_insert(1);
        let initial = domain.chars().next().unwrap_or('_');
        let variable = Variable::new(format!("v{}{}", initial, counter), domain);
        *counter += 1;
        self.bindings.insert(constant.name.clone(), variable.clone());
        variable
    }
}

/// A variabilized Horn-oriented walk: negative body literals plus both
/// head polarities, so the builder can emit Horn and conjunction forms
/// without re-walking the path.
#[derive(Debug)]
pub(crate) struct HornWalk {
    pub body: Vec<Literal>,
    pub head_positive: Literal,
    pub head_negative: Literal,
}

/// A variabilized definite-oriented walk
pub(crate) struct DefiniteWalk {
    pub head: Atom,
    pub body: Vec<Atom>,
}

/// Walk the path in order; the final element is the head, earlier
/// elements become negative body literals.
pub(crate) fn horn_walk(
    path: &HPath,
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &Evidence,
) -> Result<HornWalk> {
    let mut allocator = VariableAllocator::default();

    let Some(((head_id, head_signature), body_steps)) = path.steps().split_last() else {
        unreachable!("paths are non-empty by construction")
    };

    let mut body = Vec::with_capacity(body_steps.len());
    for (atom_id, signature) in body_steps {
        let atom = variabilize_atom(
            *atom_id,
            signature,
            schema,
            modes,
            evidence,
            &mut allocator,
            false,
        )?;
        body.push(Literal::negative(atom));
    }

    let head = variabilize_atom(
        *head_id,
        head_signature,
        schema,
        modes,
        evidence,
        &mut allocator,
        false,
    )?;

    Ok(HornWalk {
        body,
        head_positive: Literal::positive(head.clone()),
        head_negative: Literal::negative(head),
    })
}

/// Walk the path reversed; position 0 of the reversed walk is the head.
///
/// Modes are never consulted for the head: every head argument becomes
/// a variable even when its position is marked `constant` (heads are
/// fully general predictors, and head positions may carry no
/// placemarkers at all).
pub(crate) fn definite_walk(
    path: &HPath,
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &Evidence,
) -> Result<DefiniteWalk> {
    let mut allocator = VariableAllocator::default();

    let mut head = None;
    let mut body = Vec::with_capacity(path.len() - 1);
    for (index, (atom_id, signature)) in path.steps().iter().rev().enumerate() {
        let is_head = index == 0;
        let atom = variabilize_atom(
            *atom_id,
            signature,
            schema,
            modes,
            evidence,
            &mut allocator,
            is_head,
        )?;
        if is_head {
            head = Some(atom);
        } else {
            body.push(atom);
        }
    }

    match head {
        Some(head) => Ok(DefiniteWalk { head, body }),
        None => unreachable!("paths are non-empty by construction"),
    }
}

fn variabilize_atom(
    atom_id: AtomId,
    signature: &Signature,
    schema: &PredicateSchema,
    modes: &ModeDeclarations,
    evidence: &Evidence,
    allocator: &mut VariableAllocator,
    ignore_placemarkers: bool,
) -> Result<Atom> {
    let domains = schema
        .get(signature)
        .ok_or_else(|| ClauseGenError::MissingSchema(signature.clone()))?;

    let db = evidence
        .db(signature)
        .ok_or_else(|| ClauseGenError::EvidenceDecode {
            signature: signature.clone(),
            atom_id,
            cause: "no evidence database for signature".to_string(),
        })?;

    let constants = db
        .decode(atom_id)
        .map_err(|err| ClauseGenError::EvidenceDecode {
            signature: signature.clone(),
            atom_id,
            cause: err.to_string(),
        })?;

    let placemarkers = if ignore_placemarkers {
        None
    } else {
        modes.get(signature)
    };

    let args = constants
        .iter()
        .zip(domains)
        .enumerate()
        .map(|(position, (constant, domain))| {
            let keep_constant = placemarkers
                .and_then(|markers| markers.get(position))
                .map_or(false, |marker| marker.constant);
            if keep_constant {
                Term::Constant(constant.clone())
            } else {
                Term::Variable(allocator.bind(constant, domain))
            }
        })
        .collect();

    Ok(Atom {
        signature: signature.clone(),
        args,
    })
}
