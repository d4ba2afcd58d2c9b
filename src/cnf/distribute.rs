//! Hybrid distribution of NNF constructs into conjunctions of
//! disjunctions
//!
//! The generic distribution of ∧ over ∨ is exponential. When every
//! conjunction of the construct is nested inside the outermost
//! disjunction chain, a specialized distributor runs on an integer
//! encoding of the construct in roughly linear symbol bookkeeping and
//! avoids redundant conjuncts.
//!
//! ## Integer encoding
//!
//! `0` encodes ∨, `1` encodes ∧, and every literal (an atom or a negated
//! atom, atomic in NNF) is interned from 2 upward with mutually inverse
//! maps. Emission is prefix (operator, left subtree, right subtree), so
//! decoding is a right-to-left stack pass: a literal key pushes its
//! construct, an operator code pops two operands.

use crate::error::{ClauseGenError, Result};
use crate::logic::Formula;
use indexmap::IndexMap;
use std::collections::HashMap;

type Code = u32;

const OR_CODE: Code = 0;
const AND_CODE: Code = 1;
const FIRST_LITERAL_KEY: Code = 2;

/// Preallocation cap for the candidate working set
const PREALLOC_LIMIT: usize = 1 << 16;

/// Call-scoped codec pairing a prefix code sequence with mutually
/// inverse literal maps.
struct Codec {
    codes: Vec<Code>,
    keys: HashMap<Formula, Code>,
    literals: HashMap<Code, Formula>,
}

impl Codec {
    /// Encode an NNF construct.
    ///
    /// Fails with [`ClauseGenError::Encoding`] on any construct that is
    /// not a literal, an `And`, or an `Or`; such input means the
    /// normalizer did not run to completion.
    fn encode(formula: &Formula) -> Result<Codec> {
        let mut codec = Codec {
            codes: Vec::new(),
            keys: HashMap::new(),
            literals: HashMap::new(),
        };

        let mut stack: Vec<&Formula> = vec![formula];
        while let Some(formula) = stack.pop() {
            match formula {
                Formula::Or(f1, f2) => {
                    codec.codes.push(OR_CODE);
                    stack.push(f2);
                    stack.push(f1);
                }
                Formula::And(f1, f2) => {
                    codec.codes.push(AND_CODE);
                    stack.push(f2);
                    stack.push(f1);
                }
                literal if literal.is_literal() => codec.push_literal(literal),
                other => return Err(ClauseGenError::Encoding(other.to_string())),
            }
        }

        Ok(codec)
    }

    fn push_literal(&mut self, literal: &Formula) {
        let next = FIRST_LITERAL_KEY + self.keys.len() as Code;
        let key = *self.keys.entry(literal.clone()).or_insert(next);
        if key == next {
            self.literals.insert(key, literal.clone());
        }
        self.codes.push(key);
    }

    /// Rebuild a construct from a prefix code sequence by a
    /// right-to-left stack pass
    fn decode(&self, codes: &[Code]) -> Formula {
        let mut stack: Vec<Formula> = Vec::new();
        for &code in codes.iter().rev() {
            match code {
                OR_CODE => {
                    let left = stack.pop().unwrap();
                    let right = stack.pop().unwrap();
                    stack.push(Formula::or(left, right));
                }
                AND_CODE => {
                    let left = stack.pop().unwrap();
                    let right = stack.pop().unwrap();
                    stack.push(Formula::and(left, right));
                }
                key => stack.push(self.literals[&key].clone()),
            }
        }
        stack.pop().unwrap()
    }
}

/// A code sequence qualifies for fast distribution when every
/// conjunction is nested inside the outermost disjunction chain, i.e.
/// no ∨ code occurs inside any ∧ subtree. Checked in one left-to-right
/// pass with an operand-count stack.
fn can_fast_distribute(codes: &[Code]) -> bool {
    // (is_and, operand slots still open)
    let mut pending: Vec<(bool, u8)> = Vec::new();
    let mut and_depth = 0usize;

    for &code in codes {
        match code {
            AND_CODE => {
                pending.push((true, 2));
                and_depth += 1;
            }
            OR_CODE => {
                if and_depth > 0 {
                    return false;
                }
                pending.push((false, 2));
            }
            _ => {
                // a literal closes its subtree, which may close parents
                while let Some((is_and, remaining)) = pending.last_mut() {
                    *remaining -= 1;
                    if *remaining > 0 {
                        break;
                    }
                    if *is_and {
                        and_depth -= 1;
                    }
                    pending.pop();
                }
            }
        }
    }

    true
}

/// End index (exclusive) of the subtree starting at `start`: operators
/// add an operand slot, literals consume one; the subtree closes when
/// the balance reaches zero.
fn subtree_end(codes: &[Code], start: usize) -> usize {
    let mut balance = 1i64;
    let mut i = start;
    while balance > 0 {
        match codes[i] {
            OR_CODE | AND_CODE => balance += 1,
            _ => balance -= 1,
        }
        i += 1;
    }
    i
}

/// Separate the top-level disjuncts: solo literals become the prefix
/// (present in every output clause), conjunction subtrees become flat
/// literal groups, both in left-to-right order.
fn split_disjuncts(codes: &[Code]) -> (Vec<Code>, Vec<Vec<Code>>) {
    let mut prefix = Vec::new();
    let mut groups = Vec::new();

    let mut ranges: Vec<(usize, usize)> = vec![(0, codes.len())];
    while let Some((start, end)) = ranges.pop() {
        match codes[start] {
            OR_CODE => {
                let boundary = subtree_end(codes, start + 1);
                // right pushed first so the left operand pops next
                ranges.push((boundary, end));
                ranges.push((start + 1, boundary));
            }
            AND_CODE => groups.push(
                codes[start..end]
                    .iter()
                    .copied()
                    .filter(|&code| code != AND_CODE)
                    .collect(),
            ),
            literal => prefix.push(literal),
        }
    }

    (prefix, groups)
}

/// Fast distribution of a qualifying code sequence
fn fast_distribute(codec: &Codec) -> Formula {
    let (prefix, groups) = split_disjuncts(&codec.codes);

    let capacity = groups
        .iter()
        .map(Vec::len)
        .try_fold(1usize, usize::checked_mul)
        .filter(|&product| product <= PREALLOC_LIMIT)
        .unwrap_or(16);

    // candidate clauses keyed by their sorted codes, so equality holds
    // modulo literal order; values keep first-extension order
    let mut working: IndexMap<Vec<Code>, Vec<Code>> = IndexMap::with_capacity(capacity);
    working.insert(sorted(&prefix), prefix);

    for group in &groups {
        let mut extended: IndexMap<Vec<Code>, Vec<Code>> =
            IndexMap::with_capacity(working.len() * group.len());
        for clause in working.values() {
            for &literal in group {
                if clause.contains(&literal) {
                    extended
                        .entry(sorted(clause))
                        .or_insert_with(|| clause.clone());
                } else {
                    let mut longer = clause.clone();
                    longer.push(literal);
                    extended.entry(sorted(&longer)).or_insert(longer);
                }
            }
        }
        working = extended;
    }

    // Reassemble the result as a prefix code sequence (a right-associated
    // ∧ chain over left-associated ∨ chains) and decode it.
    let clause_count = working.len();
    let mut result_codes: Vec<Code> = Vec::new();
    for (index, literals) in working.values().enumerate() {
        if index + 1 < clause_count {
            result_codes.push(AND_CODE);
        }
        for _ in 1..literals.len() {
            result_codes.push(OR_CODE);
        }
        result_codes.extend(literals);
    }
    codec.decode(&result_codes)
}

fn sorted(codes: &[Code]) -> Vec<Code> {
    let mut key = codes.to_vec();
    key.sort_unstable();
    key
}

/// Generic distribution: recursive rewrite of ∨ over ∧, exponential in
/// the worst case. The baseline the fast path optimizes.
pub fn generic_distribute(formula: Formula) -> Formula {
    match formula {
        Formula::And(f1, f2) => {
            Formula::and(generic_distribute(*f1), generic_distribute(*f2))
        }
        Formula::Or(f1, f2) => {
            let left = generic_distribute(*f1);
            let right = generic_distribute(*f2);
            match (left, right) {
                (Formula::And(l1, l2), right) => Formula::and(
                    generic_distribute(Formula::Or(l1, Box::new(right.clone()))),
                    generic_distribute(Formula::Or(l2, Box::new(right))),
                ),
                (left, Formula::And(r1, r2)) => Formula::and(
                    generic_distribute(Formula::Or(Box::new(left.clone()), r1)),
                    generic_distribute(Formula::Or(Box::new(left), r2)),
                ),
                (left, right) => Formula::or(left, right),
            }
        }
        literal => literal,
    }
}

/// Distribute an NNF construct into a top-level conjunction of
/// disjunctions, taking the integer-encoded fast path when the construct
/// qualifies.
pub fn hybrid_distribute(formula: Formula) -> Result<Formula> {
    let codec = Codec::encode(&formula)?;
    if can_fast_distribute(&codec.codes) {
        log::debug!(
            "fast-distributing {} codes over {} literals",
            codec.codes.len(),
            codec.keys.len()
        );
        Ok(fast_distribute(&codec))
    } else {
        log::debug!("construct does not qualify for fast distribution, falling back");
        Ok(generic_distribute(formula))
    }
}
