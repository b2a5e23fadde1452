//! A heuristic gate-recognition scanner.
//!
//! This is explicitly not sound or complete: it is a stand-in for the
//! external gate-recognition pass the validator core assumes as a given
//! collaborator. It groups clauses by a candidate output variable --- the
//! variable appearing in the most clauses that is not already claimed ---
//! and guesses the forward/backward split from each clause's polarity of
//! that variable. Anything it misclassifies simply surfaces as an invalid
//! or malformed gate later; nothing downstream trusts its output blindly.

use std::collections::HashMap;

use log::debug;

use crate::error::MalformedInputError;
use crate::gate::{Gate, GateStructure};
use crate::literal::{ClauseHandle, ClauseStore, Variable};
use crate::log::targets;

/// A clause this large is assumed too broad to be a gate definition and is
/// left as a root clause instead.
const MAX_GATE_CLAUSE_WIDTH: usize = 8;

/// Scans `store` for candidate gates, attributing each clause to at most one
/// gate. Clauses too wide, or over a variable already claimed by an earlier
/// (larger) gate, are left in `roots`.
pub fn scan(store: &ClauseStore) -> Result<GateStructure, MalformedInputError> {
    let mut occurrences: HashMap<Variable, Vec<ClauseHandle>> = HashMap::new();

    for (handle, clause) in store.iter_with_handles() {
        if clause.len() > MAX_GATE_CLAUSE_WIDTH || clause.is_empty() {
            continue;
        }
        for literal in clause {
            occurrences.entry(literal.variable()).or_default().push(handle);
        }
    }

    let mut candidates: Vec<Variable> = occurrences.keys().copied().collect();
    candidates.sort_by_key(|&var| std::cmp::Reverse(occurrences[&var].len()));

    let mut claimed: HashMap<ClauseHandle, Variable> = HashMap::new();
    let mut gates = Vec::new();

    for var in candidates {
        let clauses = &occurrences[&var];
        if clauses.len() < 2 {
            continue;
        }
        if clauses.iter().any(|handle| claimed.contains_key(handle)) {
            continue;
        }

        let Some(gate) = build_gate(var, clauses, store) else { continue };

        for &handle in &gate.clauses {
            claimed.insert(handle, var);
        }
        gates.push(gate);
    }

    let roots: Vec<ClauseHandle> = store
        .iter_with_handles()
        .map(|(handle, _)| handle)
        .filter(|handle| !claimed.contains_key(handle))
        .collect();

    debug!(target: targets::SCANNER, "recovered {} gate(s), {} root clause(s)", gates.len(), roots.len());

    GateStructure::new(gates, roots, store)
}

fn build_gate(output_var: Variable, clauses: &[ClauseHandle], store: &ClauseStore) -> Option<Gate> {
    let mut forward = Vec::new();
    let mut backward = Vec::new();
    let mut output_sign = None;

    for &handle in clauses {
        let clause = store.get(handle)?;
        let literal = clause.iter().find(|lit| lit.variable() == output_var)?;
        if clause.iter().any(|lit| lit.variable() == output_var && lit.sign() != literal.sign()) {
            return None;
        }
        if *output_sign.get_or_insert(literal.sign()) == literal.sign() {
            forward.push(handle);
        } else {
            backward.push(handle);
        }
    }

    let output_sign = output_sign?;
    let output = crate::literal::Literal::new(output_var, output_sign);

    let mut inputs: Vec<crate::literal::Literal> = Vec::new();
    for &handle in forward.iter().chain(backward.iter()) {
        let clause = store.get(handle)?;
        for &literal in clause {
            if literal.variable() != output_var && !inputs.contains(&literal) {
                inputs.push(literal);
            }
        }
    }

    let num_fwd_clauses = forward.len();
    let mut clauses = forward;
    clauses.extend(backward);

    Some(Gate { output, inputs, clauses, num_fwd_clauses, is_nested_monotonically: false })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::{Literal, Sign};

    fn lit(v: u32, positive: bool) -> Literal {
        Literal::new(v, if positive { Sign::Positive } else { Sign::Negative })
    }

    #[test]
    fn recovers_an_and_gate() {
        let mut store = ClauseStore::new();
        store.push(vec![lit(1, false), lit(2, false), lit(3, true)]);
        store.push(vec![lit(1, true), lit(3, false)]);
        store.push(vec![lit(2, true), lit(3, false)]);

        let structure = scan(&store).unwrap();
        assert_eq!(structure.gates.len(), 1);
        assert_eq!(structure.gates[0].output.variable(), 3);
        assert!(structure.roots.is_empty());
    }

    #[test]
    fn a_clause_over_an_unclaimed_singleton_variable_becomes_a_root() {
        let mut store = ClauseStore::new();
        store.push(vec![lit(9, true)]);

        let structure = scan(&store).unwrap();
        assert!(structure.gates.is_empty());
        assert_eq!(structure.roots.len(), 1);
    }

    #[test]
    fn an_overly_wide_clause_is_never_claimed() {
        let mut store = ClauseStore::new();
        let wide: Vec<Literal> = (1..=9).map(|v| lit(v, true)).collect();
        store.push(wide);

        let structure = scan(&store).unwrap();
        assert!(structure.gates.is_empty());
        assert_eq!(structure.roots.len(), 1);
    }
}
