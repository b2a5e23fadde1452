//! Gate-level checks (§4.2): the semantic heart of the validator.

use std::collections::HashSet;

use log::debug;

use crate::error::SolverError;
use crate::gate::Gate;
use crate::literal::{Clause, ClauseStore, Literal};
use crate::log::targets;
use crate::monotone::MonotoneSignMap;
use crate::sat_session::SatSession;

/// Left-totality via the SAT encoding: add every clause as a permanent
/// constraint, then for each clause solve under the assumption that falsifies
/// every non-output literal of that clause. Totality fails iff some such
/// solve is unsatisfiable.
pub fn left_totality_sat<S: SatSession>(
    gate: &Gate,
    store: &ClauseStore,
    session: &mut S,
) -> Result<bool, SolverError> {
    let clauses: Vec<&Clause> = gate
        .clauses
        .iter()
        .map(|&handle| store.get(handle).expect("gate structure was validated on construction"))
        .collect();

    for &clause in &clauses {
        session.add_clause(clause, None);
    }

    let output_var = gate.output.variable();

    for &clause in &clauses {
        for &literal in clause {
            if literal.variable() != output_var {
                session.add_assumption(literal.negate());
            }
        }

        if !session.solve()? {
            debug!(target: targets::GATE_CHECK, "left-totality (SAT) failed for variable {output_var}");
            return Ok(false);
        }
    }

    Ok(true)
}

/// Right-uniqueness: project every clause onto its input literals (drop every
/// literal over the output variable) and check the conjunction of projections
/// is unsatisfiable.
pub fn right_uniqueness<S: SatSession>(
    gate: &Gate,
    store: &ClauseStore,
    session: &mut S,
) -> Result<bool, SolverError> {
    let output_var = gate.output.variable();

    for &handle in &gate.clauses {
        let clause = store.get(handle).expect("gate structure was validated on construction");
        let projected: Vec<Literal> =
            clause.iter().copied().filter(|lit| lit.variable() != output_var).collect();
        session.add_clause(&projected, None);
    }

    let unsat = !session.solve()?;
    if !unsat {
        debug!(target: targets::GATE_CHECK, "right-uniqueness failed for variable {output_var}");
    }
    Ok(unsat)
}

/// The resolvent-tautology alternative to [`left_totality_sat`]: for every
/// forward/backward clause pair, their resolvent on the output variable must
/// be tautological. Solver-free.
pub fn left_totality_resolvent(gate: &Gate, store: &ClauseStore) -> bool {
    let output_var = gate.output.variable();

    for &fwd_handle in gate.forward_clauses() {
        let fwd = store.get(fwd_handle).expect("gate structure was validated on construction");

        for &bwd_handle in gate.backward_clauses() {
            let bwd = store.get(bwd_handle).expect("gate structure was validated on construction");

            if !resolvent_is_tautological(fwd, bwd, output_var) {
                debug!(
                    target: targets::GATE_CHECK,
                    "left-totality (resolvent) failed for variable {output_var}"
                );
                return false;
            }
        }
    }

    true
}

fn resolvent_is_tautological(fwd: &Clause, bwd: &Clause, pivot: crate::literal::Variable) -> bool {
    let mut positives = HashSet::new();
    let mut negatives = HashSet::new();

    for &literal in fwd.iter().chain(bwd.iter()) {
        if literal.variable() == pivot {
            continue;
        }
        if literal.is_positive() {
            positives.insert(literal.variable());
        } else {
            negatives.insert(literal.variable());
        }
    }

    positives.intersection(&negatives).next().is_some()
}

/// The outcome of validating a single gate, naming which check path was
/// taken so diagnostics and tests can distinguish a fast-path pass from a
/// full pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateVerdict {
    Valid,
    Invalid,
}

impl GateVerdict {
    pub fn is_valid(self) -> bool {
        matches!(self, GateVerdict::Valid)
    }
}

/// Validates a single gate (§4.2): checks left-totality and, unless the
/// nested-monotone fast path applies, right-uniqueness.
///
/// The fast path applies only when `gate.is_nested_monotonically` is set
/// *and* the monotone-input-sign map confirms the output variable occurs
/// outside this gate, if at all, with exactly `gate.output`'s polarity: any
/// mismatch or `Mixed` revokes the fast path.
pub fn check_gate<S: SatSession>(
    gate: &Gate,
    store: &ClauseStore,
    monotone_map: &MonotoneSignMap,
    session: &mut S,
) -> Result<GateVerdict, SolverError> {
    let total = left_totality_sat(gate, store, session)?;
    debug_assert_eq!(total, left_totality_resolvent(gate, store));

    if !total {
        return Ok(GateVerdict::Invalid);
    }

    let fast_path_applies = gate.is_nested_monotonically
        && monotone_map.signal(gate.output.variable()).map_or(true, |signal| {
            matches!(signal, crate::monotone::Signal::Consistent(observed) if observed == gate.output)
        });

    if fast_path_applies {
        return Ok(GateVerdict::Valid);
    }

    let unique = right_uniqueness(gate, store, session)?;
    Ok(if unique { GateVerdict::Valid } else { GateVerdict::Invalid })
}
