//! The monotone-input-sign map (§4.3): a single serial pass over the gate
//! structure, consumed read-only by the nested-monotone fast-path guard.

use std::collections::HashMap;

use log::trace;

use crate::gate::GateStructure;
use crate::literal::{ClauseStore, Literal, Variable};
use crate::log::targets;

/// The polarity (or lack of one) a variable has been observed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Every occurrence seen so far agrees with this literal's sign.
    Consistent(Literal),
    /// Occurrences with both signs have been seen.
    Mixed,
}

/// A partial function from variable to [`Signal`], built once per validation.
#[derive(Default)]
pub struct MonotoneSignMap {
    signals: HashMap<Variable, Signal>,
}

impl MonotoneSignMap {
    pub fn signal(&self, variable: Variable) -> Option<Signal> {
        self.signals.get(&variable).copied()
    }

    /// Returns whether `literal`'s variable is mapped to exactly `literal`'s
    /// polarity (never `Mixed`, and not merely unmapped).
    pub fn agrees_with(&self, literal: Literal) -> bool {
        matches!(self.signal(literal.variable()), Some(Signal::Consistent(observed)) if observed == literal)
    }

    fn observe(&mut self, literal: Literal) {
        self.signals
            .entry(literal.variable())
            .and_modify(|signal| {
                if *signal != Signal::Consistent(literal) {
                    *signal = Signal::Mixed;
                }
            })
            .or_insert(Signal::Consistent(literal));
    }

    fn observe_mixed(&mut self, variable: Variable) {
        self.signals.insert(variable, Signal::Mixed);
    }

    pub fn build(structure: &GateStructure, store: &ClauseStore) -> Self {
        let mut map = MonotoneSignMap::default();

        for gate in &structure.gates {
            for &input in &gate.inputs {
                if gate.is_nested_monotonically {
                    map.observe(input);
                } else {
                    map.observe_mixed(input.variable());
                }
            }
        }

        for &handle in &structure.roots {
            if let Some(clause) = store.get(handle) {
                for &literal in clause {
                    map.observe(literal);
                }
            }
        }

        trace!(target: targets::MONOTONE_MAP, "built sign map over {} variable(s)", map.signals.len());

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::literal::Sign;

    fn lit(v: u32, positive: bool) -> Literal {
        Literal::new(v, if positive { Sign::Positive } else { Sign::Negative })
    }

    #[test]
    fn consistent_polarity_across_nested_monotone_gates() {
        let mut store = ClauseStore::new();
        let c0 = store.push(vec![lit(1, true), lit(10, true)]);
        let c1 = store.push(vec![lit(1, true), lit(11, true)]);
        let gates = vec![
            Gate {
                output: lit(10, true),
                inputs: vec![lit(1, true)],
                clauses: vec![c0],
                num_fwd_clauses: 1,
                is_nested_monotonically: true,
            },
            Gate {
                output: lit(11, true),
                inputs: vec![lit(1, true)],
                clauses: vec![c1],
                num_fwd_clauses: 1,
                is_nested_monotonically: true,
            },
        ];
        let structure = GateStructure::new(gates, vec![], &store).unwrap();
        let map = MonotoneSignMap::build(&structure, &store);
        assert!(map.agrees_with(lit(1, true)));
        assert!(!map.agrees_with(lit(1, false)));
    }

    #[test]
    fn conflicting_polarity_becomes_mixed() {
        let mut store = ClauseStore::new();
        let c0 = store.push(vec![lit(1, true), lit(10, true)]);
        let c1 = store.push(vec![lit(1, false), lit(11, true)]);
        let gates = vec![
            Gate {
                output: lit(10, true),
                inputs: vec![lit(1, true)],
                clauses: vec![c0],
                num_fwd_clauses: 1,
                is_nested_monotonically: true,
            },
            Gate {
                output: lit(11, true),
                inputs: vec![lit(1, false)],
                clauses: vec![c1],
                num_fwd_clauses: 1,
                is_nested_monotonically: true,
            },
        ];
        let structure = GateStructure::new(gates, vec![], &store).unwrap();
        let map = MonotoneSignMap::build(&structure, &store);
        assert_eq!(map.signal(1), Some(Signal::Mixed));
    }

    #[test]
    fn non_nested_gate_forces_mixed_unconditionally() {
        let mut store = ClauseStore::new();
        let c = store.push(vec![lit(1, true), lit(10, true)]);
        let gates = vec![Gate {
            output: lit(10, true),
            inputs: vec![lit(1, true)],
            clauses: vec![c],
            num_fwd_clauses: 1,
            is_nested_monotonically: false,
        }];
        let structure = GateStructure::new(gates, vec![], &store).unwrap();
        let map = MonotoneSignMap::build(&structure, &store);
        assert_eq!(map.signal(1), Some(Signal::Mixed));
    }
}
