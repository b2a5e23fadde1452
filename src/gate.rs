//! The gate structure (§3): the shape consumed from the gate scanner.

use std::collections::HashSet;

use crate::error::MalformedInputError;
use crate::literal::{Clause, ClauseHandle, ClauseStore, Literal};

/// A claimed encoding of a Boolean function `y = f(x_1, .., x_n)` by a
/// subset of the formula's clauses.
#[derive(Clone, Debug)]
pub struct Gate {
    /// The output literal: its variable is the gate's output variable, its
    /// sign the polarity the output appears at in the forward clauses.
    pub output: Literal,

    /// Input literals, each listed once.
    pub inputs: Vec<Literal>,

    /// Clauses attributed to this gate: a forward prefix of length
    /// `num_fwd_clauses` (each containing `output`), followed by a backward
    /// suffix (each containing `-output`).
    pub clauses: Vec<ClauseHandle>,

    /// Length of the forward prefix of `clauses`.
    pub num_fwd_clauses: usize,

    /// Whether, in the larger gate structure, the output variable appears
    /// only with a single fixed polarity outside this gate.
    pub is_nested_monotonically: bool,
}

impl Gate {
    pub fn forward_clauses(&self) -> &[ClauseHandle] {
        &self.clauses[..self.num_fwd_clauses]
    }

    pub fn backward_clauses(&self) -> &[ClauseHandle] {
        &self.clauses[self.num_fwd_clauses..]
    }
}

/// A gate structure: the gates recovered from a CNF plus the clauses no gate
/// claimed.
pub struct GateStructure {
    pub gates: Vec<Gate>,
    pub roots: Vec<ClauseHandle>,
}

impl GateStructure {
    /// Builds a gate structure, checking the §3 invariants against `store`:
    /// every clause handle must resolve, no two gates may share an output
    /// variable, and every clause attributed to a gate must mention exactly
    /// one polarity of that gate's output variable.
    pub fn new(
        gates: Vec<Gate>,
        roots: Vec<ClauseHandle>,
        store: &ClauseStore,
    ) -> Result<Self, MalformedInputError> {
        let mut seen_outputs = HashSet::new();

        for gate in &gates {
            if !seen_outputs.insert(gate.output.variable()) {
                return Err(MalformedInputError::DuplicateGateOutput(gate.output.variable()));
            }

            for (i, &handle) in gate.clauses.iter().enumerate() {
                let clause = resolve(store, handle)?;
                check_polarity(clause, gate.output, i < gate.num_fwd_clauses)?;
            }
        }

        for &handle in &roots {
            resolve(store, handle)?;
        }

        Ok(GateStructure { gates, roots })
    }
}

fn resolve(store: &ClauseStore, handle: ClauseHandle) -> Result<&Clause, MalformedInputError> {
    store.get(handle).ok_or(MalformedInputError::DanglingClauseHandle)
}

fn check_polarity(
    clause: &Clause,
    output: Literal,
    forward: bool,
) -> Result<(), MalformedInputError> {
    let expected = if forward { output } else { output.negate() };
    let has_expected = clause.iter().any(|&lit| lit == expected);
    let has_other_polarity = clause.iter().any(|&lit| lit == expected.negate());

    if has_expected && has_other_polarity {
        return Err(MalformedInputError::ClauseMixesOutputPolarity(output.variable()));
    }
    if !has_expected {
        return Err(MalformedInputError::ClauseMissingOutput(output.variable()));
    }
    Ok(())
}
