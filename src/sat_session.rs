//! The SAT session (§4.1): a thin, reusable wrapper over a CDCL SAT solver.
//!
//! One session is constructed per gate check and discarded afterwards; a
//! session is never shared between workers.

use std::collections::HashMap;

use log::trace;

use crate::error::SolverError;
use crate::literal::{Literal, Variable};
use crate::log::targets;

/// The full contract any backing CDCL solver must support. Kept abstract so
/// an alternative solver could be swapped in without touching §4.2.
pub trait SatSession {
    /// Appends the disjunction of `literals`, plus `extra` if given, as a
    /// permanent constraint.
    fn add_clause(&mut self, literals: &[Literal], extra: Option<Literal>);

    /// Enqueues a unit assumption for the next `solve` call only.
    fn add_assumption(&mut self, literal: Literal);

    /// Returns whether the permanent constraints together with the pending
    /// assumptions are satisfiable, then clears the pending assumptions.
    fn solve(&mut self) -> Result<bool, SolverError>;
}

/// A [`SatSession`] backed by the CaDiCaL incremental SAT solver.
pub struct CadicalSession {
    solver: cadical::Solver,
    vars: HashMap<Variable, i32>,
    next_var: i32,
    pending_assumptions: Vec<Literal>,
}

impl Default for CadicalSession {
    fn default() -> Self {
        CadicalSession {
            solver: cadical::Solver::default(),
            vars: HashMap::new(),
            next_var: 1,
            pending_assumptions: Vec::new(),
        }
    }
}

impl CadicalSession {
    pub fn new() -> Self {
        CadicalSession::default()
    }

    /// Lazily allocates a solver-internal variable id for `variable` the
    /// first time it is seen.
    fn solver_var(&mut self, variable: Variable) -> i32 {
        *self.vars.entry(variable).or_insert_with(|| {
            let id = self.next_var;
            self.next_var += 1;
            id
        })
    }

    fn to_solver_lit(&mut self, literal: Literal) -> i32 {
        let var = self.solver_var(literal.variable());
        if literal.is_positive() {
            var
        } else {
            -var
        }
    }
}

impl SatSession for CadicalSession {
    fn add_clause(&mut self, literals: &[Literal], extra: Option<Literal>) {
        let mut buf: Vec<i32> = literals.iter().map(|&lit| self.to_solver_lit(lit)).collect();
        if let Some(extra) = extra {
            buf.push(self.to_solver_lit(extra));
        }
        trace!(target: targets::SAT_SESSION, "adding clause of width {}", buf.len());
        self.solver.add_clause(buf);
    }

    fn add_assumption(&mut self, literal: Literal) {
        self.pending_assumptions.push(literal);
    }

    fn solve(&mut self) -> Result<bool, SolverError> {
        let assumptions: Vec<i32> = self
            .pending_assumptions
            .drain(..)
            .map(|lit| self.to_solver_lit(lit))
            .collect();

        trace!(target: targets::SAT_SESSION, "solving under {} assumptions", assumptions.len());

        match self.solver.solve_with(assumptions, std::iter::empty()) {
            Some(result) => Ok(result),
            None => Err(SolverError::Undetermined),
        }
    }
}
