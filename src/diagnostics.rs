//! Rendering an invalid gate for a human to read (§4.5).

use std::fmt;

use crate::gate::Gate;
use crate::literal::{Clause, ClauseStore};

/// A DIMACS-style rendering of one invalid gate: its output literal and the
/// clauses attributed to it.
pub struct GateReport<'a> {
    gate: &'a Gate,
    store: &'a ClauseStore,
}

impl<'a> GateReport<'a> {
    pub fn new(gate: &'a Gate, store: &'a ClauseStore) -> Self {
        GateReport { gate, store }
    }
}

impl fmt::Display for GateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "gate on variable {} is not a functional encoding:", self.gate.output.variable())?;

        for &handle in &self.gate.clauses {
            let Some(clause) = self.store.get(handle) else {
                writeln!(f, "  ( <dangling clause> )")?;
                continue;
            };
            writeln!(f, "  {}", render_clause(clause))?;
        }

        Ok(())
    }
}

fn render_clause(clause: &Clause) -> String {
    let literals: Vec<String> = clause.iter().map(|lit| lit.to_string()).collect();
    format!("( {} )", literals.join(" "))
}
