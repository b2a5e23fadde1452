//! Evaluation statistics printed by the CLI after scanning, mirroring the
//! fields the original gate-evaluation tooling reported.

use std::fmt;
use std::time::Duration;

use crate::gate::GateStructure;
use crate::literal::ClauseStore;

#[derive(Clone, Debug)]
pub struct Stats {
    pub name: String,
    pub dur_gate_scan_seconds: f64,
    pub num_vars_in_problem: u32,
    pub num_clauses_in_problem: usize,
    pub num_unaries_in_problem: usize,
    pub num_clauses_in_gates: usize,
    pub num_gates: usize,
    pub num_roots: usize,
}

impl Stats {
    pub fn collect(
        name: &str,
        num_vars: u32,
        store: &ClauseStore,
        structure: &GateStructure,
        scan_duration: Duration,
    ) -> Self {
        let num_unaries_in_problem = store.iter().filter(|clause| clause.len() == 1).count();
        let num_clauses_in_gates: usize = structure.gates.iter().map(|gate| gate.clauses.len()).sum();

        Stats {
            name: name.to_string(),
            dur_gate_scan_seconds: scan_duration.as_secs_f64(),
            num_vars_in_problem: num_vars,
            num_clauses_in_problem: store.len(),
            num_unaries_in_problem,
            num_clauses_in_gates,
            num_gates: structure.gates.len(),
            num_roots: structure.roots.len(),
        }
    }

    /// Fraction of the formula's clauses that some gate claimed.
    pub fn gate_coverage(&self) -> f64 {
        if self.num_clauses_in_problem == 0 {
            0.0
        } else {
            self.num_clauses_in_gates as f64 / self.num_clauses_in_problem as f64
        }
    }

    /// Gates recovered per variable declared in the problem.
    pub fn gates_per_variable(&self) -> f64 {
        if self.num_vars_in_problem == 0 {
            0.0
        } else {
            self.num_gates as f64 / self.num_vars_in_problem as f64
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "dur_gate_scan_seconds: {:.6}", self.dur_gate_scan_seconds)?;
        writeln!(f, "num_vars_in_problem: {}", self.num_vars_in_problem)?;
        writeln!(f, "num_clauses_in_problem: {}", self.num_clauses_in_problem)?;
        writeln!(f, "num_unaries_in_problem: {}", self.num_unaries_in_problem)?;
        writeln!(f, "num_clauses_in_gates: {}", self.num_clauses_in_gates)?;
        writeln!(f, "num_gates: {}", self.num_gates)?;
        writeln!(f, "num_roots: {}", self.num_roots)?;
        writeln!(f, "gate_coverage: {:.4}", self.gate_coverage())?;
        write!(f, "gates_per_variable: {:.4}", self.gates_per_variable())
    }
}
