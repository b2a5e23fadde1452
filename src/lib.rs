//! Validates that every gate recovered from a CNF by an external
//! gate-recognition pass is a genuine functional encoding: left-total and
//! right-unique between its declared inputs and its output.
//!
//! The sole entry point is [`validate`]; everything else is exposed for
//! callers that want to drive the pieces (scanning, diagnostics, a custom
//! progress sink) themselves.

pub mod checks;
pub mod cli;
pub mod config;
pub mod dimacs;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod literal;
pub mod log;
pub mod monotone;
pub mod progress;
pub mod sat_session;
pub mod scanner;
pub mod stats;
pub mod verify;

pub use checks::GateVerdict;
pub use config::Config;
pub use error::{MalformedInputError, SolverError, ValidationError};
pub use gate::{Gate, GateStructure};
pub use literal::{Clause, ClauseHandle, ClauseStore, Literal, Sign, Variable};
pub use verify::{NullProgress, ProgressSink};

use monotone::MonotoneSignMap;

/// Validates every gate in `structure`, parallelized per `config`, reporting
/// progress to `progress` as it goes.
///
/// Returns [`GateVerdict::Valid`] only if every gate is both left-total and
/// right-unique (or qualifies for the nested-monotone fast path). A solver
/// or malformed-input fault is propagated as an error rather than folded
/// into the verdict.
pub fn validate(
    structure: &GateStructure,
    store: &ClauseStore,
    config: Config,
    progress: &mut dyn ProgressSink,
) -> Result<GateVerdict, ValidationError> {
    let monotone_map = MonotoneSignMap::build(structure, store);

    let all_valid = verify::verify(
        structure,
        store,
        &monotone_map,
        config.num_threads,
        config.poll_interval,
        progress,
    )?;

    Ok(if all_valid { GateVerdict::Valid } else { GateVerdict::Invalid })
}
