//! Error taxonomy (§7).
//!
//! Malformed-input and solver faults unwind to the caller; an invalid gate
//! is not an error, it is a verdict, and never appears here.

use std::fmt;

use crate::literal::Variable;

/// A fault reported by the backing SAT solver.
///
/// Ordinary unsatisfiability is never a `SolverError` --- only an
/// unrecoverable internal condition is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverError {
    /// The solver returned neither `satisfiable` nor `unsatisfiable`.
    Undetermined,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Undetermined => {
                write!(f, "solver returned neither satisfiable nor unsatisfiable")
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// A gate structure violating one of the §3 invariants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedInputError {
    /// A gate or root clause referenced a [`crate::literal::ClauseHandle`] not
    /// present in the owning [`crate::literal::ClauseStore`].
    DanglingClauseHandle,

    /// Two distinct gates claim the same output variable.
    DuplicateGateOutput(Variable),

    /// A clause attributed to a gate mentions neither polarity of the gate's
    /// output variable.
    ClauseMissingOutput(Variable),

    /// A clause attributed to a gate mentions both polarities of the gate's
    /// output variable.
    ClauseMixesOutputPolarity(Variable),
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInputError::DanglingClauseHandle => {
                write!(f, "a clause handle does not point into the owning clause store")
            }
            MalformedInputError::DuplicateGateOutput(v) => {
                write!(f, "variable {v} is claimed as output by more than one gate")
            }
            MalformedInputError::ClauseMissingOutput(v) => {
                write!(f, "a clause attributed to the gate on variable {v} does not mention it")
            }
            MalformedInputError::ClauseMixesOutputPolarity(v) => {
                write!(f, "a clause attributed to the gate on variable {v} contains both polarities of it")
            }
        }
    }
}

impl std::error::Error for MalformedInputError {}

/// The union of faults `validate` can propagate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    MalformedInput(MalformedInputError),
    Solver(SolverError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MalformedInput(e) => write!(f, "malformed gate structure: {e}"),
            ValidationError::Solver(e) => write!(f, "solver fault: {e}"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<MalformedInputError> for ValidationError {
    fn from(e: MalformedInputError) -> Self {
        ValidationError::MalformedInput(e)
    }
}

impl From<SolverError> for ValidationError {
    fn from(e: SolverError) -> Self {
        ValidationError::Solver(e)
    }
}
