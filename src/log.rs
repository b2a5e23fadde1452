//! Targets to be used within a [`log`] macro.
//!
//! Calls to the log macros are made throughout the library. No log
//! implementation is provided --- the `log` feature wires one into the CLI
//! binary only. See [`log`] for details.

pub mod targets {
    pub const SAT_SESSION: &str = "sat_session";
    pub const GATE_CHECK: &str = "gate_check";
    pub const MONOTONE_MAP: &str = "monotone_map";
    pub const PARALLEL_VERIFY: &str = "parallel_verify";
    pub const SCANNER: &str = "scanner";
    pub const DIMACS: &str = "dimacs";
}
