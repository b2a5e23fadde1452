//! Configuration (§1.3 of the ambient stack): the knobs that govern how
//! `validate` schedules work, independent of anything parsed from the CLI.

use std::num::NonZeroUsize;
use std::time::Duration;

/// Tuning for [`crate::verify::verify`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Worker threads the parallel verifier splits gates across.
    pub num_threads: usize,

    /// How often the poll loop re-sums per-worker progress counters.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let num_threads = std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1).min(2);

        Config { num_threads, poll_interval: Duration::from_millis(100) }
    }
}
