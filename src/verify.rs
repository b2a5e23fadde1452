//! The parallel verifier (§4.4): splits the gate list into contiguous
//! chunks, validates each chunk on its own thread and its own SAT session,
//! and aggregates verdicts with AND semantics while a poll loop reports
//! live progress.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use log::{debug, info};

use crate::checks::{check_gate, GateVerdict};
use crate::diagnostics::GateReport;
use crate::error::ValidationError;
use crate::gate::GateStructure;
use crate::literal::ClauseStore;
use crate::log::targets;
use crate::monotone::MonotoneSignMap;
use crate::sat_session::CadicalSession;

/// Receives the running total of gates checked so far, at most once every
/// [`crate::config::Config::poll_interval`].
pub trait ProgressSink {
    fn report(&mut self, checked: usize);
}

impl<F: FnMut(usize)> ProgressSink for F {
    fn report(&mut self, checked: usize) {
        self(checked)
    }
}

/// A [`ProgressSink`] that reports nothing.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _checked: usize) {}
}

/// Splits `len` items across `num_threads` contiguous chunks, at least one
/// item wide, the last possibly shorter.
fn chunk_bounds(len: usize, num_threads: usize) -> Vec<(usize, usize)> {
    if len == 0 {
        return vec![];
    }
    let num_threads = num_threads.max(1).min(len);
    let chunk_size = len.div_ceil(num_threads);

    (0..len)
        .step_by(chunk_size)
        .map(|start| (start, (start + chunk_size).min(len)))
        .collect()
}

/// Validates every gate in `structure`, parallelized across `num_threads`
/// worker threads, polling `progress` roughly every `poll_interval`.
///
/// Returns `Ok(true)` iff every gate validated; a solver fault from any
/// worker is propagated and does not cancel the others (their results are
/// simply discarded once this function returns).
pub fn verify(
    structure: &GateStructure,
    store: &ClauseStore,
    monotone_map: &MonotoneSignMap,
    num_threads: usize,
    poll_interval: Duration,
    progress: &mut dyn ProgressSink,
) -> Result<bool, ValidationError> {
    let gates = &structure.gates;
    let bounds = chunk_bounds(gates.len(), num_threads);

    info!(
        target: targets::PARALLEL_VERIFY,
        "validating {} gates across {} chunk(s)",
        gates.len(),
        bounds.len()
    );

    if bounds.is_empty() {
        progress.report(0);
        return Ok(true);
    }

    let counters: Vec<AtomicUsize> = bounds.iter().map(|_| AtomicUsize::new(0)).collect();
    let dones: Vec<AtomicBool> = bounds.iter().map(|_| AtomicBool::new(false)).collect();
    let total = gates.len();

    let results: Vec<Result<bool, ValidationError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = bounds
            .iter()
            .zip(counters.iter())
            .zip(dones.iter())
            .map(|((&(start, end), counter), done)| {
                scope.spawn(move || {
                    let result = validate_chunk(gates, start, end, store, monotone_map, counter);
                    done.store(true, Ordering::Release);
                    result
                })
            })
            .collect();

        poll_until_done(&counters, &dones, total, poll_interval, progress);

        handles.into_iter().map(|handle| handle.join().expect("worker thread panicked")).collect()
    });

    let mut all_valid = true;
    for result in results {
        all_valid &= result?;
    }

    progress.report(total);
    Ok(all_valid)
}

/// Polls `counters` until every worker either accounts for its whole chunk or
/// has exited (successfully or via a propagated fault, recorded in `dones`),
/// since a worker that errors out mid-chunk never finishes incrementing its
/// counter.
fn poll_until_done(
    counters: &[AtomicUsize],
    dones: &[AtomicBool],
    total: usize,
    poll_interval: Duration,
    progress: &mut dyn ProgressSink,
) {
    loop {
        let checked: usize = counters.iter().map(|c| c.load(Ordering::Relaxed)).sum();
        progress.report(checked);
        let all_done = dones.iter().all(|done| done.load(Ordering::Acquire));
        if checked >= total || all_done {
            return;
        }
        std::thread::sleep(poll_interval);
    }
}

/// Validates gates `start..end` in order; stops at the first invalid gate
/// (§4.4's worker state machine has no room to keep going past it) and emits
/// its diagnostic there.
fn validate_chunk(
    gates: &[crate::gate::Gate],
    start: usize,
    end: usize,
    store: &ClauseStore,
    monotone_map: &MonotoneSignMap,
    counter: &AtomicUsize,
) -> Result<bool, ValidationError> {
    for gate in &gates[start..end] {
        let mut session = CadicalSession::new();
        let verdict = check_gate(gate, store, monotone_map, &mut session)?;
        counter.fetch_add(1, Ordering::Relaxed);

        if verdict == GateVerdict::Invalid {
            debug!(
                target: targets::PARALLEL_VERIFY,
                "gate on variable {} is invalid",
                gate.output.variable()
            );
            eprint!("{}", GateReport::new(gate, store));
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::literal::{Literal, Sign};

    fn lit(v: u32, positive: bool) -> Literal {
        Literal::new(v, if positive { Sign::Positive } else { Sign::Negative })
    }

    fn and_gate(output_var: u32, inputs: (u32, u32), store: &mut ClauseStore) -> Gate {
        let (a, b) = inputs;
        let c0 = store.push(vec![lit(a, false), lit(b, false), lit(output_var, true)]);
        let c1 = store.push(vec![lit(a, true), lit(output_var, false)]);
        let c2 = store.push(vec![lit(b, true), lit(output_var, false)]);
        Gate {
            output: lit(output_var, true),
            inputs: vec![lit(a, true), lit(b, true)],
            clauses: vec![c0, c1, c2],
            num_fwd_clauses: 1,
            is_nested_monotonically: false,
        }
    }

    fn broken_gate(output_var: u32, inputs: (u32, u32), store: &mut ClauseStore) -> Gate {
        let (a, b) = inputs;
        let c0 = store.push(vec![lit(a, false), lit(b, false), lit(output_var, true)]);
        let c1 = store.push(vec![lit(a, false), lit(b, false), lit(output_var, false)]);
        Gate {
            output: lit(output_var, true),
            inputs: vec![lit(a, true), lit(b, true)],
            clauses: vec![c0, c1],
            num_fwd_clauses: 1,
            is_nested_monotonically: false,
        }
    }

    #[test]
    fn chunk_bounds_cover_every_index_once() {
        for len in 0..12 {
            for threads in 1..6 {
                let bounds = chunk_bounds(len, threads);
                let mut covered = Vec::new();
                for (start, end) in &bounds {
                    covered.extend(*start..*end);
                }
                covered.sort_unstable();
                assert_eq!(covered, (0..len).collect::<Vec<_>>(), "len={len} threads={threads}");
            }
        }
    }

    /// Property #1: the validity verdict does not depend on the thread
    /// count used to compute it.
    #[test]
    fn verdict_is_independent_of_thread_count() {
        let mut store = ClauseStore::new();
        let mut gates = Vec::new();
        for i in 0..6 {
            gates.push(and_gate(10 + i, (2 * i + 1, 2 * i + 2), &mut store));
        }
        let structure = GateStructure::new(gates, vec![], &store).unwrap();
        let map = MonotoneSignMap::build(&structure, &store);

        for threads in [1, 2, 3, 8] {
            let mut sink = NullProgress;
            let valid =
                verify(&structure, &store, &map, threads, Duration::from_millis(1), &mut sink)
                    .unwrap();
            assert!(valid, "threads={threads}");
        }
    }

    #[test]
    fn an_invalid_gate_makes_the_whole_structure_invalid_regardless_of_chunking() {
        let mut store = ClauseStore::new();
        let mut gates = Vec::new();
        for i in 0..5 {
            gates.push(and_gate(10 + i, (2 * i + 1, 2 * i + 2), &mut store));
        }
        gates.push(broken_gate(20, (100, 101), &mut store));
        let structure = GateStructure::new(gates, vec![], &store).unwrap();
        let map = MonotoneSignMap::build(&structure, &store);

        for threads in [1, 2, 4] {
            let mut sink = NullProgress;
            let valid =
                verify(&structure, &store, &map, threads, Duration::from_millis(1), &mut sink)
                    .unwrap();
            assert!(!valid, "threads={threads}");
        }
    }

    /// Property #2: progress is monotone non-decreasing and ends at the
    /// total gate count.
    #[test]
    fn progress_reports_are_monotone_and_reach_the_total() {
        let mut store = ClauseStore::new();
        let mut gates = Vec::new();
        for i in 0..10 {
            gates.push(and_gate(10 + i, (2 * i + 1, 2 * i + 2), &mut store));
        }
        let structure = GateStructure::new(gates, vec![], &store).unwrap();
        let map = MonotoneSignMap::build(&structure, &store);

        let mut reports = Vec::new();
        {
            let mut sink = |checked: usize| reports.push(checked);
            verify(&structure, &store, &map, 3, Duration::from_millis(1), &mut sink).unwrap();
        }

        assert_eq!(*reports.last().unwrap(), 10);
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn empty_gate_structure_is_trivially_valid() {
        let store = ClauseStore::new();
        let structure = GateStructure::new(vec![], vec![], &store).unwrap();
        let map = MonotoneSignMap::build(&structure, &store);
        let mut sink = NullProgress;
        let valid =
            verify(&structure, &store, &map, 4, Duration::from_millis(1), &mut sink).unwrap();
        assert!(valid);
    }

    /// A chunk that exits before its counter reaches its full width (as a
    /// faulted worker would) must still unblock the poll loop once every
    /// chunk has signalled done, rather than spinning on an unreachable
    /// total.
    #[test]
    fn poll_returns_once_every_chunk_is_done_even_short_of_the_total() {
        let counters = vec![AtomicUsize::new(1)];
        let dones = vec![AtomicBool::new(true)];
        let mut reports = Vec::new();
        {
            let mut sink = |checked: usize| reports.push(checked);
            poll_until_done(&counters, &dones, 5, Duration::from_millis(1), &mut sink);
        }
        assert_eq!(reports, vec![1]);
    }
}
