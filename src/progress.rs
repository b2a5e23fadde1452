//! A terminal progress bar driven by [`crate::verify::ProgressSink`],
//! redrawn to stderr so it never pollutes piped stdout.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;

use crate::verify::ProgressSink;

const BAR_WIDTH: usize = 32;

/// Renders `[===>    ]  NN%  label` to stderr on every report, overwriting
/// the previous line.
pub struct TerminalProgressBar {
    total: usize,
    label: String,
}

impl TerminalProgressBar {
    pub fn new(total: usize, label: impl Into<String>) -> Self {
        TerminalProgressBar { total, label: label.into() }
    }

    /// Clears the bar and leaves the cursor at the start of the line, for
    /// the caller to print a final result line in its place.
    pub fn finish(&self) {
        let mut stderr = io::stderr();
        let _ = stderr.queue(Clear(ClearType::CurrentLine)).and_then(|s| s.queue(MoveToColumn(0)));
        let _ = stderr.flush();
    }
}

impl ProgressSink for TerminalProgressBar {
    fn report(&mut self, checked: usize) {
        let fraction = if self.total == 0 { 1.0 } else { checked as f64 / self.total as f64 };
        let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);

        let mut bar = String::with_capacity(BAR_WIDTH + 2);
        bar.push('[');
        for i in 0..BAR_WIDTH {
            bar.push(if i < filled { '=' } else { ' ' });
        }
        bar.push(']');

        let line = format!("{bar}  {:>3}%  {}", (fraction * 100.0) as u32, self.label);

        let mut stderr = io::stderr();
        let queued = stderr
            .queue(Clear(ClearType::CurrentLine))
            .and_then(|s| s.queue(MoveToColumn(0)))
            .and_then(|s| s.queue(Print(line)));
        if queued.is_ok() {
            let _ = stderr.flush();
        }
    }
}
