use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use gate_validate::verify::ProgressSink;
use gate_validate::{cli, dimacs, scanner, stats, validate, GateVerdict};

#[cfg(feature = "log")]
fn init_logging() {
    env_logger::init();
}

#[cfg(not(feature = "log"))]
fn init_logging() {}

fn main() -> ExitCode {
    init_logging();

    let args = cli::parse(std::env::args());

    let input = match fs::read_to_string(&args.input) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("error: could not read {}: {err}", args.input.display());
            return ExitCode::FAILURE;
        }
    };

    let mut store = gate_validate::ClauseStore::new();
    let header = match dimacs::parse(&input, &mut store) {
        Ok(header) => header,
        Err(err) => {
            eprintln!("error: could not parse {}: {err}", args.input.display());
            return ExitCode::FAILURE;
        }
    };

    let scan_started = Instant::now();
    let structure = match scanner::scan(&store) {
        Ok(structure) => structure,
        Err(err) => {
            eprintln!("error: gate structure is malformed: {err}");
            return ExitCode::FAILURE;
        }
    };
    let scan_duration = scan_started.elapsed();

    if !args.quiet {
        let name = args.input.display().to_string();
        let stats = stats::Stats::collect(&name, header.num_vars, &store, &structure, scan_duration);
        eprintln!("{stats}");
    }

    let mut null_progress = gate_validate::NullProgress;
    let mut terminal_bar =
        gate_validate::progress::TerminalProgressBar::new(structure.gates.len(), "validating gates");

    let progress: &mut dyn ProgressSink =
        if args.quiet { &mut null_progress } else { &mut terminal_bar };

    let verdict = validate(&structure, &store, args.config, progress);

    if !args.quiet {
        terminal_bar.finish();
    }

    match verdict {
        Ok(GateVerdict::Valid) => {
            println!("valid: 1");
            ExitCode::SUCCESS
        }
        Ok(GateVerdict::Invalid) => {
            println!("valid: 0");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
