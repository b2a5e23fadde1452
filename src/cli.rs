//! Command-line surface (§6): a single positional input file, plus an
//! optional thread-count override.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::config::Config;

pub struct Cli {
    pub input: PathBuf,
    pub config: Config,
    pub quiet: bool,
}

pub fn command() -> Command {
    Command::new("gate-validate")
        .about("Validates that gates recovered from a CNF are genuine functional encodings")
        .arg(
            Arg::new("input")
                .help("Path to a DIMACS CNF file")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('j')
                .help("Worker threads for parallel gate validation")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Suppress the progress bar and statistics")
                .action(ArgAction::SetTrue),
        )
}

pub fn parse(args: impl IntoIterator<Item = String>) -> Cli {
    let matches = command().get_matches_from(args);

    let mut config = Config::default();
    if let Some(&threads) = matches.get_one::<usize>("threads") {
        config.num_threads = threads.max(1);
    }

    Cli {
        input: matches.get_one::<PathBuf>("input").cloned().expect("input is required"),
        config,
        quiet: matches.get_flag("quiet"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_bare_input_path() {
        let cli = parse(["gate-validate", "problem.cnf"].map(String::from));
        assert_eq!(cli.input, PathBuf::from("problem.cnf"));
        assert!(!cli.quiet);
    }

    #[test]
    fn thread_count_overrides_the_default() {
        let cli = parse(["gate-validate", "--threads", "5", "problem.cnf"].map(String::from));
        assert_eq!(cli.config.num_threads, 5);
    }

    #[test]
    fn quiet_flag_is_recognized() {
        let cli = parse(["gate-validate", "-q", "problem.cnf"].map(String::from));
        assert!(cli.quiet);
    }
}
