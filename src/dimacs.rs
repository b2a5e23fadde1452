//! A minimal DIMACS CNF reader.
//!
//! This is CLI glue, not part of the validator core: it exists so the
//! binary has something to read gates and roots out of. It accepts the
//! textbook subset of the format (a `p cnf` header, `c` comment lines, and
//! literal lists terminated by `0`) and nothing more -- no `p wcnf`, no
//! `%`/`0` trailers, no extended literal syntax.

use std::fmt;

use log::debug;

use crate::literal::{ClauseStore, Literal, Sign};
use crate::log::targets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DimacsError {
    MissingHeader,
    MalformedHeader,
    UnterminatedClause,
    InvalidLiteral,
}

impl fmt::Display for DimacsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimacsError::MissingHeader => write!(f, "no 'p cnf' header line found"),
            DimacsError::MalformedHeader => write!(f, "'p cnf' header line is malformed"),
            DimacsError::UnterminatedClause => {
                write!(f, "input ended before a clause was terminated by 0")
            }
            DimacsError::InvalidLiteral => write!(f, "a token in a clause is not a valid literal"),
        }
    }
}

impl std::error::Error for DimacsError {}

/// The declared header of a DIMACS file: `p cnf <num_vars> <num_clauses>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimacsHeader {
    pub num_vars: u32,
    pub num_clauses: usize,
}

/// Parses `input`, pushing every clause into `store` in order. Returns the
/// declared header; `store` may end up with more or fewer clauses than
/// declared if the file lies about its counts, since nothing downstream
/// depends on them matching.
pub fn parse(input: &str, store: &mut ClauseStore) -> Result<DimacsHeader, DimacsError> {
    let mut lines = input.lines().filter(|line| {
        let trimmed = line.trim_start();
        !trimmed.is_empty() && !trimmed.starts_with('c')
    });

    let header_line = lines.next().ok_or(DimacsError::MissingHeader)?;
    let header = parse_header(header_line)?;

    let mut tokens = lines.flat_map(str::split_whitespace);
    let mut current: Vec<Literal> = Vec::new();

    for token in &mut tokens {
        let value: i64 = token.parse().map_err(|_| DimacsError::InvalidLiteral)?;
        if value == 0 {
            store.push(std::mem::take(&mut current));
            continue;
        }
        current.push(literal_of(value)?);
    }

    if !current.is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }

    debug!(target: targets::DIMACS, "parsed {} clauses over {} declared variables", store.len(), header.num_vars);

    Ok(header)
}

fn parse_header(line: &str) -> Result<DimacsHeader, DimacsError> {
    let mut fields = line.split_whitespace();
    if fields.next() != Some("p") || fields.next() != Some("cnf") {
        return Err(DimacsError::MalformedHeader);
    }
    let num_vars: u32 = fields.next().and_then(|s| s.parse().ok()).ok_or(DimacsError::MalformedHeader)?;
    let num_clauses: usize =
        fields.next().and_then(|s| s.parse().ok()).ok_or(DimacsError::MalformedHeader)?;
    Ok(DimacsHeader { num_vars, num_clauses })
}

fn literal_of(value: i64) -> Result<Literal, DimacsError> {
    if value == 0 || value.unsigned_abs() > u32::MAX as u64 {
        return Err(DimacsError::InvalidLiteral);
    }
    let sign = if value > 0 { Sign::Positive } else { Sign::Negative };
    Ok(Literal::new(value.unsigned_abs() as u32, sign))
}
