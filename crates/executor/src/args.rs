//! Argument validation at the dispatch boundary
//!
//! Every failure here is `InvalidArgument`. Positions in messages are
//! 1-based, matching how callers number their arguments.

use worksledger_core::{LedgerError, LedgerResult};

fn ordinal(index: usize) -> String {
    let n = index + 1;
    let suffix = match (n % 10, n % 100) {
        (1, 11) | (2, 12) | (3, 13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Require exactly `n` arguments
pub fn expect_exact(args: &[String], n: usize) -> LedgerResult<()> {
    if args.len() != n {
        return Err(LedgerError::invalid_argument(format!(
            "incorrect number of arguments: expecting {}, got {}",
            n,
            args.len()
        )));
    }
    Ok(())
}

/// Require at least `n` arguments; extras are ignored
pub fn expect_at_least(args: &[String], n: usize) -> LedgerResult<()> {
    if args.len() < n {
        return Err(LedgerError::invalid_argument(format!(
            "incorrect number of arguments: expecting at least {}, got {}",
            n,
            args.len()
        )));
    }
    Ok(())
}

/// Require at most `n` arguments
pub fn expect_at_most(args: &[String], n: usize) -> LedgerResult<()> {
    if args.len() > n {
        return Err(LedgerError::invalid_argument(format!(
            "incorrect number of arguments: expecting at most {}, got {}",
            n,
            args.len()
        )));
    }
    Ok(())
}

/// Require a non-empty argument
pub fn non_empty(arg: &str, index: usize) -> LedgerResult<()> {
    if arg.is_empty() {
        return Err(LedgerError::invalid_argument(format!(
            "{} argument must be a non-empty string",
            ordinal(index)
        )));
    }
    Ok(())
}

/// Parse an integer argument
pub fn integer(arg: &str, index: usize) -> LedgerResult<i64> {
    arg.parse::<i64>().map_err(|_| {
        LedgerError::invalid_argument(format!(
            "{} argument must be a numeric string, got {:?}",
            ordinal(index),
            arg
        ))
    })
}

/// Require an argument of exactly `len` bytes
pub fn exact_len(arg: &str, index: usize, name: &str, len: usize) -> LedgerResult<()> {
    let actual = arg.len();
    if actual != len {
        return Err(LedgerError::invalid_argument(format!(
            "{} argument {} must be {} bytes, got {}",
            ordinal(index),
            name,
            len,
            actual
        )));
    }
    Ok(())
}
