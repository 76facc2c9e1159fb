//! Single command line execution and rendering.

use std::io::Write;

use worksledger_core::ErrorKind;
use worksledger_executor::{Executor, Rejection};

/// Split a command line into name and arguments, honouring shell quoting.
pub fn split(line: &str) -> Result<Option<(String, Vec<String>)>, Rejection> {
    let words = shlex::split(line)
        .ok_or_else(|| Rejection::new(ErrorKind::InvalidArgument, "unbalanced quotes"))?;
    let mut words = words.into_iter();
    Ok(words.next().map(|name| (name, words.collect())))
}

/// Render a success payload. JSON is pretty-printed when `pretty` is set.
pub fn render(payload: &[u8], pretty: bool) -> String {
    if payload.is_empty() {
        return "OK".to_string();
    }
    if pretty {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) {
            if let Ok(text) = serde_json::to_string_pretty(&value) {
                return text;
            }
        }
    }
    String::from_utf8_lossy(payload).into_owned()
}

/// Run one line; payloads go to stdout, rejections as JSON to stderr.
///
/// Returns whether the command succeeded. A blank line counts as success.
pub fn run_line(executor: &Executor, line: &str, pretty: bool) -> bool {
    let (name, args) = match split(line) {
        Ok(Some(parts)) => parts,
        Ok(None) => return true,
        Err(rejection) => {
            eprintln!("{}", rejection.to_json());
            return false;
        }
    };
    match executor.invoke(&name, &args) {
        Ok(payload) => {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{}", render(&payload, pretty));
            true
        }
        Err(rejection) => {
            eprintln!("{}", rejection.to_json());
            false
        }
    }
}
