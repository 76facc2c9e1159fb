//! Interactive shell.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use worksledger_executor::Executor;

use crate::line;

const PROMPT: &str = "worksledger> ";
const HISTORY_FILE: &str = ".worksledger_history";

fn history_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(HISTORY_FILE))
}

fn print_help(executor: &Executor) {
    println!("commands:");
    for name in executor.registry().names() {
        println!("  {}", name);
    }
    println!("  help, quit");
}

/// Read-eval-print loop until `quit` or end of input.
pub fn run(executor: &Executor) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(input) => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);
                match trimmed {
                    "quit" | "exit" => break,
                    "help" => print_help(executor),
                    _ => {
                        line::run_line(executor, trimmed, true);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::debug!(error = %e, "failed to save shell history");
        }
    }
    Ok(())
}
