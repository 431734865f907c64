//! Offline exporter writing generated profiles to xlsx, CSV, or JSON.
//!
//! Parsing and export logic live in `profile_data::export_cli`; this binary
//! only wires them to the process environment.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use profile_data::export_cli::{CliError, ParseOutcome, parse_args, run_export, success_message};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = write!(io::stderr().lock(), "{}", with_newline(&err)) {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    match parse_args(env::args().skip(1))? {
        ParseOutcome::Help(text) => {
            write_stdout(&text);
            Ok(())
        }
        ParseOutcome::Options(options) => {
            let summary = run_export(&options)?;
            write_stdout(&format!("{}\n", success_message(&summary, options.output())));
            Ok(())
        }
    }
}

// Usage errors arrive pre-rendered with a trailing newline.
fn with_newline(err: &CliError) -> String {
    let text = err.to_string();
    if text.ends_with('\n') {
        text
    } else {
        format!("{text}\n")
    }
}

fn write_stdout(text: &str) {
    if let Err(err) = io::stdout().lock().write_all(text.as_bytes()) {
        drop(err);
    }
}
