//! CLI support for exporting generated profiles to a file.
//!
//! The `profile-export` binary is a thin wrapper over [`parse_args`],
//! [`run_export`], and [`success_message`], so the whole flow is testable
//! without spawning a process.

use std::iter;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use thiserror::Error;

use crate::atomic_io::write_export;
use crate::error::{ExportError, GenerationError};
use crate::export::{ExportFormat, Table};
use crate::generator::{clamp_count, generate_people, generate_people_seeded};
use crate::record::PersonRecord;
use crate::selection::{FieldGroup, FieldSelection};

const BIN_NAME: &str = "profile-export";
const DEFAULT_COUNT: i64 = 10;

/// Parsed options for the export CLI.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = BIN_NAME,
    about = "Generate synthetic Israeli profiles and write them to a file"
)]
pub struct Options {
    /// Output file; its parent directory must exist.
    #[arg(long, value_name = "PATH")]
    output: Utf8PathBuf,

    /// Number of profiles, clamped to the supported batch range.
    #[arg(long, default_value_t = DEFAULT_COUNT, allow_negative_numbers = true)]
    count: i64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
    format: ExportFormat,

    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Start from the API field defaults (no age or city).
    #[arg(long)]
    api_defaults: bool,

    /// Drop a field group, e.g. `--without email`. Repeatable.
    #[arg(long = "without", value_name = "GROUP")]
    without: Vec<FieldGroup>,
}

impl Options {
    /// Returns the output path.
    ///
    /// # Example
    ///
    /// ```
    /// use profile_data::export_cli::{ParseOutcome, parse_args};
    ///
    /// let args = vec!["--output".to_owned(), "people.xlsx".to_owned()];
    /// let ParseOutcome::Options(options) = parse_args(args).expect("parse") else {
    ///     panic!("expected options");
    /// };
    ///
    /// assert_eq!(options.output().as_str(), "people.xlsx");
    /// ```
    #[must_use]
    pub fn output(&self) -> &Utf8Path {
        &self.output
    }

    /// Returns the requested output format.
    #[must_use]
    pub const fn format(&self) -> ExportFormat {
        self.format
    }

    /// Resolves the field selection from the defaults flag and exclusions.
    #[must_use]
    pub fn selection(&self) -> FieldSelection {
        let base = if self.api_defaults {
            FieldSelection::API_DEFAULT
        } else {
            FieldSelection::FORM_DEFAULT
        };
        self.without
            .iter()
            .fold(base, |selection, &group| selection.with(group, false))
    }
}

/// Outcome of parsing CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Print the rendered help or version text and exit successfully.
    Help(String),
    /// Continue with the parsed options.
    Options(Options),
}

/// What a completed export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of records written.
    pub records: usize,
    /// Format of the output file.
    pub format: ExportFormat,
    /// Size of the output file in bytes.
    pub bytes: usize,
}

/// Parses CLI arguments, excluding the program name.
///
/// # Errors
///
/// Returns [`CliError::Usage`] for unknown flags, missing values, or values
/// that fail to parse.
pub fn parse_args<I>(args: I) -> Result<ParseOutcome, CliError>
where
    I: IntoIterator<Item = String>,
{
    match Options::try_parse_from(iter::once(BIN_NAME.to_owned()).chain(args)) {
        Ok(options) => Ok(ParseOutcome::Options(options)),
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                Ok(ParseOutcome::Help(err.render().to_string()))
            }
            _ => Err(CliError::Usage {
                message: err.render().to_string(),
            }),
        },
    }
}

/// Generates the requested profiles and writes them atomically.
///
/// # Errors
///
/// Returns [`CliError::Generation`] if generation fails and
/// [`CliError::Export`] if rendering or writing fails.
pub fn run_export(options: &Options) -> Result<ExportSummary, CliError> {
    let count = clamp_count(options.count);
    let selection = options.selection();
    let people = match options.seed {
        Some(seed) => generate_people_seeded(seed, count, selection)?,
        None => generate_people(&mut rand::rng(), count, selection)?,
    };

    let bytes = render(&people, options.format)?;
    write_export(&options.output, &bytes)?;

    Ok(ExportSummary {
        records: people.len(),
        format: options.format,
        bytes: bytes.len(),
    })
}

fn render(people: &[PersonRecord], format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => Table::from_records(people).to_xlsx(),
        ExportFormat::Csv => Table::from_records(people).to_csv(),
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(people)?),
    }
}

/// Formats the success line printed by the CLI.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use profile_data::ExportFormat;
/// use profile_data::export_cli::{ExportSummary, success_message};
///
/// let summary = ExportSummary {
///     records: 10,
///     format: ExportFormat::Csv,
///     bytes: 812,
/// };
///
/// assert_eq!(
///     success_message(&summary, Utf8Path::new("out/people.csv")),
///     "Wrote 10 profiles (csv, 812 bytes) to out/people.csv"
/// );
/// ```
#[must_use]
pub fn success_message(summary: &ExportSummary, output: &Utf8Path) -> String {
    format!(
        "Wrote {} profiles ({}, {} bytes) to {output}",
        summary.records, summary.format, summary.bytes
    )
}

/// Errors surfaced by the export CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The arguments could not be parsed.
    #[error("{message}")]
    Usage {
        /// Rendered usage error from the argument parser.
        message: String,
    },
    /// Profile generation failed.
    #[error("generation failed: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
    /// Rendering or writing the output failed.
    #[error("export failed: {source}")]
    Export {
        /// Underlying export error.
        #[from]
        #[source]
        source: ExportError,
    },
}

#[cfg(test)]
mod tests;
