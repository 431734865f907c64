//! Unit tests for the export CLI helpers.

use std::sync::atomic::{AtomicUsize, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use rstest::{fixture, rstest};

use super::*;
use crate::identity_number::is_valid_identity_number;

struct OutputFixture {
    dir: Utf8PathBuf,
}

impl OutputFixture {
    fn path(&self, file_name: &str) -> Utf8PathBuf {
        self.dir.join(file_name)
    }
}

impl Drop for OutputFixture {
    fn drop(&mut self) {
        let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open workspace dir");
        drop(root.remove_dir_all(&self.dir));
    }
}

#[fixture]
fn output_fixture() -> OutputFixture {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = Utf8PathBuf::from("target")
        .join("profile-data-tests")
        .join(format!("export-cli-{}-{counter}", std::process::id()));
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open workspace dir");
    root.create_dir_all(&dir).expect("create temp dir");
    OutputFixture { dir }
}

fn options(args: &[&str]) -> Options {
    let outcome = parse_args(args.iter().map(|arg| (*arg).to_owned())).expect("parse args");
    let ParseOutcome::Options(parsed) = outcome else {
        panic!("expected options");
    };
    parsed
}

#[test]
fn parse_args_returns_help_for_help_flag() {
    let outcome = parse_args(vec!["--help".to_owned()]).expect("parse args");

    let ParseOutcome::Help(text) = outcome else {
        panic!("expected help");
    };
    assert!(text.contains("--output"));
}

#[test]
fn parse_args_requires_output() {
    let err = parse_args(vec!["--count".to_owned(), "3".to_owned()]).expect_err("expected error");

    let CliError::Usage { message } = err else {
        panic!("expected usage error");
    };
    assert!(message.contains("--output"));
}

#[rstest]
#[case(&["--output", "p.xlsx", "--nope"])]
#[case(&["--output", "p.xlsx", "--count", "many"])]
#[case(&["--output", "p.xlsx", "--format", "pdf"])]
#[case(&["--output", "p.xlsx", "--without", "shoe_size"])]
#[case(&["--output"])]
fn parse_args_reports_usage_errors(#[case] args: &[&str]) {
    let err = parse_args(args.iter().map(|arg| (*arg).to_owned())).expect_err("expected error");
    assert!(matches!(err, CliError::Usage { .. }));
}

#[test]
fn parse_args_applies_defaults() {
    let parsed = options(&["--output", "people.xlsx"]);

    assert_eq!(parsed.output(), Utf8Path::new("people.xlsx"));
    assert_eq!(parsed.count, DEFAULT_COUNT);
    assert_eq!(parsed.format(), ExportFormat::Xlsx);
    assert_eq!(parsed.seed, None);
    assert_eq!(parsed.selection(), FieldSelection::FORM_DEFAULT);
}

#[test]
fn parse_args_parses_full_options() {
    let parsed = options(&[
        "--output",
        "out/people.csv",
        "--count",
        "-4",
        "--format",
        "csv",
        "--seed",
        "2026",
        "--api-defaults",
        "--without",
        "email",
        "--without",
        "includeGender",
    ]);

    assert_eq!(parsed.count, -4);
    assert_eq!(parsed.format(), ExportFormat::Csv);
    assert_eq!(parsed.seed, Some(2026));
    assert_eq!(
        parsed.selection(),
        FieldSelection::API_DEFAULT
            .with(FieldGroup::Email, false)
            .with(FieldGroup::Gender, false)
    );
}

#[rstest]
fn run_export_writes_seeded_json(output_fixture: OutputFixture) {
    let path = output_fixture.path("people.json");
    let parsed = options(&[
        "--output",
        path.as_str(),
        "--count",
        "3",
        "--format",
        "json",
        "--seed",
        "11",
    ]);

    let summary = run_export(&parsed).expect("export succeeds");

    assert_eq!(summary.records, 3);
    assert_eq!(summary.format, ExportFormat::Json);
    let written = std::fs::read(&path).expect("read output");
    assert_eq!(summary.bytes, written.len());

    let people: Vec<PersonRecord> = serde_json::from_slice(&written).expect("valid json");
    let expected = generate_people_seeded(11, 3, FieldSelection::FORM_DEFAULT).expect("generate");
    assert_eq!(people, expected);
    assert!(
        people
            .iter()
            .all(|person| person.id.as_deref().is_some_and(is_valid_identity_number))
    );
}

#[rstest]
fn run_export_clamps_count(output_fixture: OutputFixture) {
    let path = output_fixture.path("people.csv");
    let parsed = options(&["--output", path.as_str(), "--count", "0", "--format", "csv"]);

    let summary = run_export(&parsed).expect("export succeeds");

    assert_eq!(summary.records, 1);
    let text = std::fs::read_to_string(&path).expect("read output");
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("ID,First Name,Last Name,Full Name,Email,Gender,Age,City\n"));
}

#[rstest]
fn run_export_writes_xlsx(output_fixture: OutputFixture) {
    let path = output_fixture.path("people.xlsx");
    let parsed = options(&["--output", path.as_str(), "--count", "5", "--seed", "3"]);

    let summary = run_export(&parsed).expect("export succeeds");

    assert_eq!(summary.records, 5);
    let bytes = std::fs::read(&path).expect("read output");
    assert!(bytes.starts_with(b"PK"));
}

#[rstest]
fn run_export_reports_missing_directory(output_fixture: OutputFixture) {
    let path = output_fixture.path("absent/people.json");
    let parsed = options(&["--output", path.as_str(), "--format", "json"]);

    let err = run_export(&parsed).expect_err("expected error");

    let CliError::Export { source } = err else {
        panic!("expected export error");
    };
    assert!(matches!(source, ExportError::WriteError { .. }));
}

#[test]
fn success_message_formats_expected_output() {
    let summary = ExportSummary {
        records: 2,
        format: ExportFormat::Xlsx,
        bytes: 6000,
    };

    assert_eq!(
        success_message(&summary, Utf8Path::new("people.xlsx")),
        "Wrote 2 profiles (xlsx, 6000 bytes) to people.xlsx"
    );
}
