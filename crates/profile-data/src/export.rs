//! Tabular export of person records.
//!
//! [`Table::from_records`] fixes the column set and cell values once; the
//! renderers only serialise that table. Records are generic through
//! [`TabularRecord`], so caller-supplied JSON rows export the same way as
//! generated [`PersonRecord`]s.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ExportError;
use crate::record::PersonRecord;

/// Worksheet name used for xlsx exports.
pub const SHEET_NAME: &str = "Israeli Profiles";

/// File name prefix used for downloads and CLI output.
pub const DEFAULT_FILE_PREFIX: &str = "israeli_profiles";

/// Characters added to the longest value when sizing a column.
const COLUMN_MARGIN: usize = 2;

/// Widest column xlsx accepts.
const MAX_COLUMN_WIDTH: u8 = 255;

/// An exportable column, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Identity number.
    Id,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Combined name.
    FullName,
    /// Email address.
    Email,
    /// Gender.
    Gender,
    /// Age in years.
    Age,
    /// City of residence.
    City,
}

impl Column {
    /// Every column in export order.
    pub const CANONICAL: [Self; 8] = [
        Self::Id,
        Self::FirstName,
        Self::LastName,
        Self::FullName,
        Self::Email,
        Self::Gender,
        Self::Age,
        Self::City,
    ];

    /// Record key for the column.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::City => "city",
        }
    }

    /// Human-readable header.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Gender => "Gender",
            Self::Age => "Age",
            Self::City => "City",
        }
    }
}

/// A single table value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Present in the record but without a value.
    Empty,
    /// Text value.
    Text(String),
    /// Integer value, written as a number in workbooks.
    Integer(i64),
}

impl Cell {
    /// Display text of the cell.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text),
            Self::Integer(number) => Cow::Owned(number.to_string()),
        }
    }
}

/// A record that can supply cells for export columns.
///
/// Returning `None` means the record does not carry the column at all; a
/// column is exported when at least one record carries it.
pub trait TabularRecord {
    /// Returns the cell for `column`, or `None` if the record lacks it.
    fn cell(&self, column: Column) -> Option<Cell>;
}

impl TabularRecord for PersonRecord {
    fn cell(&self, column: Column) -> Option<Cell> {
        let text = |value: &Option<String>| value.clone().map(Cell::Text);
        match column {
            Column::Id => text(&self.id),
            Column::FirstName => text(&self.first_name),
            Column::LastName => text(&self.last_name),
            Column::FullName => text(&self.full_name),
            Column::Email => text(&self.email),
            Column::Gender => self.gender.map(|gender| Cell::Text(gender.as_str().to_owned())),
            Column::Age => self.age.map(|age| Cell::Integer(i64::from(age))),
            Column::City => text(&self.city),
        }
    }
}

impl TabularRecord for Map<String, Value> {
    fn cell(&self, column: Column) -> Option<Cell> {
        self.get(column.key()).map(json_cell)
    }
}

impl TabularRecord for Value {
    fn cell(&self, column: Column) -> Option<Cell> {
        self.as_object().and_then(|object| object.cell(column))
    }
}

fn json_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Empty,
        Value::String(text) => Cell::Text(text.clone()),
        Value::Number(number) => number
            .as_i64()
            .map_or_else(|| Cell::Text(number.to_string()), Cell::Integer),
        other => Cell::Text(other.to_string()),
    }
}

/// Output format for exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ExportFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Comma-separated values.
    Csv,
    /// JSON array of records.
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// MIME type for HTTP responses.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rectangular table with canonical columns.
///
/// # Example
///
/// ```
/// use profile_data::{PersonRecord, Table};
///
/// let people = vec![PersonRecord {
///     first_name: Some("Noa".to_owned()),
///     email: Some("noa.levi@gmail.com".to_owned()),
///     ..PersonRecord::default()
/// }];
/// let table = Table::from_records(&people);
///
/// assert_eq!(table.headers(), vec!["First Name", "Email"]);
/// assert_eq!(table.column_widths(), vec![12, 20]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table from records.
    ///
    /// Columns are the canonical columns carried by at least one record,
    /// in canonical order. Cells missing from a record are
    /// [`Cell::Empty`]. When no record carries any column the table is
    /// empty: no columns and no rows.
    #[must_use]
    pub fn from_records<R: TabularRecord>(records: &[R]) -> Self {
        let columns: Vec<Column> = Column::CANONICAL
            .into_iter()
            .filter(|&column| records.iter().any(|record| record.cell(column).is_some()))
            .collect();
        if columns.is_empty() {
            return Self {
                columns,
                rows: Vec::new(),
            };
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|&column| record.cell(column).unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Columns in output order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Human-readable headers in output order.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.header()).collect()
    }

    /// Data rows, each aligned with [`Table::columns`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Display width per column: the longest value or header, plus a margin.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let longest_value = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.text().chars().count())
                    .max()
                    .unwrap_or(0);
                longest_value.max(column.header().chars().count()) + COLUMN_MARGIN
            })
            .collect()
    }

    /// Renders the table as an xlsx workbook.
    ///
    /// The single sheet is named [`SHEET_NAME`], with a bold header row and
    /// columns sized by [`Table::column_widths`].
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Workbook`] if the writer rejects the data.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, ExportError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (index, (column, width)) in self.columns.iter().zip(self.column_widths()).enumerate() {
            let col = column_number(index)?;
            worksheet.write_string_with_format(0, col, column.header(), &header_format)?;
            let clamped = u8::try_from(width).unwrap_or(MAX_COLUMN_WIDTH);
            worksheet.set_column_width(col, f64::from(clamped))?;
        }

        for (row_index, row) in self.rows.iter().enumerate() {
            let row_number = u32::try_from(row_index + 1).map_err(|_| ExportError::Workbook {
                message: format!("row {row_index} exceeds the worksheet limit"),
            })?;
            for (index, cell) in row.iter().enumerate() {
                let col = column_number(index)?;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(text) => {
                        worksheet.write_string(row_number, col, text)?;
                    }
                    Cell::Integer(number) => match exact_f64(*number) {
                        Some(value) => {
                            worksheet.write_number(row_number, col, value)?;
                        }
                        None => {
                            worksheet.write_string(row_number, col, number.to_string())?;
                        }
                    },
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    /// Renders the table as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Csv`] if writing fails.
    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if !self.columns.is_empty() {
            writer.write_record(self.headers())?;
            for row in &self.rows {
                writer.write_record(row.iter().map(|cell| cell.text().into_owned()))?;
            }
        }
        writer.into_inner().map_err(|err| ExportError::Csv {
            message: err.to_string(),
        })
    }
}

/// Integers up to this magnitude convert to `f64` without rounding.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Spreadsheet numbers are doubles; integers past 2^53 would silently round,
/// so those are written as text instead.
fn exact_f64(number: i64) -> Option<f64> {
    if number.unsigned_abs() > MAX_EXACT_INTEGER {
        return None;
    }
    #[expect(
        clippy::cast_precision_loss,
        reason = "magnitude is checked against the f64 mantissa first"
    )]
    let value = number as f64;
    Some(value)
}

fn column_number(index: usize) -> Result<u16, ExportError> {
    u16::try_from(index).map_err(|_| ExportError::Workbook {
        message: format!("column {index} exceeds the worksheet limit"),
    })
}

/// Renders records as an xlsx workbook for download.
///
/// # Errors
///
/// Returns [`ExportError::EmptyRecordSet`] when `records` is empty, or
/// [`ExportError::Workbook`] if rendering fails.
pub fn export_workbook<R: TabularRecord>(records: &[R]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyRecordSet);
    }
    Table::from_records(records).to_xlsx()
}

/// Builds `<prefix>_<YYYYMMDD_HHMMSS>.<ext>`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use profile_data::{DEFAULT_FILE_PREFIX, ExportFormat, export_file_name};
///
/// let timestamp = NaiveDate::from_ymd_opt(2026, 3, 9)
///     .and_then(|date| date.and_hms_opt(14, 5, 7))
///     .expect("valid timestamp");
///
/// assert_eq!(
///     export_file_name(DEFAULT_FILE_PREFIX, timestamp, ExportFormat::Xlsx),
///     "israeli_profiles_20260309_140507.xlsx"
/// );
/// ```
#[must_use]
pub fn export_file_name(prefix: &str, timestamp: NaiveDateTime, format: ExportFormat) -> String {
    format!(
        "{prefix}_{}.{}",
        timestamp.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::record::Gender;

    fn name_and_email(first: &str, email: &str) -> PersonRecord {
        PersonRecord {
            first_name: Some(first.to_owned()),
            email: Some(email.to_owned()),
            ..PersonRecord::default()
        }
    }

    #[test]
    fn first_name_and_email_yield_two_columns_in_order() {
        let table = Table::from_records(&[
            name_and_email("Noa", "noa.levi@gmail.com"),
            name_and_email("Omer", "omer.katz@walla.co.il"),
        ]);

        assert_eq!(table.columns(), &[Column::FirstName, Column::Email]);
        assert_eq!(table.headers(), vec!["First Name", "Email"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = Table::from_records::<PersonRecord>(&[]);

        assert!(table.columns().is_empty());
        assert_eq!(table.row_count(), 0);
        assert!(table.column_widths().is_empty());
    }

    #[test]
    fn records_without_known_columns_yield_empty_table() {
        let rows = vec![json!({"shoe_size": 42}), json!({"email_valid": true})];
        let table = Table::from_records(&rows);

        assert!(table.columns().is_empty());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn columns_follow_canonical_order_not_record_order() {
        let rows = vec![json!({"city": "Acre", "age": 30, "id": "000000018"})];
        let table = Table::from_records(&rows);

        assert_eq!(table.columns(), &[Column::Id, Column::Age, Column::City]);
        assert_eq!(
            table.rows(),
            &[vec![
                Cell::Text("000000018".to_owned()),
                Cell::Integer(30),
                Cell::Text("Acre".to_owned()),
            ]]
        );
    }

    #[test]
    fn column_present_in_any_record_is_kept_with_blanks() {
        let rows = vec![json!({"first_name": "Noa"}), json!({"city": "Eilat"})];
        let table = Table::from_records(&rows);

        assert_eq!(table.columns(), &[Column::FirstName, Column::City]);
        assert_eq!(
            table.rows(),
            &[
                vec![Cell::Text("Noa".to_owned()), Cell::Empty],
                vec![Cell::Empty, Cell::Text("Eilat".to_owned())],
            ]
        );
    }

    #[test]
    fn validity_flags_are_not_exported() {
        let person = PersonRecord {
            id: Some("000000018".to_owned()),
            id_valid: Some(true),
            email: Some("a.b@gmail.com".to_owned()),
            email_valid: Some(true),
            gender: Some(Gender::Male),
            ..PersonRecord::default()
        };
        let table = Table::from_records(&[person]);

        assert_eq!(table.headers(), vec!["ID", "Email", "Gender"]);
    }

    #[rstest]
    #[case(json!({"city": "Tel Aviv"}), 10)]
    #[case(json!({"city": "Beit Shemesh"}), 14)]
    #[case(json!({"age": 7}), 5)]
    #[case(json!({"id": null}), 4)]
    fn widths_cover_longest_value_or_header(#[case] row: Value, #[case] expected: usize) {
        let table = Table::from_records(&[row]);
        assert_eq!(table.column_widths(), vec![expected]);
    }

    #[test]
    fn non_integer_numbers_are_kept_as_text() {
        let table = Table::from_records(&[json!({"age": 30.5})]);
        assert_eq!(table.rows(), &[vec![Cell::Text("30.5".to_owned())]]);
    }

    #[test]
    fn non_object_rows_carry_no_cells() {
        let table = Table::from_records(&[json!("Noa"), json!({"first_name": "Noa"})]);
        assert_eq!(
            table.rows(),
            &[vec![Cell::Empty], vec![Cell::Text("Noa".to_owned())]]
        );
    }

    #[test]
    fn csv_has_headers_and_rows() {
        let table = Table::from_records(&[name_and_email("Noa", "noa.levi@gmail.com")]);
        let bytes = table.to_csv().expect("csv renders");

        assert_eq!(
            String::from_utf8(bytes).expect("utf8"),
            "First Name,Email\nNoa,noa.levi@gmail.com\n"
        );
    }

    #[test]
    fn empty_table_renders_empty_csv() {
        let bytes = Table::from_records::<PersonRecord>(&[])
            .to_csv()
            .expect("csv renders");
        assert!(bytes.is_empty());
    }

    #[rstest]
    #[case(30, Some(30.0))]
    #[case(-7, Some(-7.0))]
    #[case(5_000_000_000, Some(5_000_000_000.0))]
    #[case(9_007_199_254_740_992, Some(9_007_199_254_740_992.0))]
    #[case(-9_007_199_254_740_992, Some(-9_007_199_254_740_992.0))]
    #[case(9_007_199_254_740_993, None)]
    #[case(i64::MIN, None)]
    fn integers_are_numbers_while_exact(#[case] number: i64, #[case] expected: Option<f64>) {
        assert_eq!(exact_f64(number), expected);
    }

    #[test]
    fn large_integers_render_in_a_workbook() {
        let table = Table::from_records(&[json!({"age": 5_000_000_000_i64})]);
        assert_eq!(table.rows(), &[vec![Cell::Integer(5_000_000_000)]]);
        let bytes = table.to_xlsx().expect("xlsx renders");
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn xlsx_is_a_zip_container() {
        let table = Table::from_records(&[name_and_email("Noa", "noa.levi@gmail.com")]);
        let bytes = table.to_xlsx().expect("xlsx renders");

        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn empty_table_still_renders_a_workbook() {
        let bytes = Table::from_records::<PersonRecord>(&[])
            .to_xlsx()
            .expect("xlsx renders");
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn export_workbook_rejects_empty_input() {
        let result = export_workbook::<PersonRecord>(&[]);
        assert_eq!(result, Err(ExportError::EmptyRecordSet));
    }

    #[rstest]
    #[case(ExportFormat::Xlsx, "report_20260101_000000.xlsx")]
    #[case(ExportFormat::Csv, "report_20260101_000000.csv")]
    #[case(ExportFormat::Json, "report_20260101_000000.json")]
    fn file_name_uses_format_extension(#[case] format: ExportFormat, #[case] expected: &str) {
        let timestamp = chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid timestamp");
        assert_eq!(export_file_name("report", timestamp, format), expected);
    }
}
