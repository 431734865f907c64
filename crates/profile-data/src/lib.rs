//! Synthetic Israeli personal-record generation and export.
//!
//! This crate holds everything with real invariants behind the profile
//! generator service. It is independent of any transport so the HTTP backend
//! and the offline exporter share one implementation.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Generating and validating 9-digit identity numbers with a check digit
//! - Validating email addresses against a conservative pattern and domain
//!   allow-lists
//! - Generating person records from fixed name, city, and domain tables,
//!   controlled by a typed [`FieldSelection`]
//! - Converting records into a table with canonical columns and rendering it
//!   as an xlsx workbook or CSV
//!
//! # Example
//!
//! ```
//! use profile_data::{FieldSelection, Table, generate_people_seeded, is_valid_identity_number};
//!
//! let people = generate_people_seeded(7, 3, FieldSelection::FORM_DEFAULT).expect("generated");
//! assert_eq!(people.len(), 3);
//! assert!(people
//!     .iter()
//!     .all(|person| person.id.as_deref().is_some_and(is_valid_identity_number)));
//!
//! let table = Table::from_records(&people);
//! assert_eq!(table.row_count(), 3);
//! ```

mod atomic_io;
mod email;
mod error;
mod export;
pub mod export_cli;
mod generator;
mod identity_number;
mod record;
mod selection;
pub mod tables;

pub use atomic_io::write_export;
pub use email::is_valid_email;
pub use error::{ErrorKind, ExportError, GenerationError};
pub use export::{
    Cell, Column, DEFAULT_FILE_PREFIX, ExportFormat, SHEET_NAME, Table, TabularRecord,
    export_file_name, export_workbook,
};
pub use generator::{
    MAX_BATCH_SIZE, MAX_EMAIL_ATTEMPTS, clamp_count, generate_people, generate_people_seeded,
    generate_person,
};
pub use identity_number::{
    IDENTITY_NUMBER_LEN, check_digit, generate_identity_number, is_valid_identity_number,
};
pub use record::{Gender, PersonRecord};
pub use selection::{FieldGroup, FieldSelection};
