//! Profile generation and workbook export behind the HTTP surface.

use chrono::NaiveDateTime;
use profile_data::{
    DEFAULT_FILE_PREFIX, ExportFormat, FieldSelection, MAX_BATCH_SIZE, PersonRecord,
    TabularRecord, clamp_count, export_file_name, export_workbook, generate_people,
    generate_people_seeded, is_valid_email, is_valid_identity_number,
};
use tracing::{debug, info};

use super::Error;

const SELF_CHECK_SEED: u64 = 0x5EED;

/// A rendered file ready to send as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Suggested file name, e.g. `israeli_profiles_20260309_140507.xlsx`.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Generates and exports profiles within a configured batch limit.
///
/// # Examples
/// ```
/// use backend::domain::ProfileService;
/// use profile_data::FieldSelection;
///
/// let service = ProfileService::new(50);
/// let people = service.generate(500, FieldSelection::API_DEFAULT).expect("generated");
/// assert_eq!(people.len(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileService {
    max_batch: usize,
}

impl Default for ProfileService {
    fn default() -> Self {
        Self::new(MAX_BATCH_SIZE)
    }
}

impl ProfileService {
    /// Create a service capped at `max_batch` records per call.
    ///
    /// The cap is itself kept within `1..=MAX_BATCH_SIZE`.
    #[must_use]
    pub fn new(max_batch: usize) -> Self {
        Self {
            max_batch: max_batch.clamp(1, MAX_BATCH_SIZE),
        }
    }

    /// Largest batch a single call will produce.
    #[must_use]
    pub fn max_batch(&self) -> usize {
        self.max_batch
    }

    /// Clamp a requested count into `1..=max_batch`.
    #[must_use]
    pub fn effective_count(&self, requested: i64) -> usize {
        clamp_count(requested).min(self.max_batch)
    }

    /// Generate people for a requested count, clamped to the batch limit.
    ///
    /// # Errors
    /// Returns an internal [`Error`] if email composition exhausts its retries.
    pub fn generate(
        &self,
        requested: i64,
        selection: FieldSelection,
    ) -> Result<Vec<PersonRecord>, Error> {
        let count = self.effective_count(requested);
        let people = generate_people(&mut rand::rng(), count, selection)?;
        info!(requested, count, "generated profiles");
        Ok(people)
    }

    /// Generate one seeded record with every field group and confirm its
    /// identity number and email pass validation.
    ///
    /// # Errors
    /// Returns an internal [`Error`] naming the first field that failed.
    pub fn self_check(&self) -> Result<(), Error> {
        let people = generate_people_seeded(SELF_CHECK_SEED, 1, FieldSelection::all())?;
        let person = people
            .first()
            .ok_or_else(|| Error::internal("self-check produced no record"))?;
        if !person.id.as_deref().is_some_and(is_valid_identity_number) {
            return Err(Error::internal("self-check produced an invalid identity number"));
        }
        if !person.email.as_deref().is_some_and(is_valid_email) {
            return Err(Error::internal("self-check produced an invalid email"));
        }
        debug!(max_batch = self.max_batch, "profile self-check passed");
        Ok(())
    }

    /// Render records as an xlsx attachment named after `timestamp`.
    ///
    /// # Errors
    /// Returns an invalid-request [`Error`] for an empty record slice and an
    /// internal one if the workbook cannot be built.
    pub fn export_workbook<R: TabularRecord>(
        &self,
        records: &[R],
        timestamp: NaiveDateTime,
    ) -> Result<Download, Error> {
        let bytes = export_workbook(records)?;
        let file_name = export_file_name(DEFAULT_FILE_PREFIX, timestamp, ExportFormat::Xlsx);
        debug!(rows = records.len(), size = bytes.len(), %file_name, "rendered workbook");
        Ok(Download {
            file_name,
            content_type: ExportFormat::Xlsx.mime_type(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 5, 7))
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(-3, 1)]
    #[case(0, 1)]
    #[case(7, 7)]
    #[case(25, 20)]
    fn effective_count_respects_batch_limit(#[case] requested: i64, #[case] expected: usize) {
        assert_eq!(ProfileService::new(20).effective_count(requested), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(MAX_BATCH_SIZE + 5, MAX_BATCH_SIZE)]
    fn batch_limit_is_bounded(#[case] configured: usize, #[case] expected: usize) {
        assert_eq!(ProfileService::new(configured).max_batch(), expected);
    }

    #[rstest]
    fn generate_honours_selection() {
        let people = ProfileService::default()
            .generate(3, FieldSelection::API_DEFAULT)
            .expect("generated");

        assert_eq!(people.len(), 3);
        assert!(people.iter().all(|p| p.age.is_none() && p.city.is_none()));
    }

    #[rstest]
    fn self_check_passes_with_bundled_tables() {
        assert!(ProfileService::default().self_check().is_ok());
    }

    #[rstest]
    fn export_names_the_attachment(timestamp: NaiveDateTime) {
        let rows = vec![json!({"first_name": "Noa"})];
        let download = ProfileService::default()
            .export_workbook(&rows, timestamp)
            .expect("exported");

        assert_eq!(download.file_name, "israeli_profiles_20260309_140507.xlsx");
        assert_eq!(
            download.content_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert!(download.bytes.starts_with(b"PK"));
    }

    #[rstest]
    fn export_rejects_empty_input(timestamp: NaiveDateTime) {
        let err = ProfileService::default()
            .export_workbook::<PersonRecord>(&[], timestamp)
            .expect_err("empty input");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
