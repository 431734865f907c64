//! Server-rendered form page.
//!
//! `GET /` shows an empty form. `POST /` generates profiles with every field
//! group and either renders them as a table or, when the `download_excel`
//! button was pressed, returns them as a workbook attachment.

use actix_web::{HttpResponse, get, post, web};
use askama::Template;
use chrono::Local;
use profile_data::{FieldSelection, Table};
use serde::Deserialize;

use crate::domain::{Error, ProfileService};
use crate::inbound::http::ApiResult;
use crate::inbound::http::export::attachment;

/// Count shown on first load and used when the submitted count is unusable.
pub const DEFAULT_FORM_COUNT: i64 = 10;

/// Fields posted by the form. Both are optional so bad input degrades to
/// defaults rather than a 400.
#[derive(Debug, Default, Deserialize)]
pub struct FormInput {
    /// Requested count as typed by the user.
    pub count: Option<String>,
    /// Present when the download button submitted the form.
    pub download_excel: Option<String>,
}

impl FormInput {
    /// Requested count, falling back to [`DEFAULT_FORM_COUNT`].
    #[must_use]
    pub fn requested_count(&self) -> i64 {
        self.count
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_FORM_COUNT)
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage {
    count: usize,
    max_batch: usize,
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl IndexPage {
    fn empty(service: &ProfileService) -> Self {
        Self {
            count: service.effective_count(DEFAULT_FORM_COUNT),
            max_batch: service.max_batch(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn with_table(service: &ProfileService, count: usize, table: &Table) -> Self {
        let rows = table
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.text().into_owned()).collect())
            .collect();
        Self {
            count,
            max_batch: service.max_batch(),
            headers: table.headers(),
            rows,
        }
    }

    fn respond(&self) -> ApiResult<HttpResponse> {
        let html = self
            .render()
            .map_err(|err| Error::internal(format!("failed to render form page: {err}")))?;
        Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html))
    }
}

/// Render the empty form.
#[get("/")]
pub async fn index(service: web::Data<ProfileService>) -> ApiResult<HttpResponse> {
    IndexPage::empty(&service).respond()
}

/// Generate profiles from the submitted form.
#[post("/")]
pub async fn submit(
    service: web::Data<ProfileService>,
    form: web::Form<FormInput>,
) -> ApiResult<HttpResponse> {
    let requested = form.requested_count();
    let people = service.generate(requested, FieldSelection::FORM_DEFAULT)?;

    if form.download_excel.is_some() {
        let download = service.export_workbook(&people, Local::now().naive_local())?;
        return Ok(attachment(download));
    }

    let table = Table::from_records(&people);
    IndexPage::with_table(&service, people.len(), &table).respond()
}
