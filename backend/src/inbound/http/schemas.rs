//! OpenAPI schema definitions for domain and core types.
//!
//! Neither the domain error nor the core person record derive `ToSchema`.
//! The wrappers here mirror their wire shape so the document stays accurate
//! while framework concerns stay in the inbound layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "No people data provided")]
    message: String,
    /// Correlation identifier matching the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Structured details, e.g. the rejected selection flag.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`profile_data::PersonRecord`].
///
/// Every field is optional; absent groups are omitted from the object.
#[derive(ToSchema)]
#[schema(as = profile_data::PersonRecord)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonSchema {
    /// Nine-digit identity number with a valid check digit.
    #[schema(example = "000000018")]
    id: Option<String>,
    /// Whether `id` passed validation.
    id_valid: Option<bool>,
    #[schema(example = "Noa")]
    first_name: Option<String>,
    #[schema(example = "Levi")]
    last_name: Option<String>,
    #[schema(example = "Noa Levi")]
    full_name: Option<String>,
    #[schema(example = "noa.levi@gmail.com")]
    email: Option<String>,
    /// Whether `email` passed validation.
    email_valid: Option<bool>,
    /// `male` or `female`.
    #[schema(example = "female")]
    gender: Option<String>,
    /// Age in years, 18 to 90.
    #[schema(minimum = 18, maximum = 90)]
    age: Option<u8>,
    #[schema(example = "Haifa")]
    city: Option<String>,
}

/// OpenAPI schema for the `/download-excel` request body.
///
/// The endpoint also accepts a bare array of records or a single record.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DownloadRequestSchema {
    /// Records to tabulate.
    people: Vec<PersonSchema>,
}
