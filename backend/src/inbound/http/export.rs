//! Spreadsheet download for records produced elsewhere, typically by the
//! JSON API.
//!
//! ```text
//! POST /download-excel {"people":[{"first_name":"Noa","email":"noa@gmail.com"}]}
//! ```

use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, post, web};
use chrono::Local;
use serde_json::Value;
use tracing::info;

use crate::domain::{Download, Error, ProfileService};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::{DownloadRequestSchema, ErrorSchema};

const PEOPLE_KEY: &str = "people";

/// Extract the record list from a download request body.
///
/// Accepts `{"people": [...]}`, a bare array, or a single record object.
///
/// # Errors
/// Returns an invalid-request [`Error`] when the body is empty, not JSON,
/// `null`, `{}`, a scalar, or yields no records.
///
/// # Examples
/// ```
/// use backend::inbound::http::export::records_from_body;
///
/// let records = records_from_body(br#"[{"first_name":"Noa"}]"#).expect("records");
/// assert_eq!(records.len(), 1);
/// ```
pub fn records_from_body(body: &[u8]) -> Result<Vec<Value>, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::invalid_request("No data provided"));
    }
    let payload: Value = serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request(format!("request body is not valid JSON: {err}"))
    })?;

    let records = match payload {
        Value::Null => return Err(Error::invalid_request("No data provided")),
        Value::Object(map) if map.is_empty() => {
            return Err(Error::invalid_request("No data provided"));
        }
        Value::Object(mut map) => match map.remove(PEOPLE_KEY) {
            Some(Value::Array(people)) => people,
            Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(Error::invalid_request("people must be an array").with_details(
                    serde_json::json!({ "field": PEOPLE_KEY, "found": json_type(&other) }),
                ));
            }
            None => vec![Value::Object(map)],
        },
        Value::Array(people) => people,
        scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
            return Err(Error::invalid_request(format!(
                "expected an object or array, got {}",
                json_type(&scalar)
            )));
        }
    };

    if records.is_empty() {
        return Err(Error::invalid_request("No people data provided"));
    }
    Ok(records)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build an attachment response for a rendered file.
pub(crate) fn attachment(download: Download) -> HttpResponse {
    let Download {
        file_name,
        content_type,
        bytes,
    } = download;
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(ContentDisposition::attachment(file_name))
        .insert_header(no_store_header())
        .body(bytes)
}

/// Tabulate posted records into an xlsx attachment.
#[utoipa::path(
    post,
    path = "/download-excel",
    request_body(
        content = DownloadRequestSchema,
        description = "`{\"people\": [...]}`, a bare array of records, or a single record"
    ),
    responses(
        (status = 200, description = "Workbook attachment", body = Vec<u8>, content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "No records supplied", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "downloadExcel"
)]
#[post("/download-excel")]
pub async fn download_excel(
    service: web::Data<ProfileService>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let records = records_from_body(&body)?;
    let download = service.export_workbook(&records, Local::now().naive_local())?;
    info!(rows = records.len(), file = %download.file_name, "serving workbook download");
    Ok(attachment(download))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    #[rstest]
    #[case(br#"{"people":[{"first_name":"Noa"},{"first_name":"Dan"}]}"#.as_slice(), 2)]
    #[case(br#"[{"first_name":"Noa"}]"#.as_slice(), 1)]
    #[case(br#"{"first_name":"Noa","email":"noa@gmail.com"}"#.as_slice(), 1)]
    fn accepted_body_shapes(#[case] body: &[u8], #[case] expected: usize) {
        let records = records_from_body(body).expect("records");
        assert_eq!(records.len(), expected);
    }

    #[rstest]
    #[case(b"".as_slice(), "No data provided")]
    #[case(b"  ".as_slice(), "No data provided")]
    #[case(b"null".as_slice(), "No data provided")]
    #[case(b"{}".as_slice(), "No data provided")]
    #[case(b"[]".as_slice(), "No people data provided")]
    #[case(br#"{"people":[]}"#.as_slice(), "No people data provided")]
    fn empty_bodies_are_rejected(#[case] body: &[u8], #[case] message: &str) {
        let err = records_from_body(body).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    #[case(b"42".as_slice())]
    #[case(b"not json".as_slice())]
    #[case(br#"{"people":"Noa"}"#.as_slice())]
    fn malformed_bodies_are_rejected(#[case] body: &[u8]) {
        let err = records_from_body(body).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    async fn post(body: &'static [u8]) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ProfileService::default()))
                .service(download_excel),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/download-excel")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload(body)
            .to_request();
        actix_test::call_service(&app, req).await
    }

    #[rstest]
    #[actix_web::test]
    async fn download_returns_named_workbook() {
        let res = post(br#"{"people":[{"first_name":"Noa","age":30}]}"#).await;

        assert_eq!(res.status(), StatusCode::OK);
        let header = |name: HeaderName| {
            res.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        assert_eq!(header(CONTENT_TYPE).as_deref(), Some(XLSX_MIME));
        let disposition = header(CONTENT_DISPOSITION).expect("disposition");
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("israeli_profiles_"));
        assert!(disposition.contains(".xlsx"));
        let body = actix_test::read_body(res).await;
        assert!(body.starts_with(b"PK"));
    }

    #[rstest]
    #[actix_web::test]
    async fn download_rejects_empty_people() {
        let res = post(br#"{"people":[]}"#).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("No people data provided")
        );
    }
}
