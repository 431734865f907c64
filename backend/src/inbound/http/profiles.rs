//! JSON API for generated profiles.
//!
//! ```text
//! GET /api/generate-israeli-person?count=3&includeAge=true
//! ```

use actix_web::{HttpResponse, get, web};
use profile_data::FieldSelection;

use crate::domain::{Error, ProfileService};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::{ErrorSchema, PersonSchema};

const COUNT_PARAM: &str = "count";
const FLAG_PREFIX: &str = "include";
const DEFAULT_API_COUNT: i64 = 1;

/// Count and selection decoded from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileQuery {
    /// Requested count before clamping.
    pub count: i64,
    /// Field groups to include.
    pub selection: FieldSelection,
}

impl ProfileQuery {
    /// Decode raw query pairs.
    ///
    /// `count` falls back to 1 when missing or not an integer. Keys starting
    /// with `include` must name a known group and carry a boolean; anything
    /// else is ignored.
    ///
    /// # Errors
    /// Returns an invalid-request [`Error`] for an unknown or non-boolean
    /// `include*` flag.
    ///
    /// # Examples
    /// ```
    /// use backend::inbound::http::profiles::ProfileQuery;
    /// use profile_data::FieldGroup;
    ///
    /// let pairs = vec![("includeCity".to_owned(), "true".to_owned())];
    /// let query = ProfileQuery::from_pairs(&pairs).expect("valid flags");
    /// assert_eq!(query.count, 1);
    /// assert!(query.selection.includes(FieldGroup::City));
    /// ```
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, Error> {
        let mut query = Self {
            count: DEFAULT_API_COUNT,
            selection: FieldSelection::API_DEFAULT,
        };
        for (key, value) in pairs {
            if key == COUNT_PARAM {
                query.count = value.trim().parse().unwrap_or(DEFAULT_API_COUNT);
            } else if key.starts_with(FLAG_PREFIX) {
                query.selection.set_flag(key, value)?;
            }
        }
        Ok(query)
    }
}

/// Generate Israeli person profiles.
///
/// A single object is returned when the effective count is 1; otherwise an
/// array.
#[utoipa::path(
    get,
    path = "/api/generate-israeli-person",
    params(
        ("count" = Option<i64>, Query, description = "Number of profiles, clamped to the batch limit"),
        ("includeFirstName" = Option<bool>, Query, description = "Defaults to true"),
        ("includeLastName" = Option<bool>, Query, description = "Defaults to true"),
        ("includeEmail" = Option<bool>, Query, description = "Defaults to true"),
        ("includeId" = Option<bool>, Query, description = "Defaults to true"),
        ("includeGender" = Option<bool>, Query, description = "Defaults to true"),
        ("includeAge" = Option<bool>, Query, description = "Defaults to false"),
        ("includeCity" = Option<bool>, Query, description = "Defaults to false")
    ),
    responses(
        (status = 200, description = "One profile, or an array when count > 1", body = [PersonSchema]),
        (status = 400, description = "Malformed selection flag", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "generateIsraeliPerson"
)]
#[get("/api/generate-israeli-person")]
pub async fn generate_person(
    service: web::Data<ProfileService>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let ProfileQuery { count, selection } = ProfileQuery::from_pairs(&query)?;
    let people = service.generate(count, selection)?;
    let body = match people.as_slice() {
        [only] => serde_json::to_value(only),
        _ => serde_json::to_value(&people),
    }
    .map_err(|err| Error::internal(format!("failed to serialise profiles: {err}")))?;

    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(body))
}
