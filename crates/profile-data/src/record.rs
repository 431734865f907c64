//! Generated person record types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender of a generated person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Both variants, in draw order.
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    /// Lowercase label used in JSON and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthetic person.
///
/// Every field is optional; which ones are present depends on the
/// [`FieldSelection`](crate::FieldSelection) used to generate the record.
/// Absent fields are omitted from the JSON form. `full_name` is present
/// whenever either name is.
///
/// # Example
///
/// ```
/// use profile_data::{Gender, PersonRecord};
///
/// let person = PersonRecord {
///     first_name: Some("Noa".to_owned()),
///     gender: Some(Gender::Female),
///     ..PersonRecord::default()
/// };
/// let json = serde_json::to_value(&person).expect("serialises");
///
/// assert_eq!(json, serde_json::json!({"first_name": "Noa", "gender": "female"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Identity number: nine digits with a valid check digit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether `id` passed validation; always `true` for generated records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_valid: Option<bool>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Names joined by a space, or the single requested name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether `email` passed validation; always `true` for generated records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_valid: Option<bool>,
    /// Gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Age in years, 18 to 90 inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    /// City of residence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}
