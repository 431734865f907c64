//! Field selection controlling which groups appear in generated records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// An optional field group of a person record.
///
/// `Email` covers `email` and `email_valid`; `Id` covers `id` and `id_valid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Email address and its validity flag.
    Email,
    /// Identity number and its validity flag.
    Id,
    /// Gender.
    Gender,
    /// Age in years.
    Age,
    /// City of residence.
    City,
}

impl FieldGroup {
    /// All groups in record order.
    pub const ALL: [Self; 7] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Id,
        Self::Gender,
        Self::Age,
        Self::City,
    ];

    /// Snake-case group name, as used in record keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Id => "id",
            Self::Gender => "gender",
            Self::Age => "age",
            Self::City => "city",
        }
    }

    /// Query-string flag name used by the HTTP API, e.g. `includeFirstName`.
    #[must_use]
    pub const fn flag_name(self) -> &'static str {
        match self {
            Self::FirstName => "includeFirstName",
            Self::LastName => "includeLastName",
            Self::Email => "includeEmail",
            Self::Id => "includeId",
            Self::Gender => "includeGender",
            Self::Age => "includeAge",
            Self::City => "includeCity",
        }
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldGroup {
    type Err = GenerationError;

    /// Accepts either the snake-case group name or the API flag name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s || group.flag_name() == s)
            .ok_or_else(|| GenerationError::MalformedSelection {
                field: s.to_owned(),
                message: "unknown field group".to_owned(),
            })
    }
}

/// Which optional field groups a generated record carries.
///
/// There is no `Default` implementation. The form and the API use different
/// defaults, see [`FieldSelection::FORM_DEFAULT`] and
/// [`FieldSelection::API_DEFAULT`].
///
/// # Example
///
/// ```
/// use profile_data::{FieldGroup, FieldSelection};
///
/// let mut selection = FieldSelection::API_DEFAULT;
/// selection.set_flag("includeAge", "true").expect("valid flag");
///
/// assert!(selection.includes(FieldGroup::Age));
/// assert!(!selection.includes(FieldGroup::City));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one independent flag per field group"
)]
pub struct FieldSelection {
    /// Include `first_name`.
    pub first_name: bool,
    /// Include `last_name`.
    pub last_name: bool,
    /// Include `email` and `email_valid`.
    pub email: bool,
    /// Include `id` and `id_valid`.
    pub id: bool,
    /// Include `gender`.
    pub gender: bool,
    /// Include `age`.
    pub age: bool,
    /// Include `city`.
    pub city: bool,
}

impl FieldSelection {
    /// Defaults for the HTML form: every group.
    pub const FORM_DEFAULT: Self = Self::all();

    /// Defaults for the JSON API: every group except `age` and `city`, which
    /// the API only returns on request.
    pub const API_DEFAULT: Self = Self {
        age: false,
        city: false,
        ..Self::all()
    };

    /// Selects every group.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            first_name: true,
            last_name: true,
            email: true,
            id: true,
            gender: true,
            age: true,
            city: true,
        }
    }

    /// Selects no group.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            first_name: false,
            last_name: false,
            email: false,
            id: false,
            gender: false,
            age: false,
            city: false,
        }
    }

    /// Returns whether `group` is selected.
    #[must_use]
    pub const fn includes(&self, group: FieldGroup) -> bool {
        match group {
            FieldGroup::FirstName => self.first_name,
            FieldGroup::LastName => self.last_name,
            FieldGroup::Email => self.email,
            FieldGroup::Id => self.id,
            FieldGroup::Gender => self.gender,
            FieldGroup::Age => self.age,
            FieldGroup::City => self.city,
        }
    }

    /// Returns a copy with `group` switched on or off.
    #[must_use]
    pub const fn with(mut self, group: FieldGroup, enabled: bool) -> Self {
        match group {
            FieldGroup::FirstName => self.first_name = enabled,
            FieldGroup::LastName => self.last_name = enabled,
            FieldGroup::Email => self.email = enabled,
            FieldGroup::Id => self.id = enabled,
            FieldGroup::Gender => self.gender = enabled,
            FieldGroup::Age => self.age = enabled,
            FieldGroup::City => self.city = enabled,
        }
        self
    }

    /// Returns whether either name group is selected, which implies
    /// `full_name`.
    #[must_use]
    pub const fn includes_any_name(&self) -> bool {
        self.first_name || self.last_name
    }

    /// Applies a textual flag such as `includeAge=false`.
    ///
    /// `name` may be the API flag name or the snake-case group name. `value`
    /// must be `true`, `false`, `1`, or `0`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MalformedSelection`] for unknown names or
    /// non-boolean values.
    pub fn set_flag(&mut self, name: &str, value: &str) -> Result<(), GenerationError> {
        let group: FieldGroup = name.parse()?;
        let enabled = parse_bool(value).ok_or_else(|| GenerationError::MalformedSelection {
            field: name.to_owned(),
            message: format!("expected true or false, got '{value}'"),
        })?;
        *self = self.with(group, enabled);
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Some(false)
    } else {
        None
    }
}
