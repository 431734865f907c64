//! Person record generation.
//!
//! Every draw comes from the fixed tables in [`crate::tables`]. Callers
//! supply the RNG, so the HTTP backend can use the thread-local generator
//! while the exporter and tests use a seeded one.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::email::{compose_address, is_valid_email};
use crate::error::GenerationError;
use crate::identity_number::{generate_identity_number, is_valid_identity_number};
use crate::record::{Gender, PersonRecord};
use crate::selection::FieldSelection;
use crate::tables::{CITIES, EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES};

/// Maximum number of attempts to compose a valid email address.
pub const MAX_EMAIL_ATTEMPTS: usize = 100;

/// Largest batch collaborators should request in one call.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Youngest generated age.
const MIN_AGE: u8 = 18;

/// Oldest generated age.
const MAX_AGE: u8 = 90;

/// Upper bound of the numeric suffix appended on email retries.
const MAX_EMAIL_SUFFIX: u32 = 100;

/// Raw values drawn for one person before the selection is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Draws {
    first_name: &'static str,
    last_name: &'static str,
    email: String,
    id: String,
    gender: Gender,
    age: u8,
    city: &'static str,
}

/// Clamps a caller-supplied count into `1..=MAX_BATCH_SIZE`.
///
/// # Examples
///
/// ```
/// use profile_data::{MAX_BATCH_SIZE, clamp_count};
///
/// assert_eq!(clamp_count(-5), 1);
/// assert_eq!(clamp_count(25), 25);
/// assert_eq!(clamp_count(1_000_000), MAX_BATCH_SIZE);
/// ```
#[must_use]
pub fn clamp_count(requested: i64) -> usize {
    if requested < 1 {
        return 1;
    }
    usize::try_from(requested).map_or(MAX_BATCH_SIZE, |count| count.min(MAX_BATCH_SIZE))
}

/// Generates one person with the groups requested by `selection`.
///
/// # Errors
///
/// Returns [`GenerationError::RetryExhausted`] if no valid email address is
/// composed within [`MAX_EMAIL_ATTEMPTS`]. With the built-in domain table the
/// first candidate is always valid.
///
/// # Example
///
/// ```
/// use profile_data::{FieldSelection, generate_person, is_valid_email};
///
/// let person = generate_person(&mut rand::rng(), FieldSelection::API_DEFAULT)
///     .expect("generated");
///
/// assert!(person.email.as_deref().is_some_and(is_valid_email));
/// assert!(person.age.is_none());
/// ```
pub fn generate_person<R: Rng + ?Sized>(
    rng: &mut R,
    selection: FieldSelection,
) -> Result<PersonRecord, GenerationError> {
    let draws = draw(rng, EMAIL_DOMAINS)?;
    Ok(assemble(draws, selection))
}

/// Generates `count` independent people.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidCount`] when `count` is zero, or the
/// first [`GenerationError::RetryExhausted`] encountered.
pub fn generate_people<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    selection: FieldSelection,
) -> Result<Vec<PersonRecord>, GenerationError> {
    if count == 0 {
        return Err(GenerationError::InvalidCount { count });
    }
    (0..count)
        .map(|_| generate_person(rng, selection))
        .collect()
}

/// Generates `count` people from a seeded RNG.
///
/// The same seed, count, and selection always produce the same records.
///
/// # Errors
///
/// See [`generate_people`].
///
/// # Example
///
/// ```
/// use profile_data::{FieldSelection, generate_people_seeded};
///
/// let first = generate_people_seeded(42, 5, FieldSelection::FORM_DEFAULT).expect("generated");
/// let second = generate_people_seeded(42, 5, FieldSelection::FORM_DEFAULT).expect("generated");
///
/// assert_eq!(first, second);
/// ```
pub fn generate_people_seeded(
    seed: u64,
    count: usize,
    selection: FieldSelection,
) -> Result<Vec<PersonRecord>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_people(&mut rng, count, selection)
}

fn draw<R: Rng + ?Sized>(rng: &mut R, domains: &[&str]) -> Result<Draws, GenerationError> {
    let id = generate_identity_number(rng);
    let first_name = pick(rng, FIRST_NAMES);
    let last_name = pick(rng, LAST_NAMES);
    let email = compose_email(rng, first_name, last_name, domains)?;
    let gender = Gender::ALL.choose(rng).copied().unwrap_or(Gender::Female);
    let age = rng.random_range(MIN_AGE..=MAX_AGE);
    let city = pick(rng, CITIES);

    Ok(Draws {
        first_name,
        last_name,
        email,
        id,
        gender,
        age,
        city,
    })
}

/// Composes `first.last@domain`, retrying with a numeric suffix and a fresh
/// domain until the address validates.
fn compose_email<R: Rng + ?Sized>(
    rng: &mut R,
    first: &str,
    last: &str,
    domains: &[&str],
) -> Result<String, GenerationError> {
    for attempt in 0..MAX_EMAIL_ATTEMPTS {
        let domain = domains.choose(rng).copied().unwrap_or_default();
        let suffix = (attempt > 0).then(|| rng.random_range(1..=MAX_EMAIL_SUFFIX));
        let candidate = compose_address(first, last, suffix, domain);
        if is_valid_email(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::RetryExhausted {
        max_attempts: MAX_EMAIL_ATTEMPTS,
    })
}

fn pick<R: Rng + ?Sized>(rng: &mut R, table: &[&'static str]) -> &'static str {
    table.choose(rng).copied().unwrap_or_default()
}

fn assemble(draws: Draws, selection: FieldSelection) -> PersonRecord {
    let Draws {
        first_name,
        last_name,
        email,
        id,
        gender,
        age,
        city,
    } = draws;

    let full_name = match (selection.first_name, selection.last_name) {
        (true, true) => Some(format!("{first_name} {last_name}")),
        (true, false) => Some(first_name.to_owned()),
        (false, true) => Some(last_name.to_owned()),
        (false, false) => None,
    };
    let email_valid = selection.email.then(|| is_valid_email(&email));
    let id_valid = selection.id.then(|| is_valid_identity_number(&id));

    PersonRecord {
        id: selection.id.then_some(id),
        id_valid,
        first_name: selection.first_name.then(|| first_name.to_owned()),
        last_name: selection.last_name.then(|| last_name.to_owned()),
        full_name,
        email: selection.email.then_some(email),
        email_valid,
        gender: selection.gender.then_some(gender),
        age: selection.age.then_some(age),
        city: selection.city.then(|| city.to_owned()),
    }
}
