//! Israeli identity-number check digits.
//!
//! An identity number is nine decimal digits. The first eight are weighted
//! alternately by 1 and 2, products above 9 have 9 subtracted, and the ninth
//! digit brings the weighted sum up to a multiple of ten.

use rand::Rng;

/// Number of digits in an identity number, check digit included.
pub const IDENTITY_NUMBER_LEN: usize = 9;

/// Number of digits covered by the checksum.
const PAYLOAD_LEN: usize = IDENTITY_NUMBER_LEN - 1;

/// Computes the check digit for eight payload digits.
///
/// Each element must be a decimal digit in `0..=9`.
///
/// # Examples
///
/// ```
/// use profile_data::check_digit;
///
/// assert_eq!(check_digit([0, 0, 0, 0, 0, 0, 0, 0]), 0);
/// assert_eq!(check_digit([3, 2, 8, 2, 5, 1, 2, 8]), 5);
/// ```
#[must_use]
pub fn check_digit(payload: [u8; PAYLOAD_LEN]) -> u8 {
    let checksum: u32 = payload
        .iter()
        .zip([1_u8, 2].into_iter().cycle())
        .map(|(&digit, weight)| {
            let product = digit * weight;
            if product > 9 {
                u32::from(product - 9)
            } else {
                u32::from(product)
            }
        })
        .sum();
    let remainder = checksum.rem_euclid(10);
    // `remainder` is below ten, so the result is a single digit.
    u8::try_from((10 - remainder).rem_euclid(10)).unwrap_or_default()
}

/// Returns `true` when `candidate` is nine ASCII digits with a correct check
/// digit.
///
/// Never panics; anything else (wrong length, letters, non-ASCII digits)
/// yields `false`.
///
/// # Examples
///
/// ```
/// use profile_data::is_valid_identity_number;
///
/// assert!(is_valid_identity_number("000000018"));
/// assert!(!is_valid_identity_number("000000019"));
/// assert!(!is_valid_identity_number("12345"));
/// assert!(!is_valid_identity_number(""));
/// ```
#[must_use]
pub fn is_valid_identity_number(candidate: &str) -> bool {
    let Some(digits) = parse_digits(candidate) else {
        return false;
    };
    let (head, check) = digits.split_at(PAYLOAD_LEN);
    let Ok(payload) = <[u8; PAYLOAD_LEN]>::try_from(head) else {
        return false;
    };
    check.first() == Some(&check_digit(payload))
}

/// Generates a random identity number that passes
/// [`is_valid_identity_number`].
///
/// The eight payload digits are drawn uniformly; the check digit follows
/// deterministically, so generation cannot fail.
///
/// # Examples
///
/// ```
/// use profile_data::{generate_identity_number, is_valid_identity_number};
///
/// let id = generate_identity_number(&mut rand::rng());
/// assert_eq!(id.len(), 9);
/// assert!(is_valid_identity_number(&id));
/// ```
pub fn generate_identity_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    let payload: [u8; PAYLOAD_LEN] = std::array::from_fn(|_| rng.random_range(0..=9));
    payload
        .iter()
        .chain(std::iter::once(&check_digit(payload)))
        .map(|&digit| char::from(b'0' + digit))
        .collect()
}

fn parse_digits(candidate: &str) -> Option<Vec<u8>> {
    if candidate.len() != IDENTITY_NUMBER_LEN {
        return None;
    }
    candidate
        .bytes()
        .map(|byte| byte.is_ascii_digit().then(|| byte - b'0'))
        .collect()
}
