//! Email address validation.
//!
//! Validation is two-staged: a conservative syntax pattern first, then a
//! domain check that favours Israeli and common global providers.
//!
//! # Validation Rules
//!
//! - Local part of letters, digits, and `._%+-`, then `@`
//! - Domain of letters, digits, `.` and `-`, ending in a TLD of two or more
//!   letters
//! - Domains ending in `.co.il`, `.net.il`, or `.org.il` are accepted
//! - Domains in the generator or global allow-lists are accepted
//! - Any other domain is accepted only when its TLD is in
//!   [`ACCEPTED_TLDS`](crate::tables::ACCEPTED_TLDS)

use std::sync::LazyLock;

use regex::Regex;

use crate::tables::{ACCEPTED_TLDS, EMAIL_DOMAINS, GLOBAL_EMAIL_DOMAINS, ISRAELI_DOMAIN_SUFFIXES};

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal; failure to compile is a programming error"
)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

/// Validates an email address.
///
/// Total over all inputs: malformed strings return `false`.
///
/// # Examples
///
/// ```
/// use profile_data::is_valid_email;
///
/// assert!(is_valid_email("noa.levi@walla.co.il"));
/// assert!(is_valid_email("someone@example.io"));
/// assert!(!is_valid_email("someone@example.xyz"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if !EMAIL_PATTERN.is_match(email) {
        return false;
    }
    let Some((_, domain)) = email.split_once('@') else {
        return false;
    };
    is_accepted_domain(domain)
}

fn is_accepted_domain(domain: &str) -> bool {
    if ISRAELI_DOMAIN_SUFFIXES
        .iter()
        .any(|suffix| domain.ends_with(suffix))
    {
        return true;
    }
    if EMAIL_DOMAINS
        .iter()
        .chain(GLOBAL_EMAIL_DOMAINS)
        .any(|known| *known == domain)
    {
        return true;
    }
    domain
        .rsplit('.')
        .next()
        .is_some_and(|tld| ACCEPTED_TLDS.contains(&tld))
}

/// Builds the local part `first.last` in lowercase, with an optional numeric
/// suffix.
pub(crate) fn compose_address(first: &str, last: &str, suffix: Option<u32>, domain: &str) -> String {
    let first_lower = first.to_lowercase();
    let last_lower = last.to_lowercase();
    match suffix {
        Some(number) => format!("{first_lower}.{last_lower}{number}@{domain}"),
        None => format!("{first_lower}.{last_lower}@{domain}"),
    }
}
