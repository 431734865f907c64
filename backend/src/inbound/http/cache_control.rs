//! Shared cache-control policies for HTTP handlers.

/// Generated data and probe results must never be served from a cache.
pub const NO_STORE: &str = "no-store";

/// Build the standard cache-control header tuple for uncacheable responses.
#[must_use]
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
