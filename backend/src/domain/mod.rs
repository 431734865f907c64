//! Domain services and primitives.
//!
//! Purpose: wrap the `profile-data` core with the policies the HTTP surface
//! needs (batch limits, download naming) and provide the transport-agnostic
//! error envelope.
//!
//! Public surface:
//! - Error (alias to `error::Error`): client-facing error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - ProfileService (alias to `profiles::ProfileService`): generation and
//!   workbook export with the configured batch limit.
//! - TraceId (alias to `trace_id::TraceId`): request correlation identifier.

pub mod error;
pub mod profiles;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::profiles::{Download, ProfileService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
