//! HTTP inbound adapter exposing the form page, JSON API, and probes.

pub mod cache_control;
pub mod error;
pub mod export;
pub mod form;
pub mod health;
pub mod profiles;
pub mod schemas;

pub use error::ApiResult;
