//! Liveness and readiness probes.
//!
//! Readiness tracks whether the generator has proven it can produce valid
//! profiles; liveness only fails once the server starts draining. Both
//! probes answer with `{"status": "<phase>"}` and are never cached.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::cache_control::no_store_header;
use crate::domain::{Error, ProfileService};

/// Lifecycle phase reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ServicePhase {
    /// Bound but the generator self-check has not run.
    Starting = 0,
    /// The self-check passed; traffic is welcome.
    Ready = 1,
    /// The self-check failed; the process stays up for inspection.
    Degraded = 2,
    /// Shutting down; no new traffic.
    Draining = 3,
}

impl ServicePhase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Ready,
            2 => Self::Degraded,
            3 => Self::Draining,
            _ => Self::Starting,
        }
    }
}

/// Probe response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProbeReport {
    /// Current lifecycle phase.
    pub status: ServicePhase,
}

/// Shared lifecycle phase behind both probes.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(ServicePhase::Starting as u8),
        }
    }
}

impl HealthState {
    /// Start in [`ServicePhase::Starting`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ServicePhase {
        ServicePhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Run the generator self-check and move to `Ready` or `Degraded`.
    ///
    /// A server already draining stays draining.
    pub fn run_self_check(&self, service: &ProfileService) -> ServicePhase {
        let outcome = service.self_check();
        match &outcome {
            Ok(()) => info!(max_batch = service.max_batch(), "profile generator ready"),
            Err(err) => warn!(error = %err, "profile generator failed its self-check"),
        }
        self.record_self_check(&outcome)
    }

    /// Record a self-check outcome produced elsewhere.
    pub fn record_self_check(&self, outcome: &Result<(), Error>) -> ServicePhase {
        self.advance(if outcome.is_ok() {
            ServicePhase::Ready
        } else {
            ServicePhase::Degraded
        })
    }

    /// Stop accepting traffic; both probes fail from now on.
    pub fn begin_draining(&self) {
        self.phase
            .store(ServicePhase::Draining as u8, Ordering::Release);
    }

    fn advance(&self, next: ServicePhase) -> ServicePhase {
        let result = self
            .phase
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                (ServicePhase::from_u8(raw) != ServicePhase::Draining).then_some(next as u8)
            });
        match result {
            Ok(_) => next,
            Err(_) => ServicePhase::Draining,
        }
    }

    fn report(&self, healthy: impl Fn(ServicePhase) -> bool) -> HttpResponse {
        let status = self.phase();
        let mut response = if healthy(status) {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header(no_store_header())
            .json(ProbeReport { status })
    }
}

/// Readiness probe: 200 only after the generator self-check passed.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Generator verified; ready for traffic", body = ProbeReport),
        (status = 503, description = "Starting, degraded, or draining", body = ProbeReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.report(|phase| phase == ServicePhase::Ready)
}

/// Liveness probe: 200 until the server starts draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is running", body = ProbeReport),
        (status = 503, description = "Server is draining", body = ProbeReport)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.report(|phase| phase != ServicePhase::Draining)
}
