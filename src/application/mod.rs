//! Application layer services implementing the slug engine.
//!
//! Services orchestrate repository and cache calls under a caller-supplied
//! [`crate::domain::deadline::Deadline`]. They are generic over the repository
//! traits so unit tests run against `mockall` mocks.
//!
//! # Available Services
//!
//! - [`services::SlugGenerator`] - Random and custom slug selection
//! - [`services::Provisioner`] - Link creation
//! - [`services::Resolver`] - Cache-aside redirect lookups
//! - [`services::VisitRecorder`] - Atomic click accounting
//! - [`services::AnalyticsService`] - Per-link click reports

pub mod services;
