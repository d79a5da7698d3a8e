//! Repository trait definitions for the durable store.
//!
//! These traits abstract the authoritative store following the Repository
//! pattern. Concrete implementations live in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Slug lookups and link provisioning
//! - [`VisitRepository`] - Atomic visit accounting and visit queries
//!
//! # Testing
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.
//! See integration tests in `tests/repository_*.rs` for the PostgreSQL versions.

pub mod link_repository;
pub mod visit_repository;

pub use link_repository::LinkRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
