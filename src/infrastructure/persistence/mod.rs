//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx. Queries
//! are bound at runtime so the crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link provisioning and slug lookups
//! - [`PgVisitRepository`] - Atomic visit accounting and visit queries

pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
