//! Domain layer containing business entities and store contracts.
//!
//! This module is independent of infrastructure concerns. It defines what a
//! link and a visit are, what the durable store must provide, and how callers
//! bound the time a core operation may take.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Durable store trait definitions
//! - [`deadline`] - Caller-supplied timeout and cancellation
//!
//! # Redirect Flow
//!
//! 1. HTTP handler builds [`entities::VisitMetadata`] from the request
//! 2. [`crate::application::services::Resolver`] consults the cache, then the store
//! 3. [`crate::application::services::VisitRecorder`] increments the counter and
//!    appends the visit in one transaction via [`repositories::VisitRepository`]
//! 4. Handler issues the redirect, flagging accounting failures separately

pub mod deadline;
pub mod entities;
pub mod repositories;
