//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Link`] - A slug mapped to a destination URL
//! - [`Visit`] - One recorded resolution of a slug
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewLink` - For provisioning new links
//! - `VisitMetadata` - Request metadata captured for a new visit

pub mod link;
pub mod visit;

pub use link::{Link, NewLink};
pub use visit::{Visit, VisitMetadata};
