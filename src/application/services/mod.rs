//! Core services: slug generation, resolution, visit accounting, provisioning.

pub mod analytics_service;
pub mod provisioner;
pub mod resolver;
pub mod slug_generator;
pub mod visit_recorder;

pub use analytics_service::{AnalyticsService, LinkAnalytics};
pub use provisioner::{Provisioner, short_url};
pub use resolver::{Resolution, Resolver, VisitAccounting};
pub use slug_generator::SlugGenerator;
pub use visit_recorder::VisitRecorder;
