//! Application state shared across HTTP handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::services::{
    AnalyticsService, Provisioner, Resolver, SlugGenerator, VisitRecorder,
};
use crate::domain::deadline::Deadline;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

/// Per-request budget used when no other value is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Shared application state injected into all handlers.
///
/// Cloned cheaply via `Arc` for each request.
#[derive(Clone)]
pub struct AppState {
    pub provisioner: Arc<Provisioner<PgLinkRepository>>,
    pub resolver: Arc<Resolver<PgLinkRepository, PgVisitRepository>>,
    pub analytics: Arc<AnalyticsService<PgLinkRepository, PgVisitRepository>>,
    pub links: Arc<PgLinkRepository>,
    pub cache: Arc<dyn CacheService>,
    /// Public origin prepended to slugs in shorten responses.
    pub base_url: String,
    pub request_timeout: Duration,
    /// Read client IPs from `X-Forwarded-For` / `X-Real-IP`.
    pub behind_proxy: bool,
    /// Cancelled on shutdown; in-flight request deadlines observe it.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Wires the services over the given repositories and cache.
    pub fn new(
        links: Arc<PgLinkRepository>,
        visits: Arc<PgVisitRepository>,
        cache: Arc<dyn CacheService>,
        base_url: String,
    ) -> Self {
        let recorder = Arc::new(VisitRecorder::new(visits.clone()));
        let generator = SlugGenerator::new(links.clone());

        Self {
            provisioner: Arc::new(Provisioner::with_generator(
                links.clone(),
                generator,
                cache.clone(),
            )),
            resolver: Arc::new(Resolver::new(links.clone(), cache.clone(), recorder)),
            analytics: Arc::new(AnalyticsService::new(links.clone(), visits)),
            links,
            cache,
            base_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            behind_proxy: false,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Deadline for one request: the configured timeout plus shutdown cancellation.
    pub fn request_deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout).with_cancellation(self.shutdown.child_token())
    }
}
