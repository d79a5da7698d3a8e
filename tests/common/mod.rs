#![allow(dead_code)]

use axum::extract::ConnectInfo;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use snaplink::infrastructure::cache::MemoryCache;
use snaplink::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};
use snaplink::state::AppState;

pub const TEST_BASE_URL: &str = "https://s.example.com";

pub async fn create_test_link(pool: &PgPool, slug: &str, url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO links (slug, url) VALUES ($1, $2) RETURNING id")
        .bind(slug)
        .bind(url)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn click_count(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("SELECT click_count FROM links WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn visit_rows(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM visits v JOIN links l ON l.id = v.link_id WHERE l.slug = $1",
    )
    .bind(slug)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn link_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Builds handler state over the test pool with an inspectable in-memory cache.
pub fn create_test_state(pool: PgPool) -> (AppState, MemoryCache) {
    let pool = Arc::new(pool);
    let links = Arc::new(PgLinkRepository::new(pool.clone()));
    let visits = Arc::new(PgVisitRepository::new(pool));
    let cache = MemoryCache::new();

    let state = AppState::new(
        links,
        visits,
        Arc::new(cache.clone()),
        TEST_BASE_URL.to_string(),
    );

    (state, cache)
}

/// Inserts a fixed peer address so handlers extracting `ConnectInfo` run
/// without a real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
