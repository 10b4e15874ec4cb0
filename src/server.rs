// ABOUTME: HTTP server assembly binding routes, middleware, and shared resources
// ABOUTME: Applies tracing, CORS, cache suppression headers, and a request timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::errors::{AppError, AppResult};
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{AdminRoutes, HealthRoutes, MealPlanRoutes, UserDataRoutes};
use axum::Router;
use http::{header, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Whole-request deadline, generous enough for all four upstreams in sequence
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The meal plan HTTP server
pub struct MealPlanServer {
    resources: Arc<ServerResources>,
}

impl MealPlanServer {
    /// Create a server over already-built resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full route tree with middleware applied
    ///
    /// Responses carry cache suppression headers so clients always observe
    /// profile updates immediately; all caching happens server-side.
    #[must_use]
    pub fn router(&self) -> Router {
        let router = Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(MealPlanRoutes::routes(self.resources.clone()))
            .merge(UserDataRoutes::routes(self.resources.clone()))
            .merge(AdminRoutes::routes(self.resources.clone()));

        #[cfg(feature = "openapi")]
        let router = router.merge(crate::routes::openapi::routes());

        router
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(&self.resources.config))
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store, no-cache, must-revalidate, private"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::PRAGMA,
                HeaderValue::from_static("no-cache"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::EXPIRES,
                HeaderValue::from_static("0"),
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
    }

    /// Bind the configured port and serve until the process is stopped
    ///
    /// # Errors
    ///
    /// Returns an error if binding or serving fails
    pub async fn run(self) -> AppResult<()> {
        let port = self.resources.config.http_port;
        let addr = format!("0.0.0.0:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::config(format!("Failed to bind {addr}: {e}")))?;

        info!("HTTP server listening on http://{addr}");
        axum::serve(listener, self.router())
            .await
            .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))
    }
}
