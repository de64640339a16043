//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler
//! - Wire up middleware (tracing, request ID, gatekeeper)
//! - Bind server to listener
//! - Forward authorized requests to upstream services
//!
//! # Layer Order (outermost first)
//! ```text
//! TraceLayer → SetRequestId → PropagateRequestId → Gatekeeper → proxy_handler
//! ```
//! Nothing that reads identity headers runs before the gatekeeper.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{
        header::HOST,
        uri::{PathAndQuery, Scheme},
        Request, StatusCode, Uri, Version,
    },
    middleware,
    response::Response,
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::authority::{AuthorityClient, AuthorityInitError, TokenValidator};
use crate::config::GatewayConfig;
use crate::gatekeeper::{gatekeeper_middleware, Gatekeeper, RoutePolicy};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::json_error;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::routing::Router as UpstreamRouter;

/// Application state injected into the proxy handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<UpstreamRouter>,
    pub client: Client<HttpConnector, Body>,
    pub request_timeout: Duration,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that validates tokens with the configured authority.
    pub fn new(config: GatewayConfig) -> Result<Self, AuthorityInitError> {
        let authority = AuthorityClient::new(&config.authority)?;
        Ok(Self::with_validator(config, authority))
    }

    /// Create a server with a custom token validator.
    pub fn with_validator<V: TokenValidator>(config: GatewayConfig, validator: V) -> Self {
        let router = build_router(&config, validator);
        Self { router, config }
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router<V: TokenValidator>(config: &GatewayConfig, validator: V) -> Router {
    let gatekeeper = Gatekeeper::new(RoutePolicy::from_config(&config.policy), validator);

    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

    let state = AppState {
        routes: Arc::new(UpstreamRouter::from_config(&config.routes)),
        client,
        request_timeout: Duration::from_secs(config.timeouts.request_secs),
    };

    Router::new()
        .route("/{*path}", any(proxy_handler))
        .route("/", any(proxy_handler))
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            gatekeeper,
            gatekeeper_middleware::<V>,
        ))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
        .layer(TraceLayer::new_for_http())
}

/// Main proxy handler.
/// Looks up the upstream route and forwards the request.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_owned();
    let path = request.uri().path().to_owned();

    let Some(route) = state.routes.match_path(&path) else {
        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
        return json_error(StatusCode::NOT_FOUND, "No matching route");
    };

    let (mut parts, body) = request.into_parts();

    // URI rewrite
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(route.upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, route = %route.name, error = %e, "Failed to build upstream URI");
            return json_error(StatusCode::BAD_GATEWAY, "Upstream request failed");
        }
    };
    parts.version = Version::HTTP_11;
    parts.headers.remove(HOST);

    tracing::debug!(
        request_id = %request_id,
        route = %route.name,
        upstream = %route.upstream,
        uri = %parts.uri,
        "Forwarding request"
    );

    let upstream_request = Request::from_parts(parts, body);
    match tokio::time::timeout(state.request_timeout, state.client.request(upstream_request)).await {
        Ok(Ok(response)) => {
            metrics::record_upstream(&route.name, response.status().as_u16(), start_time);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Ok(Err(e)) => {
            tracing::error!(request_id = %request_id, route = %route.name, error = %e, "Upstream error");
            metrics::record_upstream(&route.name, 502, start_time);
            json_error(StatusCode::BAD_GATEWAY, "Upstream request failed")
        }
        Err(_) => {
            tracing::error!(request_id = %request_id, route = %route.name, "Upstream timeout");
            metrics::record_upstream(&route.name, 504, start_time);
            json_error(StatusCode::GATEWAY_TIMEOUT, "Upstream request timed out")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{UserInfo, ValidationFailed};
    use crate::config::RouteConfig;
    use tower::ServiceExt;

    struct StaticAuthority;

    impl TokenValidator for StaticAuthority {
        async fn validate(&self, token: &str) -> Result<Option<UserInfo>, ValidationFailed> {
            match token {
                "ok" => Ok(Some(UserInfo {
                    valid: true,
                    username: "alice".into(),
                    roles: ["USER".to_string()].into_iter().collect(),
                })),
                _ => Err(ValidationFailed::new("down")),
            }
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_denial_short_circuits_with_request_id() {
        let app = build_router(&GatewayConfig::default(), StaticAuthority);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/cart")
                    .header("x-request-id", "req-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()["x-request-id"], "req-1");
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "No token provided", "status": 401})
        );
    }

    #[tokio::test]
    async fn test_authorized_without_route_is_not_found() {
        let app = build_router(&GatewayConfig::default(), StaticAuthority);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/cart")
                    .header("authorization", "Bearer ok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = GatewayConfig::default();
        config.routes.push(RouteConfig {
            name: "public".into(),
            path_prefix: "/public".into(),
            upstream: addr.to_string(),
        });
        let app = build_router(&config, StaticAuthority);

        let response = app
            .oneshot(Request::builder().uri("/public/x").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
