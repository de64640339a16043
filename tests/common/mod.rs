//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderMap, Method, Uri},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use api_gateway::config::{GatewayConfig, RouteConfig};
use api_gateway::{HttpServer, Shutdown};

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a backend that echoes method, path and identity headers as JSON.
pub async fn start_echo_backend() -> SocketAddr {
    let app = Router::new().fallback(
        |method: Method, uri: Uri, headers: HeaderMap| async move {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned)
            };
            Json(json!({
                "method": method.as_str(),
                "path": uri.path(),
                "user": header("x-user-name"),
                "roles": header("x-user-roles"),
                "authorization": header("authorization"),
            }))
        },
    );
    serve(app).await
}

/// Start an authority that knows a fixed set of tokens and counts calls.
///
/// - `admin-token`: valid, roles ADMIN
/// - `user-token`: valid, roles USER
/// - `expired-token`: `valid = false`
/// - `slow-token`: answers after two seconds
/// - anything else: HTTP 500
pub async fn start_mock_authority(calls: Arc<AtomicUsize>) -> SocketAddr {
    let app = Router::new().route(
        "/api/auth/validate",
        get(move |headers: HeaderMap| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let token = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("Bearer "))
                    .unwrap_or_default()
                    .to_string();

                let body: Value = match token.as_str() {
                    "admin-token" => json!({"valid": true, "username": "root", "roles": ["ADMIN"]}),
                    "user-token" => json!({"valid": true, "username": "alice", "roles": ["USER"]}),
                    "expired-token" => json!({"valid": false, "username": "alice", "roles": []}),
                    "slow-token" => {
                        tokio::time::sleep(Duration::from_secs(2)).await;
                        json!({"valid": true, "username": "slow", "roles": []})
                    }
                    _ => {
                        return Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
                    }
                };
                Ok(Json(body))
            }
        }),
    );
    serve(app).await
}

/// Gateway config routing every service prefix to `backend`.
pub fn gateway_config(authority: SocketAddr, backend: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.authority.base_url = format!("http://{}", authority);
    config.authority.timeout_ms = 500;

    for (name, prefix) in [
        ("auth", "/api/auth"),
        ("items", "/api/items"),
        ("inventory", "/api/inventory"),
        ("cart", "/api/cart"),
        ("notifications", "/api/notifications"),
        ("logs", "/api/logs"),
        ("public", "/public"),
    ] {
        config.routes.push(RouteConfig {
            name: name.into(),
            path_prefix: prefix.into(),
            upstream: backend.to_string(),
        });
    }
    config
}

/// Start the gateway and return its address plus the shutdown handle.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.signal();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
