//! Local dev server: built assets plus a pass-through proxy to the admin backend

use crate::config::DevServerConfig;
use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::any,
};
use serde_json::json;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, debug, info, warn};

/// Headers that describe a single hop and are never forwarded
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, thiserror::Error)]
pub enum DevServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to build proxy client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Failure talking to the backend; answered with 502 and a JSON `error` field
#[derive(Debug, thiserror::Error)]
enum ProxyError {
    #[error("backend unreachable: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("invalid upstream response: {0}")]
    Response(#[from] axum::http::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Clone)]
struct ProxyState {
    client: reqwest::Client,
    target: Arc<str>,
}

/// Build the dev server router
///
/// Everything under `proxy_prefix` goes to `proxy_target` unchanged; any other path is
/// served from `static_dir`, falling back to `index.html`.
pub fn router(config: &DevServerConfig) -> Result<Router, DevServerError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let state = ProxyState {
        client,
        target: config.proxy_target.trim_end_matches('/').into(),
    };

    if !config.static_dir.is_dir() {
        warn!(
            "Static directory '{}' does not exist, only the proxy will answer",
            config.static_dir.display()
        );
    }
    let index = config.static_dir.join("index.html");
    let assets = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));

    let prefix = config.proxy_prefix.trim_end_matches('/');
    Ok(Router::new()
        .route(prefix, any(proxy))
        .route(&format!("{prefix}/{{*path}}"), any(proxy))
        // Bodies pass through unbounded, like the bundler's proxy
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http()))
}

/// Bind the configured address
pub async fn bind(config: &DevServerConfig) -> Result<TcpListener, DevServerError> {
    TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| DevServerError::Bind {
            addr: config.bind_addr,
            source,
        })
}

/// Serve until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DevServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Dev server listening on http://{addr}");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(DevServerError::Serve)
}

async fn proxy(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let path_and_query = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    let url = format!("{}{path_and_query}", state.target);

    let mut request = state.client.request(method.clone(), &url);
    for (name, value) in &headers {
        // Host is dropped so the backend sees its own origin
        let recomputed = name == header::HOST || name == header::CONTENT_LENGTH;
        if recomputed || is_hop_by_hop(name.as_str()) {
            continue;
        }
        request = request.header(name, value);
    }

    let span = tracing::debug_span!("proxy", %method, url = %url);
    let response = request.body(body).send().instrument(span).await?;
    let status = response.status();
    debug!(%method, %url, %status, "Proxied");

    let mut builder = Response::builder().status(status);
    for (name, value) in response.headers() {
        if !is_hop_by_hop(name.as_str()) && name != header::CONTENT_LENGTH {
            builder = builder.header(name, value);
        }
    }
    let body = response.bytes().await?;
    Ok(builder.body(Body::from(body))?)
}

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_by_hop() {
        assert!(is_hop_by_hop("connection"));
        assert!(is_hop_by_hop("transfer-encoding"));
        assert!(!is_hop_by_hop("authorization"));
        assert!(!is_hop_by_hop("content-type"));
    }

    #[test]
    fn test_upstream_error_is_bad_gateway() {
        let err = axum::http::Response::builder()
            .status(1000)
            .body(())
            .unwrap_err();
        let response = ProxyError::Response(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
