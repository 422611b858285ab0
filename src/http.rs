//! HTTP transport module for the coursecraft content analyzer
//!
//! Axum-based HTTP server exposing the analyzer at `/api/analyze`, plus plain
//! JSON health, catalog, and metrics endpoints. CORS, body limits, timeouts,
//! and per-client rate limiting are configured from an explicit [`HttpConfig`].

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{ConnectInfo, DefaultBodyLimit, State},
    http::{HeaderValue, Method, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;
use std::{
    any::Any,
    cmp::Ordering,
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};
use tokio::sync::Mutex;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    analysis::{self, FrameworkCatalog},
    config::{Config, HttpConfig},
    error::AnalysisFailure,
    serializers::iso_millis,
};

/// Path of the analysis endpoint
pub const ANALYZE_PATH: &str = "/api/analyze";
/// Alias kept for clients configured with the older endpoint name
pub const ANALYSIS_ALIAS_PATH: &str = "/api/analysis";

const LATENCY_WINDOW: usize = 256;

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<HttpConfig>,
    pub metrics: Arc<Mutex<HttpMetrics>>,
}

/// Metrics for HTTP server
#[derive(Debug, Clone)]
pub struct HttpMetrics {
    pub total_requests: u64,
    pub last_request_unix: u64,
    pub errors_total: u64,
    pub latencies: Vec<f64>, // ring buffer for p95
    pub domains_count: HashMap<String, u64>,
}

impl HttpMetrics {
    fn new() -> Self {
        Self {
            total_requests: 0,
            last_request_unix: unix_now(),
            errors_total: 0,
            latencies: Vec::with_capacity(LATENCY_WINDOW),
            domains_count: HashMap::new(),
        }
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn is_analyze_path(path: &str) -> bool {
    path == ANALYZE_PATH || path == ANALYSIS_ALIAS_PATH
}

/// Analysis endpoint.
///
/// POST runs the analyzer, OPTIONS answers pre-flight with an empty 200, and
/// every other method is rejected with 405.
pub async fn analyze_handler(
    method: Method,
    State(state): State<HttpState>,
    body: Bytes,
) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => run_analysis(&state, &body).await,
        _ => (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, HeaderValue::from_static("POST, OPTIONS"))],
            Json(json!({ "error": "Method not allowed" })),
        )
            .into_response(),
    }
}

async fn run_analysis(state: &HttpState, body: &[u8]) -> Response {
    // An empty body is analyzed like `{}`
    let payload = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Rejected analysis request with invalid JSON: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "error": "Invalid JSON body",
                        "message": e.to_string()
                    })),
                )
                    .into_response();
            }
        }
    };

    match analysis::analyze_payload(payload) {
        Ok(result) => {
            let mut m = state.metrics.lock().await;
            *m.domains_count
                .entry(result.analysis.domain.to_string())
                .or_insert(0) += 1;
            drop(m);
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            tracing::error!("Analysis error: {}", e);
            e.into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Detailed health endpoint
pub async fn api_health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "CourseCraft AI Backend is running",
        "timestamp": iso_millis(&chrono::Utc::now()),
        "environment": state.config.environment
    }))
}

/// Framework catalog endpoint
pub async fn frameworks_handler() -> impl IntoResponse {
    Json(FrameworkCatalog::standard())
}

/// Metrics endpoint
pub async fn metrics_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let metrics = state.metrics.lock().await.clone();

    // Compute latency stats
    let (avg_latency_ms, p95_latency_ms) = if metrics.latencies.is_empty() {
        (None, None)
    } else {
        let sum: f64 = metrics.latencies.iter().sum();
        let avg = sum / metrics.latencies.len() as f64;
        let mut sorted = metrics.latencies.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let p95_idx = ((sorted.len() as f64 * 0.95) as usize).min(sorted.len() - 1);
        (Some(avg), sorted.get(p95_idx).copied())
    };

    // Top 5 domains
    let mut domains_vec: Vec<_> = metrics.domains_count.iter().collect();
    domains_vec.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let domains_top_5: Vec<_> = domains_vec
        .into_iter()
        .take(5)
        .map(|(k, v)| json!({ "domain": k, "count": v }))
        .collect();

    Json(json!({
        "metrics_version": "1",
        "total_requests": metrics.total_requests,
        "last_request_unix": metrics.last_request_unix,
        "errors_total": metrics.errors_total,
        "avg_latency_ms": avg_latency_ms,
        "p95_latency_ms": p95_latency_ms,
        "domains_top_5": domains_top_5
    }))
}

async fn track_metrics(
    State(metrics): State<Arc<Mutex<HttpMetrics>>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !is_analyze_path(req.uri().path()) {
        return next.run(req).await;
    }
    let start = std::time::Instant::now();
    let resp = next.run(req).await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    let mut m = metrics.lock().await;
    m.latencies.push(latency_ms);
    if m.latencies.len() > LATENCY_WINDOW {
        m.latencies.remove(0);
    }
    if !resp.status().is_success() {
        m.errors_total = m.errors_total.saturating_add(1);
    }
    m.total_requests = m.total_requests.saturating_add(1);
    m.last_request_unix = unix_now();
    resp
}

/// Rate limiter key: the peer IP, or a shared bucket when the connection
/// address is unavailable (in-process requests).
fn client_key(req: &Request<Body>) -> IpAddr {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

async fn rate_limit(
    State(limiter): State<Arc<DefaultKeyedRateLimiter<IpAddr>>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Health probes are never throttled
    let path = req.uri().path();
    if path == "/health" || path == "/api/health" {
        return next.run(req).await;
    }
    let client = client_key(&req);
    if limiter.check_key(&client).is_err() {
        tracing::warn!("Rate limit exceeded for {} on {}", client, path);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests" })),
        )
            .into_response();
    }
    next.run(req).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Handler panicked: {}", message);
    AnalysisFailure::new(message).into_response()
}

/// CORS policy: production allows only the configured origins, other
/// environments mirror the request origin.
pub fn cors_layer(config: &HttpConfig) -> anyhow::Result<CorsLayer> {
    let origin = if config.is_production() {
        AllowOrigin::list(config.origin_header_values()?)
    } else {
        AllowOrigin::mirror_request()
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

/// Build the application router with all middleware applied
pub fn build_router(config: &HttpConfig) -> anyhow::Result<Router> {
    let state = HttpState {
        config: Arc::new(config.clone()),
        metrics: Arc::new(Mutex::new(HttpMetrics::new())),
    };

    let app = Router::new()
        .route(ANALYZE_PATH, any(analyze_handler))
        .route(ANALYSIS_ALIAS_PATH, any(analyze_handler))
        .route("/api/health", get(api_health_handler))
        .route("/api/frameworks", get(frameworks_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_metrics,
        ))
        .layer(TimeoutLayer::new(Duration::from_millis(
            config.request_timeout_ms,
        )));

    let app = match NonZeroU32::new(config.rate_limit_per_minute) {
        Some(per_minute) => {
            let limiter = Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute)));
            app.layer(middleware::from_fn_with_state(limiter, rate_limit))
        }
        None => app,
    };

    Ok(app
        .layer(cors_layer(config)?)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the HTTP server
pub async fn start_http_server(config: Arc<Config>) -> anyhow::Result<()> {
    let app = build_router(&config.http)?;

    let listener = tokio::net::TcpListener::bind(config.http.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener: {}", e))?;

    tracing::info!(
        "Starting HTTP server on {} (analysis at {}, environment {})",
        config.http.bind,
        ANALYZE_PATH,
        config.http.environment
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_paths() {
        assert!(is_analyze_path("/api/analyze"));
        assert!(is_analyze_path("/api/analysis"));
        assert!(!is_analyze_path("/api/health"));
    }

    #[test]
    fn test_cors_layer_builds_for_both_environments() {
        let mut config = HttpConfig::default();
        assert!(cors_layer(&config).is_ok());
        config.environment = "production".to_string();
        assert!(cors_layer(&config).is_ok());
    }

    #[test]
    fn test_client_key_uses_peer_ip() {
        let mut req = Request::new(Body::empty());
        assert_eq!(client_key(&req), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 7], 51000))));
        assert_eq!(client_key(&req), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)));
    }

    #[tokio::test]
    async fn test_rate_limit_is_per_client() {
        use tower::ServiceExt;

        let config = HttpConfig {
            rate_limit_per_minute: 1,
            ..HttpConfig::default()
        };
        let app = build_router(&config).unwrap();
        let from = |ip: [u8; 4]| {
            let mut req = Request::post(ANALYZE_PATH).body(Body::from("{}")).unwrap();
            req.extensions_mut()
                .insert(ConnectInfo(SocketAddr::from((ip, 40000))));
            req
        };

        let first = app.clone().oneshot(from([10, 0, 0, 1])).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let again = app.clone().oneshot(from([10, 0, 0, 1])).await.unwrap();
        assert_eq!(again.status(), StatusCode::TOO_MANY_REQUESTS);
        let other = app.oneshot(from([10, 0, 0, 2])).await.unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[test]
    fn test_panic_payload_becomes_failure() {
        let resp = handle_panic(Box::new("classifier exploded"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
