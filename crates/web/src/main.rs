mod assets;
mod handlers;

use std::{
    fs::File,
    io::BufReader,
    net::{IpAddr, SocketAddr},
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use axum::{
    Router,
    extract::{ConnectInfo, FromRef},
    http::{Method, Request, StatusCode, header},
};
use mcbadges_core::config::Config;
use mcbadges_modrinth::Registry;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, MakeSpan, TraceLayer},
};
use tracing::{Level, Span};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::{assets::Assets, handlers::build_router};

#[derive(Clone, FromRef)]
pub struct AppState {
    registry: Registry,
    assets: Arc<Assets>,
}

#[tokio::main]
async fn main() {
    let env_filter = EnvFilter::builder()
        // Default to info level
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config_path = std::env::var("MCBADGES_CONFIG").unwrap_or_else(|_| "config.yml".to_string());
    let config: Config = {
        let file = BufReader::new(File::open(&config_path).expect("Failed to open config file"));
        serde_yaml::from_reader(file).expect("Failed to parse config file")
    };
    let assets = Assets::load(&config).expect("Failed to load assets");
    let registry = Registry::new(&config.registry).expect("Failed to create registry client");
    let state = AppState { registry, assets: Arc::new(assets) };

    let timeout = Duration::from_secs(config.server.request_timeout_secs);
    let router = app(state, timeout).into_make_service_with_connect_info::<SocketAddr>();
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .expect("bind error");
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Web server: Listening on {}", addr);
    }

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error");
    if let Err(e) = result {
        tracing::error!("{e:#}");
    }
    tracing::info!("Shut down gracefully");
}

fn app(state: AppState, timeout: Duration) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan { level: Level::INFO })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::with_status_code(StatusCode::INTERNAL_SERVER_ERROR, timeout))
        .layer(CorsLayer::new().allow_methods([Method::GET]).allow_origin(cors::Any));
    build_router().with_state(state).layer(middleware)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
    }
}

#[derive(Debug, Clone)]
pub struct RequestSpan {
    level: Level,
}

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let cf_connecting_ip = request.headers().get("CF-Connecting-IP");
        let ip = if let Some(v) = cf_connecting_ip {
            str::from_utf8(v.as_bytes()).ok().and_then(|s| IpAddr::from_str(s).ok())
        } else if let Some(ConnectInfo(socket_addr)) =
            request.extensions().get::<ConnectInfo<SocketAddr>>()
        {
            Some(socket_addr.ip())
        } else {
            None
        };
        let ip = ip.unwrap_or(IpAddr::from([0, 0, 0, 0]));
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("[unknown]");
        macro_rules! make_span {
            ($level:expr) => {
                tracing::span!(
                    $level,
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    ip = %ip,
                    user_agent = %user_agent,
                )
            }
        }
        match self.level {
            Level::ERROR => make_span!(Level::ERROR),
            Level::WARN => make_span!(Level::WARN),
            Level::INFO => make_span!(Level::INFO),
            Level::DEBUG => make_span!(Level::DEBUG),
            Level::TRACE => make_span!(Level::TRACE),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::app;
    use crate::handlers::tests::{fetch, state};

    #[tokio::test]
    async fn test_timeout() {
        let app = app(state().await, Duration::from_millis(200));
        let (response, body) = fetch(&app, "/?mod_id=slow").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
        // Requests within the deadline are unaffected
        let (response, _) = fetch(&app, "/ui").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
