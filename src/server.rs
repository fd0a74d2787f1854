mod error;
mod handlers;
mod responses;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::domain::ports::PersistenceSink;
use crate::inbound::webhook::{
    DeliveryWorker, EventDispatcher, RecentDeliveries, SignatureVerifier,
};
use crate::infrastructure::file_sink::FileSink;
use crate::infrastructure::handlers::default_dispatcher;
use crate::server::handlers::deliveries::list_deliveries;
use crate::server::handlers::health::health_check;
use crate::server::handlers::webhook::{receive_webhook, webhook_hint};
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::{Router, routing::get};
use color_eyre::eyre::{Context, Result};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Clone)]
/// The global application state shared between all request handlers.
pub(crate) struct AppState {
    verifier: SignatureVerifier,
    deliveries: RecentDeliveries,
    worker: DeliveryWorker,
}

pub struct Server {
    router: Router,
    listener: TcpListener,
    port: u16,
}

impl Server {
    /// Creates a server persisting deliveries under the configured directory
    /// and routing them through the built-in event handlers.
    pub async fn new(config: &Config) -> Result<Self> {
        let sink = Arc::new(FileSink::new(config.webhook.log_dir.clone()));
        Self::with_components(config, default_dispatcher(), sink).await
    }

    /// Creates a server with a custom dispatcher and persistence sink.
    pub async fn with_components(
        config: &Config,
        dispatcher: EventDispatcher,
        sink: Arc<dyn PersistenceSink>,
    ) -> Result<Self> {
        let trace_layer =
            TraceLayer::new_for_http().make_span_with(|request: &'_ axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                tracing::info_span!("request", method = %request.method(), uri)
            });

        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

        let verifier = SignatureVerifier::new(config.webhook.secret.as_bytes());
        if !verifier.is_enabled() {
            tracing::warn!(
                "No webhook secret configured: signature verification is DISABLED. \
                 Every request to /webhook will be accepted. Never expose this instance publicly."
            );
        }

        let state = AppState {
            verifier,
            deliveries: RecentDeliveries::with_capacity(config.webhook.recent_capacity),
            worker: DeliveryWorker::start(sink, Arc::new(dispatcher)),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/webhook", get(webhook_hint).post(receive_webhook))
            .route("/deliveries", get(list_deliveries))
            .layer(DefaultBodyLimit::max(config.webhook.max_body_bytes))
            .layer(cors_layer)
            .layer(trace_layer)
            .with_state(state);

        let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))
            .await
            .wrap_err_with(|| format!("Failed to bind to port {}", config.server.port))?;
        let port = listener
            .local_addr()
            .wrap_err("Failed to read bound address")?
            .port();

        Ok(Self {
            router,
            listener,
            port,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Runs the HTTP server.
    pub async fn run(self) -> Result<()> {
        tracing::info!("Server listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }
}
