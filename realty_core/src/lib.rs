//! Core library for the realty site backend: lead-capture forms, blog
//! content and SEO routes.

pub mod config;
pub mod content;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod leads;
pub mod middleware;
pub mod models;
pub mod seo;
pub mod validation;

pub use config::AppConfig;
pub use content::{BlogService, ContentSource, HttpContentClient};
pub use error::{AppError, Result};
pub use handlers::routes::create_routes;
pub use leads::{FormRegistry, FormSession, HttpLeadClient, LeadSubmitter, SubmissionResult};
pub use middleware::cors::cors_layer_from_config;

use axum::Router;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub config: Arc<AppConfig>,
    pub submitter: Arc<dyn LeadSubmitter>,
    pub forms: FormRegistry,
    pub blog: BlogService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        submitter: Arc<dyn LeadSubmitter>,
        content: Arc<dyn ContentSource>,
    ) -> Self {
        let forms = FormRegistry::new(&config.forms);
        Self {
            app_name: config.site.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: Arc::new(config),
            submitter,
            forms,
            blog: BlogService::new(content),
        }
    }

    /// Wires the HTTP clients for the lead and content APIs from `config`.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let submitter = HttpLeadClient::new(config.leads.clone())?;
        let content = HttpContentClient::new(&config.content)?;
        Ok(Self::new(config, Arc::new(submitter), Arc::new(content)))
    }

    pub fn spawn_background_tasks(&self) -> tokio::task::JoinHandle<()> {
        let interval = Duration::from_secs(self.config.forms.sweep_interval_seconds);
        info!("Sweeping idle form sessions every {}s", interval.as_secs());
        self.forms.spawn_sweeper(interval)
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .merge(create_routes())
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
