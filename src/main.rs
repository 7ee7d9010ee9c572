mod api;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, http::HeaderValue};
use dayplanner_model::{KeyValueStore, Notes, Planner, SledStore, TagWeightPrioritizer, TagWeights, TaskStore};
use dayplanner_toolbox::{RateTable, Timer, TimerHandle};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::AppState;
use crate::config::Config;

/// Countdown length before anyone sets one.
const DEFAULT_TIMER_MINUTES: u32 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    info!("Starting dayplanner backend");

    let config = Config::from_env().context("Failed to read configuration")?;
    info!(?config, "Loaded configuration");

    // Open the store and load the task list
    let store: Arc<dyn KeyValueStore> = Arc::new(
        SledStore::open(&config.data_dir)
            .with_context(|| format!("Failed to open store at {}", config.data_dir.display()))?,
    );
    let prioritizer = TagWeightPrioritizer::new(TagWeights::default())
        .with_latency(config.prioritizer_latency);
    let planner = Planner::open(
        TaskStore::new(Arc::clone(&store), config.store_format),
        Arc::new(prioritizer),
    )
    .context("Failed to load tasks")?;

    let state = AppState {
        planner,
        notes: Notes::new(store),
        timer: TimerHandle::new(Timer::countdown(DEFAULT_TIMER_MINUTES)),
        rates: Arc::new(RateTable::default()),
        week_start: config.week_start,
        week_preview: config.week_preview,
    };

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .context("DAYPLANNER_CORS_ORIGIN is not a valid header value")?;
    let app = Router::new()
        .nest("/api", api::router(state))
        .layer(CorsLayer::permissive().allow_origin(origin))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!("Server running on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
