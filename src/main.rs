//! Order Desk - conversational order intake
//!
//! Walks chat users through product, address and phone prompts, turns the
//! answers into orders and forwards them to a dispatcher.

mod api;
mod catalog;
mod config;
mod orders;
mod runtime;
mod session;
mod state_machine;

use api::{create_router, AppState};
use catalog::Catalog;
use config::OrderDeskConfig;
use runtime::{ConversationEngine, EngineSettings, Outbox};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_desk=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = OrderDeskConfig::from_env();

    let catalog = match &config.price_list_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading price list");
            Catalog::default().with_price_list_file(path)?
        }
        None => Catalog::default(),
    };

    match config.dispatcher {
        Some(dispatcher) => tracing::info!(dispatcher = %dispatcher, "Dispatcher notifications enabled"),
        None => tracing::warn!(
            "No dispatcher configured, order notifications are disabled. Set {}.",
            config::ENV_DISPATCHER_ID
        ),
    }

    // Create the engine with the in-memory outbox as its transport
    let outbox = Arc::new(Outbox::default());
    let engine = Arc::new(ConversationEngine::new(
        EngineSettings {
            flow: config.flow,
            dispatcher: config.dispatcher,
            catalog: Arc::new(catalog),
        },
        Arc::clone(&outbox),
    ));

    if let Some(max_idle) = config.session_idle_timeout {
        tracing::info!(idle_secs = max_idle.as_secs(), "Session eviction enabled");
        engine.sessions().spawn_sweeper(max_idle);
    }

    tracing::info!(
        ask_quantity = engine.settings().flow.ask_quantity,
        "Order flow configured"
    );

    let state = AppState::new(engine, outbox);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Order desk listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
