//! API Gateway for the market-data backend

use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use market_data::MarketDataService;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_gateway::api;
use api_gateway::config::AppConfig;
use api_gateway::{app, AppState};

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Bitcoin routes
        api::bitcoin::get_bitcoin,
        api::bitcoin::get_bitcoin_stats,
        api::bitcoin::get_bitcoin_history,
        // Market routes
        api::altcoins::get_altcoins,
        api::trades::get_transactions,
        // Sentiment routes
        api::sentiment::get_sentiment,
    ),
    components(
        schemas(
            common::model::snapshot::MarketSnapshot,
            common::model::market::BitcoinStats,
            common::model::market::AltcoinMarket,
            common::model::history::HistoryPoint,
            common::model::trade::TradeRecord,
            common::model::trade::Side,
            common::model::sentiment::FearGreedIndex,
            api::trades::TradesQuery,
            api_gateway::error::ErrorResponse
        )
    ),
    tags(
        (name = "bitcoin", description = "Bitcoin snapshot and dashboard endpoints"),
        (name = "market", description = "Altcoin listing and trade endpoints"),
        (name = "sentiment", description = "Market sentiment endpoints")
    ),
    info(
        title = "Bitcoin Resonance API",
        version = "1.0.0",
        description = "Market-data API backing the Bitcoin Resonance visualization frontend"
    )
)]
struct ApiDoc;

/// Market-data API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (overrides the PORT environment variable)
    #[clap(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,market_data=debug")
        .unwrap();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    debug!("Debug logging enabled");

    // Initialize services
    let config = AppConfig::new();
    let market_data_service = Arc::new(MarketDataService::with_feed(config.feed_kind().build()));

    // Create app state
    let state = Arc::new(AppState {
        market_data_service,
    });

    // Set up CORS (the visualization frontend is served from anywhere)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Set up Swagger UI
    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    // Combine all routes
    let app = app(state)
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        );

    // Start the server
    let addr = args
        .addr
        .unwrap_or_else(|| format!("127.0.0.1:{}", config.port));
    let addr: std::net::SocketAddr = addr.parse().expect("Invalid address");
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
