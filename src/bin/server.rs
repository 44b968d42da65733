use std::{fs::OpenOptions, process::ExitCode, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    AppState, Config, SQLiteTransactionStore, build_cors_layer, build_router, graceful_shutdown,
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine, the environment and arguments still apply.
    let dotenv_result = dotenvy::dotenv();

    if let Err(error) = setup_logging() {
        eprintln!("Could not set up logging: {error}");
        return ExitCode::FAILURE;
    }

    if let Err(error) = dotenv_result {
        tracing::debug!("Did not load a .env file: {error}");
    }

    let config = Config::parse();
    let addr = config.address();

    let store = match SQLiteTransactionStore::open(&config.db_path) {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("Could not open the database at {}: {error}", config.db_path);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Connected to the database at {}", config.db_path);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let state = AppState::new(store);
    let router = build_router(state.clone()).layer(build_cors_layer(&config.cors_origins));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    let serve_result = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await;

    let mut exit_code = ExitCode::SUCCESS;

    if let Err(error) = serve_result {
        tracing::error!("Server stopped with an error: {error}");
        exit_code = ExitCode::FAILURE;
    }

    if let Err(error) = state.transaction_service.into_store().close() {
        tracing::error!("Could not close the database cleanly: {error}");
        exit_code = ExitCode::FAILURE;
    }

    tracing::info!("Server shut down.");

    exit_code
}

fn setup_logging() -> Result<(), std::io::Error> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are already logged by the handlers and the logging middleware.
        .on_failure(());

    router.layer(tracing_layer)
}
