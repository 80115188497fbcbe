use std::{env, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use dompet::{
    AppState, build_router, graceful_shutdown,
    notion::{NOTION_API_TOKEN_VAR, NotionClient},
};

/// The Notion proxy server for the dompet dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The address to bind to.
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,

    /// The port to serve the proxy endpoints from.
    #[arg(short, long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();
    let addr = SocketAddr::from((args.host, args.port));

    // Read once; immutable for the process lifetime. A missing token is not
    // fatal here, but every request will fail with the configuration error
    // until the server is restarted with it set.
    let token = env::var(NOTION_API_TOKEN_VAR).ok();
    if token.as_deref().is_none_or(str::is_empty) {
        tracing::warn!(
            "The environment variable '{NOTION_API_TOKEN_VAR}' is not set; \
            every request will fail until the server is restarted with it configured."
        );
    }

    let state = AppState::new(Arc::new(NotionClient::new(token)));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {addr}");
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().pretty().with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            ),
        )
        .init();
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
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
