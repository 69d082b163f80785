use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = stockroom::Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        data_dir = %cfg.data_dir.display(),
        static_dir = %cfg.static_dir.display(),
        users = cfg.users.len(),
        secure_cookie = cfg.secure_cookie,
        loglevel = %cfg.loglevel
    );

    if !cfg.static_dir.join(stockroom::handlers::pages::ENTRY_PAGE).is_file() {
        warn!(
            path = %cfg.static_dir.display(),
            "front-end entry page not found; `/` will return 404"
        );
    }

    let state = stockroom::router::AppState::from_config(&cfg)?;
    let app = stockroom::router::stockroom_router(state);

    let addr = cfg.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
