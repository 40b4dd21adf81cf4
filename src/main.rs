use anyhow::Context;
use runpool::config::AppConfig;
use runpool::error::AppError;
use runpool::routes::create_router;
use runpool::services::session::SessionStore;
use runpool::state::AppState;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let session = SessionStore::new(config.session_file.clone());
    match session.load().await? {
        Some(user) => info!(user_id = user.user_id, "restored session"),
        None => info!("no stored session"),
    }

    let state = AppState::new(config.clone(), session);
    info!("using RunPool API at {}", state.api.base_url());

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("could not bind {}", config.listen_addr))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service())
        .await
        .context("server stopped unexpectedly")?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,runpool=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
