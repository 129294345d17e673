use std::sync::Arc;

use agenda::{
    application::{auth_service::AuthService, event_store::EventStore, notifier::{Notifier, TracingNotifier}, samples},
    config::Config,
    domain::clock::SystemClock,
    http::routing::{self, auth, events},
    infrastructure::{memory_repo::InMemoryEventRepository, static_directory::StaticUserDirectory},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let mut store = EventStore::new(InMemoryEventRepository::new(), config.id_strategy.generator(), Box::new(SystemClock));
    if config.seed_samples {
        samples::seed(&mut store)?;
    }

    let directory = StaticUserDirectory::new(config.users.clone());
    if directory.is_empty() {
        tracing::warn!("no users configured; every login will fail");
    }
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let auth_service = AuthService::new(directory, Arc::clone(&notifier));

    let router = routing::app(
        events::router(events::AppState::new(store, notifier)).merge(auth::router(auth::AuthState::new(auth_service))),
    );

    let addr = config.bind_addr;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
