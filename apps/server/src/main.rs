mod api;
mod config;
mod error;
mod main_lib;
mod scheduler;

use config::Config;
use main_lib::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Background recurrence scheduler (daily tick)
    if config.scheduler_enabled {
        scheduler::start_recurrence_scheduler(state.clone());
    } else {
        tracing::info!("Recurrence scheduler disabled by configuration");
    }

    let router = api::app_router(state);
    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
