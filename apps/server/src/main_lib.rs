use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use financeiq_core::recurrence::{RecurrenceService, RecurrenceServiceTrait};
use financeiq_core::transactions::TransactionRepositoryTrait;
use financeiq_storage_sqlite::recurrence::RecurrenceRuleRepository;
use financeiq_storage_sqlite::transactions::TransactionRepository;
use financeiq_storage_sqlite::{create_pool, run_migrations, spawn_writer};

use crate::config::Config;

pub struct AppState {
    pub recurrence_service: Arc<dyn RecurrenceServiceTrait>,
    pub transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FIQ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    tracing::info!("Database path in use: {}", config.db_path);
    let writer = spawn_writer(pool.clone());

    let rule_repository = Arc::new(RecurrenceRuleRepository::new(pool.clone(), writer.clone()));
    let transaction_repository: Arc<dyn TransactionRepositoryTrait> =
        Arc::new(TransactionRepository::new(pool, writer));
    let recurrence_service = Arc::new(RecurrenceService::new(
        rule_repository,
        transaction_repository.clone(),
    ));

    Ok(Arc::new(AppState {
        recurrence_service,
        transaction_repository,
    }))
}
