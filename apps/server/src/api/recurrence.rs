use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use financeiq_core::recurrence::{
    NewRecurrenceRule, RecurrenceRule, RecurrenceRuleUpdate, RunSummary,
};
use financeiq_core::transactions::Transaction;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerQuery {
    owner_id: String,
}

async fn list_rules(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OwnerQuery>,
) -> ApiResult<Json<Vec<RecurrenceRule>>> {
    let rules = state.recurrence_service.get_rules(&query.owner_id)?;
    Ok(Json(rules))
}

async fn create_rule(
    State(state): State<Arc<AppState>>,
    Json(new_rule): Json<NewRecurrenceRule>,
) -> ApiResult<Json<RecurrenceRule>> {
    let rule = state.recurrence_service.create_rule(new_rule).await?;
    Ok(Json(rule))
}

async fn update_rule(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut update): Json<RecurrenceRuleUpdate>,
) -> ApiResult<Json<RecurrenceRule>> {
    // The path wins over whatever id the body carries
    update.id = id;
    let rule = state.recurrence_service.update_rule(update).await?;
    Ok(Json(rule))
}

async fn delete_rule(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.recurrence_service.delete_rule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_rule_transactions(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transaction_repository.list_transactions_for_rule(&id)?;
    Ok(Json(transactions))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunQuery {
    /// Calendar date to process; defaults to today in server-local time.
    as_of: Option<NaiveDate>,
}

/// Manual trigger for the recurrence engine, mirroring what the daily
/// scheduler does on its tick.
async fn run_recurrences(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RunQuery>,
) -> ApiResult<Json<RunSummary>> {
    let as_of = query.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    let summary = state.recurrence_service.process_due_recurrences(as_of).await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rules", get(list_rules).post(create_rule))
        .route("/rules/{id}", put(update_rule).delete(delete_rule))
        .route("/rules/{id}/transactions", get(list_rule_transactions))
        .route("/run", post(run_recurrences))
}
