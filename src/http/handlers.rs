use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::ForecastOutcome;
use crate::http::{ApiError, AppState, SESSION_HEADER, USER_HEADER};
use crate::models::{Category, CategoryDraft, Summary, Totals, Transaction, TransactionDraft, TransactionKind};
use crate::storage::TransactionFilter;
use crate::types::{RecordId, UserId};

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: Summary,
    pub forecast_dates: Vec<String>,
    pub forecast_values: Vec<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_message: Option<&'static str>
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub chart_data: Totals
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub chart_labels: Vec<String>,
    pub chart_data: Vec<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>
}

impl From<ForecastOutcome> for ForecastResponse {
    fn from(outcome: ForecastOutcome) -> Self {
        let result = outcome.result().cloned().unwrap_or_default();

        Self {
            chart_labels: result.labels(),
            chart_data: result.values(),
            error: outcome.message()
        }
    }
}

fn user_id(headers: &HeaderMap) -> Result<UserId, ApiError> {
    headers.get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .ok_or_else(|| ApiError::unauthorized(USER_HEADER))
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<DashboardResponse>, ApiError> {
    let user_id = user_id(&headers)?;
    let summary = state.engine.summary(user_id, Local::now().date_naive());
    let outcome = state.engine.dashboard_forecast(user_id).await?;
    let result = outcome.result().cloned().unwrap_or_default();

    Ok(Json(DashboardResponse {
        summary,
        forecast_dates: result.labels(),
        forecast_values: result.values(),
        forecast_message: outcome.message()
    }))
}

pub async fn reports(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<ReportResponse>, ApiError> {
    let user_id = user_id(&headers)?;

    Ok(Json(ReportResponse { chart_data: state.engine.totals(user_id) }))
}

/// Drops every category, income and expense the caller owns.
pub async fn delete_account(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode, ApiError> {
    let user_id = user_id(&headers)?;
    let removed = state.storage.remove_user(user_id);

    info!("Removed [{removed}] record(s) of user [{user_id}]");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_categories(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Vec<Category>>, ApiError> {
    let user_id = user_id(&headers)?;

    Ok(Json(state.storage.categories(user_id)))
}

pub async fn create_category(State(state): State<AppState>, headers: HeaderMap, payload: Result<Json<CategoryDraft>, JsonRejection>) -> Result<(StatusCode, Json<Category>), ApiError> {
    let Json(draft) = payload?;
    let user_id = user_id(&headers)?;
    let category = state.storage.create_category(user_id, draft)?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_category(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>) -> Result<Json<Category>, ApiError> {
    let user_id = user_id(&headers)?;

    Ok(Json(state.storage.category(user_id, id)?))
}

pub async fn update_category(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>, payload: Result<Json<CategoryDraft>, JsonRejection>) -> Result<Json<Category>, ApiError> {
    let Json(draft) = payload?;
    let user_id = user_id(&headers)?;

    Ok(Json(state.storage.update_category(user_id, id, draft)?))
}

pub async fn delete_category(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>) -> Result<StatusCode, ApiError> {
    let user_id = user_id(&headers)?;
    state.storage.remove_category(user_id, id)?;

    Ok(StatusCode::NO_CONTENT)
}

fn list_transactions(state: &AppState, headers: &HeaderMap, kind: TransactionKind, query: SearchQuery) -> Result<Json<Vec<Transaction>>, ApiError> {
    let user_id = user_id(headers)?;
    let filter = TransactionFilter::of_kind(kind)
        .search(query.q.as_deref())
        .newest_first();

    Ok(Json(state.storage.transactions(user_id, &filter)))
}

fn create_transaction(state: &AppState, headers: &HeaderMap, kind: TransactionKind, draft: TransactionDraft) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let user_id = user_id(headers)?;
    let transaction = state.storage.create_transaction(user_id, kind, draft)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

fn get_transaction(state: &AppState, headers: &HeaderMap, kind: TransactionKind, id: RecordId) -> Result<Json<Transaction>, ApiError> {
    let user_id = user_id(headers)?;

    Ok(Json(state.storage.transaction(user_id, kind, id)?))
}

fn update_transaction(state: &AppState, headers: &HeaderMap, kind: TransactionKind, id: RecordId, draft: TransactionDraft) -> Result<Json<Transaction>, ApiError> {
    let user_id = user_id(headers)?;

    Ok(Json(state.storage.update_transaction(user_id, kind, id, draft)?))
}

fn delete_transaction(state: &AppState, headers: &HeaderMap, kind: TransactionKind, id: RecordId) -> Result<StatusCode, ApiError> {
    let user_id = user_id(headers)?;
    state.storage.remove_transaction(user_id, kind, id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_incomes(State(state): State<AppState>, headers: HeaderMap, Query(query): Query<SearchQuery>) -> Result<Json<Vec<Transaction>>, ApiError> {
    list_transactions(&state, &headers, TransactionKind::Income, query)
}

pub async fn create_income(State(state): State<AppState>, headers: HeaderMap, payload: Result<Json<TransactionDraft>, JsonRejection>) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(draft) = payload?;
    create_transaction(&state, &headers, TransactionKind::Income, draft)
}

pub async fn get_income(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>) -> Result<Json<Transaction>, ApiError> {
    get_transaction(&state, &headers, TransactionKind::Income, id)
}

pub async fn update_income(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>, payload: Result<Json<TransactionDraft>, JsonRejection>) -> Result<Json<Transaction>, ApiError> {
    let Json(draft) = payload?;
    update_transaction(&state, &headers, TransactionKind::Income, id, draft)
}

pub async fn delete_income(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>) -> Result<StatusCode, ApiError> {
    delete_transaction(&state, &headers, TransactionKind::Income, id)
}

pub async fn list_expenses(State(state): State<AppState>, headers: HeaderMap, Query(query): Query<SearchQuery>) -> Result<Json<Vec<Transaction>>, ApiError> {
    list_transactions(&state, &headers, TransactionKind::Expense, query)
}

pub async fn create_expense(State(state): State<AppState>, headers: HeaderMap, payload: Result<Json<TransactionDraft>, JsonRejection>) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(draft) = payload?;
    create_transaction(&state, &headers, TransactionKind::Expense, draft)
}

pub async fn get_expense(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>) -> Result<Json<Transaction>, ApiError> {
    get_transaction(&state, &headers, TransactionKind::Expense, id)
}

pub async fn update_expense(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>, payload: Result<Json<TransactionDraft>, JsonRejection>) -> Result<Json<Transaction>, ApiError> {
    let Json(draft) = payload?;
    update_transaction(&state, &headers, TransactionKind::Expense, id, draft)
}

pub async fn delete_expense(State(state): State<AppState>, headers: HeaderMap, Path(id): Path<RecordId>) -> Result<StatusCode, ApiError> {
    delete_transaction(&state, &headers, TransactionKind::Expense, id)
}

/// Forecasts the historical dataset and remembers the result for the caller's session.
pub async fn forecast(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<ForecastResponse>, ApiError> {
    let session_id = session_id(&headers).ok_or_else(|| ApiError::missing_session(SESSION_HEADER))?;
    let outcome = state.engine.standalone_forecast(session_id).await?;

    Ok(Json(ForecastResponse::from(outcome)))
}

pub async fn download_forecast(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse, ApiError> {
    let session_id = session_id(&headers);

    if session_id.is_none() {
        debug!("Forecast download without a session, exporting header only");
    }

    let body = state.engine.export_csv(session_id)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"forecast.csv\"")
        ],
        body
    ))
}
