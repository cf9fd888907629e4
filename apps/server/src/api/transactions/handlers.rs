use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use stockjournal_core::{
    ledger::{BatchResult, RestoreResult},
    transactions::{
        filter_transactions, generate_transaction_summary, NewTransaction, Transaction,
        TransactionFilter, TransactionSummaryRow, TransactionType,
    },
};

use super::dto::{ClearResponse, RestoreQuery, TransactionsQuery};
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TransactionsQuery>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transaction_type = q
        .transaction_type
        .as_deref()
        .map(|t| {
            t.parse::<TransactionType>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))
        })
        .transpose()?;
    let filter = TransactionFilter {
        ticker: q.ticker,
        transaction_type,
        start_date: q.start_date,
        end_date: q.end_date,
    };

    let ledger = state.ledger_service.snapshot()?;
    let rows = filter_transactions(&ledger, &filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(rows))
}

pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewTransaction>,
) -> ApiResult<Json<Transaction>> {
    let created = state.ledger_service.add_transaction(payload)?;
    Ok(Json(created))
}

pub async fn create_transactions(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Vec<NewTransaction>>,
) -> ApiResult<Json<BatchResult>> {
    let result = state.ledger_service.add_transactions(payload)?;
    Ok(Json(result))
}

pub async fn clear_transactions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClearResponse>> {
    let removed = state.ledger_service.clear()?;
    Ok(Json(ClearResponse { removed }))
}

pub async fn import_transactions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<BatchResult>> {
    let result = state.ledger_service.import_csv(&body)?;
    Ok(Json(result))
}

pub async fn restore_transactions(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RestoreQuery>,
    body: Bytes,
) -> ApiResult<Json<RestoreResult>> {
    let result = state
        .ledger_service
        .restore_csv(&body, q.mode.unwrap_or_default())?;
    Ok(Json(result))
}

pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<impl IntoResponse> {
    let csv = state.ledger_service.export_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        csv,
    ))
}

pub async fn get_transaction_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TransactionSummaryRow>>> {
    let ledger = state.ledger_service.snapshot()?;
    Ok(Json(generate_transaction_summary(&ledger)))
}
