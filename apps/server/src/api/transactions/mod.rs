mod dto;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::main_lib::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions)
                .post(handlers::create_transaction)
                .delete(handlers::clear_transactions),
        )
        .route("/transactions/batch", post(handlers::create_transactions))
        .route("/transactions/import", post(handlers::import_transactions))
        .route("/transactions/restore", post(handlers::restore_transactions))
        .route("/transactions/export", get(handlers::export_transactions))
        .route("/transactions/summary", get(handlers::get_transaction_summary))
}
