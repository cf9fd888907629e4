use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use stockjournal_core::portfolio::{
    calculate_allocation, calculate_historical_performance, generate_profit_loss_report,
    get_current_holdings, get_portfolio_summary, Holding, PerformancePoint, PortfolioSummary,
    ProfitLossRow, TickerAllocation,
};

use crate::{error::ApiResult, main_lib::AppState};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/holdings", get(get_holdings))
        .route("/portfolio/summary", get(get_summary))
        .route("/portfolio/performance", get(get_performance))
        .route("/portfolio/report", get(get_report))
        .route("/portfolio/allocation", get(get_allocation))
}

async fn get_holdings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Holding>>> {
    let ledger = state.ledger_service.snapshot()?;
    Ok(Json(get_current_holdings(&ledger)))
}

async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSummary>> {
    let ledger = state.ledger_service.snapshot()?;
    Ok(Json(get_portfolio_summary(&ledger)))
}

async fn get_performance(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PerformancePoint>>> {
    let ledger = state.ledger_service.snapshot()?;
    Ok(Json(calculate_historical_performance(&ledger)))
}

async fn get_report(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ProfitLossRow>>> {
    let ledger = state.ledger_service.snapshot()?;
    Ok(Json(generate_profit_loss_report(&ledger)))
}

async fn get_allocation(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TickerAllocation>>> {
    let ledger = state.ledger_service.snapshot()?;
    Ok(Json(calculate_allocation(&ledger)))
}
