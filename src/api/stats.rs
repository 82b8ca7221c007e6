//! Summary endpoints for Farmstead
//!
//! Each handler fetches the current records and recomputes its summary in
//! memory; nothing is cached between requests.

use axum::{extract::State, Json};

use crate::{
    aggregate::{self, DashboardSummary, ProfitSummary, ReportsSummary},
    api::AppState,
    error::Result,
};

/// GET /api/dashboard
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardSummary>> {
    let animals = state.animals.find_all().await?;
    let sales = state.sales.find_all_by_date_desc().await?;

    Ok(Json(aggregate::dashboard_summary(&animals, &sales)))
}

/// GET /api/profit
pub async fn profit(State(state): State<AppState>) -> Result<Json<ProfitSummary>> {
    let sales = state.sales.find_all_by_date_desc().await?;

    Ok(Json(aggregate::profit_summary(&sales)))
}

/// GET /api/reports
pub async fn reports(State(state): State<AppState>) -> Result<Json<ReportsSummary>> {
    let animals = state.animals.find_all().await?;
    let sales = state.sales.find_all_by_date_desc().await?;

    Ok(Json(aggregate::reports_summary(&animals, &sales)))
}
