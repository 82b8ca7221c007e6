//! Sale endpoints for Farmstead

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::AppState,
    error::Result,
    models::{Sale, SalePayload},
};

/// GET /api/sales
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<Sale>>> {
    let sales = state.sales.find_all_by_date_desc().await?;
    Ok(Json(sales))
}

/// POST /api/sales
pub async fn create_sale(
    State(state): State<AppState>,
    payload: Option<Json<SalePayload>>,
) -> Result<(StatusCode, Json<Sale>)> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let new_sale = payload.normalize()?;

    let sale = state.sales.insert(new_sale).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
