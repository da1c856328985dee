//! API Routes
//!
//! HTTP endpoint definitions. Thin adapters over the three workflow
//! operations plus the invoice lookup the dashboard's invoice-details
//! screen performs.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Invoice, OrderAggregate, SalesContext};
use crate::error::AppError;
use crate::store::DocumentStore;
use crate::workflow::{AggregateView, FinalizationEngine, OrderIndex, OrderListing};

/// Shared handler state: the injected document store and the configured
/// sales context.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sales: SalesContext,
}

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderListing>,
}

#[derive(Debug, Deserialize)]
pub struct AggregateQuery {
    pub email: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct FinalizeRequest {
    pub email: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub invoice_number: u32,
    pub total: Decimal,
    pub retired_submissions: usize,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Order index (listing view)
        .route("/orders", get(list_orders))
        // Aggregate view (detail for one email/date key)
        .route("/orders/aggregate", get(get_order_aggregate))
        // Finalization: aggregate -> invoice
        .route("/invoices", post(finalize_order))
        // Invoice lookup by number
        .route("/invoices/:invoice_number", get(get_invoice))
}

// =========================================================================
// GET /orders
// =========================================================================

/// List every (email, date) aggregate, flattened for the orders table.
async fn list_orders(State(state): State<AppState>) -> Result<Json<OrdersResponse>, AppError> {
    let index = OrderIndex::new(state.store.clone());
    let orders = index.list_aggregates().await?;

    Ok(Json(OrdersResponse { orders }))
}

// =========================================================================
// GET /orders/aggregate?email=&date=
// =========================================================================

/// Aggregate detail for one key, with per-item rows.
async fn get_order_aggregate(
    State(state): State<AppState>,
    Query(query): Query<AggregateQuery>,
) -> Result<Json<OrderAggregate>, AppError> {
    let view = AggregateView::new(state.store.clone());
    let aggregate = view.get_aggregate(&query.email, &query.date).await?;

    Ok(Json(aggregate))
}

// =========================================================================
// POST /invoices
// =========================================================================

/// Finalize the aggregate for a key: re-derive it, record the invoice,
/// retire the source submissions.
async fn finalize_order(
    State(state): State<AppState>,
    Json(request): Json<FinalizeRequest>,
) -> Result<(StatusCode, Json<FinalizeResponse>), AppError> {
    let view = AggregateView::new(state.store.clone());
    let aggregate = view.get_aggregate(&request.email, &request.date).await?;

    let engine = FinalizationEngine::new(state.store.clone());
    let receipt = engine
        .finalize(&aggregate, &request.date, &state.sales)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FinalizeResponse {
            invoice_number: receipt.invoice_number,
            total: aggregate.total_amount,
            retired_submissions: receipt.retired_submissions,
        }),
    ))
}

// =========================================================================
// GET /invoices/:invoice_number
// =========================================================================

/// Invoice detail by number (numeric equality, as the details screen
/// queries it).
async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_number): Path<u32>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state
        .store
        .find_invoice(invoice_number)
        .await?
        .ok_or(AppError::InvoiceNotFound(invoice_number))?;

    Ok(Json(invoice))
}
