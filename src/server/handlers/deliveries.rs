use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::domain::delivery::DeliveryRecord;
use crate::server::AppState;

/// Recent deliveries, most recent first
pub async fn list_deliveries(State(state): State<AppState>) -> Json<Vec<Arc<DeliveryRecord>>> {
    Json(state.deliveries.snapshot().await)
}
