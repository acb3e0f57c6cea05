//! Sensitive account operations.
//!
//! The transfer handler is a deliberately thin acknowledgment stub: its
//! business validation belongs to an external collaborator. What matters
//! here is that the route sits behind the step-up gate.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire-transfer request.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Destination account number.
    pub to_account: String,
    /// Amount in minor units.
    pub amount_cents: i64,
}

/// Wire-transfer acknowledgment.
#[derive(Debug, Serialize)]
pub struct TransferReceipt {
    /// Processing status.
    pub status: &'static str,
    /// Reference for the submitted transfer.
    pub reference: String,
}

/// POST `/account/transfer`
///
/// Accepts a transfer for processing. Reachable only through the
/// step-up gate.
pub async fn transfer(Json(body): Json<TransferRequest>) -> (StatusCode, Json<TransferReceipt>) {
    tracing::info!(
        to_account = %body.to_account,
        amount_cents = body.amount_cents,
        "transfer accepted"
    );

    (
        StatusCode::ACCEPTED,
        Json(TransferReceipt {
            status: "accepted",
            reference: Uuid::now_v7().to_string(),
        }),
    )
}
