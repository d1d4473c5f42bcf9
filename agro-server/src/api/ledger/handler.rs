use axum::{Json, extract::State};
use shared::models::{LedgerEntry, LedgerVerification, verify_entries};

use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/ledger
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<LedgerEntry>>> {
    Ok(Json(state.storage.ledger_entries()?))
}

/// GET /api/ledger/verify
pub async fn verify(State(state): State<ServerState>) -> AppResult<Json<LedgerVerification>> {
    let entries = state.storage.ledger_entries()?;
    let report = verify_entries(&entries);

    if report.ledger_intact {
        tracing::info!(entries = report.total_entries, "Ledger verified");
    } else {
        tracing::warn!(
            entries = report.total_entries,
            tampered = ?report.tampered,
            "Ledger verification found modified entries"
        );
    }

    Ok(Json(report))
}
