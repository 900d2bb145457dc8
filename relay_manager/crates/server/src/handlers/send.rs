use crate::errors::RelayServerError;
use crate::init::AppState;
use axum::Json;
use axum::extract::State;
use relay_manager_core::events::RecordedEvent;
use relay_manager_processor::relay_sender::TypedMessageSender;
use relay_manager_processor::types::SendRequest;
use tracing::instrument;

/// Releases a bridged transfer. Not operator gated, the signature quorum is the only authorization.
#[instrument(level = "debug", skip(state, request), fields(transfer = %request.transfer_key()), ret)]
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<RecordedEvent>, RelayServerError> {
    tracing::info!("Handling send request...");
    Ok(Json(state.relay_sender.send(request).await?))
}
