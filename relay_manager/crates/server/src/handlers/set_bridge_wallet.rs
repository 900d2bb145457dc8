use crate::errors::RelayServerError;
use crate::init::AppState;
use crate::middleware::AuthenticatedCaller;
use axum::{Extension, Json};
use axum::extract::State;
use relay_manager_core::events::RecordedEvent;
use relay_manager_processor::relay_sender::TypedMessageSender;
use relay_manager_processor::types::SetBridgeWalletRequest;
use tracing::instrument;

#[instrument(level = "debug", skip(state, authenticated, request), fields(caller = %request.caller, bridge_wallet = %request.bridge_wallet), ret)]
pub async fn handle(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedCaller>,
    Json(request): Json<SetBridgeWalletRequest>,
) -> Result<Json<RecordedEvent>, RelayServerError> {
    tracing::info!("Handling set bridge wallet request...");
    authenticated.ensure_claimed(request.caller)?;
    Ok(Json(state.relay_sender.send(request).await?))
}
