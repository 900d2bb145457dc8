use crate::errors::RelayServerError;
use crate::init::AppState;
use axum::Json;
use axum::extract::State;
use relay_manager_core::manager::RelayState;
use relay_manager_processor::relay_sender::TypedMessageSender;
use relay_manager_processor::types::GetStateRequest;
use tracing::instrument;

#[instrument(level = "trace", skip(state), ret)]
pub async fn handle(State(state): State<AppState>) -> Result<Json<RelayState>, RelayServerError> {
    Ok(Json(state.relay_sender.send(GetStateRequest {}).await?))
}
