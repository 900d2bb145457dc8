use crate::errors::RelayServerError;
use crate::init::AppState;
use axum::Json;
use axum::extract::State;
use global_utils::common_resp::Empty;
use relay_manager_processor::relay_sender::TypedMessageSender;
use relay_manager_processor::types::HealthcheckRequest;
use tracing::instrument;

#[instrument(level = "trace", skip(state), ret)]
pub async fn handle(State(state): State<AppState>) -> Result<Json<Empty>, RelayServerError> {
    tracing::info!("Handling healthcheck request...");
    Ok(Json(state.relay_sender.send(HealthcheckRequest {}).await?))
}
