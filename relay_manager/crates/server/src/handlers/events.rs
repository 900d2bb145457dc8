use crate::errors::RelayServerError;
use crate::init::AppState;
use axum::Json;
use axum::extract::State;
use relay_manager_processor::relay_sender::TypedMessageSender;
use relay_manager_processor::types::{GetEventsRequest, GetEventsResponse};
use tracing::instrument;

/// Polling endpoint for relayers, returns every record after `since`.
#[instrument(level = "trace", skip(state), ret)]
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<GetEventsRequest>,
) -> Result<Json<GetEventsResponse>, RelayServerError> {
    Ok(Json(state.relay_sender.send(request).await?))
}
