use crate::errors::RelayServerError;
use crate::init::AppState;
use crate::middleware::AuthenticatedCaller;
use axum::{Extension, Json};
use axum::extract::State;
use relay_manager_core::events::RecordedEvent;
use relay_manager_processor::relay_sender::TypedMessageSender;
use relay_manager_processor::types::SetAdminFeeRequest;
use tracing::instrument;

#[instrument(level = "debug", skip(state, authenticated, request), fields(caller = %request.caller, admin_fee = %request.admin_fee), ret)]
pub async fn handle(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedCaller>,
    Json(request): Json<SetAdminFeeRequest>,
) -> Result<Json<RecordedEvent>, RelayServerError> {
    tracing::info!("Handling set admin fee request...");
    authenticated.ensure_claimed(request.caller)?;
    Ok(Json(state.relay_sender.send(request).await?))
}
