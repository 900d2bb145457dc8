use crate::handlers;
use crate::middleware::authenticate_caller;
use axum::Router;
use axum::middleware;
use axum::routing::post;
use relay_manager_core::caller_auth::CallerAuthenticator;
use relay_manager_processor::relay_sender::RelaySender;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct AppState {
    pub relay_sender: RelaySender,
    pub caller_auth: Arc<CallerAuthenticator>,
}

pub struct RelayApi;

impl RelayApi {
    pub const DEPOSIT_ENDPOINT: &'static str = "/api/relay/deposit";
    pub const SEND_ENDPOINT: &'static str = "/api/relay/send";
    pub const ADD_SIGNER_ENDPOINT: &'static str = "/api/relay/add-signer";
    pub const REMOVE_SIGNER_ENDPOINT: &'static str = "/api/relay/remove-signer";
    pub const SET_THRESHOLD_ENDPOINT: &'static str = "/api/relay/set-threshold";
    pub const SET_ADMIN_FEE_ENDPOINT: &'static str = "/api/relay/set-admin-fee";
    pub const SET_BRIDGE_WALLET_ENDPOINT: &'static str = "/api/relay/set-bridge-wallet";
    pub const STATE_ENDPOINT: &'static str = "/api/relay/state";
    pub const IS_PROCESSED_ENDPOINT: &'static str = "/api/relay/is-processed";
    pub const EVENTS_ENDPOINT: &'static str = "/api/relay/events";
    pub const HEALTHCHECK_ENDPOINT: &'static str = "/api/relay/healthcheck";
}

/// Routes whose body names a `caller` only accept requests signed by that caller.
#[instrument(level = "debug", skip(relay_sender, caller_auth))]
pub async fn create_app(relay_sender: RelaySender, caller_auth: Arc<CallerAuthenticator>) -> Router {
    let state = AppState {
        relay_sender,
        caller_auth,
    };
    let caller_routes = Router::new()
        .route(RelayApi::DEPOSIT_ENDPOINT, post(handlers::deposit::handle))
        .route(RelayApi::ADD_SIGNER_ENDPOINT, post(handlers::add_signer::handle))
        .route(RelayApi::REMOVE_SIGNER_ENDPOINT, post(handlers::remove_signer::handle))
        .route(RelayApi::SET_THRESHOLD_ENDPOINT, post(handlers::set_threshold::handle))
        .route(RelayApi::SET_ADMIN_FEE_ENDPOINT, post(handlers::set_admin_fee::handle))
        .route(
            RelayApi::SET_BRIDGE_WALLET_ENDPOINT,
            post(handlers::set_bridge_wallet::handle),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate_caller));

    Router::new()
        .merge(caller_routes)
        .route(RelayApi::SEND_ENDPOINT, post(handlers::send::handle))
        .route(RelayApi::STATE_ENDPOINT, post(handlers::state::handle))
        .route(RelayApi::IS_PROCESSED_ENDPOINT, post(handlers::is_processed::handle))
        .route(RelayApi::EVENTS_ENDPOINT, post(handlers::events::handle))
        .route(RelayApi::HEALTHCHECK_ENDPOINT, post(handlers::healthcheck::handle))
        .with_state(state)
}
