use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use global_utils::api_result_request::ApiResponseOwned;
use global_utils::common_resp::{Empty, ErrorIntoStatusMsgTuple};
use relay_manager_core::errors::{CallerAuthError, RelayError};
use relay_manager_processor::errors::RelayProcessorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayServerError {
    #[error("{}: {}", .0.code(), .0)]
    Relay(RelayError),
    #[error("{}: {}", .0.code(), .0)]
    Unauthenticated(#[from] CallerAuthError),
    #[error("PROCESSOR_UNAVAILABLE: {0}")]
    ProcessorUnavailable(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl From<RelayProcessorError> for RelayServerError {
    fn from(value: RelayProcessorError) -> Self {
        match value {
            RelayProcessorError::Relay(e) => RelayServerError::Relay(e),
            RelayProcessorError::ChannelClosedError(msg) => RelayServerError::ProcessorUnavailable(msg),
            RelayProcessorError::InvalidResponseType(msg) => RelayServerError::Internal(msg),
        }
    }
}

impl RelayServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayServerError::Relay(e) => match e {
                RelayError::SignatureInvalid(_) | RelayError::CallerNotOperator(_) => StatusCode::FORBIDDEN,
                RelayError::TransferNonceAlreadyProcessed(_) => StatusCode::CONFLICT,
                RelayError::BurnFailed { .. } | RelayError::MintFailed { .. } => StatusCode::BAD_GATEWAY,
                RelayError::ReleaseIrreversible { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                RelayError::SignerInvalid { .. }
                | RelayError::ThresholdInvalid { .. }
                | RelayError::ThresholdUnsatisfiable { .. }
                | RelayError::TransferAmountInvalid { .. }
                | RelayError::DepositAmountInvalid { .. }
                | RelayError::ReceiverZero
                | RelayError::AdminFeeInvalid
                | RelayError::BridgeWalletAddressInvalid => StatusCode::BAD_REQUEST,
            },
            RelayServerError::Unauthenticated(e) => match e {
                CallerAuthError::CallerMismatch { .. } => StatusCode::FORBIDDEN,
                CallerAuthError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CallerAuthError::MissingHeader(_)
                | CallerAuthError::InvalidHeader { .. }
                | CallerAuthError::InvalidBody(_)
                | CallerAuthError::CallerSignatureInvalid(_)
                | CallerAuthError::StaleNonce { .. } => StatusCode::UNAUTHORIZED,
            },
            RelayServerError::ProcessorUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorIntoStatusMsgTuple for RelayServerError {
    fn into_status_msg_tuple(self) -> (StatusCode, String) {
        (self.status_code(), self.to_string())
    }
}

impl IntoResponse for RelayServerError {
    fn into_response(self) -> Response {
        match self.status_code() {
            status if status.is_server_error() => tracing::error!("Relay server error: {}", self),
            _ => tracing::warn!("Relay request rejected: {}", self),
        }
        ApiResponseOwned::<Empty>::from(Err::<Empty, _>(self)).into_response()
    }
}
