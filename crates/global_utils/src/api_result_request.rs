use crate::common_resp::ErrorIntoStatusMsgTuple;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Envelope every service endpoint answers with.
///
/// ```json
/// { "ok": { "data": { ... } } }
/// { "err": { "code": 409, "message": "TRANSFER_NONCE_ALREADY_PROCESSED: ..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub enum ApiResponseOwned<T> {
    #[serde(rename = "ok")]
    Ok { data: T },
    #[serde(rename = "err")]
    Err { code: u16, message: String },
}

impl<T: Serialize> ApiResponseOwned<T> {
    pub fn ok(data: T) -> ApiResponseOwned<T> {
        Self::Ok { data }
    }

    pub fn err<S: ToString>(code: u16, message: S) -> Self {
        Self::Err {
            code,
            message: message.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn encode_string_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Ok { .. } => StatusCode::OK,
            Self::Err { code, .. } => StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl<T: Serialize, E: ErrorIntoStatusMsgTuple> From<Result<T, E>> for ApiResponseOwned<T> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(v) => ApiResponseOwned::ok(v),
            Err(e) => {
                let (code, msg) = e.into_status_msg_tuple();
                ApiResponseOwned::<T>::err(code.as_u16(), msg)
            }
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponseOwned<T> {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}
