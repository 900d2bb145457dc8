use crate::errors::RelayServerError;
use crate::init::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use relay_manager_core::errors::CallerAuthError;
use relay_manager_core::types::{Address, RelaySignature};
use tracing::debug;

pub const CALLER_NONCE_HEADER: &str = "x-caller-nonce";
pub const CALLER_SIGNATURE_HEADER: &str = "x-caller-signature";

const MAX_SIGNED_BODY_BYTES: usize = 1024 * 1024;

/// Account that signed the current request, set by [`authenticate_caller`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedCaller(pub Address);

impl AuthenticatedCaller {
    pub fn ensure_claimed(&self, claimed: Address) -> Result<(), RelayServerError> {
        if self.0 != claimed {
            return Err(CallerAuthError::CallerMismatch {
                claimed,
                authenticated: self.0,
            }
            .into());
        }
        Ok(())
    }
}

/// Recovers the caller from `x-caller-signature` over the path, `x-caller-nonce` and the raw body, then hands the
/// request on with an [`AuthenticatedCaller`] extension.
pub async fn authenticate_caller(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, RelayServerError> {
    let (mut parts, body) = req.into_parts();
    let caller_nonce = header_value(&parts.headers, CALLER_NONCE_HEADER)?
        .parse::<u64>()
        .map_err(|e| CallerAuthError::InvalidHeader {
            header: CALLER_NONCE_HEADER,
            reason: e.to_string(),
        })?;
    let signature = header_value(&parts.headers, CALLER_SIGNATURE_HEADER)?
        .parse::<RelaySignature>()
        .map_err(|e| CallerAuthError::InvalidHeader {
            header: CALLER_SIGNATURE_HEADER,
            reason: e.to_string(),
        })?;

    let bytes = axum::body::to_bytes(body, MAX_SIGNED_BODY_BYTES)
        .await
        .map_err(|e| CallerAuthError::InvalidBody(e.to_string()))?;
    let caller = state
        .caller_auth
        .authenticate(parts.uri.path(), caller_nonce, &bytes, &signature)?;
    debug!(%caller, caller_nonce, "Request signed by caller");

    parts.extensions.insert(AuthenticatedCaller(caller));
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn header_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, CallerAuthError> {
    headers
        .get(name)
        .ok_or(CallerAuthError::MissingHeader(name))?
        .to_str()
        .map_err(|e| CallerAuthError::InvalidHeader {
            header: name,
            reason: e.to_string(),
        })
}
