/// Bearer token authentication
///
/// Credentials are `Bearer <base64(JSON)>` where the JSON object carries the
/// numeric user id, e.g. `{"id": 4}`. There is no signature: the token is an
/// opaque identity assertion for the mock backend.
///
/// `identify` keeps the failure cause for logging. `authenticate` collapses
/// every failure to [`INVALID_USER_ID`] and never panics, so a malformed
/// token is indistinguishable from a missing one.
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde_json::Value;
use thiserror::Error;

use crate::models::UserId;

/// Returned by [`authenticate`] for any rejected credential
pub const INVALID_USER_ID: i64 = -1;

const BEARER_PREFIX: &str = "Bearer ";

/// Standard alphabet; padding optional
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Authorization header does not use the Bearer scheme")]
    MissingBearerScheme,

    #[error("Token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Token is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token is not a JSON object")]
    NotAnObject,

    #[error("Token has no id")]
    MissingId,

    #[error("Token id is not a valid user id: {0}")]
    InvalidId(Value),
}

/// Decode an `Authorization` header value into the asserted user id
pub fn identify(authorization: &str) -> Result<UserId, TokenError> {
    let token = authorization
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenError::MissingBearerScheme)?
        .trim();

    let bytes = TOKEN_ENGINE.decode(token)?;
    let text = String::from_utf8(bytes)?;
    let claims: Value = serde_json::from_str(&text)?;

    let id = claims
        .as_object()
        .ok_or(TokenError::NotAnObject)?
        .get("id")
        .ok_or(TokenError::MissingId)?;

    // Any integral JSON number (7, 7.0, 1e2) that fits the signed boundary
    id.as_u64()
        .or_else(|| id.as_f64().and_then(integral_f64_id))
        .filter(|id| i64::try_from(*id).is_ok())
        .ok_or_else(|| TokenError::InvalidId(id.clone()))
}

fn integral_f64_id(value: f64) -> Option<UserId> {
    // i64::MAX as f64 rounds up to 2^63, which the i64 check above rejects
    (value.is_finite() && value.fract() == 0.0 && (0.0..=i64::MAX as f64).contains(&value))
        .then_some(value as UserId)
}

/// Decode an `Authorization` header value, or [`INVALID_USER_ID`]
pub fn authenticate(authorization: &str) -> i64 {
    match identify(authorization) {
        Ok(user_id) => i64::try_from(user_id).unwrap_or(INVALID_USER_ID),
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer credential");
            INVALID_USER_ID
        }
    }
}
