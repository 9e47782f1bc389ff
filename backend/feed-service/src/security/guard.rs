use tracing::warn;

use super::token::identify;
use crate::error::{FeedError, Result};
use crate::models::UserId;

/// A caller may only act on its own resources
pub fn authorize(authenticated_id: UserId, target_id: UserId) -> bool {
    authenticated_id == target_id
}

/// Authenticate the `Authorization` header and check it against `target_id`.
///
/// Returns the authenticated user id. Performs no store access, so a
/// rejected caller learns nothing about the target's data.
pub fn authorize_request(authorization: Option<&str>, target_id: UserId) -> Result<UserId> {
    let Some(header) = authorization else {
        warn!(target_id, "Request without Authorization header");
        return Err(FeedError::Unauthenticated);
    };

    let authenticated_id = identify(header).map_err(|err| {
        warn!(target_id, error = %err, "Rejected bearer credential");
        FeedError::Unauthenticated
    })?;

    if !authorize(authenticated_id, target_id) {
        warn!(
            authenticated_id,
            target_id, "Authenticated user does not match target user"
        );
        return Err(FeedError::Unauthorized {
            authenticated: authenticated_id,
            target: target_id,
        });
    }

    Ok(authenticated_id)
}
