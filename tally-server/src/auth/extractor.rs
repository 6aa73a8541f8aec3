//! Identity Extractor
//!
//! Custom extractor reading the trusted identity headers into a CurrentUser

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, USER_ID_HEADER, USER_NAME_HEADER};
use crate::core::ServerState;
use crate::utils::AppError;

/// Reads one trimmed, non-empty header value
fn header_value<'a>(parts: &'a Parts, name: &http::HeaderName) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted earlier in the request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let Some(user_id) = header_value(parts, &USER_ID_HEADER) else {
            tracing::warn!(target: "security", uri = %parts.uri, "Request without identity headers");
            return Err(AppError::Unauthorized);
        };

        let Some(display_name) = header_value(parts, &USER_NAME_HEADER) else {
            tracing::warn!(target: "security", uri = %parts.uri, "Request missing display name header");
            return Err(AppError::Unauthorized);
        };

        let user = CurrentUser {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
        };

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
