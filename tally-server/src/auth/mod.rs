//! Identity layer - trusted upstream identity headers
//!
//! The settlement node runs behind an identity-terminating gateway. Requests
//! arrive carrying `x-user-id` and `x-user-name` headers that were verified
//! upstream; this module turns them into a [`CurrentUser`] and rejects
//! anything without them. No sessions or tokens are handled here.

use http::HeaderName;

mod extractor;

/// Header carrying the caller's external identity
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");
/// Header carrying the caller's display name
pub const USER_NAME_HEADER: HeaderName = HeaderName::from_static("x-user-name");

/// The authenticated actor of the current request
///
/// Stamped as `operator_id`/`operator_name` on every command the
/// request dispatches.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// External identity, stable across requests
    pub user_id: String,
    /// Display name snapshot
    pub display_name: String,
}
