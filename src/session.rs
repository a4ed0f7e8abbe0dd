use axum::http::{header, HeaderMap};
use uuid::Uuid;

pub const COOKIE_NAME: &str = "session";

/// Sessions live for 12 hours from creation.
pub const SESSION_TTL_HOURS: i64 = 12;

#[must_use]
pub fn ttl() -> chrono::Duration {
	chrono::Duration::hours(SESSION_TTL_HOURS)
}

/// Creates a session cookie bound to the session's lifetime.
#[must_use]
pub fn create_cookie(session_id: Uuid, secure: bool) -> cookie::Cookie<'static> {
	cookie::Cookie::build((COOKIE_NAME, session_id.to_string()))
		.secure(secure)
		.http_only(true)
		.path("/")
		.max_age(cookie::time::Duration::hours(SESSION_TTL_HOURS))
		.into()
}

/// Creates an empty session cookie used to invalidate a previous one.
#[must_use]
pub fn clear_cookie() -> cookie::Cookie<'static> {
	cookie::Cookie::build(COOKIE_NAME)
		.http_only(true)
		.path("/")
		.max_age(cookie::time::Duration::ZERO)
		.into()
}

/// Extracts the session token from a request's cookie headers. The token is
/// opaque to the client; anything that does not parse as one is ignored.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
	headers
		.get_all(header::COOKIE)
		.into_iter()
		.filter_map(|value| value.to_str().ok())
		.flat_map(cookie::Cookie::split_parse)
		.filter_map(Result::ok)
		.find(|cookie| cookie.name() == COOKIE_NAME)
		.and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}
