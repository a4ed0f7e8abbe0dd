use axum::{
	extract::{Request, State},
	http::header,
	middleware::Next,
	response::{IntoResponse, Redirect, Response},
};

use crate::{extract, route::auth::store, session, AppState};

/// The identity a request acts as, resolved once by the access gate and
/// trusted by every handler behind it.
#[derive(Debug, Clone)]
pub enum Identity {
	User(extract::Session),
	Anonymous,
}

/// Routes an unauthenticated visitor may reach.
const ALLOW_LIST: &[&str] = &["/login", "/register", "/health"];

#[must_use]
pub fn allows_anonymous(path: &str) -> bool {
	ALLOW_LIST.contains(&path)
}

/// Resolves the session cookie to an identity and enforces the
/// authenticated-or-allow-listed policy on every request.
///
/// A token that no longer resolves (expired or unknown) degrades to
/// anonymous and the dead cookie is cleared; it is never surfaced as an
/// error to the client.
pub async fn access_gate(
	State(state): State<AppState>,
	mut request: Request,
	next: Next,
) -> Response {
	let (identity, stale_cookie) = match session::token_from_headers(request.headers()) {
		None => (Identity::Anonymous, false),
		Some(token) => match store::resolve_session(&state.database, token).await {
			Ok(Some(user)) => (
				Identity::User(extract::Session { id: token, user }),
				false,
			),
			Ok(None) => (Identity::Anonymous, true),
			Err(error) => return crate::Error::Database(error).into_response(),
		},
	};

	if matches!(identity, Identity::Anonymous) && !allows_anonymous(request.uri().path()) {
		return with_cleared_cookie(
			Redirect::to("/login").into_response(),
			stale_cookie,
		);
	}

	request.extensions_mut().insert(identity);

	let response = next.run(request).await;
	with_cleared_cookie(response, stale_cookie)
}

fn with_cleared_cookie(mut response: Response, stale_cookie: bool) -> Response {
	if !stale_cookie {
		return response;
	}

	// A handler that just minted a fresh session (login, register) sets its
	// own cookie under the same name; appending the clear-cookie then would
	// sign the user straight back out.
	let already_sets_session = response
		.headers()
		.get_all(header::SET_COOKIE)
		.into_iter()
		.filter_map(|value| value.to_str().ok())
		.filter_map(|value| cookie::Cookie::parse(value).ok())
		.any(|cookie| cookie.name() == session::COOKIE_NAME);

	if !already_sets_session {
		if let Ok(value) = session::clear_cookie().to_string().parse() {
			response.headers_mut().append(header::SET_COOKIE, value);
		}
	}

	response
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn login_register_and_health_are_public() {
		assert!(allows_anonymous("/login"));
		assert!(allows_anonymous("/register"));
		assert!(allows_anonymous("/health"));
	}

	#[test]
	fn clearing_skips_responses_that_set_their_own_session_cookie() {
		let plain = with_cleared_cookie(Redirect::to("/login").into_response(), true);
		let cleared: Vec<_> = plain.headers().get_all(header::SET_COOKIE).into_iter().collect();
		assert_eq!(cleared.len(), 1);

		let fresh = session::create_cookie(uuid::Uuid::new_v4(), false);
		let login = with_cleared_cookie(
			(
				[(header::SET_COOKIE, fresh.to_string())],
				Redirect::to("/"),
			)
				.into_response(),
			true,
		);
		let kept: Vec<_> = login.headers().get_all(header::SET_COOKIE).into_iter().collect();
		assert_eq!(kept.len(), 1);
		assert_eq!(kept[0].to_str().unwrap(), fresh.to_string());
	}

	#[test]
	fn everything_else_requires_a_session() {
		assert!(!allows_anonymous("/"));
		assert!(!allows_anonymous("/add-post"));
		assert!(!allows_anonymous("/logout"));
		assert!(!allows_anonymous("/login/"));
	}
}
