use axum::{extract::FromRequestParts, http::request, response::Redirect};
use uuid::Uuid;

use crate::{gate::Identity, route::auth::model::User};

/// The session-backed identity the access gate attached to the request.
///
/// Handlers behind the gate trust this without re-checking authentication;
/// mutation handlers still perform their own ownership checks.
///
/// ```rust,ignore
/// async fn route(session: Session) {
///   println!("{:?}", session.user);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
	pub id: Uuid,
	pub user: User,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
	S: Send + Sync,
{
	type Rejection = Redirect;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		match parts.extensions.get::<Identity>() {
			Some(Identity::User(session)) => Ok(session.clone()),
			// Only reachable from a route mounted outside the gate.
			_ => Err(Redirect::to("/login")),
		}
	}
}

/// Optional variant for allow-listed pages that adapt to a signed-in user
/// instead of requiring one.
#[derive(Debug)]
pub struct MaybeSession(pub Option<Session>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeSession
where
	S: Send + Sync,
{
	type Rejection = std::convert::Infallible;

	async fn from_request_parts(
		parts: &mut request::Parts,
		_state: &S,
	) -> Result<Self, Self::Rejection> {
		Ok(Self(match parts.extensions.get::<Identity>() {
			Some(Identity::User(session)) => Some(session.clone()),
			_ => None,
		}))
	}
}
