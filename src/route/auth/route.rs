use axum::{
	extract::State,
	http::{header, StatusCode},
	response::{IntoResponse, Redirect, Response},
	Form,
};
use validator::Validate;

use crate::{
	extract::{MaybeSession, Session},
	password,
	render::{Html, LoginTemplate, RegisterTemplate},
	session, AppState,
};

use super::{model, store, Error};

/// Renders the login form, or straight to the home page when already
/// signed in.
pub async fn login_form(MaybeSession(session): MaybeSession) -> Response {
	if session.is_some() {
		return Redirect::to("/").into_response();
	}

	Html(LoginTemplate { error: None }).into_response()
}

pub async fn register_form(MaybeSession(session): MaybeSession) -> Response {
	if session.is_some() {
		return Redirect::to("/").into_response();
	}

	Html(RegisterTemplate { error: None }).into_response()
}

/// Verifies the submitted credentials and mints a session cookie.
///
/// Validation-class failures re-render the form with a message; only
/// storage or hash-primitive failures propagate to the error page.
pub async fn login(
	State(state): State<AppState>,
	Form(input): Form<model::LoginInput>,
) -> Result<Response, crate::Error> {
	if input.validate().is_err() {
		return Ok(login_error(&Error::InvalidCredentials));
	}

	let Some(user) = store::find_user_by_email(&state.database, &input.email).await? else {
		// Same response as a wrong password so the form cannot be used
		// to enumerate accounts.
		tracing::debug!(email = %input.email, "login attempt for unknown email");
		return Ok(login_error(&Error::InvalidCredentials));
	};

	if !password::verify(&state.hasher, &input.password, &user.password_hash)? {
		tracing::debug!(user = %user.id, "login attempt with wrong password");
		return Ok(login_error(&Error::InvalidCredentials));
	}

	let session = store::create_session(&state.database, user.id, session::ttl()).await?;
	let cookie = session::create_cookie(session.id, state.config.cookie_secure);

	Ok((
		[(header::SET_COOKIE, cookie.to_string())],
		Redirect::to("/"),
	)
		.into_response())
}

/// Registers a new account and signs it in.
pub async fn register(
	State(state): State<AppState>,
	Form(input): Form<model::RegisterInput>,
) -> Result<Response, crate::Error> {
	if let Err(errors) = input.validate() {
		return Ok(register_error(
			StatusCode::BAD_REQUEST,
			&errors.to_string(),
		));
	}

	// Compared before any hashing or storage work.
	if input.password != input.confirm_password {
		let error = Error::PasswordMismatch;
		return Ok(register_error(error.status(), &error.to_string()));
	}

	let password_hash = password::hash(&state.hasher, &input.password)?;

	match store::register_user(
		&state.database,
		&input.username,
		&input.email,
		&password_hash,
		session::ttl(),
	)
	.await
	{
		Ok((user, session)) => {
			tracing::info!(user = %user.id, "registered new user");
			let cookie = session::create_cookie(session.id, state.config.cookie_secure);

			Ok((
				[(header::SET_COOKIE, cookie.to_string())],
				Redirect::to("/"),
			)
				.into_response())
		}
		Err(crate::Error::Auth(error @ Error::DuplicateEmail)) => {
			Ok(register_error(error.status(), &error.to_string()))
		}
		Err(error) => Err(error),
	}
}

/// Destroys the current session and clears its cookie.
pub async fn logout(
	State(state): State<AppState>,
	session: Session,
) -> Result<Response, crate::Error> {
	store::destroy_session(&state.database, session.id).await?;

	Ok((
		[(header::SET_COOKIE, session::clear_cookie().to_string())],
		Redirect::to("/login"),
	)
		.into_response())
}

fn login_error(error: &Error) -> Response {
	(
		error.status(),
		Html(LoginTemplate {
			error: Some(error.to_string()),
		}),
	)
		.into_response()
}

fn register_error(status: StatusCode, message: &str) -> Response {
	(
		status,
		Html(RegisterTemplate {
			error: Some(message.to_string()),
		}),
	)
		.into_response()
}
