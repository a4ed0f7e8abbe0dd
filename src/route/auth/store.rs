use chrono::Utc;
use uuid::Uuid;

use crate::Database;

use super::model::{Session, User};

pub async fn find_user_by_email(
	db: &Database,
	email: &str,
) -> Result<Option<User>, sqlx::Error> {
	sqlx::query_as::<_, User>(
		"SELECT id, username, email, password_hash, created_at FROM users WHERE email = ?",
	)
	.bind(email)
	.fetch_optional(db)
	.await
}

/// Used by session resolution to attach the full user to a request.
pub async fn find_user_by_id(db: &Database, id: Uuid) -> Result<Option<User>, sqlx::Error> {
	sqlx::query_as::<_, User>(
		"SELECT id, username, email, password_hash, created_at FROM users WHERE id = ?",
	)
	.bind(id)
	.fetch_optional(db)
	.await
}

/// Creates the user and their first session in one transaction:
/// registration implies login, and a failed session insert must not leave a
/// half-registered account behind.
///
/// The UNIQUE index on `email` is the source of truth for duplicates;
/// racing registrations for the same email lose here, not in a pre-check.
pub async fn register_user(
	db: &Database,
	username: &str,
	email: &str,
	password_hash: &str,
	ttl: chrono::Duration,
) -> Result<(User, Session), crate::Error> {
	let user = User {
		id: Uuid::new_v4(),
		username: username.to_owned(),
		email: email.to_owned(),
		password_hash: password_hash.to_owned(),
		created_at: Utc::now(),
	};
	let session = Session {
		id: Uuid::new_v4(),
		user_id: user.id,
		expires_at: Utc::now() + ttl,
	};

	let mut tx = db.begin().await.map_err(crate::Error::Database)?;

	sqlx::query(
		"INSERT INTO users (id, username, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
	)
	.bind(user.id)
	.bind(&user.username)
	.bind(&user.email)
	.bind(&user.password_hash)
	.bind(user.created_at)
	.execute(&mut *tx)
	.await
	.map_err(map_unique_violation)?;

	sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES (?, ?, ?)")
		.bind(session.id)
		.bind(session.user_id)
		.bind(session.expires_at)
		.execute(&mut *tx)
		.await
		.map_err(crate::Error::Database)?;

	tx.commit().await.map_err(crate::Error::Database)?;

	Ok((user, session))
}

/// Mints a session for `user_id` lasting `ttl` from now.
pub async fn create_session(
	db: &Database,
	user_id: Uuid,
	ttl: chrono::Duration,
) -> Result<Session, sqlx::Error> {
	let session = Session {
		id: Uuid::new_v4(),
		user_id,
		expires_at: Utc::now() + ttl,
	};

	sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES (?, ?, ?)")
		.bind(session.id)
		.bind(session.user_id)
		.bind(session.expires_at)
		.execute(db)
		.await?;

	Ok(session)
}

pub async fn find_session(db: &Database, token: Uuid) -> Result<Option<Session>, sqlx::Error> {
	sqlx::query_as::<_, Session>(
		"SELECT id, user_id, expires_at FROM sessions WHERE id = ?",
	)
	.bind(token)
	.fetch_optional(db)
	.await
}

/// Resolves a token to its user. Unknown and expired tokens are both
/// `None`; expired rows are deleted on the way out (lazy eviction, no
/// background sweep).
pub async fn resolve_session(db: &Database, token: Uuid) -> Result<Option<User>, sqlx::Error> {
	let Some(session) = find_session(db, token).await? else {
		return Ok(None);
	};

	if session.expires_at < Utc::now() {
		destroy_session(db, token).await?;
		return Ok(None);
	}

	find_user_by_id(db, session.user_id).await
}

pub async fn destroy_session(db: &Database, token: Uuid) -> Result<(), sqlx::Error> {
	sqlx::query("DELETE FROM sessions WHERE id = ?")
		.bind(token)
		.execute(db)
		.await?;

	Ok(())
}

fn map_unique_violation(error: sqlx::Error) -> crate::Error {
	match error.as_database_error() {
		// `email` carries the only unique index on users.
		Some(db) if db.is_unique_violation() => crate::Error::Auth(super::Error::DuplicateEmail),
		_ => crate::Error::Database(error),
	}
}
