use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A registered user.
///
/// The `email` and `password_hash` fields are never serialized to the
/// client.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
	pub id: Uuid,
	pub username: String,
	#[serde(skip_serializing)]
	pub email: String,
	#[serde(skip_serializing)]
	pub password_hash: String,
	pub created_at: DateTime<Utc>,
}

/// A session row mapping an opaque token to its user.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
	pub id: Uuid,
	pub user_id: Uuid,
	pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 3, max = 128))]
	pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
	#[validate(length(min = 3, max = 16))]
	pub username: String,
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 3, max = 128))]
	pub password: String,
	#[serde(rename = "confirmPassword")]
	pub confirm_password: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn register_input_rejects_bad_email() {
		let input = RegisterInput {
			username: "alice".to_string(),
			email: "not-an-email".to_string(),
			password: "hunter22".to_string(),
			confirm_password: "hunter22".to_string(),
		};

		assert!(input.validate().is_err());
	}

	#[test]
	fn register_form_uses_the_confirm_password_field_name() {
		let input: RegisterInput = serde_urlencoded::from_str(
			"username=alice&email=alice%40x.com&password=pw1&confirmPassword=pw1",
		)
		.unwrap();

		assert_eq!(input.confirm_password, "pw1");
	}
}
