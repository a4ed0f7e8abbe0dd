use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A single post, created by a user. The owner is fixed at creation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
	pub id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub content: String,
	/// Reference into the upload store; `default.png` when the post has no
	/// image of its own.
	pub filename: String,
	pub created_at: DateTime<Utc>,
}

/// The text fields of the add/edit forms. The optional image travels as a
/// separate multipart part and never lands here.
#[derive(Debug, Default, Validate)]
pub struct PostInput {
	#[validate(length(min = 1, max = 128))]
	pub title: String,
	#[validate(length(min = 1))]
	pub content: String,
}
