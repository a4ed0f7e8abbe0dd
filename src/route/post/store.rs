use chrono::Utc;
use uuid::Uuid;

use crate::Database;

use super::model::Post;

/// All posts, newest first.
pub async fn list(db: &Database) -> Result<Vec<Post>, sqlx::Error> {
	sqlx::query_as::<_, Post>(
		"SELECT id, user_id, title, content, filename, created_at \
		 FROM posts ORDER BY created_at DESC",
	)
	.fetch_all(db)
	.await
}

pub async fn get(db: &Database, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
	sqlx::query_as::<_, Post>(
		"SELECT id, user_id, title, content, filename, created_at FROM posts WHERE id = ?",
	)
	.bind(id)
	.fetch_optional(db)
	.await
}

/// Creates a post owned by `owner_id`. A title collision surfaces as
/// [`Error::DuplicateTitle`](super::Error::DuplicateTitle) from the UNIQUE
/// constraint, never as a silent overwrite.
pub async fn create(
	db: &Database,
	owner_id: Uuid,
	title: &str,
	content: &str,
	filename: &str,
) -> Result<Post, crate::Error> {
	let post = Post {
		id: Uuid::new_v4(),
		user_id: owner_id,
		title: title.to_owned(),
		content: content.to_owned(),
		filename: filename.to_owned(),
		created_at: Utc::now(),
	};

	sqlx::query(
		"INSERT INTO posts (id, user_id, title, content, filename, created_at) \
		 VALUES (?, ?, ?, ?, ?, ?)",
	)
	.bind(post.id)
	.bind(post.user_id)
	.bind(&post.title)
	.bind(&post.content)
	.bind(&post.filename)
	.bind(post.created_at)
	.execute(db)
	.await
	.map_err(map_unique_violation)?;

	Ok(post)
}

/// Updates a post's fields after confirming `requester_id` owns it.
///
/// `filename = None` keeps the stored image: the COALESCE leaves the column
/// untouched rather than writing an empty value. The UPDATE re-keys on
/// `user_id`, so an unauthorized request never writes a single field.
pub async fn update(
	db: &Database,
	id: Uuid,
	requester_id: Uuid,
	title: &str,
	content: &str,
	filename: Option<&str>,
) -> Result<Post, crate::Error> {
	owned(db, id, requester_id).await?;

	let post = sqlx::query_as::<_, Post>(
		"UPDATE posts SET title = ?, content = ?, filename = COALESCE(?, filename) \
		 WHERE id = ? AND user_id = ? \
		 RETURNING id, user_id, title, content, filename, created_at",
	)
	.bind(title)
	.bind(content)
	.bind(filename)
	.bind(id)
	.bind(requester_id)
	.fetch_optional(db)
	.await
	.map_err(map_unique_violation)?;

	post.ok_or_else(|| crate::Error::Post(super::Error::UnknownPost(id)))
}

/// Deletes a post after confirming `requester_id` owns it.
pub async fn delete(db: &Database, id: Uuid, requester_id: Uuid) -> Result<(), crate::Error> {
	owned(db, id, requester_id).await?;

	let result = sqlx::query("DELETE FROM posts WHERE id = ? AND user_id = ?")
		.bind(id)
		.bind(requester_id)
		.execute(db)
		.await
		.map_err(crate::Error::Database)?;

	if result.rows_affected() == 0 {
		return Err(crate::Error::Post(super::Error::UnknownPost(id)));
	}

	Ok(())
}

/// Ownership gate for mutations: `Forbidden` when the requester is not the
/// owner, `UnknownPost` when the post does not exist. Ownership never
/// changes after creation, so a consistent read here plus the re-keyed
/// WHERE clause in the mutation is race-free.
pub async fn owned(db: &Database, id: Uuid, requester_id: Uuid) -> Result<(), crate::Error> {
	let owner = sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM posts WHERE id = ?")
		.bind(id)
		.fetch_optional(db)
		.await
		.map_err(crate::Error::Database)?;

	match owner {
		None => Err(crate::Error::Post(super::Error::UnknownPost(id))),
		Some(owner) if owner != requester_id => {
			Err(crate::Error::Post(super::Error::Forbidden(id)))
		}
		Some(_) => Ok(()),
	}
}

fn map_unique_violation(error: sqlx::Error) -> crate::Error {
	match error.as_database_error() {
		// `title` carries the only unique index on posts.
		Some(db) if db.is_unique_violation() => {
			crate::Error::Post(super::Error::DuplicateTitle)
		}
		_ => crate::Error::Database(error),
	}
}
