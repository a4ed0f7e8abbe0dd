use axum::{
	extract::{Multipart, Path, State},
	http::StatusCode,
	response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
	extract::Session,
	render::{self, EditPostTemplate, Html, PostTemplate},
	upload, AppState, Database,
};

use super::{model, store, Error};

/// The `title`/`content`/`image` parts of an add or edit form.
struct PostForm {
	input: model::PostInput,
	image: Option<(String, Vec<u8>)>,
}

async fn read_form(mut multipart: Multipart) -> Result<PostForm, crate::Error> {
	let mut input = model::PostInput::default();
	let mut image = None;

	while let Some(field) = multipart.next_field().await? {
		match field.name() {
			Some("title") => input.title = field.text().await?,
			Some("content") => input.content = field.text().await?,
			Some("image") => {
				let filename = field.file_name().map(ToOwned::to_owned);
				let bytes = field.bytes().await?;

				// Browsers submit an empty file part when nothing was
				// selected; that means "keep the current image".
				if let Some(filename) = filename.filter(|_| !bytes.is_empty()) {
					image = Some((filename, bytes.to_vec()));
				}
			}
			_ => {}
		}
	}

	Ok(PostForm { input, image })
}

/// Creates a post owned by the authenticated user.
pub async fn add_post(
	State(state): State<AppState>,
	session: Session,
	multipart: Multipart,
) -> Result<Response, crate::Error> {
	let form = read_form(multipart).await?;

	if let Err(errors) = form.input.validate() {
		return Ok(render::message_page(
			StatusCode::BAD_REQUEST,
			&errors.to_string(),
		));
	}

	let filename = match &form.image {
		Some((name, bytes)) => upload::store(&state.config.upload_dir, name, bytes).await?,
		None => upload::DEFAULT_IMAGE.to_owned(),
	};

	match store::create(
		&state.database,
		session.user.id,
		&form.input.title,
		&form.input.content,
		&filename,
	)
	.await
	{
		Ok(post) => {
			tracing::debug!(post = %post.id, "created post");
			Ok(Redirect::to("/").into_response())
		}
		Err(crate::Error::Post(error @ Error::DuplicateTitle)) => {
			Ok(render::message_page(error.status(), &error.to_string()))
		}
		Err(error) => Err(error),
	}
}

/// Shows a single post; the owner additionally gets edit and delete links.
pub async fn view_post(
	State(database): State<Database>,
	session: Session,
	Path(id): Path<Uuid>,
) -> Result<Response, crate::Error> {
	let post = store::get(&database, id)
		.await?
		.ok_or(Error::UnknownPost(id))?;
	let owned = post.user_id == session.user.id;

	Ok(Html(PostTemplate { post, owned }).into_response())
}

/// Renders the edit form, pre-filled with the current fields. Only the
/// owner may see it.
pub async fn edit_form(
	State(database): State<Database>,
	session: Session,
	Path(id): Path<Uuid>,
) -> Result<Response, crate::Error> {
	store::owned(&database, id, session.user.id).await?;

	let post = store::get(&database, id)
		.await?
		.ok_or(Error::UnknownPost(id))?;

	Ok(Html(EditPostTemplate { post }).into_response())
}

/// Applies an edit. When no new image is supplied the stored filename is
/// retained; ownership is checked before the upload lands on disk and
/// again inside the repository before any column is written.
pub async fn edit_post(
	State(state): State<AppState>,
	session: Session,
	Path(id): Path<Uuid>,
	multipart: Multipart,
) -> Result<Response, crate::Error> {
	store::owned(&state.database, id, session.user.id).await?;

	let form = read_form(multipart).await?;

	if let Err(errors) = form.input.validate() {
		return Ok(render::message_page(
			StatusCode::BAD_REQUEST,
			&errors.to_string(),
		));
	}

	let filename = match &form.image {
		Some((name, bytes)) => {
			Some(upload::store(&state.config.upload_dir, name, bytes).await?)
		}
		None => None,
	};

	match store::update(
		&state.database,
		id,
		session.user.id,
		&form.input.title,
		&form.input.content,
		filename.as_deref(),
	)
	.await
	{
		Ok(post) => Ok(Redirect::to(&format!("/post/{}", post.id)).into_response()),
		Err(crate::Error::Post(error @ Error::DuplicateTitle)) => {
			Ok(render::message_page(error.status(), &error.to_string()))
		}
		Err(error) => Err(error),
	}
}

/// Deletes a post after the repository's ownership check.
pub async fn delete_post(
	State(database): State<Database>,
	session: Session,
	Path(id): Path<Uuid>,
) -> Result<Response, crate::Error> {
	store::delete(&database, id, session.user.id).await?;

	Ok(Redirect::to("/").into_response())
}
