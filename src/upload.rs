use std::path::Path;

use tokio::fs;
use uuid::Uuid;

/// Sentinel filename used when a post has no uploaded image.
pub const DEFAULT_IMAGE: &str = "default.png";

/// Stores an uploaded image under `dir`, returning the generated filename.
/// The original name only contributes its extension; the stored name is
/// opaque so uploads can never collide or traverse paths.
pub async fn store(dir: &Path, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
	let extension = Path::new(original_name)
		.extension()
		.and_then(|ext| ext.to_str())
		.unwrap_or("bin");
	let filename = format!("{}.{extension}", Uuid::new_v4());

	fs::create_dir_all(dir).await?;
	fs::write(dir.join(&filename), bytes).await?;

	Ok(filename)
}
