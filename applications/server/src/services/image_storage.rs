//! Media file storage on the local filesystem
//!
//! Uploaded images and audio land under the configured media directory and
//! are served back by the static `/media` route. Files are renamed to a
//! generated id so uploads can never collide or traverse paths.

use std::path::{Path, PathBuf};

use mixtape_core::MixtapeError;
use uuid::Uuid;

use crate::error::Result;

const IMAGES_SUBDIR: &str = "images";
const AUDIO_SUBDIR: &str = "audio";

pub struct ImageStorage {
    media_dir: PathBuf,
}

impl ImageStorage {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
        }
    }

    /// Create the media directory layout if it does not exist yet
    pub async fn initialize(&self) -> Result<()> {
        for subdir in [IMAGES_SUBDIR, AUDIO_SUBDIR] {
            tokio::fs::create_dir_all(self.media_dir.join(subdir)).await?;
        }
        Ok(())
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Store an uploaded image, returning its public URL path
    pub async fn store_image(&self, data: &[u8], content_type: Option<&str>) -> Result<String> {
        self.store(IMAGES_SUBDIR, data, content_type, "png").await
    }

    /// Store an uploaded audio file, returning its public URL path
    pub async fn store_audio(&self, data: &[u8], content_type: Option<&str>) -> Result<String> {
        self.store(AUDIO_SUBDIR, data, content_type, "mp3").await
    }

    async fn store(
        &self,
        subdir: &str,
        data: &[u8],
        content_type: Option<&str>,
        default_extension: &str,
    ) -> Result<String> {
        if data.is_empty() {
            return Err(MixtapeError::upload("Uploaded file is empty").into());
        }

        let extension = content_type
            .and_then(extension_for)
            .unwrap_or(default_extension);
        let filename = format!("{}.{extension}", Uuid::new_v4());
        let path = self.media_dir.join(subdir).join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| MixtapeError::upload(format!("Failed to write {subdir} file: {e}")))?;

        Ok(format!("/media/{subdir}/{filename}"))
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    mime_guess::get_mime_extensions_str(content_type).and_then(|exts| exts.first().copied())
}
