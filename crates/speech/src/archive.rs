//! On-disk copies of synthesized clips
//!
//! Each clip gets its own UUID file name, so concurrent requests never write
//! to the same path.

use std::path::{Path, PathBuf};

use conversation_relay_core::Result;

#[derive(Debug, Clone)]
pub struct AudioArchive {
    dir: PathBuf,
}

impl AudioArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `audio` to a fresh file and return its path
    pub async fn store(&self, audio: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("{}.mp3", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, audio).await?;
        tracing::debug!(path = %path.display(), bytes = audio.len(), "Archived TTS clip");
        Ok(path)
    }
}
