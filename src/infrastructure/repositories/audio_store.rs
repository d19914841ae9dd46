use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Fixed-path store for the latest audio artifact.
///
/// Every save overwrites the previous file. Saves are serialized so concurrent
/// requests never interleave bytes in the file; the last writer wins.
pub struct AudioStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl AudioStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the artifact with `audio` and return its path
    pub async fn save(&self, audio: &[u8]) -> std::io::Result<PathBuf> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, audio).await?;

        tracing::debug!(
            path = %self.path.display(),
            audio_size = audio.len(),
            "Audio artifact written"
        );

        Ok(self.path.clone())
    }

    /// Read the latest artifact, `None` if nothing has been generated yet
    pub async fn load(&self) -> std::io::Result<Option<Vec<u8>>> {
        let _guard = self.write_lock.lock().await;

        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
