use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::Course;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read course data from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed course data: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only source of course records backed by a JSON file.
///
/// The file is read and decoded on every call; nothing is cached between
/// requests.
#[derive(Clone, Debug)]
pub struct CourseStore {
    path: PathBuf,
}

impl CourseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<Course>, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })?;
        let courses = Self::decode(&raw)?;
        debug!(path = %self.path.display(), count = courses.len(), "loaded courses");
        Ok(courses)
    }

    /// Decodes a JSON array of course objects. Any record missing a required
    /// field fails the whole document.
    pub fn decode(raw: &str) -> Result<Vec<Course>, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
