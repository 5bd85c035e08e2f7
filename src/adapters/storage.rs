use crate::domain::ports::ArtifactStore;
use crate::utils::error::{Result, ScreenError};
use async_trait::async_trait;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Artifacts stored as individual files inside one directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    base_path: PathBuf,
}

impl DirectoryStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl ArtifactStore for DirectoryStore {
    fn describe(&self) -> String {
        format!("directory {}", self.base_path.display())
    }

    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(name);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ScreenError::ArtifactMissing {
                    name: name.to_string(),
                    location: full_path.display().to_string(),
                })
            }
            Err(e) => Err(ScreenError::ArtifactCorrupt {
                name: name.to_string(),
                reason: format!("unreadable: {}", e),
            }),
        }
    }
}

/// Artifacts packed as entries of a single `.zip` bundle.
#[derive(Debug, Clone)]
pub struct ZipBundleStore {
    archive_path: PathBuf,
}

impl ZipBundleStore {
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
        }
    }
}

#[async_trait]
impl ArtifactStore for ZipBundleStore {
    fn describe(&self) -> String {
        format!("bundle {}", self.archive_path.display())
    }

    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let bytes = match tokio::fs::read(&self.archive_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScreenError::ArtifactMissing {
                    name: name.to_string(),
                    location: self.archive_path.display().to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
        let mut entry = match archive.by_name(name) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(ScreenError::ArtifactMissing {
                    name: name.to_string(),
                    location: format!("{}!{}", self.archive_path.display(), name),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let mut data = Vec::new();
        entry.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// A location ending in `.zip` is a bundle, anything else a directory.
pub fn open_store(location: &Path) -> Box<dyn ArtifactStore> {
    let is_bundle = location
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));

    if is_bundle {
        Box::new(ZipBundleStore::new(location))
    } else {
        Box::new(DirectoryStore::new(location))
    }
}
