use crate::error::Result;
use crate::paths::copy_into_directory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Icon,
    ManifestInfo,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Icon => write!(f, "icon"),
            AssetKind::ManifestInfo => write!(f, "info.plist"),
        }
    }
}

/// A file left in the assets directory for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub path: PathBuf,
    pub kind: AssetKind,
}

/// Copies `source` into `assets_dir` and records it as an asset of `kind`.
pub fn materialize<P: AsRef<Path>, Q: AsRef<Path>>(assets_dir: P, source: Q, kind: AssetKind) -> Result<AssetEntry> {
    let path = copy_into_directory(assets_dir, source)?;
    Ok(AssetEntry { path, kind })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn materialize_copies_and_records() {
        let temp_dir = TempDir::new().unwrap();
        let assets = temp_dir.path().join("assets");
        fs::create_dir(&assets).unwrap();
        let source = temp_dir.path().join("Icon1.png");
        fs::write(&source, b"icon bytes").unwrap();

        let entry = materialize(&assets, &source, AssetKind::Icon).unwrap();

        assert_eq!(
            entry,
            AssetEntry {
                path: assets.join("Icon1.png"),
                kind: AssetKind::Icon,
            }
        );
        assert_eq!(fs::read(&entry.path).unwrap(), b"icon bytes");
        assert!(source.exists());
    }

    #[test]
    fn materialize_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("Info.plist");
        fs::write(&source, b"plist").unwrap();

        let result = materialize(temp_dir.path().join("missing"), &source, AssetKind::ManifestInfo);
        assert!(result.is_err());
    }

    #[test]
    fn kinds_serialize_by_name() {
        assert_eq!(serde_json::to_string(&AssetKind::ManifestInfo).unwrap(), "\"ManifestInfo\"");
        assert_eq!(AssetKind::Icon.to_string(), "icon");
    }
}
