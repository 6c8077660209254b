use crate::error::Result;
use crate::plist_ext::PlistFile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const KEY_BUNDLE_NAME: &str = "CFBundleName";
pub const KEY_DISPLAY_NAME: &str = "CFBundleDisplayName";
pub const KEY_BUNDLE_VERSION: &str = "CFBundleVersion";
pub const KEY_SHORT_VERSION: &str = "CFBundleShortVersionString";
pub const KEY_BUNDLE_IDENTIFIER: &str = "CFBundleIdentifier";

/// Identity and version fields read from an app's `Info.plist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleMetadata {
    pub bundle_name: String,
    pub display_name: String,
    pub bundle_version: String,
    pub short_version: String,
    pub bundle_identifier: String,
}

impl BundleMetadata {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let pl = PlistFile::open(path)?;
        Ok(Self::from_plist(&pl))
    }

    pub fn from_plist(pl: &PlistFile) -> Self {
        Self {
            bundle_name: pl.string_or_empty(KEY_BUNDLE_NAME),
            display_name: pl.string_or_empty(KEY_DISPLAY_NAME),
            bundle_version: pl.string_or_empty(KEY_BUNDLE_VERSION),
            short_version: pl.string_or_empty(KEY_SHORT_VERSION),
            bundle_identifier: pl.string_or_empty(KEY_BUNDLE_IDENTIFIER),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.bundle_identifier.is_empty()
    }
}

/// Returns the first manifest, in the given order, that decodes and carries
/// a bundle identifier. Undecodable files are logged and skipped.
pub fn select_manifest<I, P>(paths: I) -> Option<(PathBuf, BundleMetadata)>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        match BundleMetadata::open(path) {
            Ok(metadata) if metadata.is_valid() => {
                debug!(
                    "using {} ({})",
                    path.display(),
                    metadata.bundle_identifier
                );
                return Some((path.to_path_buf(), metadata));
            }
            Ok(_) => debug!("{} has no bundle identifier", path.display()),
            Err(e) => warn!("skipping {}: {}", path.display(), e),
        }
    }
    None
}
