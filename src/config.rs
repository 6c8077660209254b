use crate::error::{IpaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

pub const MANIFEST_PATTERN: &str = "**/*.app/Info.plist";
pub const ICON_PATTERN: &str = "**/*.app/*icon*";

pub const SUBDIRECTORY_PLISTS: &str = "plists";
pub const SUBDIRECTORY_ICONS: &str = "icons";
pub const SUBDIRECTORY_ASSETS: &str = "assets";

/// Knobs for a single extraction.
///
/// Patterns are glob expressions matched case-insensitively against archive
/// entry names, with `/` as a literal separator. The subdirectory names are
/// joined onto the destination root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    #[serde(default = "default_manifest_pattern")]
    pub manifest_pattern: String,
    #[serde(default = "default_icon_pattern")]
    pub icon_pattern: String,
    #[serde(default = "default_plists_dir")]
    pub plists_dir: String,
    #[serde(default = "default_icons_dir")]
    pub icons_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

fn default_manifest_pattern() -> String {
    MANIFEST_PATTERN.to_string()
}

fn default_icon_pattern() -> String {
    ICON_PATTERN.to_string()
}

fn default_plists_dir() -> String {
    SUBDIRECTORY_PLISTS.to_string()
}

fn default_icons_dir() -> String {
    SUBDIRECTORY_ICONS.to_string()
}

fn default_assets_dir() -> String {
    SUBDIRECTORY_ASSETS.to_string()
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            manifest_pattern: default_manifest_pattern(),
            icon_pattern: default_icon_pattern(),
            plists_dir: default_plists_dir(),
            icons_dir: default_icons_dir(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl ExtractOptions {
    /// Subdirectory names must be single, distinct, plain path components.
    pub fn validate(&self) -> Result<()> {
        let dirs = [&self.plists_dir, &self.icons_dir, &self.assets_dir];
        for dir in dirs {
            let mut components = Path::new(dir.as_str()).components();
            let plain = matches!(components.next(), Some(Component::Normal(_)))
                && components.next().is_none();
            if !plain {
                return Err(IpaError::InvalidInput(format!(
                    "subdirectory name must be a single path component: {:?}",
                    dir
                )));
            }
        }

        if dirs[0] == dirs[1] || dirs[0] == dirs[2] || dirs[1] == dirs[2] {
            return Err(IpaError::InvalidInput(
                "subdirectory names must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}
