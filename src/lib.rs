pub mod assets;
pub mod config;
pub mod error;
pub mod extract;
pub mod icon;
pub mod ipa;
pub mod manifest;
pub mod paths;
pub mod plist_ext;

pub use assets::{AssetEntry, AssetKind};
pub use config::ExtractOptions;
pub use error::{IpaError, Result};
pub use extract::{extract_ipa_info, extract_ipa_info_with_options, IpaInfo};
pub use ipa::{EntryCategory, IpaArchive, StagedFile};
pub use manifest::BundleMetadata;
pub use paths::StagingLayout;
pub use plist_ext::PlistFile;
