use crate::assets::{materialize, AssetEntry, AssetKind};
use crate::config::ExtractOptions;
use crate::error::Result;
use crate::icon::{list_files, select_largest, ListedFile};
use crate::ipa::{EntryMatcher, IpaArchive};
use crate::manifest::{select_manifest, BundleMetadata};
use crate::paths::{ensure_directories, remove_directories, StagingLayout, SubDirectory};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of a successful extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpaInfo {
    pub metadata: BundleMetadata,
    pub assets: Vec<AssetEntry>,
}

impl IpaInfo {
    pub fn asset(&self, kind: AssetKind) -> Option<&AssetEntry> {
        self.assets.iter().find(|a| a.kind == kind)
    }
}

/// [`extract_ipa_info_with_options`] with the default layout and patterns.
pub fn extract_ipa_info<P: AsRef<Path>, Q: AsRef<Path>>(ipa_path: P, dest: Q) -> Result<IpaInfo> {
    extract_ipa_info_with_options(ipa_path, dest, &ExtractOptions::default())
}

/// Pulls the app's `Info.plist` and largest icon out of an `.ipa`.
///
/// Matching entries are staged under `dest`, the chosen manifest and icon are
/// copied into the assets directory, and the staging directories are removed
/// again. Only a failure to open the archive or to clean up the staging
/// directories is returned; everything in between is logged and the
/// extraction carries on with whatever was staged. A cleanup failure discards
/// the result even though the asset files are already on disk.
///
/// Calls sharing a `dest` must not run concurrently.
pub fn extract_ipa_info_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    ipa_path: P,
    dest: Q,
    options: &ExtractOptions,
) -> Result<IpaInfo> {
    options.validate()?;
    let matcher = EntryMatcher::new(options)?;
    let layout = StagingLayout::new(dest, options);

    let archive = IpaArchive::open(ipa_path)?;
    debug!(
        "opened {} ({} entries)",
        archive.path().display(),
        archive.len()
    );

    if let Err(e) = ensure_directories(layout.all()) {
        warn!("could not create staging directories: {}", e);
    }

    match archive.scan(&layout, &matcher) {
        Ok(staged) => debug!("staged {} file(s)", staged.len()),
        Err(e) => warn!("extraction stopped early: {}", e),
    }

    let assets_dir = layout.path(SubDirectory::Assets);
    let mut info = IpaInfo::default();

    let manifests = staged_files(&layout, SubDirectory::Plists);
    if let Some((path, metadata)) = select_manifest(manifests.iter().map(|f| &f.path)) {
        match materialize(assets_dir, &path, AssetKind::ManifestInfo) {
            Ok(asset) => info.assets.push(asset),
            Err(e) => warn!("could not copy {}: {}", path.display(), e),
        }
        info.metadata = metadata;
    }

    if let Some(icon) = select_largest(staged_files(&layout, SubDirectory::Icons)) {
        match materialize(assets_dir, &icon.path, AssetKind::Icon) {
            Ok(asset) => info.assets.push(asset),
            Err(e) => warn!("could not copy {}: {}", icon.path.display(), e),
        }
    }

    remove_directories(layout.staging())?;

    info!(
        "extracted {} asset(s) for {:?}",
        info.assets.len(),
        info.metadata.bundle_identifier
    );
    Ok(info)
}

fn staged_files(layout: &StagingLayout, dir: SubDirectory) -> Vec<ListedFile> {
    let path = layout.path(dir);
    list_files(path).unwrap_or_else(|e| {
        warn!("could not list {}: {}", path.display(), e);
        Vec::new()
    })
}
