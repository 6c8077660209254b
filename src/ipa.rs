use crate::config::ExtractOptions;
use crate::error::{IpaError, Result};
use crate::paths::{StagingLayout, SubDirectory};
use glob::{MatchOptions, Pattern};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryCategory {
    Manifest,
    Icon,
}

impl EntryCategory {
    pub fn staging_dir(self) -> SubDirectory {
        match self {
            EntryCategory::Manifest => SubDirectory::Plists,
            EntryCategory::Icon => SubDirectory::Icons,
        }
    }
}

/// Classifies archive entry names as manifest, icon, or neither.
#[derive(Debug, Clone)]
pub struct EntryMatcher {
    manifest: Pattern,
    icon: Pattern,
}

impl EntryMatcher {
    pub fn new(options: &ExtractOptions) -> Result<Self> {
        Ok(Self {
            manifest: Pattern::new(&options.manifest_pattern)?,
            icon: Pattern::new(&options.icon_pattern)?,
        })
    }

    /// Manifest matches win over icon matches.
    pub fn classify(&self, entry_name: &str) -> Option<EntryCategory> {
        let name = entry_name.trim_end_matches('/');
        if self.manifest.matches_with(name, MATCH_OPTIONS) {
            Some(EntryCategory::Manifest)
        } else if self.icon.matches_with(name, MATCH_OPTIONS) {
            Some(EntryCategory::Icon)
        } else {
            None
        }
    }
}

/// An archive entry scheduled for extraction into a staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub category: EntryCategory,
    pub entry_index: usize,
    pub entry_name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// Bytes written; zero until extracted.
    pub size: u64,
}

impl fmt::Display for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path.file_name() {
            Some(name) => write!(f, "{}", name.to_string_lossy()),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// Staging file name for the `index`-th entry of a category.
///
/// The first occurrence keeps its base name, later ones get the index
/// appended to the stem: `Icon.png`, `Icon1.png`, `Icon2.png`.
pub fn staged_file_name(entry_name: &str, index: usize) -> Option<String> {
    let base = entry_name.trim_end_matches('/').rsplit('/').next()?;
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }

    if index == 0 {
        return Some(base.to_string());
    }

    let base_path = Path::new(base);
    let stem = base_path.file_stem()?.to_string_lossy();
    let name = match base_path.extension() {
        Some(ext) => format!("{}{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}{}", stem, index),
    };
    Some(name)
}

/// An opened `.ipa` archive. Dropping it closes the underlying file.
pub struct IpaArchive {
    path: PathBuf,
    archive: zip::ZipArchive<File>,
}

impl IpaArchive {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| IpaError::io_at(&path, e))?;
        let archive = zip::ZipArchive::new(file)?;
        Ok(Self { path, archive })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn len(&self) -> usize {
        self.archive.len()
    }

    /// Matching entries in archive order, with their staging destinations.
    pub fn plan(&self, layout: &StagingLayout, matcher: &EntryMatcher) -> Vec<StagedFile> {
        let mut manifest_index = 0;
        let mut icon_index = 0;
        let mut planned = Vec::new();

        for (entry_index, name) in self.archive.file_names().enumerate() {
            let Some(category) = matcher.classify(name) else {
                continue;
            };

            let counter = match category {
                EntryCategory::Manifest => &mut manifest_index,
                EntryCategory::Icon => &mut icon_index,
            };
            let Some(file_name) = staged_file_name(name, *counter) else {
                debug!("skipping entry without a usable name: {}", name);
                continue;
            };
            *counter += 1;

            planned.push(StagedFile {
                category,
                entry_index,
                entry_name: name.to_string(),
                path: layout.path(category.staging_dir()).join(file_name),
                is_dir: name.ends_with('/'),
                size: 0,
            });
        }

        planned
    }

    /// Extracts every matching entry into the staging layout.
    ///
    /// Stops at the first failing entry; files written before it are left in
    /// place. The archive is closed when this returns.
    pub fn scan(mut self, layout: &StagingLayout, matcher: &EntryMatcher) -> Result<Vec<StagedFile>> {
        let mut staged = self.plan(layout, matcher);

        for file in &mut staged {
            debug!("extracting {} -> {}", file.entry_name, file.path.display());
            file.size = self.extract_entry(file)?;
        }

        Ok(staged)
    }

    fn extract_entry(&mut self, staged: &StagedFile) -> Result<u64> {
        let mut entry = self.archive.by_index(staged.entry_index)?;

        if entry.is_dir() {
            fs::create_dir_all(&staged.path).map_err(|e| IpaError::io_at(&staged.path, e))?;
            return Ok(0);
        }

        let mut outfile = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&staged.path)
            .map_err(|e| IpaError::io_at(&staged.path, e))?;
        let written = io::copy(&mut entry, &mut outfile).map_err(|e| IpaError::io_at(&staged.path, e))?;

        // Keep the entry's permissions, but the owner must still be able to
        // copy and delete the staged file.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                let mode = (mode & 0o777) | 0o600;
                fs::set_permissions(&staged.path, fs::Permissions::from_mode(mode))
                    .map_err(|e| IpaError::io_at(&staged.path, e))?;
            }
        }

        Ok(written)
    }
}
