use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file in a staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Regular files directly inside `dir`, sorted by file name.
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<ListedFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(ListedFile {
            size: entry.metadata()?.len(),
            path: entry.into_path(),
        });
    }

    Ok(files)
}

/// Largest first. Equal sizes keep their listing order.
pub fn rank_by_size(files: &mut [ListedFile]) {
    files.sort_by(|a, b| b.size.cmp(&a.size));
}

pub fn select_largest(mut files: Vec<ListedFile>) -> Option<ListedFile> {
    rank_by_size(&mut files);
    files.into_iter().next()
}
