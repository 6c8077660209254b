use crate::config::ExtractOptions;
use crate::error::{IpaError, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubDirectory {
    Plists,
    Icons,
    Assets,
}

impl SubDirectory {
    /// Transient directories are deleted once an extraction finishes.
    pub fn is_staging(self) -> bool {
        !matches!(self, SubDirectory::Assets)
    }
}

/// Working directories of one extraction, rooted at the caller's destination.
#[derive(Debug, Clone)]
pub struct StagingLayout {
    plists: PathBuf,
    icons: PathBuf,
    assets: PathBuf,
}

impl StagingLayout {
    pub fn new<P: AsRef<Path>>(root: P, options: &ExtractOptions) -> Self {
        let root = root.as_ref();
        Self {
            plists: root.join(&options.plists_dir),
            icons: root.join(&options.icons_dir),
            assets: root.join(&options.assets_dir),
        }
    }

    pub fn path(&self, dir: SubDirectory) -> &Path {
        match dir {
            SubDirectory::Plists => &self.plists,
            SubDirectory::Icons => &self.icons,
            SubDirectory::Assets => &self.assets,
        }
    }

    pub fn all(&self) -> impl Iterator<Item = &Path> {
        self.all_with_kind().map(|(_, path)| path)
    }

    pub fn staging(&self) -> impl Iterator<Item = &Path> {
        self.all_with_kind()
            .filter(|(kind, _)| kind.is_staging())
            .map(|(_, path)| path)
    }

    fn all_with_kind(&self) -> impl Iterator<Item = (SubDirectory, &Path)> {
        [SubDirectory::Plists, SubDirectory::Icons, SubDirectory::Assets]
            .into_iter()
            .map(move |dir| (dir, self.path(dir)))
    }
}

/// Creates every directory, including missing parents.
///
/// Keeps going after a failure; only the last error is returned; the ones
/// before it are logged.
pub fn ensure_directories<'a, I>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut last_err = None;

    for path in paths {
        if let Err(e) = create_dir(path) {
            if let Some(prev) = last_err.replace(IpaError::io_at(path, e)) {
                warn!("{}", prev);
            }
        }
    }

    last_err.map_or(Ok(()), Err)
}

fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

/// Recursively deletes every directory tree. Same error policy as
/// [`ensure_directories`]; a tree that is already gone counts as removed.
pub fn remove_directories<'a, I>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut last_err = None;

    for path in paths {
        match fs::remove_dir_all(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                if let Some(prev) = last_err.replace(IpaError::io_at(path, e)) {
                    warn!("{}", prev);
                }
            }
        }
    }

    last_err.map_or(Ok(()), Err)
}

/// Streams `source` into `dest`, creating or truncating it.
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<()> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    let mut input = File::open(source).map_err(|e| IpaError::io_at(source, e))?;
    let mut output = File::create(dest).map_err(|e| IpaError::io_at(dest, e))?;

    io::copy(&mut input, &mut output).map_err(|e| IpaError::io_at(dest, e))?;

    Ok(())
}

/// Copies `source` into `dest_dir` under its own file name and returns the
/// new path.
pub fn copy_into_directory<P: AsRef<Path>, Q: AsRef<Path>>(dest_dir: P, source: Q) -> Result<PathBuf> {
    let source = source.as_ref();

    let file_name = source.file_name().ok_or_else(|| {
        IpaError::InvalidInput(format!("no file name in {}", source.display()))
    })?;
    let dest = dest_dir.as_ref().join(file_name);

    copy_file(source, &dest)?;

    Ok(dest)
}
