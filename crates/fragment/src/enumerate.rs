use fragment_core::{FragmentError, FragmentResult, IoResultExt};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sort::{self, SortMode};

/// Ordered fragment names drawn from one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSet {
    dir: PathBuf,
    names: Vec<OsString>,
}

impl FragmentSet {
    /// List every entry of `dir` and order it with `mode`.
    ///
    /// An empty directory is an error unless `allow_empty` is set.
    pub fn collect(dir: &Path, mode: SortMode, allow_empty: bool) -> FragmentResult<Self> {
        let entries = fs::read_dir(dir).at_path(dir)?;

        // read_dir never yields the "." and ".." pseudo-entries
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.at_path(dir)?;
            names.push(entry.file_name());
        }

        if names.is_empty() {
            if !allow_empty {
                return Err(FragmentError::EmptyFragments { path: dir.to_path_buf() });
            }
            tracing::warn!("No fragments in {}, producing empty output", dir.display());
        }

        sort::sort_names(&mut names, mode);
        tracing::debug!("Found {} fragment(s) in {} ({:?} order)", names.len(), dir.display(), mode);

        Ok(Self {
            dir: dir.to_path_buf(),
            names,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn names(&self) -> &[OsString] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Full paths of the fragments, in order
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.names.iter().map(|name| self.dir.join(name))
    }
}
