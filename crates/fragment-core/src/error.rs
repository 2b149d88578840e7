use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Broad classes of failure a run can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required option is missing or a config file is malformed
    Configuration,
    /// A path cannot be written or read
    Access,
    /// No fragments and empty output was not forced
    EmptyInput,
    /// Read, write or copy failure while staging or publishing
    Io,
}

/// Centralized error type for fragment assembly
#[derive(Error, Debug)]
pub enum FragmentError {
    #[error("output file required (use -o)")]
    MissingOutfile,

    #[error("fragments directory required (use -d)")]
    MissingWorkdir,

    #[error("invalid configuration in {}: {message}", path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("cannot write to {}", path.display())]
    OutputNotWritable { path: PathBuf },

    #[error("cannot write to {} to create {}", parent.display(), path.display())]
    ParentNotWritable { parent: PathBuf, path: PathBuf },

    #[error("cannot access fragments directory {}", path.display())]
    FragmentsDirInaccessible { path: PathBuf },

    #[error("fragments directory is empty, refuse to create empty output ({})", path.display())]
    EmptyFragments { path: PathBuf },

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem { path: PathBuf, source: io::Error },
}

impl FragmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FragmentError::MissingOutfile
            | FragmentError::MissingWorkdir
            | FragmentError::InvalidConfig { .. } => ErrorKind::Configuration,
            FragmentError::OutputNotWritable { .. }
            | FragmentError::ParentNotWritable { .. }
            | FragmentError::FragmentsDirInaccessible { .. } => ErrorKind::Access,
            FragmentError::EmptyFragments { .. } => ErrorKind::EmptyInput,
            FragmentError::Filesystem { .. } => ErrorKind::Io,
        }
    }
}

/// Centralized Result type for fragment operations
pub type FragmentResult<T> = std::result::Result<T, FragmentError>;

/// Extension trait attaching the offending path to I/O errors
pub trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> FragmentResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at_path(self, path: &Path) -> FragmentResult<T> {
        self.map_err(|source| FragmentError::Filesystem {
            path: path.to_path_buf(),
            source,
        })
    }
}
