use fragment_core::{FragmentError, FragmentResult, IoResultExt};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::sort::SortMode;

/// Tool named in the generated-file banner unless overridden
pub const DEFAULT_BANNER_TOOL: &str = "Puppet";

/// Name of the subdirectory of the workdir holding the fragments
pub const FRAGMENTS_DIR: &str = "fragments";

/// Name of the staging artifact written inside the workdir
pub const STAGING_FILE: &str = "fragments.concat";

/// Immutable configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub outfile: PathBuf,
    pub workdir: PathBuf,
    pub sort: SortMode,
    pub warn: bool,
    pub banner_tool: String,
    pub force: bool,
    pub test: bool,
}

impl RunOptions {
    pub fn new<O: Into<PathBuf>, W: Into<PathBuf>>(outfile: O, workdir: W) -> Self {
        Self {
            outfile: outfile.into(),
            workdir: workdir.into(),
            sort: SortMode::default(),
            warn: false,
            banner_tool: DEFAULT_BANNER_TOOL.to_string(),
            force: false,
            test: false,
        }
    }

    pub fn fragments_dir(&self) -> PathBuf {
        self.workdir.join(FRAGMENTS_DIR)
    }

    pub fn staging_path(&self) -> PathBuf {
        self.workdir.join(STAGING_FILE)
    }

    /// The warning line written ahead of all fragments, when enabled
    pub fn banner(&self) -> Option<String> {
        self.warn
            .then(|| format!("#This file is managed by {}. DO NOT EDIT.", self.banner_tool))
    }
}

/// Options as gathered from a config file or the command line, before the
/// required ones are checked.
///
/// Every field is optional so that two sources can be layered with
/// [`PartialOptions::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialOptions {
    pub outfile: Option<String>,
    pub workdir: Option<String>,
    pub sort: Option<SortMode>,
    pub warn: Option<bool>,
    pub banner_tool: Option<String>,
    pub force: Option<bool>,
    pub test: Option<bool>,
    pub log_file: Option<String>,
}

impl PartialOptions {
    /// Load options from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> FragmentResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).at_path(path)?;

        serde_yaml::from_reader(file).map_err(|e| FragmentError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Layer `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: PartialOptions) -> PartialOptions {
        PartialOptions {
            outfile: other.outfile.or(self.outfile),
            workdir: other.workdir.or(self.workdir),
            sort: other.sort.or(self.sort),
            warn: other.warn.or(self.warn),
            banner_tool: other.banner_tool.or(self.banner_tool),
            force: other.force.or(self.force),
            test: other.test.or(self.test),
            log_file: other.log_file.or(self.log_file),
        }
    }

    /// Log file path with `~` expanded
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(expand_path)
    }

    /// Turn the gathered options into a run configuration.
    ///
    /// Fails when the output file or the work directory is missing or empty.
    pub fn resolve(self) -> FragmentResult<RunOptions> {
        let outfile = require(self.outfile).ok_or(FragmentError::MissingOutfile)?;
        let workdir = require(self.workdir).ok_or(FragmentError::MissingWorkdir)?;

        Ok(RunOptions {
            outfile: expand_path(&outfile),
            workdir: expand_path(&workdir),
            sort: self.sort.unwrap_or_default(),
            warn: self.warn.unwrap_or(false),
            banner_tool: self
                .banner_tool
                .filter(|tool| !tool.is_empty())
                .unwrap_or_else(|| DEFAULT_BANNER_TOOL.to_string()),
            force: self.force.unwrap_or(false),
            test: self.test.unwrap_or(false),
        })
    }
}

fn require(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
