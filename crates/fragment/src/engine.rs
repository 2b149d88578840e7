use fragment_core::FragmentResult;
use std::process::ExitCode;

use crate::concat::{self, StagingArtifact};
use crate::enumerate::FragmentSet;
use crate::options::RunOptions;
use crate::{apply, diff, validate};

/// How a run ended when nothing went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target was overwritten with the staged content
    Published,
    /// Test mode: the target already holds the staged content
    Identical,
    /// Test mode: the target content differs
    Differs,
    /// Test mode: there is no target yet
    TargetMissing,
}

impl Outcome {
    /// Process exit status: 0 when published or up to date, 1 when a publish is needed
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Published | Outcome::Identical => 0,
            Outcome::Differs | Outcome::TargetMissing => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self.exit_code() == 0
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Assembles the output file from the fragments directory
pub struct FragmentAssembler {
    options: RunOptions,
}

impl FragmentAssembler {
    /// Create a new assembler for one run
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Validate, collect, concatenate, then compare or publish.
    ///
    /// Any error stops the run before the target is touched, except a
    /// failure during the final copy itself.
    pub fn run(&self) -> FragmentResult<Outcome> {
        let options = &self.options;
        tracing::debug!("Starting run: {:?}", options);

        validate::validate(options)?;
        let staged = self.stage()?;

        if options.test {
            diff::diff(&staged, &options.outfile)
        } else {
            apply::apply(&staged, &options.outfile)
        }
    }

    /// Collect and concatenate the fragments without touching the target
    pub fn stage(&self) -> FragmentResult<StagingArtifact> {
        let options = &self.options;
        let fragments = FragmentSet::collect(&options.fragments_dir(), options.sort, options.force)?;
        let banner = options.banner();
        concat::concatenate(&fragments, banner.as_deref(), &options.staging_path())
    }
}
