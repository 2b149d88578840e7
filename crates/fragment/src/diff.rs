use fragment_core::FragmentResult;
use fragment_core::fs as fs_utils;
use std::path::Path;

use crate::concat::StagingArtifact;
use crate::engine::Outcome;

/// Check whether publishing `staged` would change `target`.
///
/// A missing target always counts as a change. Otherwise the two files are
/// compared byte for byte. Nothing is written.
pub fn diff(staged: &StagingArtifact, target: &Path) -> FragmentResult<Outcome> {
    if !fs_utils::path_exists(target) {
        tracing::info!("{} does not exist yet", target.display());
        return Ok(Outcome::TargetMissing);
    }

    tracing::debug!("Checking {} against {}", target.display(), staged.path().display());
    if fs_utils::files_identical(target, staged.path())? {
        tracing::info!("{} is up to date", target.display());
        Ok(Outcome::Identical)
    } else {
        tracing::info!("{} differs from the fragments", target.display());
        Ok(Outcome::Differs)
    }
}
