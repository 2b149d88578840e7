use fragment_core::FragmentResult;
use fragment_core::fs as fs_utils;
use std::path::Path;

use crate::concat::StagingArtifact;
use crate::engine::Outcome;

/// Overwrite `target` with the staged content.
///
/// A failure part-way leaves the target in whatever state the copy reached;
/// the caller is expected to rerun.
pub fn apply(staged: &StagingArtifact, target: &Path) -> FragmentResult<Outcome> {
    tracing::debug!("Copying {} to {}", staged.path().display(), target.display());
    let copied = fs_utils::copy_into(staged.path(), target)?;
    tracing::info!("Published {} bytes to {}", copied, target.display());
    Ok(Outcome::Published)
}
