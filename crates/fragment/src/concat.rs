use fragment_core::fs as fs_utils;
use fragment_core::{FragmentResult, IoResultExt};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

use crate::enumerate::FragmentSet;

/// The concatenated result of one run, waiting to be compared or published.
///
/// It stays on disk after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingArtifact {
    path: PathBuf,
    len: u64,
}

impl StagingArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Concatenate `fragments` into a fresh artifact at `staging_path`.
///
/// The optional `banner` goes first on a line of its own. Each fragment is
/// copied verbatim and ends in a newline: one is added when it lacks one,
/// so an empty fragment contributes a blank line. The content is written to a temporary file next to `staging_path`
/// and renamed into place, so the artifact is never seen half written.
pub fn concatenate(
    fragments: &FragmentSet,
    banner: Option<&str>,
    staging_path: &Path,
) -> FragmentResult<StagingArtifact> {
    let staging_dir = fs_utils::parent_dir(staging_path);
    let mut builder = Builder::new();
    builder.prefix(".fragments.concat");
    // Same mode a plainly created file would get, rather than 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut staged = builder.tempfile_in(&staging_dir).at_path(&staging_dir)?;
    let mut len = 0u64;

    {
        let mut writer = BufWriter::new(staged.as_file_mut());

        if let Some(banner) = banner {
            writeln!(writer, "{}", banner).at_path(staging_path)?;
            len += banner.len() as u64 + 1;
        }

        for path in fragments.paths() {
            let content = fs::read(&path).at_path(&path)?;
            writer.write_all(&content).at_path(staging_path)?;
            len += content.len() as u64;

            if !content.ends_with(b"\n") {
                writer.write_all(b"\n").at_path(staging_path)?;
                len += 1;
            }
            tracing::trace!("Appended {} ({} bytes)", path.display(), content.len());
        }

        writer.flush().at_path(staging_path)?;
    }

    staged
        .persist(staging_path)
        .map_err(|e| e.error)
        .at_path(staging_path)?;
    tracing::debug!("Staged {} bytes at {}", len, staging_path.display());

    Ok(StagingArtifact {
        path: staging_path.to_path_buf(),
        len,
    })
}
