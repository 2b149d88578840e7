//! Input validation run before anything is read or written.

use fragment_core::fs as fs_utils;
use fragment_core::{FragmentError, FragmentResult};

use crate::options::RunOptions;

/// Check that a run can proceed.
///
/// Fails on an empty output or work directory path, an output that cannot be
/// written (or created in its parent), or a missing fragments directory.
/// Nothing on disk is modified.
pub fn validate(options: &RunOptions) -> FragmentResult<()> {
    if options.outfile.as_os_str().is_empty() {
        return Err(FragmentError::MissingOutfile);
    }
    if options.workdir.as_os_str().is_empty() {
        return Err(FragmentError::MissingWorkdir);
    }

    let outfile = &options.outfile;
    if fs_utils::path_exists(outfile) {
        if !fs_utils::is_writable_file(outfile) {
            return Err(FragmentError::OutputNotWritable { path: outfile.clone() });
        }
    } else {
        let parent = fs_utils::parent_dir(outfile);
        if !fs_utils::is_writable_dir(&parent) {
            return Err(FragmentError::ParentNotWritable {
                parent,
                path: outfile.clone(),
            });
        }
    }

    let fragments_dir = options.fragments_dir();
    if !fragments_dir.is_dir() {
        return Err(FragmentError::FragmentsDirInaccessible { path: fragments_dir });
    }

    tracing::debug!("Validated output {} and fragments in {}", outfile.display(), fragments_dir.display());
    Ok(())
}
