use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{FragmentResult, IoResultExt};

const COMPARE_CHUNK: usize = 8 * 1024;

/// Checks if a path exists (file or directory)
pub fn path_exists(path: &Path) -> bool {
    path.exists()
}

/// Directory a file would be created in; a bare file name resolves to `.`
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether an existing file can be opened for writing.
///
/// The file is opened without truncation, so its content is untouched.
pub fn is_writable_file(path: &Path) -> bool {
    OpenOptions::new().write(true).open(path).is_ok()
}

/// Whether new files can be created inside `dir`.
///
/// Checks with an anonymous temporary file that never gets a name in `dir`
/// on platforms that support it, and is removed on drop elsewhere.
pub fn is_writable_dir(dir: &Path) -> bool {
    dir.is_dir() && tempfile::tempfile_in(dir).is_ok()
}

/// Byte-for-byte equality of two files
pub fn files_identical(left: &Path, right: &Path) -> FragmentResult<bool> {
    let left_len = fs::metadata(left).at_path(left)?.len();
    let right_len = fs::metadata(right).at_path(right)?.len();
    if left_len != right_len {
        return Ok(false);
    }

    let mut left_reader = BufReader::new(File::open(left).at_path(left)?);
    let mut right_reader = BufReader::new(File::open(right).at_path(right)?);
    let mut left_buf = [0u8; COMPARE_CHUNK];
    let mut right_buf = [0u8; COMPARE_CHUNK];

    loop {
        let read = read_full(&mut left_reader, &mut left_buf).at_path(left)?;
        let other = read_full(&mut right_reader, &mut right_buf).at_path(right)?;
        if read != other || left_buf[..read] != right_buf[..other] {
            return Ok(false);
        }
        if read == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows, returning the byte count
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Overwrite `target` with the bytes of `source`.
///
/// An existing target is truncated and rewritten in place, so it keeps its
/// own permissions and ownership. Returns the number of bytes copied.
pub fn copy_into(source: &Path, target: &Path) -> FragmentResult<u64> {
    let mut reader = File::open(source).at_path(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(target)
        .at_path(target)?;

    let copied = io::copy(&mut reader, &mut writer).at_path(target)?;
    writer.flush().at_path(target)?;
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    #[test]
    fn parent_of_bare_name_is_current_dir() {
        assert_eq!(parent_dir(Path::new("app.conf")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("/etc/app.conf")), PathBuf::from("/etc"));
    }

    #[test]
    fn identical_files_compare_equal() {
        let temp = TempDir::new().unwrap();
        let a = temp.child("a");
        let b = temp.child("b");
        a.write_str("1\n2\n").unwrap();
        b.write_str("1\n2\n").unwrap();

        assert!(files_identical(a.path(), b.path()).unwrap());
    }

    #[test]
    fn same_length_different_bytes_differ() {
        let temp = TempDir::new().unwrap();
        let a = temp.child("a");
        let b = temp.child("b");
        a.write_str("1\n2\n").unwrap();
        b.write_str("2\n1\n").unwrap();

        assert!(!files_identical(a.path(), b.path()).unwrap());
    }

    #[test]
    fn large_files_differing_late_are_detected() {
        let temp = TempDir::new().unwrap();
        let mut content = vec![b'x'; COMPARE_CHUNK * 3 + 17];
        temp.child("a").write_binary(&content).unwrap();
        *content.last_mut().unwrap() = b'y';
        temp.child("b").write_binary(&content).unwrap();

        assert!(!files_identical(&temp.path().join("a"), &temp.path().join("b")).unwrap());
        assert!(files_identical(&temp.path().join("b"), &temp.path().join("b")).unwrap());
    }

    #[test]
    fn empty_files_are_identical() {
        let temp = TempDir::new().unwrap();
        temp.child("a").touch().unwrap();
        temp.child("b").touch().unwrap();

        assert!(files_identical(&temp.path().join("a"), &temp.path().join("b")).unwrap());
    }

    #[test]
    fn copy_into_replaces_longer_content() {
        let temp = TempDir::new().unwrap();
        let source = temp.child("source");
        let target = temp.child("target");
        source.write_str("short\n").unwrap();
        target.write_str("a much longer previous body\n").unwrap();

        let copied = copy_into(source.path(), target.path()).unwrap();

        assert_eq!(copied, 6);
        target.assert("short\n");
    }

    #[test]
    fn copy_into_creates_missing_target() {
        let temp = TempDir::new().unwrap();
        let source = temp.child("source");
        source.write_str("body\n").unwrap();

        copy_into(source.path(), &temp.path().join("new")).unwrap();

        temp.child("new").assert("body\n");
    }

    #[test]
    fn writability_checks() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("existing");
        file.write_str("keep").unwrap();

        assert!(is_writable_file(file.path()));
        assert!(is_writable_dir(temp.path()));
        assert!(!is_writable_dir(&temp.path().join("missing")));
        file.assert("keep");
    }
}
