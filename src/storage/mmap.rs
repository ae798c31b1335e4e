//! # Memory-Mapped Input
//!
//! `MappedFile` opens a delimited text file read-only and maps it whole. The
//! descriptor is closed as soon as the mapping exists; the mapping itself
//! stays valid until the `MappedFile` is dropped.
//!
//! ## Error Handling
//!
//! All fallible operations return `eyre::Result` with the file path and the
//! operation that failed.

use std::fs::File;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use memmap2::Mmap;

#[derive(Debug)]
enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
    Empty,
}

#[derive(Debug)]
pub struct MappedFile {
    path: Option<PathBuf>,
    backing: Backing,
}

impl MappedFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path)
            .wrap_err_with(|| format!("failed to open input file '{}'", path.display()))?;

        let file_size = file
            .metadata()
            .wrap_err_with(|| format!("failed to get metadata for '{}'", path.display()))?
            .len();

        if file_size == 0 {
            return Ok(Self {
                path: Some(path.to_path_buf()),
                backing: Backing::Empty,
            });
        }

        // SAFETY: Mmap::map is unsafe because the file may be modified or
        // truncated by another process while mapped. This is acceptable because:
        // 1. The mapping is read-only; we never write through it
        // 2. Callers must not modify the input while a parse is running
        // 3. Every slice handed out borrows from &self, so none outlive the map
        let mmap = unsafe {
            Mmap::map(&file)
                .wrap_err_with(|| format!("failed to memory-map '{}'", path.display()))?
        };

        #[cfg(unix)]
        if let Err(err) = mmap.advise(memmap2::Advice::Sequential) {
            tracing::debug!(path = %path.display(), error = %err, "madvise(SEQUENTIAL) ignored");
        }

        tracing::debug!(path = %path.display(), bytes = file_size, "mapped input file");

        Ok(Self {
            path: Some(path.to_path_buf()),
            backing: Backing::Mapped(mmap),
        })
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: None,
            backing: Backing::Owned(bytes.into()),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.backing {
            Backing::Mapped(mmap) => mmap,
            Backing::Owned(bytes) => bytes,
            Backing::Empty => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.backing, Backing::Mapped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn open_maps_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, b"a,b\n1,2\n").unwrap();

        let mapped = MappedFile::open(&path).unwrap();

        assert!(mapped.is_mapped());
        assert_eq!(mapped.as_bytes(), b"a,b\n1,2\n");
        assert_eq!(mapped.len(), 8);
        assert_eq!(mapped.path(), Some(path.as_path()));
    }

    #[test]
    fn open_empty_file_yields_empty_buffer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::File::create(&path).unwrap();

        let mapped = MappedFile::open(&path).unwrap();

        assert!(mapped.is_empty());
        assert!(!mapped.is_mapped());
        assert_eq!(mapped.as_bytes(), b"");
    }

    #[test]
    fn open_fails_for_nonexistent_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let result = MappedFile::open(&path);

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to open input file"));
    }

    #[test]
    fn repeated_access_is_zero_copy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"x\n").unwrap();
        drop(file);

        let mapped = MappedFile::open(&path).unwrap();

        assert_eq!(mapped.as_bytes().as_ptr(), mapped.as_bytes().as_ptr());
    }

    #[test]
    fn from_bytes_has_no_path() {
        let buffer = MappedFile::from_bytes(b"1\n2\n".to_vec());

        assert_eq!(buffer.path(), None);
        assert_eq!(buffer.len(), 4);
    }
}
