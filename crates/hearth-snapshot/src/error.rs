//! Snapshot failure type.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// A snapshot read or write failed. Carries the path so the operator knows
/// which file to look at.
#[derive(Debug)]
pub struct SnapshotError {
    /// File or directory the operation touched.
    pub path: PathBuf,
    /// The underlying filesystem error.
    pub source: io::Error,
}

impl SnapshotError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snapshot I/O failed at {}: {}", self.path.display(), self.source)
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_path() {
        let err = SnapshotError::new(
            "data/00003.bin",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("data/00003.bin"), "message was {msg:?}");
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn source_exposes_the_io_error() {
        let err = SnapshotError::new("x.bin", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(Error::source(&err).is_some());
    }
}
