//! Snapshot writing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SnapshotError;
use crate::snapshot_file_name;

/// Writes numbered snapshot files into one output directory.
#[derive(Debug)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    /// Open a writer on `dir`, creating the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| SnapshotError::new(&dir, e))?;
        Ok(Self { dir })
    }

    /// Directory the snapshots land in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write snapshot `index` from `values` (row-major interior cells,
    /// little-endian on disk). Returns the path written.
    pub fn write(&self, index: u64, values: &[f64]) -> Result<PathBuf, SnapshotError> {
        let path = self.dir.join(snapshot_file_name(index));
        let file = File::create(&path).map_err(|e| SnapshotError::new(&path, e))?;
        let mut out = BufWriter::new(file);
        for value in values {
            out.write_all(&value.to_le_bytes())
                .map_err(|e| SnapshotError::new(&path, e))?;
        }
        out.flush().map_err(|e| SnapshotError::new(&path, e))?;
        Ok(path)
    }
}
