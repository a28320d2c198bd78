//! Snapshot reading, mostly for verification and tooling.

use std::fs;
use std::path::Path;

use crate::error::SnapshotError;

/// Read a snapshot file back into row-major `f64` values.
///
/// Trailing bytes that do not fill a whole `f64` are rejected as a
/// corrupted file.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Vec<f64>, SnapshotError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| SnapshotError::new(path, e))?;
    if bytes.len() % 8 != 0 {
        return Err(SnapshotError::new(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("file length {} is not a multiple of 8", bytes.len()),
            ),
        ));
    }
    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect())
}
