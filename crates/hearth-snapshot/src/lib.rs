//! Binary snapshot files for temperature fields.
//!
//! A snapshot is the bare interior of a field: `rows * cols` little-endian
//! `f64` values, row-major, no header and no ghost cells. Snapshot `index`
//! lives at `<dir>/<index padded to five digits>.bin`, so snapshot 3 of a
//! run writing into `data/` is `data/00003.bin`.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::SnapshotError;
pub use reader::read_snapshot;
pub use writer::SnapshotWriter;

/// File name of snapshot `index`: five zero-padded digits plus `.bin`.
pub fn snapshot_file_name(index: u64) -> String {
    format!("{index:05}.bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(snapshot_file_name(0), "00000.bin");
        assert_eq!(snapshot_file_name(42), "00042.bin");
        assert_eq!(snapshot_file_name(12345), "12345.bin");
    }

    #[test]
    fn large_indices_keep_their_digits() {
        assert_eq!(snapshot_file_name(123456), "123456.bin");
    }
}
