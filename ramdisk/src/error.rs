//! Error types for RAM disk operations

use core::fmt;

/// Result type for RAM disk operations
pub type Result<T> = core::result::Result<T, DiskError>;

/// Errors that can occur while building or driving the RAM disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskError {
    /// Backing memory could not be allocated
    AllocationFailure,

    /// Segment length is not a whole number of sectors
    Misaligned,

    /// Declared sector count disagrees with the segments supplied
    SizeMismatch,

    /// Sector range extends past the end of the disk
    OutOfRange,

    /// Device has no backing store (never created or already destroyed)
    NotReady,

    /// Boot sector does not end with `0xAA55`
    InvalidSignature,

    /// Partition entry or EBR chain is malformed
    InvalidPartitionTable,

    /// Underlying block device reported an error
    IoFailure,
}

impl DiskError {
    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            Self::AllocationFailure => "Failed to allocate backing store",
            Self::Misaligned => "Segment length is not a multiple of the sector size",
            Self::SizeMismatch => "Segment sectors do not match the request sector count",
            Self::OutOfRange => "Sector range beyond end of disk",
            Self::NotReady => "Device has no backing store",
            Self::InvalidSignature => "Missing 0xAA55 boot signature",
            Self::InvalidPartitionTable => "Malformed partition table",
            Self::IoFailure => "Block device I/O failed",
        }
    }
}

impl fmt::Display for DiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
