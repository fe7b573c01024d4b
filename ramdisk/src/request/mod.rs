//! I/O requests and their processing
//!
//! A request names a starting sector, the number of sectors the caller
//! declares, and an ordered list of segment buffers. Segments are transferred
//! in order; the sector offset advances by each segment's length.

pub mod policy;
pub mod processor;
pub mod queue;

use alloc::vec::Vec;

use crate::types::Direction;

pub use policy::WritePolicy;
pub use processor::process;

/// One request against the disk
#[derive(Debug)]
pub enum IoRequest<'a> {
    /// Copy disk sectors into the segments
    Read {
        /// Absolute first sector
        start_sector: u64,
        /// Sector count declared by the caller
        sector_count: u64,
        /// Destination buffers, filled in order
        segments: Vec<&'a mut [u8]>,
    },
    /// Copy the segments onto disk sectors
    Write {
        /// Absolute first sector
        start_sector: u64,
        /// Sector count declared by the caller
        sector_count: u64,
        /// Source buffers, written in order
        segments: Vec<&'a [u8]>,
    },
}

impl<'a> IoRequest<'a> {
    /// Read request
    pub fn read(start_sector: u64, sector_count: u64, segments: Vec<&'a mut [u8]>) -> Self {
        Self::Read {
            start_sector,
            sector_count,
            segments,
        }
    }

    /// Write request
    pub fn write(start_sector: u64, sector_count: u64, segments: Vec<&'a [u8]>) -> Self {
        Self::Write {
            start_sector,
            sector_count,
            segments,
        }
    }

    /// Transfer direction
    pub fn direction(&self) -> Direction {
        match self {
            Self::Read { .. } => Direction::Read,
            Self::Write { .. } => Direction::Write,
        }
    }

    /// Absolute first sector
    pub fn start_sector(&self) -> u64 {
        match self {
            Self::Read { start_sector, .. } | Self::Write { start_sector, .. } => *start_sector,
        }
    }

    /// Declared sector count
    pub fn sector_count(&self) -> u64 {
        match self {
            Self::Read { sector_count, .. } | Self::Write { sector_count, .. } => *sector_count,
        }
    }

    /// Number of segments
    pub fn segment_count(&self) -> usize {
        match self {
            Self::Read { segments, .. } => segments.len(),
            Self::Write { segments, .. } => segments.len(),
        }
    }
}
