//! Partition entry (16 bytes on disk)
//!
//! ```text
//! 0x00  boot indicator
//! 0x01  start CHS (head, sector | cyl_hi << 6, cyl_lo)
//! 0x04  partition type
//! 0x05  end CHS
//! 0x08  starting LBA (u32 LE)
//! 0x0C  sector count (u32 LE)
//! ```

use crate::error::{DiskError, Result};
use crate::geometry::Chs;
use crate::types::{PartitionKind, BOOT_FLAG_ACTIVE, PARTITION_ENTRY_SIZE};

/// One slot of a partition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionEntry {
    /// Active/bootable marker
    pub boot_flag: bool,
    /// CHS of the first sector
    pub start_chs: Chs,
    /// Partition type
    pub kind: PartitionKind,
    /// CHS of the last sector
    pub end_chs: Chs,
    /// Absolute first sector
    pub start_lba: u32,
    /// Number of sectors
    pub sector_count: u32,
}

impl PartitionEntry {
    /// Inactive entry with CHS fields derived from the LBA range
    pub fn new(kind: PartitionKind, start_lba: u32, sector_count: u32) -> Self {
        let start = start_lba as u64;
        let last = start + (sector_count as u64).saturating_sub(1);
        Self {
            boot_flag: false,
            start_chs: Chs::from_lba(start),
            kind,
            end_chs: Chs::from_lba(last),
            start_lba,
            sector_count,
        }
    }

    /// Build from 64-bit sector values, rejecting ranges a u32 entry can't hold
    pub fn from_range(kind: PartitionKind, start: u64, sectors: u64) -> Result<Self> {
        let start_lba = u32::try_from(start).map_err(|_| DiskError::InvalidPartitionTable)?;
        let sector_count = u32::try_from(sectors).map_err(|_| DiskError::InvalidPartitionTable)?;
        Ok(Self::new(kind, start_lba, sector_count))
    }

    /// One past the last sector
    pub fn end_lba(&self) -> u64 {
        self.start_lba as u64 + self.sector_count as u64
    }

    /// Serialize to the on-disk layout
    pub fn to_bytes(&self) -> [u8; PARTITION_ENTRY_SIZE] {
        let mut bytes = [0u8; PARTITION_ENTRY_SIZE];
        bytes[0] = if self.boot_flag { BOOT_FLAG_ACTIVE } else { 0x00 };
        bytes[1..4].copy_from_slice(&self.start_chs.encode());
        bytes[4] = self.kind.as_u8();
        bytes[5..8].copy_from_slice(&self.end_chs.encode());
        bytes[8..12].copy_from_slice(&self.start_lba.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.sector_count.to_le_bytes());
        bytes
    }

    /// Parse the on-disk layout
    ///
    /// An all-zero slot is an unused entry and parses as `None`.
    pub fn parse(bytes: &[u8; PARTITION_ENTRY_SIZE]) -> Result<Option<Self>> {
        if bytes.iter().all(|&b| b == 0) {
            return Ok(None);
        }

        let boot_flag = match bytes[0] {
            0x00 => false,
            BOOT_FLAG_ACTIVE => true,
            _ => return Err(DiskError::InvalidPartitionTable),
        };
        let kind = PartitionKind::from_u8(bytes[4]).ok_or(DiskError::InvalidPartitionTable)?;

        Ok(Some(Self {
            boot_flag,
            start_chs: Chs::decode([bytes[1], bytes[2], bytes[3]]),
            kind,
            end_chs: Chs::decode([bytes[5], bytes[6], bytes[7]]),
            start_lba: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            sector_count: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        }))
    }
}
