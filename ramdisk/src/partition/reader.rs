//! Partition discovery from raw disk bytes
//!
//! Walks MBR -> extended partition -> EBR chain over any [`BlockIo`] device,
//! the way a partitioning tool would see the RAM disk.

use alloc::vec::Vec;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

use super::table::{MasterBootRecord, PartitionTable};
use crate::error::{DiskError, Result};
use crate::types::{PartitionKind, SECTOR_SIZE};

/// Upper bound on chain length; longer chains are treated as loops
pub const MAX_LOGICAL_PARTITIONS: usize = 16;

/// A data partition found on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveredPartition {
    /// Absolute first sector
    pub start_lba: u64,
    /// Number of sectors
    pub sector_count: u64,
    /// Sector of the EBR describing it (`None` for MBR partitions)
    pub boot_record: Option<u64>,
}

/// Everything the MBR and EBR chain describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLayout {
    /// Disk identifier from the MBR
    pub disk_signature: u32,
    /// Primary partitions listed in the MBR
    pub primary: Vec<DiscoveredPartition>,
    /// Extended partition as `(start, sectors)`, if any
    pub extended: Option<(u64, u64)>,
    /// Logical partitions in chain order
    pub logical: Vec<DiscoveredPartition>,
}

fn read_sector<B: BlockIo>(block_io: &mut B, lba: u64) -> Result<[u8; SECTOR_SIZE]> {
    let mut sector = [0u8; SECTOR_SIZE];
    block_io
        .read_blocks(Lba(lba), &mut sector)
        .map_err(|_| DiskError::IoFailure)?;
    Ok(sector)
}

/// Read the partition layout of a disk
///
/// # Arguments
/// * `block_io` - Block device with 512-byte sectors
///
/// # Returns
/// Primary, extended and logical partitions as stored on disk
pub fn read_layout<B: BlockIo>(block_io: &mut B) -> Result<DiscoveredLayout> {
    let mbr = MasterBootRecord::parse(&read_sector(block_io, 0)?)?;

    let mut layout = DiscoveredLayout {
        disk_signature: mbr.disk_signature,
        primary: Vec::new(),
        extended: None,
        logical: Vec::new(),
    };

    for entry in mbr.table.iter() {
        match entry.kind {
            PartitionKind::Primary => layout.primary.push(DiscoveredPartition {
                start_lba: entry.start_lba as u64,
                sector_count: entry.sector_count as u64,
                boot_record: None,
            }),
            PartitionKind::Extended => {
                if layout.extended.is_some() {
                    return Err(DiskError::InvalidPartitionTable);
                }
                layout.extended = Some((entry.start_lba as u64, entry.sector_count as u64));
            }
        }
    }

    let mut next = layout.extended.map(|(start, _)| start);
    while let Some(record_lba) = next {
        if layout.logical.len() >= MAX_LOGICAL_PARTITIONS {
            return Err(DiskError::InvalidPartitionTable);
        }

        let table = PartitionTable::parse(&read_sector(block_io, record_lba)?)?;
        next = None;
        for entry in table.iter() {
            match entry.kind {
                PartitionKind::Primary => layout.logical.push(DiscoveredPartition {
                    start_lba: entry.start_lba as u64,
                    sector_count: entry.sector_count as u64,
                    boot_record: Some(record_lba),
                }),
                PartitionKind::Extended => {
                    let link = entry.start_lba as u64;
                    if link <= record_lba {
                        return Err(DiskError::InvalidPartitionTable);
                    }
                    next = Some(link);
                }
            }
        }
    }

    Ok(layout)
}
