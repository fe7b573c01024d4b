//! Fixed disk layout plan
//!
//! ```text
//!                        50 MiB  <----- DISK_SECTORS
//!                        /    \
//!   PRIMARY_SECTORS --> 2  +  48 <----- extended (sum of slots)
//!                           /  |  \
//!   LOGICAL_SLOTS  -->    10  18  20
//! ```
//!
//! Each logical slot starts with its boot record; the logical partition's data
//! occupies the rest of the slot.

use crate::types::SECTOR_SIZE;

/// Number of logical partitions in the extended partition
pub const LOGICAL_PARTITIONS: usize = 3;

/// Convert mebibytes to sectors
pub const fn mb_to_sectors(mb: u64) -> u64 {
    mb * 1024 * 1024 / SECTOR_SIZE as u64
}

/// Size of the RAM disk in sectors
pub const DISK_SECTORS: u64 = mb_to_sectors(50);

/// First sector of the primary partition (sector 0 is the MBR)
pub const PRIMARY_START: u64 = 1;

/// Size of the primary partition
pub const PRIMARY_SECTORS: u64 = mb_to_sectors(2);

/// Sizes of the logical slots (boot record plus data)
pub const LOGICAL_SLOTS: [u64; LOGICAL_PARTITIONS] =
    [mb_to_sectors(10), mb_to_sectors(18), mb_to_sectors(20)];

/// Location of one logical partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalExtent {
    /// Absolute sector of the boot record introducing this partition
    pub boot_record: u64,
    /// Absolute first data sector
    pub start: u64,
    /// Data sectors (slot minus the boot record)
    pub sectors: u64,
}

impl LogicalExtent {
    /// Sectors covered by the whole slot, boot record included
    pub const fn slot_sectors(&self) -> u64 {
        self.sectors + 1
    }

    /// One past the last data sector
    pub const fn end(&self) -> u64 {
        self.start + self.sectors
    }
}

/// Disk layout plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskLayout {
    /// Total disk size in sectors
    pub disk_sectors: u64,
    /// First sector of the primary partition
    pub primary_start: u64,
    /// Primary partition size in sectors
    pub primary_sectors: u64,
    /// Logical slot sizes in sectors, in chain order
    pub logical_slots: [u64; LOGICAL_PARTITIONS],
}

impl DiskLayout {
    /// The 50 MiB layout: 2 MiB primary, 10/18/20 MiB logical partitions
    pub const STANDARD: DiskLayout = DiskLayout {
        disk_sectors: DISK_SECTORS,
        primary_start: PRIMARY_START,
        primary_sectors: PRIMARY_SECTORS,
        logical_slots: LOGICAL_SLOTS,
    };

    /// Size of the backing store in bytes
    pub const fn disk_bytes(&self) -> u64 {
        self.disk_sectors * SECTOR_SIZE as u64
    }

    /// First sector of the extended partition (its first boot record)
    pub const fn extended_start(&self) -> u64 {
        self.primary_start + self.primary_sectors
    }

    /// Extended partition size: the sum of the logical slots
    pub fn extended_sectors(&self) -> u64 {
        self.logical_slots.iter().sum()
    }

    /// One past the last sector described by the plan
    pub fn end_sector(&self) -> u64 {
        self.extended_start() + self.extended_sectors()
    }

    /// Sectors the plan describes beyond the end of the disk
    pub fn overhang_sectors(&self) -> u64 {
        self.end_sector().saturating_sub(self.disk_sectors)
    }

    /// Sectors taken by boot records inside the extended partition
    pub const fn boot_record_overhead(&self) -> u64 {
        LOGICAL_PARTITIONS as u64
    }

    /// Absolute sectors of the EBR chain, in chain order
    pub fn boot_record_sectors(&self) -> [u64; LOGICAL_PARTITIONS] {
        let mut sectors = [0u64; LOGICAL_PARTITIONS];
        let mut next = self.extended_start();
        for (slot, sector) in self.logical_slots.iter().zip(sectors.iter_mut()) {
            *sector = next;
            next += slot;
        }
        sectors
    }

    /// Absolute extents of the logical partitions, in chain order
    pub fn logical_extents(&self) -> [LogicalExtent; LOGICAL_PARTITIONS] {
        let boot_records = self.boot_record_sectors();
        let mut extents = [LogicalExtent {
            boot_record: 0,
            start: 0,
            sectors: 0,
        }; LOGICAL_PARTITIONS];
        for i in 0..LOGICAL_PARTITIONS {
            extents[i] = LogicalExtent {
                boot_record: boot_records[i],
                start: boot_records[i] + 1,
                sectors: self.logical_slots[i].saturating_sub(1),
            };
        }
        extents
    }

    /// Sum of the logical partitions' data sectors
    pub fn logical_data_sectors(&self) -> u64 {
        self.logical_extents().iter().map(|e| e.sectors).sum()
    }
}

impl Default for DiskLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}
