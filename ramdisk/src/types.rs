//! Common types and constants for the MBR layout

/// Sector size (always 512 bytes)
pub const SECTOR_SIZE: usize = 512;

/// Offset of the 32-bit disk signature in the MBR
pub const DISK_SIGNATURE_OFFSET: usize = 440;

/// Disk signature stamped into the MBR
pub const DISK_SIGNATURE: u32 = 0x36E5_756D;

/// Offset of the partition table within an MBR or EBR sector
pub const PARTITION_TABLE_OFFSET: usize = 446;

/// Size of one on-disk partition entry
pub const PARTITION_ENTRY_SIZE: usize = 16;

/// Entries per partition table
pub const PARTITION_TABLE_ENTRIES: usize = 4;

/// Size of the whole partition table
pub const PARTITION_TABLE_SIZE: usize = PARTITION_ENTRY_SIZE * PARTITION_TABLE_ENTRIES;

/// Offset of the boot signature within an MBR or EBR sector
pub const BOOT_SIGNATURE_OFFSET: usize = 510;

/// Boot signature (stored little-endian as `55 AA`)
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Boot indicator for an active partition
pub const BOOT_FLAG_ACTIVE: u8 = 0x80;

/// Partition type codes used by this layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PartitionKind {
    /// Linux native data partition
    Primary = 0x83,
    /// CHS-addressed extended partition (EBR chain container)
    Extended = 0x05,
}

impl PartitionKind {
    /// Decode an on-disk type byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x83 => Some(Self::Primary),
            0x05 => Some(Self::Extended),
            _ => None,
        }
    }

    /// On-disk type byte
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Transfer direction of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Disk to caller buffers
    Read,
    /// Caller buffers to disk
    Write,
}
