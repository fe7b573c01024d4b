//! Partition tables and the boot sectors that carry them

use super::entry::PartitionEntry;
use crate::error::{DiskError, Result};
use crate::types::{
    BOOT_SIGNATURE, BOOT_SIGNATURE_OFFSET, DISK_SIGNATURE_OFFSET, PARTITION_ENTRY_SIZE,
    PARTITION_TABLE_ENTRIES, PARTITION_TABLE_OFFSET, SECTOR_SIZE,
};

/// Four-slot partition table; `None` slots serialize as zeros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartitionTable {
    entries: [Option<PartitionEntry>; PARTITION_TABLE_ENTRIES],
}

impl PartitionTable {
    /// Empty table
    pub const fn new() -> Self {
        Self {
            entries: [None; PARTITION_TABLE_ENTRIES],
        }
    }

    /// Table with the given slots
    pub const fn with_entries(entries: [Option<PartitionEntry>; PARTITION_TABLE_ENTRIES]) -> Self {
        Self { entries }
    }

    /// Replace one slot
    pub fn set(&mut self, index: usize, entry: PartitionEntry) -> Result<()> {
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(DiskError::InvalidPartitionTable)?;
        *slot = Some(entry);
        Ok(())
    }

    /// Slot contents
    pub fn get(&self, index: usize) -> Option<&PartitionEntry> {
        self.entries.get(index).and_then(|e| e.as_ref())
    }

    /// All four slots
    pub fn entries(&self) -> &[Option<PartitionEntry>; PARTITION_TABLE_ENTRIES] {
        &self.entries
    }

    /// Used slots in table order
    pub fn iter(&self) -> impl Iterator<Item = &PartitionEntry> {
        self.entries.iter().filter_map(|e| e.as_ref())
    }

    /// Write the table and the boot signature into a boot sector
    ///
    /// Bytes outside the table and the signature are left untouched.
    pub fn write_to(&self, sector: &mut [u8]) -> Result<()> {
        let sector: &mut [u8; SECTOR_SIZE] = sector
            .get_mut(..SECTOR_SIZE)
            .and_then(|s| s.try_into().ok())
            .ok_or(DiskError::OutOfRange)?;
        self.fill(sector);
        Ok(())
    }

    fn fill(&self, sector: &mut [u8; SECTOR_SIZE]) {
        for (i, entry) in self.entries.iter().enumerate() {
            let offset = PARTITION_TABLE_OFFSET + i * PARTITION_ENTRY_SIZE;
            let bytes = entry.map(|e| e.to_bytes()).unwrap_or([0u8; PARTITION_ENTRY_SIZE]);
            sector[offset..offset + PARTITION_ENTRY_SIZE].copy_from_slice(&bytes);
        }
        sector[BOOT_SIGNATURE_OFFSET..BOOT_SIGNATURE_OFFSET + 2]
            .copy_from_slice(&BOOT_SIGNATURE.to_le_bytes());
    }

    /// Parse the table out of a boot sector, checking the signature first
    pub fn parse(sector: &[u8]) -> Result<Self> {
        if sector.len() < SECTOR_SIZE {
            return Err(DiskError::OutOfRange);
        }

        let signature = u16::from_le_bytes([
            sector[BOOT_SIGNATURE_OFFSET],
            sector[BOOT_SIGNATURE_OFFSET + 1],
        ]);
        if signature != BOOT_SIGNATURE {
            return Err(DiskError::InvalidSignature);
        }

        let mut table = Self::new();
        for i in 0..PARTITION_TABLE_ENTRIES {
            let offset = PARTITION_TABLE_OFFSET + i * PARTITION_ENTRY_SIZE;
            let mut raw = [0u8; PARTITION_ENTRY_SIZE];
            raw.copy_from_slice(&sector[offset..offset + PARTITION_ENTRY_SIZE]);
            table.entries[i] = PartitionEntry::parse(&raw)?;
        }
        Ok(table)
    }
}

/// Sector 0 of the disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterBootRecord {
    /// 32-bit disk identifier at offset 440
    pub disk_signature: u32,
    /// Primary partition table
    pub table: PartitionTable,
}

impl MasterBootRecord {
    /// Render the full sector; everything outside the defined fields is zero
    pub fn to_sector(&self) -> [u8; SECTOR_SIZE] {
        let mut sector = [0u8; SECTOR_SIZE];
        sector[DISK_SIGNATURE_OFFSET..DISK_SIGNATURE_OFFSET + 4]
            .copy_from_slice(&self.disk_signature.to_le_bytes());
        self.table.fill(&mut sector);
        sector
    }

    /// Parse sector 0
    pub fn parse(sector: &[u8]) -> Result<Self> {
        let table = PartitionTable::parse(sector)?;
        let disk_signature = u32::from_le_bytes([
            sector[DISK_SIGNATURE_OFFSET],
            sector[DISK_SIGNATURE_OFFSET + 1],
            sector[DISK_SIGNATURE_OFFSET + 2],
            sector[DISK_SIGNATURE_OFFSET + 3],
        ]);
        Ok(Self {
            disk_signature,
            table,
        })
    }
}

/// One link of the EBR chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootRecord {
    /// Absolute sector holding this record
    pub sector: u64,
    /// Logical partition entry plus the optional link to the next record
    pub table: PartitionTable,
}

impl BootRecord {
    /// Render the full sector; everything outside the table is zero
    pub fn to_sector(&self) -> [u8; SECTOR_SIZE] {
        let mut sector = [0u8; SECTOR_SIZE];
        self.table.fill(&mut sector);
        sector
    }
}
