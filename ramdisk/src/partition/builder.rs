//! MBR and EBR chain construction
//!
//! The builder is a pure function of the layout plan: the same plan always
//! produces byte-identical boot sectors.

use alloc::vec::Vec;

use super::entry::PartitionEntry;
use super::table::{BootRecord, MasterBootRecord, PartitionTable};
use crate::error::{DiskError, Result};
use crate::layout::DiskLayout;
use crate::types::{PartitionKind, DISK_SIGNATURE, SECTOR_SIZE};
use crate::utils::sector::sector_range;

/// MBR plus the EBR chain for one layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTables {
    /// Sector 0
    pub mbr: MasterBootRecord,
    /// Boot records in chain order
    pub boot_records: Vec<BootRecord>,
}

/// Build the partition tables described by `layout`
///
/// # Layout
/// - MBR slot 0: primary partition at `primary_start`
/// - MBR slot 1: extended partition covering every logical slot
/// - EBR slot 0: the logical partition following the record
/// - EBR slot 1: link to the next record (absent on the last one)
///
/// All starting LBAs are absolute disk sectors.
pub fn build_tables(layout: &DiskLayout) -> Result<PartitionTables> {
    let primary = PartitionEntry::from_range(
        PartitionKind::Primary,
        layout.primary_start,
        layout.primary_sectors,
    )?;
    let extended = PartitionEntry::from_range(
        PartitionKind::Extended,
        layout.extended_start(),
        layout.extended_sectors(),
    )?;
    let mbr = MasterBootRecord {
        disk_signature: DISK_SIGNATURE,
        table: PartitionTable::with_entries([Some(primary), Some(extended), None, None]),
    };

    let extents = layout.logical_extents();
    let mut boot_records = Vec::with_capacity(extents.len());
    for (i, extent) in extents.iter().enumerate() {
        let mut table = PartitionTable::new();
        table.set(
            0,
            PartitionEntry::from_range(PartitionKind::Primary, extent.start, extent.sectors)?,
        )?;

        if let Some(next) = extents.get(i + 1) {
            table.set(
                1,
                PartitionEntry::from_range(
                    PartitionKind::Extended,
                    next.boot_record,
                    next.slot_sectors(),
                )?,
            )?;
        }

        boot_records.push(BootRecord {
            sector: extent.boot_record,
            table,
        });
    }

    Ok(PartitionTables { mbr, boot_records })
}

impl PartitionTables {
    /// Every boot sector as `(absolute sector, bytes)`, MBR first
    pub fn sectors(&self) -> impl Iterator<Item = (u64, [u8; SECTOR_SIZE])> + '_ {
        core::iter::once((0, self.mbr.to_sector())).chain(
            self.boot_records
                .iter()
                .map(|record| (record.sector, record.to_sector())),
        )
    }

    /// Write every boot sector into a raw disk image
    ///
    /// Each target sector is replaced whole. Fails without writing anything if
    /// a boot record lies outside `disk`.
    pub fn stamp(&self, disk: &mut [u8]) -> Result<()> {
        let disk_sectors = (disk.len() / SECTOR_SIZE) as u64;
        if self.sectors().any(|(sector, _)| sector >= disk_sectors) {
            return Err(DiskError::OutOfRange);
        }

        for (sector, bytes) in self.sectors() {
            let range = sector_range(sector, 1).ok_or(DiskError::OutOfRange)?;
            disk[range].copy_from_slice(&bytes);
        }
        Ok(())
    }
}
