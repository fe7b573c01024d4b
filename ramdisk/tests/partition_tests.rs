//! Partition table construction and discovery tests

mod common;

use common::MemoryBlockDevice;
use ramdisk::layout::{mb_to_sectors, DiskLayout, LOGICAL_SLOTS, PRIMARY_SECTORS};
use ramdisk::partition::{PartitionEntry, PartitionTable};
use ramdisk::types::{
    BOOT_SIGNATURE_OFFSET, DISK_SIGNATURE, DISK_SIGNATURE_OFFSET, PARTITION_TABLE_OFFSET,
};
use ramdisk::{build_tables, read_layout, DiskError, PartitionKind, SECTOR_SIZE};

fn stamped_image(layout: &DiskLayout) -> MemoryBlockDevice {
    let tables = build_tables(layout).expect("tables should build");
    let mut device = MemoryBlockDevice::zeroed(layout.disk_sectors as usize);
    tables.stamp(&mut device.data).expect("stamp should succeed");
    device
}

#[test]
fn test_build_is_deterministic() {
    let a = build_tables(&DiskLayout::STANDARD).unwrap();
    let b = build_tables(&DiskLayout::STANDARD).unwrap();
    assert_eq!(a, b);

    let sectors_a: Vec<_> = a.sectors().collect();
    let sectors_b: Vec<_> = b.sectors().collect();
    assert_eq!(sectors_a, sectors_b);
}

#[test]
fn test_mbr_entries() {
    let tables = build_tables(&DiskLayout::STANDARD).unwrap();
    let table = &tables.mbr.table;

    let primary = table.get(0).expect("primary entry");
    assert_eq!(primary.kind, PartitionKind::Primary);
    assert_eq!(primary.start_lba, 1);
    assert_eq!(primary.sector_count as u64, PRIMARY_SECTORS);
    assert!(!primary.boot_flag);

    let extended = table.get(1).expect("extended entry");
    assert_eq!(extended.kind, PartitionKind::Extended);
    assert_eq!(extended.start_lba as u64, PRIMARY_SECTORS + 1);
    assert_eq!(extended.sector_count as u64, LOGICAL_SLOTS.iter().sum::<u64>());
    assert_eq!(primary.end_lba(), extended.start_lba as u64);
    assert_eq!(extended.end_lba(), DiskLayout::STANDARD.end_sector());

    assert!(table.get(2).is_none());
    assert!(table.get(3).is_none());
    assert_eq!(table.entries().iter().filter(|e| e.is_some()).count(), 2);
}

#[test]
fn test_boot_record_chain() {
    let tables = build_tables(&DiskLayout::STANDARD).unwrap();
    let [prt2_1, prt2_2, prt2_3] = LOGICAL_SLOTS;
    let expected = [
        PRIMARY_SECTORS + 1,
        PRIMARY_SECTORS + prt2_1 + 1,
        PRIMARY_SECTORS + prt2_1 + prt2_2 + 1,
    ];

    let sectors: Vec<u64> = tables.boot_records.iter().map(|r| r.sector).collect();
    assert_eq!(sectors, expected);

    for (i, record) in tables.boot_records.iter().enumerate() {
        let logical = record.table.get(0).expect("logical entry");
        assert_eq!(logical.kind, PartitionKind::Primary);
        assert_eq!(logical.start_lba as u64, record.sector + 1);
        assert_eq!(logical.sector_count as u64, LOGICAL_SLOTS[i] - 1);

        match record.table.get(1) {
            Some(link) => {
                assert_eq!(link.kind, PartitionKind::Extended);
                assert_eq!(link.start_lba as u64, expected[i + 1]);
                assert_eq!(link.sector_count as u64, LOGICAL_SLOTS[i + 1]);
            }
            None => assert_eq!(i, 2, "only the last record ends the chain"),
        }
        assert!(record.table.get(2).is_none());
        assert!(record.table.get(3).is_none());
    }
    assert_eq!(prt2_3, mb_to_sectors(20));
}

#[test]
fn test_mbr_byte_layout() {
    let device = stamped_image(&DiskLayout::STANDARD);
    let mbr = &device.data[..SECTOR_SIZE];

    assert_eq!(&mbr[BOOT_SIGNATURE_OFFSET..BOOT_SIGNATURE_OFFSET + 2], &[0x55, 0xAA]);
    assert_eq!(
        &mbr[DISK_SIGNATURE_OFFSET..DISK_SIGNATURE_OFFSET + 4],
        &DISK_SIGNATURE.to_le_bytes()
    );
    assert!(mbr[..DISK_SIGNATURE_OFFSET].iter().all(|&b| b == 0));

    let primary = &mbr[PARTITION_TABLE_OFFSET..PARTITION_TABLE_OFFSET + 16];
    assert_eq!(
        primary,
        &[0x00, 0x00, 0x02, 0x00, 0x83, 65, 0x02, 0x00, 1, 0, 0, 0, 0x00, 0x10, 0, 0]
    );

    // Unused slots 2 and 3 are all zero
    assert!(mbr[PARTITION_TABLE_OFFSET + 32..BOOT_SIGNATURE_OFFSET]
        .iter()
        .all(|&b| b == 0));
}

#[test]
fn test_boot_records_carry_no_disk_signature() {
    let device = stamped_image(&DiskLayout::STANDARD);
    for sector in DiskLayout::STANDARD.boot_record_sectors() {
        let start = sector as usize * SECTOR_SIZE;
        let record = &device.data[start..start + SECTOR_SIZE];
        assert!(record[..PARTITION_TABLE_OFFSET].iter().all(|&b| b == 0));
        assert_eq!(&record[510..512], &[0x55, 0xAA]);
    }
}

#[test]
fn test_read_layout_matches_plan() {
    let layout = DiskLayout::STANDARD;
    let mut device = stamped_image(&layout);
    let found = read_layout(&mut device).expect("layout should parse");

    assert_eq!(found.disk_signature, DISK_SIGNATURE);
    assert_eq!(found.primary.len(), 1);
    assert_eq!(found.primary[0].start_lba, 1);
    assert_eq!(found.primary[0].sector_count, PRIMARY_SECTORS);
    assert_eq!(
        found.extended,
        Some((layout.extended_start(), layout.extended_sectors()))
    );

    let extents = layout.logical_extents();
    assert_eq!(found.logical.len(), extents.len());
    for (part, extent) in found.logical.iter().zip(extents.iter()) {
        assert_eq!(part.start_lba, extent.start);
        assert_eq!(part.sector_count, extent.sectors);
        assert_eq!(part.boot_record, Some(extent.boot_record));
    }
}

#[test]
fn test_read_layout_without_signature() {
    let mut device = MemoryBlockDevice::zeroed(4);
    assert_eq!(read_layout(&mut device), Err(DiskError::InvalidSignature));
}

#[test]
fn test_read_layout_rejects_backward_link() {
    let mut device = MemoryBlockDevice::zeroed(16);

    let mut mbr = PartitionTable::new();
    mbr.set(0, PartitionEntry::new(PartitionKind::Extended, 4, 12)).unwrap();
    mbr.write_to(&mut device.data[..SECTOR_SIZE]).unwrap();

    let mut ebr = PartitionTable::new();
    ebr.set(0, PartitionEntry::new(PartitionKind::Primary, 5, 2)).unwrap();
    ebr.set(1, PartitionEntry::new(PartitionKind::Extended, 4, 12)).unwrap();
    ebr.write_to(&mut device.data[4 * SECTOR_SIZE..5 * SECTOR_SIZE]).unwrap();

    assert_eq!(read_layout(&mut device), Err(DiskError::InvalidPartitionTable));
}

#[test]
fn test_table_parse_roundtrip() {
    let tables = build_tables(&DiskLayout::STANDARD).unwrap();
    for (_, sector) in tables.sectors() {
        let parsed = PartitionTable::parse(&sector).expect("sector should parse");
        assert!(parsed.iter().count() >= 1);
    }
    let record = &tables.boot_records[1];
    assert_eq!(PartitionTable::parse(&record.to_sector()), Ok(record.table));
}

#[test]
fn test_stamp_rejects_small_image() {
    let tables = build_tables(&DiskLayout::STANDARD).unwrap();
    let mut small = vec![0u8; 16 * SECTOR_SIZE];
    assert_eq!(tables.stamp(&mut small), Err(DiskError::OutOfRange));
    assert!(small.iter().all(|&b| b == 0));
}

#[test]
fn test_custom_layout() {
    let layout = DiskLayout {
        disk_sectors: 64,
        primary_start: 1,
        primary_sectors: 15,
        logical_slots: [16, 16, 16],
    };
    let mut device = stamped_image(&layout);
    let found = read_layout(&mut device).unwrap();

    let starts: Vec<u64> = found.logical.iter().map(|p| p.start_lba).collect();
    assert_eq!(starts, [17, 33, 49]);
    assert!(found.logical.iter().all(|p| p.sector_count == 15));
}
