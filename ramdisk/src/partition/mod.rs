//! MBR / EBR partition tables
//!
//! Construction ([`build_tables`]), serialization ([`PartitionTable::write_to`])
//! and discovery ([`read_layout`]) of the boot sectors stamped into the disk.

pub mod builder;
pub mod entry;
pub mod reader;
pub mod table;

pub use builder::{build_tables, PartitionTables};
pub use entry::PartitionEntry;
pub use reader::{read_layout, DiscoveredLayout, DiscoveredPartition};
pub use table::{BootRecord, MasterBootRecord, PartitionTable};
