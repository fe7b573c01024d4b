//! MBR RAM Disk
//!
//! A `no_std` RAM-backed block device that presents itself as a disk with a
//! classic MBR partition layout and services sector-granular read/write requests.
//!
//! # Overview
//!
//! The disk is 50 MiB of volatile memory laid out as:
//! - sector 0: Master Boot Record (primary table, disk signature, `0xAA55`)
//! - one 2 MiB primary partition starting at sector 1
//! - one 48 MiB extended partition holding three logical partitions
//!   (10 MiB, 18 MiB, 20 MiB), each introduced by an Extended Boot Record
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Geometry layer** - LBA to CHS conversion and CHS byte packing
//! 2. **Partition layer** - MBR/EBR construction, serialization and parsing
//! 3. **Storage layer** - the zero-filled backing store
//! 4. **Request layer** - request validation, copying and the write policy
//! 5. **Device layer** - lifecycle, request queue, `BlockIo` adapter
//!
//! # Usage
//!
//! ```ignore
//! use ramdisk::{IoRequest, RamDisk};
//!
//! let mut disk = RamDisk::create()?;
//!
//! let mut mbr = [0u8; 512];
//! disk.process(IoRequest::read(0, 1, vec![&mut mbr[..]]))?;
//! assert_eq!(&mbr[510..512], &[0x55, 0xAA]);
//!
//! disk.destroy();
//! ```
//!
//! # Concurrency
//!
//! The core holds no locks. Callers must serialize requests per device, either
//! by owning the `RamDisk` on a single worker or by going through
//! [`SharedRamDisk`].

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod error;
pub mod types;
pub mod logger;
pub mod geometry;
pub mod layout;
pub mod partition;
pub mod store;
pub mod request;
pub mod device;
pub mod utils;

pub use error::{DiskError, Result};
pub use types::{Direction, PartitionKind, SECTOR_SIZE};
pub use layout::DiskLayout;
pub use store::BackingStore;

// High-level API exports
pub use partition::{build_tables, read_layout, PartitionTables};
pub use request::{process, IoRequest, WritePolicy};
pub use request::queue::{Completion, QueuedRequest, RequestQueue};
pub use device::{RamDisk, SharedRamDisk};
