//! RAM disk device lifecycle
//!
//! ```text
//! RamDisk::new()      no backing store, every request -> NotReady
//!      │ init()
//!      ▼
//! live device         store allocated, MBR + EBR chain stamped
//!      │ destroy()
//!      ▼
//! released            store freed; destroy() again is a no-op
//! ```

mod block_io;
mod shared;

pub use shared::SharedRamDisk;

use crate::error::{DiskError, Result};
use crate::layout::DiskLayout;
use crate::partition::build_tables;
use crate::request::{process, IoRequest, WritePolicy};
use crate::store::BackingStore;
use crate::{log_error, log_info};

/// RAM-backed disk with the fixed MBR layout
#[derive(Debug)]
pub struct RamDisk {
    store: Option<BackingStore>,
    layout: DiskLayout,
    policy: WritePolicy,
    open_count: u32,
}

impl RamDisk {
    /// Device with no backing store yet
    pub const fn new(policy: WritePolicy) -> Self {
        Self {
            store: None,
            layout: DiskLayout::STANDARD,
            policy,
            open_count: 0,
        }
    }

    /// Allocate and stamp a device with the default write policy
    pub fn create() -> Result<Self> {
        Self::with_policy(WritePolicy::default())
    }

    /// Allocate and stamp a device with an explicit write policy
    pub fn with_policy(policy: WritePolicy) -> Result<Self> {
        let mut disk = Self::new(policy);
        disk.init()?;
        Ok(disk)
    }

    /// Allocate the backing store and write the partition tables into it
    ///
    /// Returns the capacity in sectors. Calling `init` on a live device keeps
    /// the existing contents.
    pub fn init(&mut self) -> Result<u64> {
        if let Some(store) = &self.store {
            return Ok(store.sector_count());
        }

        let tables = build_tables(&self.layout)?;
        let mut store = BackingStore::allocate(self.layout.disk_sectors).map_err(|e| {
            log_error!("ramdisk: backing store allocation failed", self.layout.disk_bytes());
            e
        })?;
        tables.stamp(store.as_bytes_mut())?;

        let capacity = store.sector_count();
        self.store = Some(store);
        log_info!("ramdisk: device created, sectors", capacity);
        Ok(capacity)
    }

    /// Release the backing store
    ///
    /// Safe to call on a device that was never initialized or has already been
    /// destroyed.
    pub fn destroy(&mut self) {
        if self.store.take().is_some() {
            self.open_count = 0;
            log_info!("ramdisk: device destroyed");
        }
    }

    /// True while the backing store is allocated
    pub fn is_live(&self) -> bool {
        self.store.is_some()
    }

    /// Capacity reported to the host, in sectors (0 when not live)
    pub fn capacity_sectors(&self) -> u64 {
        self.store.as_ref().map_or(0, BackingStore::sector_count)
    }

    /// Layout plan stamped into the disk
    pub fn layout(&self) -> &DiskLayout {
        &self.layout
    }

    /// Active write policy
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Switch the write policy for subsequent requests
    pub fn set_policy(&mut self, policy: WritePolicy) {
        self.policy = policy;
    }

    /// Record an open of the device
    pub fn open(&mut self) -> Result<()> {
        if !self.is_live() {
            return Err(DiskError::NotReady);
        }
        self.open_count += 1;
        log_info!("ramdisk: open", self.open_count);
        Ok(())
    }

    /// Record a close of the device
    pub fn release(&mut self) {
        self.open_count = self.open_count.saturating_sub(1);
        log_info!("ramdisk: closed", self.open_count);
    }

    /// Handles currently open
    pub fn open_count(&self) -> u32 {
        self.open_count
    }

    /// Raw disk image, as a partitioning tool would read it
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.store.as_ref().map(BackingStore::as_bytes)
    }

    /// Process one request
    ///
    /// Requests must not overlap in time; see [`SharedRamDisk`] for a wrapper
    /// that serializes them.
    pub fn process(&mut self, request: IoRequest<'_>) -> Result<()> {
        let store = self.store.as_mut().ok_or(DiskError::NotReady)?;
        process(store, request, self.policy)
    }
}
