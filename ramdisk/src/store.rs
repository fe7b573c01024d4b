//! Backing store
//!
//! One contiguous, zero-filled buffer holding every sector of the disk.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{DiskError, Result};
use crate::types::SECTOR_SIZE;
use crate::utils::sector::sector_range;

/// Volatile disk contents
pub struct BackingStore {
    data: Vec<u8>,
}

impl fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingStore")
            .field("sectors", &self.sector_count())
            .finish()
    }
}

impl BackingStore {
    /// Allocate `sectors` zeroed sectors
    ///
    /// Allocation is fallible: an allocator refusal is reported as
    /// [`DiskError::AllocationFailure`] instead of aborting.
    pub fn allocate(sectors: u64) -> Result<Self> {
        let len = sector_range(0, sectors)
            .map(|range| range.end)
            .ok_or(DiskError::AllocationFailure)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| DiskError::AllocationFailure)?;
        data.resize(len, 0);
        Ok(Self { data })
    }

    /// Number of sectors held
    pub fn sector_count(&self) -> u64 {
        (self.data.len() / SECTOR_SIZE) as u64
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-sector store
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whole disk image
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whole disk image, mutable
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes of `count` sectors starting at `start`
    pub fn sectors(&self, start: u64, count: u64) -> Result<&[u8]> {
        let range = sector_range(start, count).ok_or(DiskError::OutOfRange)?;
        self.data.get(range).ok_or(DiskError::OutOfRange)
    }

    /// Mutable bytes of `count` sectors starting at `start`
    pub fn sectors_mut(&mut self, start: u64, count: u64) -> Result<&mut [u8]> {
        let range = sector_range(start, count).ok_or(DiskError::OutOfRange)?;
        self.data.get_mut(range).ok_or(DiskError::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_zeroed() {
        let store = BackingStore::allocate(8).unwrap();
        assert_eq!(store.sector_count(), 8);
        assert_eq!(store.len(), 8 * SECTOR_SIZE);
        assert!(store.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocate_impossible_size() {
        assert!(matches!(
            BackingStore::allocate(u64::MAX),
            Err(DiskError::AllocationFailure)
        ));
    }

    #[test]
    fn test_sector_bounds() {
        let mut store = BackingStore::allocate(4).unwrap();
        assert_eq!(store.sectors(3, 1).unwrap().len(), SECTOR_SIZE);
        assert_eq!(store.sectors(3, 2), Err(DiskError::OutOfRange));
        assert!(store.sectors_mut(4, 1).is_err());
        assert_eq!(store.sectors(4, 0).unwrap().len(), 0);
    }
}
