//! Sector alignment and calculation utilities

use core::ops::Range;

use crate::types::SECTOR_SIZE;

/// Check if a byte length is a whole number of sectors
pub fn is_sector_aligned(len: usize) -> bool {
    len % SECTOR_SIZE == 0
}

/// Whole sectors in a byte length (remainder ignored)
pub fn bytes_to_sectors(len: usize) -> u64 {
    (len / SECTOR_SIZE) as u64
}

/// Convert sector number to byte offset
pub fn sector_to_byte(sector: u64) -> Option<usize> {
    usize::try_from(sector).ok()?.checked_mul(SECTOR_SIZE)
}

/// Byte range covering `count` sectors starting at `start`
///
/// Returns `None` if the range does not fit in `usize`.
pub fn sector_range(start: u64, count: u64) -> Option<Range<usize>> {
    let begin = sector_to_byte(start)?;
    let end = begin.checked_add(sector_to_byte(count)?)?;
    Some(begin..end)
}
