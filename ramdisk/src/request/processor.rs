//! Request processor
//!
//! Transfers each segment in order between the caller's buffers and the
//! backing store. There is no rollback: a request that fails part way keeps
//! the effect of every segment transferred before the failure.
//!
//! Callers must serialize requests against one store; nothing here locks.

use super::{IoRequest, WritePolicy};
use crate::error::{DiskError, Result};
use crate::store::BackingStore;
use crate::utils::sector::{bytes_to_sectors, is_sector_aligned};
use crate::{log_error, log_trace};

/// Sectors covered by one segment, or `Misaligned`
fn segment_sectors(len: usize) -> Result<u64> {
    if !is_sector_aligned(len) {
        log_error!("request: segment not sector aligned", len);
        return Err(DiskError::Misaligned);
    }
    Ok(bytes_to_sectors(len))
}

fn target_sector(start: u64, offset: u64) -> Result<u64> {
    start.checked_add(offset).ok_or(DiskError::OutOfRange)
}

/// Sector offset reached after the segments vs. the declared count
fn finish(transferred: u64, declared: u64) -> Result<()> {
    if transferred != declared {
        log_error!("request: segments do not match request sectors", transferred);
        return Err(DiskError::SizeMismatch);
    }
    Ok(())
}

/// Process one request against the store
///
/// # Errors
/// * `Misaligned` - a segment length is not a multiple of 512; processing stops
///   at that segment
/// * `OutOfRange` - a segment would run past the end of the store; processing
///   stops at that segment without touching it
/// * `SizeMismatch` - every segment was transferred but their sectors do not
///   add up to the declared count
pub fn process(
    store: &mut BackingStore,
    request: IoRequest<'_>,
    policy: WritePolicy,
) -> Result<()> {
    let mut offset = 0u64;

    match request {
        IoRequest::Read {
            start_sector,
            sector_count,
            segments,
        } => {
            for segment in segments {
                let sectors = segment_sectors(segment.len())?;
                let sector = target_sector(start_sector, offset)?;
                let source = store.sectors(sector, sectors).map_err(|e| {
                    log_error!("request: read past end of disk", sector);
                    e
                })?;
                segment.copy_from_slice(source);
                offset += sectors;
            }
            finish(offset, sector_count)
        }
        IoRequest::Write {
            start_sector,
            sector_count,
            segments,
        } => {
            for segment in segments {
                let sectors = segment_sectors(segment.len())?;
                let sector = target_sector(start_sector, offset)?;
                let target = store.sectors_mut(sector, sectors).map_err(|e| {
                    log_error!("request: write past end of disk", sector);
                    e
                })?;
                let replaced = policy.apply(segment, target);
                if replaced > 0 {
                    log_trace!("request: bytes rewritten by write policy", replaced);
                }
                offset += sectors;
            }
            finish(offset, sector_count)
        }
    }
}
