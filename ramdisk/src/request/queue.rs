//! Request queue
//!
//! Owned requests waiting for the device, drained in submission order. Each
//! dispatched request is completed exactly once with the status the request
//! processor returned, and its buffers are handed back so read data reaches
//! the submitter.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::IoRequest;
use crate::device::RamDisk;
use crate::error::{DiskError, Result};
use crate::types::Direction;
use crate::utils::sector::sector_to_byte;

/// A request whose segment buffers are owned by the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedRequest {
    /// Caller-chosen identifier echoed in the completion
    pub tag: u64,
    /// Transfer direction
    pub direction: Direction,
    /// Absolute first sector
    pub start_sector: u64,
    /// Declared sector count
    pub sector_count: u64,
    /// Segment buffers; filled in place for reads
    pub segments: Vec<Vec<u8>>,
}

impl QueuedRequest {
    /// Read into freshly zeroed segments of the given lengths
    ///
    /// Segment buffers are allocated fallibly; a refused allocation returns
    /// `AllocationFailure`.
    pub fn read(
        tag: u64,
        start_sector: u64,
        sector_count: u64,
        segment_lens: &[usize],
    ) -> Result<Self> {
        let mut segments = Vec::new();
        segments
            .try_reserve_exact(segment_lens.len())
            .map_err(|_| DiskError::AllocationFailure)?;
        for &len in segment_lens {
            segments.push(zeroed(len)?);
        }
        Ok(Self {
            tag,
            direction: Direction::Read,
            start_sector,
            sector_count,
            segments,
        })
    }

    /// Read `sector_count` sectors into a single segment
    ///
    /// A count whose byte length does not fit in `usize` returns `OutOfRange`.
    pub fn read_sectors(tag: u64, start_sector: u64, sector_count: u64) -> Result<Self> {
        let len = sector_to_byte(sector_count).ok_or(DiskError::OutOfRange)?;
        Self::read(tag, start_sector, sector_count, &[len])
    }

    /// Write the given segments
    pub fn write(tag: u64, start_sector: u64, sector_count: u64, segments: Vec<Vec<u8>>) -> Self {
        Self {
            tag,
            direction: Direction::Write,
            start_sector,
            sector_count,
            segments,
        }
    }

    /// Borrow as a request for the processor
    pub fn as_io_request(&mut self) -> IoRequest<'_> {
        match self.direction {
            Direction::Read => IoRequest::read(
                self.start_sector,
                self.sector_count,
                self.segments.iter_mut().map(|s| s.as_mut_slice()).collect(),
            ),
            Direction::Write => IoRequest::write(
                self.start_sector,
                self.sector_count,
                self.segments.iter().map(|s| s.as_slice()).collect(),
            ),
        }
    }

    /// All segments concatenated
    pub fn data(&self) -> Vec<u8> {
        self.segments.concat()
    }
}

fn zeroed(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| DiskError::AllocationFailure)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Outcome of one dispatched request
#[derive(Debug)]
pub struct Completion {
    /// The request, with read buffers filled
    pub request: QueuedRequest,
    /// Processor status
    pub status: Result<()>,
}

impl Completion {
    /// Tag of the completed request
    pub fn tag(&self) -> u64 {
        self.request.tag
    }
}

/// FIFO of pending requests
#[derive(Debug, Default)]
pub struct RequestQueue {
    pending: VecDeque<QueuedRequest>,
}

impl RequestQueue {
    /// Empty queue
    pub const fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    /// Append a request
    pub fn submit(&mut self, request: QueuedRequest) {
        self.pending.push_back(request);
    }

    /// Take the oldest pending request
    pub fn fetch(&mut self) -> Option<QueuedRequest> {
        self.pending.pop_front()
    }

    /// Pending requests
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Process every pending request against `disk`, oldest first
    ///
    /// A failing request does not stop the drain; its error is carried in its
    /// completion.
    pub fn dispatch(&mut self, disk: &mut RamDisk) -> Vec<Completion> {
        let mut completions = Vec::with_capacity(self.pending.len());
        while let Some(mut request) = self.fetch() {
            let status = disk.process(request.as_io_request());
            completions.push(Completion { request, status });
        }
        completions
    }
}
