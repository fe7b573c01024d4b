//! Lock-holding wrapper for callers that share one device across contexts

use alloc::vec::Vec;
use spin::{Mutex, MutexGuard};

use super::RamDisk;
use crate::error::Result;
use crate::request::queue::{Completion, RequestQueue};
use crate::request::IoRequest;

/// A `RamDisk` behind a spin lock
///
/// Each request runs to completion while the lock is held, which gives the
/// one-request-in-flight guarantee the request processor relies on.
pub struct SharedRamDisk {
    inner: Mutex<RamDisk>,
}

impl SharedRamDisk {
    /// Wrap a device
    pub const fn new(disk: RamDisk) -> Self {
        Self {
            inner: Mutex::new(disk),
        }
    }

    /// Process one request under the lock
    pub fn process(&self, request: IoRequest<'_>) -> Result<()> {
        self.inner.lock().process(request)
    }

    /// Drain a queue under the lock
    pub fn dispatch(&self, queue: &mut RequestQueue) -> Vec<Completion> {
        queue.dispatch(&mut self.inner.lock())
    }

    /// Exclusive access to the device
    pub fn lock(&self) -> MutexGuard<'_, RamDisk> {
        self.inner.lock()
    }

    /// Unwrap the device
    pub fn into_inner(self) -> RamDisk {
        self.inner.into_inner()
    }
}
