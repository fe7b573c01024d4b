//! Write-path data policy
//!
//! `AverageOnMismatch` models a medium that corrupts writes: every incoming
//! byte that differs from the stored byte at the same position is replaced,
//! from the fourth byte of the segment on, by the rounded mean of the three
//! bytes written just before it. The rule runs left to right over
//! the segment being written, so a replaced byte feeds the means that follow.
//! Bytes equal to what is already stored are written as-is.
//!
//! `Passthrough` stores incoming data unchanged.

use crate::log_trace;

/// How incoming write data is committed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Replace mismatching bytes (index >= 3) with the mean of the previous three
    AverageOnMismatch,
    /// Store incoming bytes verbatim
    Passthrough,
}

impl Default for WritePolicy {
    #[cfg(not(feature = "passthrough-writes"))]
    fn default() -> Self {
        Self::AverageOnMismatch
    }

    #[cfg(feature = "passthrough-writes")]
    fn default() -> Self {
        Self::Passthrough
    }
}

/// Mean of three bytes, rounded half up
fn rounded_mean(a: u8, b: u8, c: u8) -> u8 {
    ((a as u16 + b as u16 + c as u16 + 1) / 3) as u8
}

impl WritePolicy {
    /// Commit `incoming` over `stored`, returning how many bytes were replaced
    ///
    /// Both slices must have the same length.
    pub fn apply(self, incoming: &[u8], stored: &mut [u8]) -> usize {
        debug_assert_eq!(incoming.len(), stored.len());

        match self {
            Self::Passthrough => {
                stored.copy_from_slice(incoming);
                0
            }
            Self::AverageOnMismatch => {
                let mut replaced = 0;
                for i in 0..incoming.len() {
                    if stored[i] == incoming[i] {
                        continue;
                    }
                    if i < 3 {
                        stored[i] = incoming[i];
                        continue;
                    }
                    // stored[i-3..i] already holds this segment's committed bytes
                    let mean = rounded_mean(stored[i - 3], stored[i - 2], stored[i - 1]);
                    log_trace!("write: byte replaced by mean", mean);
                    stored[i] = mean;
                    replaced += 1;
                }
                replaced
            }
        }
    }
}
