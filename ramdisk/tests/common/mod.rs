//! Common test utilities and an independent block device

#![allow(dead_code)]

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use ramdisk::{IoRequest, RamDisk, WritePolicy, SECTOR_SIZE};
use std::io;

/// In-memory block device holding a raw image, independent of `RamDisk`
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
}

impl MemoryBlockDevice {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Zeroed image of `sectors` sectors
    pub fn zeroed(sectors: usize) -> Self {
        Self::new(vec![0u8; sectors * SECTOR_SIZE])
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::BS_512
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / SECTOR_SIZE) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * SECTOR_SIZE;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * SECTOR_SIZE;
        if offset + src.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "write beyond end of device",
            ));
        }
        self.data[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Live device storing writes verbatim
pub fn passthrough_disk() -> RamDisk {
    RamDisk::with_policy(WritePolicy::Passthrough).expect("device creation")
}

/// Live device with the averaging write policy
pub fn averaging_disk() -> RamDisk {
    RamDisk::with_policy(WritePolicy::AverageOnMismatch).expect("device creation")
}

/// `len` bytes of a repeating, seed-dependent pattern
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(7).wrapping_add(seed)).collect()
}

/// Read `count` sectors starting at `start` through the request processor
pub fn read_sectors(disk: &mut RamDisk, start: u64, count: u64) -> Vec<u8> {
    let mut buf = vec![0u8; count as usize * SECTOR_SIZE];
    disk.process(IoRequest::read(start, count, vec![&mut buf[..]]))
        .expect("read should succeed");
    buf
}
