// BlockIo adapter: lets anything written against gpt_disk_io use the RAM disk.
//
// Reads and writes go through the request processor as single-segment
// requests, so writes obey the device's write policy.

use alloc::vec;

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};

use super::RamDisk;
use crate::error::{DiskError, Result};
use crate::request::IoRequest;
use crate::utils::sector::bytes_to_sectors;

impl BlockIo for RamDisk {
    type Error = DiskError;

    fn block_size(&self) -> BlockSize {
        BlockSize::BS_512
    }

    fn num_blocks(&mut self) -> Result<u64> {
        if !self.is_live() {
            return Err(DiskError::NotReady);
        }
        Ok(self.capacity_sectors())
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<()> {
        let sectors = bytes_to_sectors(dst.len());
        self.process(IoRequest::read(start_lba.0, sectors, vec![dst]))
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<()> {
        let sectors = bytes_to_sectors(src.len());
        self.process(IoRequest::write(start_lba.0, sectors, vec![src]))
    }

    fn flush(&mut self) -> Result<()> {
        // Nothing is buffered
        Ok(())
    }
}
