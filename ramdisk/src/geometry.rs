//! LBA to CHS conversion
//!
//! ```text
//! LBA = (C × HPC + H) × SPT + (S − 1)
//!
//! C = LBA ÷ (HPC × SPT)
//! H = (LBA ÷ SPT) mod HPC
//! S = (LBA mod SPT) + 1
//! ```
//!
//! CHS values in partition entries are legacy metadata: they are written for
//! format compatibility and never used to address the store. Inputs past the
//! addressable range are not rejected; the packed encoding keeps only the low
//! 10 bits of the cylinder.

/// Sectors per track (SPT)
pub const SECTORS_PER_TRACK: u64 = 63;

/// Heads per cylinder (HPC)
pub const HEADS_PER_CYLINDER: u64 = 255;

/// Highest cylinder representable in the packed 3-byte form
pub const MAX_ENCODED_CYLINDER: u32 = 0x3FF;

/// Cylinder containing `lba`
pub const fn lba_to_cylinder(lba: u64) -> u64 {
    lba / (HEADS_PER_CYLINDER * SECTORS_PER_TRACK)
}

/// Head containing `lba`
pub const fn lba_to_head(lba: u64) -> u64 {
    (lba / SECTORS_PER_TRACK) % HEADS_PER_CYLINDER
}

/// Sector (1-based) of `lba` within its track
pub const fn lba_to_sector(lba: u64) -> u64 {
    (lba % SECTORS_PER_TRACK) + 1
}

/// Cylinder/head/sector address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chs {
    /// Cylinder (only the low 10 bits survive encoding)
    pub cylinder: u32,
    /// Head, `0..255`
    pub head: u8,
    /// Sector, `1..=63`
    pub sector: u8,
}

impl Chs {
    /// CHS address of `lba` under the fixed 255/63 geometry
    pub const fn from_lba(lba: u64) -> Self {
        Self {
            cylinder: lba_to_cylinder(lba) as u32,
            head: lba_to_head(lba) as u8,
            sector: lba_to_sector(lba) as u8,
        }
    }

    /// Linear address of this CHS tuple
    ///
    /// Returns `None` for sector 0, which is not a valid CHS sector.
    pub fn to_lba(&self) -> Option<u64> {
        if self.sector == 0 {
            return None;
        }
        let track = self.cylinder as u64 * HEADS_PER_CYLINDER + self.head as u64;
        Some(track * SECTORS_PER_TRACK + (self.sector as u64 - 1))
    }

    /// Pack into the 3-byte partition entry form
    ///
    /// Byte 0 is the head, byte 1 carries the sector in bits 0-5 and cylinder
    /// bits 8-9 in bits 6-7, byte 2 holds cylinder bits 0-7.
    pub const fn encode(&self) -> [u8; 3] {
        let cylinder = self.cylinder & MAX_ENCODED_CYLINDER;
        let cyl_hi = ((cylinder >> 8) & 0x03) as u8;
        [
            self.head,
            (self.sector & 0x3F) | (cyl_hi << 6),
            (cylinder & 0xFF) as u8,
        ]
    }

    /// Unpack the 3-byte partition entry form
    pub const fn decode(bytes: [u8; 3]) -> Self {
        let cyl_hi = ((bytes[1] & 0xC0) as u32) << 2;
        Self {
            cylinder: cyl_hi | bytes[2] as u32,
            head: bytes[0],
            sector: bytes[1] & 0x3F,
        }
    }
}
