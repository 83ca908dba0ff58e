//! ## Disk Image Module
//!
//! Handles the DSK image holding an Apex volume: a simple sequential dump of
//! already-decoded sector data in DOS 3.3 order.  The file system layer only
//! ever addresses logical blocks; translation to byte offsets is confined to
//! this module and the skew tables it uses.

use log::trace;
use crate::bios::skew;
use crate::DYNERR;

pub const BLOCK_SIZE: usize = 256;
pub const BLOCK_COUNT: usize = 560;
pub const BLOCKS_PER_TRACK: usize = 16;

/// Enumerates image errors.  The `Display` trait will print the long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("unexpected image size")]
    UnexpectedSize
}

/// Byte offset of logical block `b` within the raw image buffer.
/// `xlat` is the ProDOS-to-DOS sector translation for one track.
/// Panics if `b` is out of range; callers must stay within `BLOCK_COUNT`.
pub fn block_offset(b: usize,xlat: &[usize]) -> usize {
    assert!(b < BLOCK_COUNT,"block {} out of range",b);
    ((b/BLOCKS_PER_TRACK)*BLOCKS_PER_TRACK + xlat[b%BLOCKS_PER_TRACK]) * BLOCK_SIZE
}

/// If a data source is smaller than `quantum` bytes, pad it with zeros.
/// If it is larger, do not include the extra bytes.
pub fn quantize_block(src: &[u8],quantum: usize) -> Vec<u8> {
    let mut padded: Vec<u8> = Vec::new();
    for i in 0..quantum {
        if i<src.len() {
            padded.push(src[i]);
        } else {
            padded.push(0);
        }
    }
    return padded;
}

/// Wrapper for the image data.  The raw buffer is segmented into logical
/// blocks on construction; `to_bytes` puts every block back at its mapped
/// offset.  Mutations set a dirty flag so that saving can be skipped when
/// nothing changed.
pub struct DiskImage {
    xlat: Vec<usize>,
    blocks: Vec<Vec<u8>>,
    modified: bool
}

impl DiskImage {
    /// Create a blank image (all zero blocks).
    pub fn create() -> Self {
        let xlat = skew::prodos_to_dos().expect("unreachable");
        Self {
            xlat,
            blocks: vec![vec![0;BLOCK_SIZE];BLOCK_COUNT],
            modified: false
        }
    }
    /// Segment a raw image buffer into logical blocks.  The buffer must be
    /// exactly `BLOCK_SIZE*BLOCK_COUNT` bytes or the image is rejected before
    /// any parsing happens.
    pub fn from_bytes(data: &[u8]) -> Result<Self,DYNERR> {
        if data.len() != BLOCK_SIZE*BLOCK_COUNT {
            return Err(Box::new(Error::UnexpectedSize));
        }
        let xlat = skew::prodos_to_dos()?;
        let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(BLOCK_COUNT);
        for b in 0..BLOCK_COUNT {
            let offset = block_offset(b,&xlat);
            blocks.push(data[offset..offset+BLOCK_SIZE].to_vec());
        }
        Ok(Self {
            xlat,
            blocks,
            modified: false
        })
    }
    /// Reassemble the raw image buffer in DOS sector order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ans: Vec<u8> = vec![0;BLOCK_SIZE*BLOCK_COUNT];
        for b in 0..BLOCK_COUNT {
            let offset = block_offset(b,&self.xlat);
            ans[offset..offset+BLOCK_SIZE].copy_from_slice(&self.blocks[b]);
        }
        return ans;
    }
    pub fn read_block(&self,b: usize) -> &[u8] {
        trace!("read block {}",b);
        &self.blocks[b]
    }
    /// Write a logical block and mark the image dirty.  If `dat` is shorter
    /// than a block it is zero padded; extra bytes are not included.
    pub fn write_block(&mut self,b: usize,dat: &[u8]) {
        trace!("write block {}",b);
        let padded = quantize_block(dat,BLOCK_SIZE);
        self.blocks[b].copy_from_slice(&padded);
        self.modified = true;
    }
    pub fn is_modified(&self) -> bool {
        self.modified
    }
    pub fn clear_modified(&mut self) {
        self.modified = false;
    }
}
