//! ## Apex file system module
//!
//! The Apex file system keeps files in contiguous block runs, recorded in a
//! fixed-size directory that exists in two copies.  Blocks 0-8 hold boot code,
//! 9-12 the primary directory, 13-16 the backup directory, and 17 on is file
//! storage.  There is no allocation bitmap; the directory ranges are the only
//! record of what is used.
//!
//! Content overwrites never touch the directory: recorded size, date and
//! status stay as they were.  This mirrors the behavior of the native system
//! tools and is deliberate.

pub mod types;
pub mod directory;

use log::{warn,error};
use types::*;
use directory::*;
use crate::img::{self,DiskImage};
use crate::{STDRESULT,DYNERR};

/// Selects which of the two directory copies to read.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum DirRegion {
    Primary,
    Backup
}

impl DirRegion {
    fn blocks(&self) -> [usize;4] {
        match self {
            Self::Primary => PRIMARY_DIR_BLOCKS,
            Self::Backup => BACKUP_DIR_BLOCKS
        }
    }
}

/// The primary interface for disk operations.
pub struct Disk {
    img: DiskImage
}

impl Disk {
    /// Create a file system using the given image as storage.
    /// The `Disk` takes ownership of the image.
    pub fn from_img(img: DiskImage) -> Self {
        return Self {
            img
        }
    }
    /// The selected 4-block directory window as one contiguous buffer.
    fn raw_directory(&self,region: DirRegion) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::with_capacity(DIR_SIZE);
        for b in region.blocks() {
            buf.extend_from_slice(self.img.read_block(b));
        }
        return buf;
    }
    /// Decode the selected directory copy, logging any decode diagnostics
    /// as warnings.  Warnings never fail the operation.
    pub fn directory(&self,region: DirRegion,include_replaced: bool,include_tentative: bool) -> Vec<FileEntry> {
        let (entries,diagnostics) = decode_directory(&self.raw_directory(region),include_replaced,include_tentative);
        for diag in &diagnostics {
            warn!("{}",diag);
        }
        return entries;
    }
    /// Concatenate the entry's blocks in order.  When `textconv` is requested
    /// and the file is not binary-classified, the buffer is truncated at the
    /// first EOF marker.
    pub fn read_file(&self,entry: &FileEntry,textconv: bool) -> Vec<u8> {
        let beg = entry.first_block as usize;
        let mut buf: Vec<u8> = Vec::with_capacity(entry.size_blocks()*BLOCK_SIZE);
        for b in beg..beg+entry.size_blocks() {
            buf.extend_from_slice(self.img.read_block(b));
        }
        if textconv && !entry.is_binary() {
            if let Some(eof) = buf.iter().position(|c| *c==EOF_MARKER) {
                buf.truncate(eof);
            }
        }
        return buf;
    }
    /// Overwrite the entry's allocated blocks with `dat`, zero padded up to a
    /// block boundary.  Fails without touching the image if the padded data
    /// exceeds the entry's block range; a file can never grow.  Directory
    /// metadata is left unchanged in any case.
    pub fn write_file(&mut self,entry: &FileEntry,dat: &[u8]) -> Result<usize,DYNERR> {
        let blocks_needed = match dat.len() {
            0 => 0,
            n => 1 + (n-1)/BLOCK_SIZE
        };
        if blocks_needed > entry.size_blocks() {
            error!("{} bytes need {} blocks but `{}` has {}",dat.len(),blocks_needed,entry.name,entry.size_blocks());
            return Err(Box::new(Error::NoRoom));
        }
        let beg = entry.first_block as usize;
        for i in 0..blocks_needed {
            let end = std::cmp::min(dat.len(),(i+1)*BLOCK_SIZE);
            self.img.write_block(beg+i,&dat[i*BLOCK_SIZE..end]);
        }
        Ok(blocks_needed*BLOCK_SIZE)
    }
    /// Scan the directory for the first entry whose normalized name matches
    /// the pattern.  All statuses are eligible; the caller chose the target.
    /// Decode diagnostics are left to `directory`, which reports them.
    pub fn get_file_entry(&self,pattern: &str,region: DirRegion) -> Result<FileEntry,DYNERR> {
        let glob = globset::GlobBuilder::new(&pattern.to_lowercase()).literal_separator(true).build()?.compile_matcher();
        let (entries,_) = decode_directory(&self.raw_directory(region),true,true);
        for entry in entries {
            if glob.is_match(entry.normalized_name()) {
                return Ok(entry);
            }
        }
        error!("no directory entry matches `{}`",pattern);
        Err(Box::new(Error::NoFile))
    }
    /// Write the catalog lines for the given entries to stdout.
    pub fn catalog_to_stdout(&self,entries: &[FileEntry]) -> STDRESULT {
        println!("filename      start  size  date");
        println!("------------- ----- ----- ----------");
        for entry in entries {
            let date = match entry.date {
                Some(d) => d.format("%Y.%m.%d").to_string(),
                None => "<no date>".to_string()
            };
            println!("{:12}{} {:5} {:5} {}",entry.name,entry.status.flag(),entry.first_block,entry.size_blocks(),date);
        }
        Ok(())
    }
    pub fn is_modified(&self) -> bool {
        self.img.is_modified()
    }
    pub fn get_img(&mut self) -> &mut DiskImage {
        &mut self.img
    }
}

// the file system and image layers must agree on the block size
const _: () = assert!(BLOCK_SIZE == img::BLOCK_SIZE);
