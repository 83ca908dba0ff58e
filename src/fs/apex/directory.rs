//! ## Apex directory region
//!
//! The directory is a fixed 1024 byte region spanning 4 blocks, stored twice
//! on disk (primary at blocks 9-12, backup at 13-16).  Unlike most directory
//! formats the fields are parallel arrays rather than per-entry records:
//!
//! * 0-527: 11-byte filenames (8 byte base + 3 byte extension)
//! * 528-575: status bytes
//! * 576-671: first block words (little endian)
//! * 672-767: last block words (little endian)
//! * 920-1015: packed date words (little endian)
//!
//! Bytes 768-919 hold volume level data (device, title, volume number) that
//! this layer does not interpret.

use chrono::NaiveDateTime;
use super::types::*;
use crate::img::BLOCK_COUNT;

/// One decoded directory slot.  Entries are read-only views of the directory;
/// overwriting file content never rewrites them.
#[derive(PartialEq,Eq,Clone,Debug)]
pub struct FileEntry {
    pub name: String,
    pub status: FileStatus,
    pub first_block: u16,
    pub last_block: u16,
    pub date: Option<NaiveDateTime>
}

impl FileEntry {
    /// Number of allocated blocks.  A reversed range counts as zero blocks.
    pub fn size_blocks(&self) -> usize {
        (self.last_block as usize + 1).saturating_sub(self.first_block as usize)
    }
    /// Lower case with spaces removed; this is the form used for pattern
    /// matching and for delivered file names.
    pub fn normalized_name(&self) -> String {
        self.name.to_lowercase().replace(' ',"")
    }
    /// Binary files are exempt from text conversion.
    pub fn is_binary(&self) -> bool {
        match self.normalized_name().rsplit_once('.') {
            Some((_,ext)) => BIN_EXTENSIONS.contains(&ext),
            None => false
        }
    }
    /// Name handed to the destination, with the provisional suffix if any.
    pub fn delivered_name(&self) -> String {
        format!("{}{}",self.normalized_name(),self.status.name_suffix())
    }
}

/// Render the 11 raw filename bytes as `BASE.EXT`.  Spaces are kept; any
/// stripping or case folding is a display and matching concern.
fn slot_name(raw: &[u8],slot: usize) -> String {
    let fname = &raw[slot*FNAME_SIZE..(slot+1)*FNAME_SIZE];
    format!("{}.{}",String::from_utf8_lossy(&fname[0..8]),String::from_utf8_lossy(&fname[8..11]))
}

fn slot_word(raw: &[u8],offset: usize,slot: usize) -> u16 {
    u16::from_le_bytes([raw[offset+2*slot],raw[offset+2*slot+1]])
}

/// Decode the raw directory region into entries, preserving slot order.
/// Empty slots are skipped silently; slots with a status this decoder does
/// not know are skipped with a diagnostic; replaced and tentative slots are
/// kept only on request.  Slots whose block range reverses or runs past the
/// end of the disk are skipped with a diagnostic.  An entry whose packed date
/// is not a calendar date is kept with an absent date and a diagnostic.
pub fn decode_directory(raw: &[u8],include_replaced: bool,include_tentative: bool) -> (Vec<FileEntry>,Vec<Diagnostic>) {
    assert_eq!(raw.len(),DIR_SIZE,"directory region must be {} bytes",DIR_SIZE);
    let mut entries: Vec<FileEntry> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for slot in 0..FILES_PER_DIR {
        let status = FileStatus::from(raw[STATUS_OFF+slot]);
        if status == FileStatus::Empty {
            continue;
        }
        let name = slot_name(raw,slot);
        match status {
            FileStatus::Unknown(v) => {
                diagnostics.push(Diagnostic::UnexpectedStatus { name, status: v });
                continue;
            },
            FileStatus::Replaced if !include_replaced => continue,
            FileStatus::Tentative if !include_tentative => continue,
            _ => {}
        }
        let first_block = slot_word(raw,FIRST_BLOCK_OFF,slot);
        let last_block = slot_word(raw,LAST_BLOCK_OFF,slot);
        // a block run that reverses or walks off the disk cannot be indexed
        if last_block < first_block || last_block as usize >= BLOCK_COUNT {
            diagnostics.push(Diagnostic::InvalidRange { name, first: first_block, last: last_block });
            continue;
        }
        let packed = slot_word(raw,FDATE_OFF,slot);
        let date = unpack_date(packed);
        if date.is_none() {
            diagnostics.push(Diagnostic::InvalidDate { name: name.clone(), packed });
        }
        entries.push(FileEntry {
            name,
            status,
            first_block,
            last_block,
            date
        });
    }
    return (entries,diagnostics);
}
