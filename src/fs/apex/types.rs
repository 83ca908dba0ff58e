use std::fmt;
use chrono::{NaiveDate,NaiveDateTime};

pub const BLOCK_SIZE: usize = 256;
pub const FILES_PER_DIR: usize = 48;
pub const DIR_SIZE: usize = 1024;
pub const FNAME_SIZE: usize = 11;
/// Offsets of the parallel arrays within the 1024 byte directory region.
pub const STATUS_OFF: usize = 528;
pub const FIRST_BLOCK_OFF: usize = 576;
pub const LAST_BLOCK_OFF: usize = 672;
pub const FDATE_OFF: usize = 920;
/// Blocks 0-8 are boot, 17 on is file storage.
pub const PRIMARY_DIR_BLOCKS: [usize;4] = [9,10,11,12];
pub const BACKUP_DIR_BLOCKS: [usize;4] = [13,14,15,16];
/// Apex text files mark logical end-of-content with this byte.
pub const EOF_MARKER: u8 = 0x1a;
/// Extensions that exempt a file from text conversion.
pub const BIN_EXTENSIONS: [&str;5] = ["bin","i2l","obj","sav","sys"];

/// Enumerates Apex file system errors.  The `Display` trait will print the long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("file not found")]
    NoFile,
    #[error("insufficient space")]
    NoRoom
}

/// Directory slot status byte.  This is a closed set so that a value the
/// decoder has never seen has to be handled explicitly rather than falling
/// through some ad hoc branch.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum FileStatus {
    Empty,
    Valid,
    Replaced,
    Tentative,
    Unknown(u8)
}

impl From<u8> for FileStatus {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::Empty,
            1 => Self::Valid,
            254 => Self::Replaced,
            255 => Self::Tentative,
            _ => Self::Unknown(v)
        }
    }
}

impl FileStatus {
    /// Single character flag used in catalog listings.
    pub fn flag(&self) -> char {
        match self {
            Self::Replaced => 'r',
            Self::Tentative => 't',
            _ => ' '
        }
    }
    /// Suffix appended to the delivered name of a provisional entry.
    /// The stored directory name is never altered.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            Self::Replaced => ".replaced",
            Self::Tentative => ".tentative",
            _ => ""
        }
    }
}

/// Decode the packed Apex date word.  Returns None unless the components
/// form a valid calendar date; in particular a zeroed word decodes to
/// 1976.00.00 which is absent, not an error.  Valid dates are pinned to noon.
pub fn unpack_date(v: u16) -> Option<NaiveDateTime> {
    let day = (v % 32) as u32;
    let month = ((v / 32) % 16) as u32;
    let year = 1976 + (v / 512) as i32;
    match NaiveDate::from_ymd_opt(year,month,day) {
        Some(date) => date.and_hms_opt(12,0,0),
        None => None
    }
}

/// Non-fatal conditions found while decoding a directory.  Decoding stays a
/// pure function of the bytes; callers decide how to report these.
#[derive(PartialEq,Eq,Clone,Debug)]
pub enum Diagnostic {
    UnexpectedStatus { name: String, status: u8 },
    InvalidDate { name: String, packed: u16 },
    InvalidRange { name: String, first: u16, last: u16 }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self,f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedStatus { name, status } => {
                write!(f,"unexpected status {} for `{}`, skipping entry",status,name)
            },
            Self::InvalidDate { name, packed } => {
                let day = packed % 32;
                let month = (packed / 32) % 16;
                let year = 1976 + packed / 512;
                write!(f,"packed date {} for `{}` decodes to invalid {:04}.{:02}.{:02}",packed,name,year,month,day)
            },
            Self::InvalidRange { name, first, last } => {
                write!(f,"block range {}-{} for `{}` is not on the disk, skipping entry",first,last,name)
            }
        }
    }
}

#[test]
fn date_decoding() {
    // zeroed word is year 1976, month 0, day 0: not a calendar date
    assert_eq!(unpack_date(0),None);
    // 1977.03.15 at noon
    let v: u16 = 512 + 3*32 + 15;
    let expected = NaiveDate::from_ymd_opt(1977,3,15).unwrap().and_hms_opt(12,0,0).unwrap();
    assert_eq!(unpack_date(v),Some(expected));
    // month 13 can be encoded but is not a date
    assert_eq!(unpack_date(13*32 + 1),None);
}
