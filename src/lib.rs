//! # `apexdsk` main library
//!
//! This library reads and writes floppy disk images holding the Apex file system,
//! as used by 6502 systems running the Apex operating system.  The images are
//! 5.25 inch 16-sector DSK dumps (140K), i.e., a sequential dump of the already
//! decoded sector data in DOS 3.3 order.
//!
//! ## Architecture
//!
//! Operations are layered the same way the disk is:
//! * `bios` holds the sector skew tables and the permutation algebra that chains them
//! * `img::DiskImage` owns the raw image bytes and resolves logical blocks to byte offsets
//! * `fs::apex::Disk` imposes the Apex file system on the decoded blocks
//!
//! When a `Disk` is created it takes ownership of a `DiskImage` and uses it as
//! storage.  Any changes are not permanent until the image is saved to whatever
//! file system is hosting apexdsk; `save_img` is a no-op unless the image was
//! actually modified.

pub mod bios;
pub mod img;
pub mod fs;
pub mod commands;

use log::info;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

/// Create a file system object backed by the image at the given path.
/// The image is verified against the fixed Apex geometry before anything is parsed.
pub fn create_fs_from_file(img_path: &str) -> Result<fs::apex::Disk,DYNERR> {
    let disk_img_data = std::fs::read(img_path)?;
    let img = img::DiskImage::from_bytes(&disk_img_data)?;
    info!("loaded {} ({} bytes)",img_path,disk_img_data.len());
    Ok(fs::apex::Disk::from_img(img))
}

/// Save the image file (make changes permanent).  This is the single flush
/// point: it does nothing if the image is clean, otherwise it reserializes the
/// block array into the raw sector order and writes the whole image back.
pub fn save_img(disk: &mut fs::apex::Disk,img_path: &str) -> STDRESULT {
    if !disk.is_modified() {
        return Ok(());
    }
    std::fs::write(img_path,disk.get_img().to_bytes())?;
    disk.get_img().clear_modified();
    Ok(())
}
