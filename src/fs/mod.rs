//! # File System Module
//!
//! File system modules handle interactions with directories and files.
//! There is one sub-module, for the Apex file system.  The file system trait
//! object takes ownership of a disk image, which it uses as storage.
//!
//! Sector skews are not handled here; transformation of a block number to a
//! physical disk address is handled within the `img` module.

pub mod apex;
