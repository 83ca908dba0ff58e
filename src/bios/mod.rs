//! ## BIOS module
//!
//! Transformations that go between the file system and the physical disk,
//! i.e., sector skews.  These are kept separate from the image and file system
//! layers because both ends of the translation need them.

pub mod skew;
