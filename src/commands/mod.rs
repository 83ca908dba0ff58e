//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod catalog;
pub mod extract;
pub mod insert;

use crate::fs::apex::DirRegion;
use crate::DYNERR;

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand
}

/// Which directory copy the shared `--backup` flag selects.
pub fn dir_region(cmd: &clap::ArgMatches) -> DirRegion {
    match cmd.get_flag("backup") {
        true => DirRegion::Backup,
        false => DirRegion::Primary
    }
}

/// Compile the shared `--pattern` option.  Filenames are matched in their
/// normalized form, so the pattern is lower cased first.
pub fn glob_matcher(cmd: &clap::ArgMatches) -> Result<globset::GlobMatcher,DYNERR> {
    let pattern = match cmd.get_one::<String>("pattern") {
        Some(s) => s.to_lowercase(),
        None => "*".to_string()
    };
    Ok(globset::GlobBuilder::new(&pattern).literal_separator(true).build()?.compile_matcher())
}
