//! # Command Line Interface
//!
//! The subcommands are run from the `commands` module; this file only builds
//! the argument tree and dispatches.

use clap::{arg,crate_version,Command,ArgAction,ArgGroup};
use env_logger;
use log::error;
use apexdsk::commands;
use apexdsk::commands::CommandError;

fn shared_args(cmd: Command) -> Command {
    cmd
        .arg(arg!(-p --pattern <GLOB> "filename filter, matched against normalized names").required(false).default_value("*"))
        .arg(arg!(--tentative "include tentative entries").action(ArgAction::SetTrue))
        .arg(arg!(--replaced "include replaced entries").action(ArgAction::SetTrue))
        .arg(arg!(--backup "use the backup directory (blocks 13-16)").action(ArgAction::SetTrue))
        .arg(arg!(-v --verbose "log at info level").action(ArgAction::SetTrue))
}

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    let long_help =
"apexdsk reads and writes 140K Apex disk images (DSK dumps in DOS 3.3
sector order).  Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
list a directory:      `apexdsk ls myimg.dsk`
extract everything:    `apexdsk extract -d outdir myimg.dsk`
extract text to zip:   `apexdsk extract -t -z out.zip -p '*.txt' myimg.dsk`
replace file content:  `apexdsk insert host.bin 'rescod.sys' myimg.dsk`";

    let mut main_cmd = Command::new("apexdsk")
        .about("Reads and writes Apex floppy disk images.")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(shared_args(Command::new("ls"))
        .visible_alias("dir")
        .alias("v")
        .alias("l")
        .arg(arg!(<dimg> "path to disk image").value_name("IMAGE"))
        .about("list the directory of a disk image"));
    main_cmd = main_cmd.subcommand(shared_args(Command::new("extract"))
        .visible_alias("x")
        .alias("e")
        .arg(arg!(-d --destdir <PATH> "extract into this directory").required(false))
        .arg(arg!(-z --destzip <PATH> "extract into this ZIP archive").required(false))
        .group(ArgGroup::new("dest").args(["destdir","destzip"]).required(true))
        .arg(arg!(-t --textconv "truncate text files at the EOF marker").action(ArgAction::SetTrue))
        .arg(arg!(<dimg> "path to disk image").value_name("IMAGE"))
        .about("extract matching files from a disk image"));
    main_cmd = main_cmd.subcommand(Command::new("insert")
        .arg(arg!(--backup "use the backup directory (blocks 13-16)").action(ArgAction::SetTrue))
        .arg(arg!(-v --verbose "log at info level").action(ArgAction::SetTrue))
        .arg(arg!(<hostfile> "local file supplying the new content").value_name("HOSTFILE"))
        .arg(arg!(<file> "Apex filename to overwrite").value_name("APEXNAME"))
        .arg(arg!(<dimg> "path to disk image").value_name("IMAGE"))
        .about("overwrite one file's content inside a disk image"));

    let matches = main_cmd.get_matches();

    let verbose = match matches.subcommand() {
        Some((_,cmd)) => cmd.get_flag("verbose"),
        None => false
    };
    let default_level = match verbose {
        true => "info",
        false => "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    // List a directory
    if let Some(cmd) = matches.subcommand_matches("ls") {
        return commands::catalog::catalog(cmd);
    }

    // Extract matching files
    if let Some(cmd) = matches.subcommand_matches("extract") {
        return commands::extract::extract(cmd);
    }

    // Overwrite one file's content
    if let Some(cmd) = matches.subcommand_matches("insert") {
        return commands::insert::insert(cmd);
    }

    error!("No subcommand was found, try `apexdsk --help`");
    return Err(Box::new(CommandError::InvalidCommand));
}
