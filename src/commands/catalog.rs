use clap;
use log::info;
use crate::STDRESULT;

const RCH: &str = "unreachable was reached";

pub fn catalog(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let disk = crate::create_fs_from_file(img_path)?;
    let glob = super::glob_matcher(cmd)?;
    let entries: Vec<_> = disk.directory(
        super::dir_region(cmd),
        cmd.get_flag("replaced"),
        cmd.get_flag("tentative")
    ).into_iter().filter(|entry| glob.is_match(entry.normalized_name())).collect();
    info!("listing {} entries",entries.len());
    disk.catalog_to_stdout(&entries)
}
