use clap;
use log::info;
use crate::STDRESULT;

const RCH: &str = "unreachable was reached";

/// Replace the content of an existing Apex file with a local file's bytes.
/// The target keeps its block range and directory metadata; the operation
/// fails if the padded content does not fit.
pub fn insert(cmd: &clap::ArgMatches) -> STDRESULT {
    let host_path = cmd.get_one::<String>("hostfile").expect(RCH);
    let target = cmd.get_one::<String>("file").expect(RCH);
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let dat = std::fs::read(host_path)?;
    let mut disk = crate::create_fs_from_file(img_path)?;
    let entry = disk.get_file_entry(target,super::dir_region(cmd))?;
    let written = disk.write_file(&entry,&dat)?;
    info!("wrote {} bytes into `{}`",written,entry.name);
    crate::save_img(&mut disk,img_path)
}
