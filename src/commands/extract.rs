use std::io::Write;
use std::path::PathBuf;
use clap;
use chrono::{Datelike,Timelike,NaiveDateTime};
use log::info;
use crate::STDRESULT;
use crate::DYNERR;

const RCH: &str = "unreachable was reached";

/// A stored filename can hold any byte, so path separators are stripped
/// out before the name reaches the host file system or an archive.
fn sanitize_name(name: &str) -> String {
    name.replace('/',"_").replace('\\',"_")
}

/// One concrete sink for extracted files, chosen up front from the
/// `--destdir`/`--destzip` pair.  Exactly one of the two is present,
/// clap enforces the group.
enum Destination {
    Directory(PathBuf),
    Archive(zip::ZipWriter<std::fs::File>)
}

impl Destination {
    fn from_args(cmd: &clap::ArgMatches) -> Result<Self,DYNERR> {
        if let Some(dir) = cmd.get_one::<String>("destdir") {
            return Ok(Self::Directory(PathBuf::from(dir)));
        }
        let path = cmd.get_one::<String>("destzip").expect(RCH);
        let file = std::fs::File::create(path)?;
        Ok(Self::Archive(zip::ZipWriter::new(file)))
    }
    /// Write one extracted file.  ZIP entries are stamped with the decoded
    /// date when there is one; otherwise the archive default stands.
    fn write(&mut self,name: &str,date: Option<NaiveDateTime>,dat: &[u8]) -> STDRESULT {
        let name = sanitize_name(name);
        match self {
            Self::Directory(root) => {
                std::fs::write(root.join(&name),dat)?;
                Ok(())
            },
            Self::Archive(writer) => {
                let mut options = zip::write::FileOptions::default();
                if let Some(d) = date {
                    if let Ok(stamp) = zip::DateTime::from_date_and_time(
                        d.year() as u16,d.month() as u8,d.day() as u8,
                        d.hour() as u8,d.minute() as u8,d.second() as u8
                    ) {
                        options = options.last_modified_time(stamp);
                    }
                }
                writer.start_file(name,options)?;
                writer.write_all(dat)?;
                Ok(())
            }
        }
    }
    fn finish(self) -> STDRESULT {
        match self {
            Self::Directory(_) => Ok(()),
            Self::Archive(mut writer) => {
                writer.finish()?;
                Ok(())
            }
        }
    }
}

pub fn extract(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let disk = crate::create_fs_from_file(img_path)?;
    let glob = super::glob_matcher(cmd)?;
    let textconv = cmd.get_flag("textconv");
    let mut dest = Destination::from_args(cmd)?;
    for entry in disk.directory(super::dir_region(cmd),cmd.get_flag("replaced"),cmd.get_flag("tentative")) {
        if !glob.is_match(entry.normalized_name()) {
            continue;
        }
        let dat = disk.read_file(&entry,textconv);
        let name = entry.delivered_name();
        info!("extracting {} ({} bytes)",name,dat.len());
        dest.write(&name,entry.date,&dat)?;
    }
    dest.finish()
}
