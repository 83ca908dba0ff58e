// test of the Apex file system module
use apexdsk::img::{DiskImage,BLOCK_SIZE,BLOCK_COUNT};
use apexdsk::fs::apex::{Disk,DirRegion};
use apexdsk::fs::apex::types::*;
use apexdsk::fs::apex::directory::{decode_directory,FileEntry};
use chrono::NaiveDate;

/// entries are (slot, 11-char raw name, status, first block, last block, packed date)
fn dir_region(entries: &[(usize,&str,u8,u16,u16,u16)]) -> Vec<u8> {
    let mut raw: Vec<u8> = vec![0;DIR_SIZE];
    for (slot,name,status,first,last,date) in entries {
        assert_eq!(name.len(),FNAME_SIZE);
        raw[slot*FNAME_SIZE..(slot+1)*FNAME_SIZE].copy_from_slice(name.as_bytes());
        raw[STATUS_OFF+slot] = *status;
        raw[FIRST_BLOCK_OFF+2*slot..FIRST_BLOCK_OFF+2*slot+2].copy_from_slice(&u16::to_le_bytes(*first));
        raw[LAST_BLOCK_OFF+2*slot..LAST_BLOCK_OFF+2*slot+2].copy_from_slice(&u16::to_le_bytes(*last));
        raw[FDATE_OFF+2*slot..FDATE_OFF+2*slot+2].copy_from_slice(&u16::to_le_bytes(*date));
    }
    raw
}

/// round-trips through raw bytes so the result starts out unmodified
fn image_with_dir(raw_dir: &[u8],region: DirRegion) -> DiskImage {
    let mut img = DiskImage::create();
    let blocks = match region {
        DirRegion::Primary => PRIMARY_DIR_BLOCKS,
        DirRegion::Backup => BACKUP_DIR_BLOCKS
    };
    for (i,b) in blocks.iter().enumerate() {
        img.write_block(*b,&raw_dir[i*BLOCK_SIZE..(i+1)*BLOCK_SIZE]);
    }
    DiskImage::from_bytes(&img.to_bytes()).expect("could not reload image")
}

// packed date for 1977.03.15
const MARCH_15_1977: u16 = 512 + 3*32 + 15;

#[test]
fn zero_image_is_an_empty_directory() {
    let img = DiskImage::from_bytes(&vec![0;BLOCK_SIZE*BLOCK_COUNT]).expect("rejected blank image");
    let disk = Disk::from_img(img);
    assert_eq!(disk.directory(DirRegion::Primary,true,true),vec![]);
}

#[test]
fn short_image_is_rejected() {
    match DiskImage::from_bytes(&vec![0;BLOCK_SIZE*BLOCK_COUNT-1]) {
        Ok(_) => panic!("truncated image was accepted"),
        Err(e) => assert_eq!(e.to_string(),"unexpected image size")
    }
}

#[test]
fn entry_fields_are_decoded() {
    let raw = dir_region(&[(0,"HELLO   TXT",1,17,18,MARCH_15_1977)]);
    let disk = Disk::from_img(image_with_dir(&raw,DirRegion::Primary));
    let entries = disk.directory(DirRegion::Primary,false,false);
    assert_eq!(entries.len(),1);
    assert_eq!(entries[0].name,"HELLO   .TXT");
    assert_eq!(entries[0].status,FileStatus::Valid);
    assert_eq!(entries[0].first_block,17);
    assert_eq!(entries[0].last_block,18);
    assert_eq!(entries[0].size_blocks(),2);
    assert_eq!(entries[0].normalized_name(),"hello.txt");
    let noon = NaiveDate::from_ymd_opt(1977,3,15).unwrap().and_hms_opt(12,0,0).unwrap();
    assert_eq!(entries[0].date,Some(noon));
}

#[test]
fn status_filters_only_affect_their_statuses() {
    let raw = dir_region(&[
        (0,"GOOD    TXT",1,17,17,MARCH_15_1977),
        (1,"OLD     TXT",254,18,18,MARCH_15_1977),
        (2,"MAYBE   TXT",255,19,19,MARCH_15_1977),
        (3,"WEIRD   TXT",7,20,20,MARCH_15_1977)
    ]);
    let disk = Disk::from_img(image_with_dir(&raw,DirRegion::Primary));
    let names = |r: bool,t: bool| -> Vec<String> {
        disk.directory(DirRegion::Primary,r,t).iter().map(|e| e.normalized_name()).collect()
    };
    assert_eq!(names(false,false),vec!["good.txt"]);
    assert_eq!(names(true,false),vec!["good.txt","old.txt"]);
    assert_eq!(names(false,true),vec!["good.txt","maybe.txt"]);
    // the unknown status slot never appears
    assert_eq!(names(true,true),vec!["good.txt","old.txt","maybe.txt"]);
}

#[test]
fn decoding_is_deterministic() {
    let raw = dir_region(&[
        (0,"GOOD    TXT",1,17,17,MARCH_15_1977),
        (5,"OTHER   BIN",254,30,40,0)
    ]);
    let first = decode_directory(&raw,true,true);
    let second = decode_directory(&raw,true,true);
    assert_eq!(first,second);
}

#[test]
fn invalid_date_keeps_the_entry() {
    let raw = dir_region(&[(0,"NODATE  TXT",1,17,17,0)]);
    let (entries,diagnostics) = decode_directory(&raw,false,false);
    assert_eq!(entries.len(),1);
    assert_eq!(entries[0].date,None);
    assert_eq!(diagnostics.len(),1);
    match &diagnostics[0] {
        Diagnostic::InvalidDate { name, packed } => {
            assert_eq!(name,"NODATE  .TXT");
            assert_eq!(*packed,0);
        },
        _ => panic!("wrong diagnostic")
    }
}

#[test]
fn unknown_status_is_skipped_with_diagnostic() {
    let raw = dir_region(&[(0,"WEIRD   TXT",7,17,17,MARCH_15_1977)]);
    let (entries,diagnostics) = decode_directory(&raw,true,true);
    assert_eq!(entries.len(),0);
    assert_eq!(diagnostics,vec![Diagnostic::UnexpectedStatus {
        name: "WEIRD   .TXT".to_string(),
        status: 7
    }]);
}

#[test]
fn reversed_block_range_is_skipped() {
    let raw = dir_region(&[
        (0,"BAD     TXT",1,20,17,MARCH_15_1977),
        (1,"GOOD    TXT",1,21,21,MARCH_15_1977)
    ]);
    let disk = Disk::from_img(image_with_dir(&raw,DirRegion::Primary));
    let entries = disk.directory(DirRegion::Primary,true,true);
    assert_eq!(entries.len(),1);
    assert_eq!(entries[0].normalized_name(),"good.txt");
    // listing must not choke on the bad slot either
    disk.catalog_to_stdout(&entries).expect("catalog failed");
    let (_,diagnostics) = decode_directory(&raw,true,true);
    assert_eq!(diagnostics,vec![Diagnostic::InvalidRange {
        name: "BAD     .TXT".to_string(),
        first: 20,
        last: 17
    }]);
}

#[test]
fn range_past_the_end_of_the_disk_is_skipped() {
    let raw = dir_region(&[(0,"FAR     TXT",1,559,600,MARCH_15_1977)]);
    let (entries,diagnostics) = decode_directory(&raw,true,true);
    assert_eq!(entries.len(),0);
    assert_eq!(diagnostics,vec![Diagnostic::InvalidRange {
        name: "FAR     .TXT".to_string(),
        first: 559,
        last: 600
    }]);
}

#[test]
fn reversed_range_counts_zero_blocks() {
    let entry = FileEntry {
        name: "BAD     .TXT".to_string(),
        status: FileStatus::Valid,
        first_block: 20,
        last_block: 17,
        date: None
    };
    assert_eq!(entry.size_blocks(),0);
}

#[test]
fn text_files_truncate_at_eof_marker() {
    let raw = dir_region(&[
        (0,"DOC     TXT",1,17,18,MARCH_15_1977),
        (1,"PROG    BIN",1,19,20,MARCH_15_1977)
    ]);
    let mut img = image_with_dir(&raw,DirRegion::Primary);
    let mut content = vec![b'A';512];
    content[300] = EOF_MARKER;
    img.write_block(17,&content[0..256]);
    img.write_block(18,&content[256..512]);
    img.write_block(19,&content[0..256]);
    img.write_block(20,&content[256..512]);
    let disk = Disk::from_img(img);
    let entries = disk.directory(DirRegion::Primary,false,false);
    // text is cut at the marker only when conversion is requested
    assert_eq!(disk.read_file(&entries[0],true).len(),300);
    assert_eq!(disk.read_file(&entries[0],false).len(),512);
    // binary files are never truncated
    assert!(entries[1].is_binary());
    assert_eq!(disk.read_file(&entries[1],true).len(),512);
}

#[test]
fn text_without_marker_is_unchanged() {
    let raw = dir_region(&[(0,"DOC     TXT",1,17,17,MARCH_15_1977)]);
    let mut img = image_with_dir(&raw,DirRegion::Primary);
    img.write_block(17,&vec![b'A';256]);
    let disk = Disk::from_img(img);
    let entries = disk.directory(DirRegion::Primary,false,false);
    assert_eq!(disk.read_file(&entries[0],true),vec![b'A';256]);
}

#[test]
fn insertion_pads_to_the_block_boundary() {
    let raw = dir_region(&[(0,"DATA    TXT",1,17,18,MARCH_15_1977)]);
    let mut disk = Disk::from_img(image_with_dir(&raw,DirRegion::Primary));
    let entries = disk.directory(DirRegion::Primary,false,false);
    let host: Vec<u8> = (0..500).map(|i| (i%251) as u8 + 1).collect();
    assert_eq!(disk.write_file(&entries[0],&host).expect("insert failed"),512);
    assert!(disk.is_modified());
    let mut expected = host.clone();
    expected.resize(512,0);
    assert_eq!(disk.read_file(&entries[0],false),expected);
}

#[test]
fn oversize_insertion_leaves_the_image_unmodified() {
    let raw = dir_region(&[(0,"DATA    TXT",1,17,18,MARCH_15_1977)]);
    let mut disk = Disk::from_img(image_with_dir(&raw,DirRegion::Primary));
    let entries = disk.directory(DirRegion::Primary,false,false);
    match disk.write_file(&entries[0],&vec![1;513]) {
        Ok(l) => panic!("wrote {} but should be out of room",l),
        Err(e) => assert_eq!(e.to_string(),"insufficient space")
    }
    assert!(!disk.is_modified());
}

#[test]
fn backup_directory_is_separate() {
    let raw = dir_region(&[(0,"SPARE   TXT",1,17,17,MARCH_15_1977)]);
    let disk = Disk::from_img(image_with_dir(&raw,DirRegion::Backup));
    assert_eq!(disk.directory(DirRegion::Primary,true,true),vec![]);
    let entries = disk.directory(DirRegion::Backup,true,true);
    assert_eq!(entries.len(),1);
    assert_eq!(entries[0].normalized_name(),"spare.txt");
}

#[test]
fn insert_target_lookup() {
    let raw = dir_region(&[(0,"HELLO   TXT",1,17,17,MARCH_15_1977)]);
    let disk = Disk::from_img(image_with_dir(&raw,DirRegion::Primary));
    let entry = disk.get_file_entry("hello.txt",DirRegion::Primary).expect("lookup failed");
    assert_eq!(entry.name,"HELLO   .TXT");
    match disk.get_file_entry("missing.txt",DirRegion::Primary) {
        Ok(_) => panic!("matched a nonexistent file"),
        Err(e) => assert_eq!(e.to_string(),"file not found")
    }
}

#[test]
fn delivered_names_carry_provisional_suffixes() {
    let raw = dir_region(&[
        (0,"OLD     TXT",254,17,17,MARCH_15_1977),
        (1,"MAYBE   TXT",255,18,18,MARCH_15_1977)
    ]);
    let disk = Disk::from_img(image_with_dir(&raw,DirRegion::Primary));
    let entries = disk.directory(DirRegion::Primary,true,true);
    assert_eq!(entries[0].delivered_name(),"old.txt.replaced");
    assert_eq!(entries[1].delivered_name(),"maybe.txt.tentative");
}
