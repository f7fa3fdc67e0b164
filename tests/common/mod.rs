#![allow(dead_code)]

use rust_htslib::bam::{self, header::HeaderRecord, record::Aux, Read};
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

pub fn fastq(records: &[(&str, &str)]) -> String {
    records
        .iter()
        .map(|(id, seq)| format!("@{}\n{}\n+\n{}\n", id, seq, "I".repeat(seq.len())))
        .collect()
}

/// (read name, tags) for an unmapped BAM fixture.
pub type FixtureRead<'a> = (&'a str, &'a [(&'a [u8; 2], &'a str)]);

pub fn write_bam(path: &Path, reads: &[FixtureRead]) {
    let mut header = bam::Header::new();
    header.push_record(HeaderRecord::new(b"HD").push_tag(b"VN", &"1.6"));

    let mut writer = bam::Writer::from_path(path, &header, bam::Format::Bam).expect("create BAM");
    for (name, tags) in reads {
        let mut record = bam::Record::new();
        record.set(name.as_bytes(), None, b"ACGTACGT", &[30; 8]);
        record.set_tid(-1);
        record.set_pos(-1);
        record.set_mtid(-1);
        record.set_mpos(-1);
        record.set_unmapped();
        for (tag, value) in tags.iter() {
            record.push_aux(*tag, Aux::String(value)).expect("push tag");
        }
        writer.write(&record).expect("write record");
    }
}

pub struct BamContents {
    pub header: String,
    /// (read name, RG tag if any)
    pub reads: Vec<(String, Option<String>)>,
}

pub fn read_bam(path: &Path) -> BamContents {
    let mut reader = bam::Reader::from_path(path).expect("open BAM");
    let header = String::from_utf8_lossy(reader.header().as_bytes()).into_owned();
    let reads = reader
        .records()
        .map(|record| {
            let record = record.expect("read record");
            let name = String::from_utf8_lossy(record.qname()).into_owned();
            let read_group = match record.aux(b"RG") {
                Ok(Aux::String(value)) => Some(value.to_string()),
                _ => None,
            };
            (name, read_group)
        })
        .collect();
    BamContents { header, reads }
}
