use crate::config::Config;
use crate::samples::{assign_records, bam_records, AssignSummary, BarcodeMap, ColumnOverrides};
use crate::utils::output::AtomicOutput;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use rust_htslib::bam::{self, header::HeaderRecord, Read};
use std::path::Path;

/// Copy `bam_file` to `output`, setting each read's read group to the donor
/// its barcode maps to. One `@RG` line per donor is added to the header.
pub fn run(
    bam_file: &Path,
    table: &Path,
    output: &Path,
    columns: &ColumnOverrides,
    config: &Config,
) -> Result<AssignSummary> {
    let tags = config.tag_scheme()?;
    let map = BarcodeMap::from_path(table, columns)
        .with_context(|| format!("Failed to load barcode table {}", table.display()))?;

    let mut reader = bam::Reader::from_path(bam_file)
        .with_context(|| format!("Failed to open input BAM {}", bam_file.display()))?;
    let mut header = bam::Header::from_template(reader.header());
    for donor in map.donors() {
        let donor = donor.to_string();
        let mut read_group = HeaderRecord::new(b"RG");
        read_group.push_tag(b"ID", &donor).push_tag(b"SM", &donor);
        header.push_record(&read_group);
    }

    let out = AtomicOutput::new(output)?;
    let summary = {
        let mut writer = bam::Writer::from_path(out.path(), &header, bam::Format::Bam)
            .context("Failed to create output BAM")?;
        let progress = ProgressBarBuilder::read_counter("Assigning samples").build()?;
        let records = bam_records(&mut reader, bam_file).inspect(|_| progress.inc(1));
        let summary = assign_records(records, &map, &tags, &mut writer)?;
        progress.finish_and_clear();
        summary
    };
    out.commit()?;

    println!("RG tags assigned and written to {}", output.display());
    println!(
        "{} of {} reads assigned to {} donors",
        summary.assigned,
        summary.total,
        map.donors().len()
    );
    if summary.unmatched > 0 {
        println!(
            "{} reads did not have a matching barcode in the mapping and were left unchanged.",
            summary.unmatched
        );
    }

    Ok(summary)
}
