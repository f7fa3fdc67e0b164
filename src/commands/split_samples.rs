use crate::config::Config;
use crate::error::BamuraiError;
use crate::samples::{bam_records, partition_records, BarcodeMap, ColumnOverrides, PartitionSummary};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{bail, Context, Result};
use rust_htslib::bam::{self, Read};
use std::fs;
use std::path::Path;

fn check_output_name(name: &str, unmapped_name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        bail!("Donor id '{}' cannot be used as a file name", name);
    }
    if name == unmapped_name {
        bail!(
            "Donor id '{}' clashes with the output for unassigned reads",
            name
        );
    }
    Ok(())
}

/// Write every read of `bam_file` to `<output_dir>/<donor>.bam`, or to the
/// unmapped file when its barcode is missing or unknown.
pub fn run(
    bam_file: &Path,
    table: &Path,
    output_dir: &Path,
    config: &Config,
) -> Result<PartitionSummary> {
    let tags = config.tag_scheme()?;
    let map = BarcodeMap::from_path(table, &ColumnOverrides::default())
        .with_context(|| format!("Failed to load barcode table {}", table.display()))?;
    for donor in map.donors() {
        check_output_name(donor, &config.unmapped_name)?;
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;

    let mut reader = bam::Reader::from_path(bam_file)
        .with_context(|| format!("Failed to open input BAM {}", bam_file.display()))?;
    let header = bam::Header::from_template(reader.header());

    let progress = ProgressBarBuilder::read_counter("Splitting by donor").build()?;
    let records = bam_records(&mut reader, bam_file).inspect(|_| progress.inc(1));
    let summary = partition_records(records, &map, &tags, |donor| {
        let name = donor.unwrap_or(&config.unmapped_name);
        let path = output_dir.join(format!("{}.bam", name));
        log::debug!("Opening {}", path.display());
        bam::Writer::from_path(&path, &header, bam::Format::Bam).map_err(BamuraiError::from)
    })?;
    progress.finish_and_clear();

    for (donor, count) in &summary.per_donor {
        println!("  {}: {} reads", donor, count);
    }
    println!("  {}: {} reads", config.unmapped_name, summary.unmapped);
    println!(
        "Split BAM into {} donor files, plus unmapped reads",
        summary.per_donor.len()
    );

    Ok(summary)
}
