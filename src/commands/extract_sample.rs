use crate::config::Config;
use crate::samples::{bam_records, extract_records, BarcodeMap, ColumnOverrides, ExtractSummary};
use crate::utils::output::AtomicOutput;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use rust_htslib::bam::{self, Read};
use std::path::Path;

/// Write the reads whose barcode belongs to `donor_id` to `output`.
///
/// Returns `None` without touching `output` when the donor has no barcodes.
pub fn run(
    bam_file: &Path,
    table: &Path,
    donor_id: &str,
    output: &Path,
    config: &Config,
) -> Result<Option<ExtractSummary>> {
    let tags = config.tag_scheme()?;
    let map = BarcodeMap::from_path(table, &ColumnOverrides::default())
        .with_context(|| format!("Failed to load barcode table {}", table.display()))?;

    let barcodes = map.barcodes_for(donor_id);
    if barcodes.is_empty() {
        println!("No barcodes found for donor_id '{}'.", donor_id);
        return Ok(None);
    }
    println!("Found {} barcodes for donor '{}'", barcodes.len(), donor_id);

    let mut reader = bam::Reader::from_path(bam_file)
        .with_context(|| format!("Failed to open input BAM {}", bam_file.display()))?;
    let header = bam::Header::from_template(reader.header());

    let out = AtomicOutput::new(output)?;
    let summary = {
        let mut writer = bam::Writer::from_path(out.path(), &header, bam::Format::Bam)
            .context("Failed to create output BAM")?;
        let progress = ProgressBarBuilder::read_counter("Extracting reads").build()?;
        let records = bam_records(&mut reader, bam_file).inspect(|_| progress.inc(1));
        let summary = extract_records(records, &barcodes, &tags, &mut writer)?;
        progress.finish_and_clear();
        summary
    };
    out.commit()?;

    println!(
        "Extracted {} reads for donor '{}' to {}",
        summary.extracted,
        donor_id,
        output.display()
    );

    Ok(Some(summary))
}
