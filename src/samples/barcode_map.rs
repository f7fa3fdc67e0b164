use crate::error::{BamuraiError, Result};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;

const BARCODE_COLUMN: &str = "barcode";
const CELL_COLUMN: &str = "cell";
const DONOR_ID_COLUMN: &str = "donor_id";

/// Explicit column names that bypass header auto-detection.
#[derive(Debug, Clone, Default)]
pub struct ColumnOverrides {
    pub barcode: Option<String>,
    pub donor_id: Option<String>,
}

/// Barcode to donor id lookup, built once from a delimited table.
#[derive(Debug, Clone, Default)]
pub struct BarcodeMap {
    barcode_to_donor: HashMap<String, String>,
}

impl BarcodeMap {
    /// Load a tab or comma separated table with a header row.
    pub fn from_path(path: &Path, columns: &ColumnOverrides) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let map = Self::from_str_with_columns(&contents, path, columns)?;
        log::info!(
            "Loaded {} barcodes for {} donors from {}",
            map.len(),
            map.donors().len(),
            path.display()
        );
        Ok(map)
    }

    fn from_str_with_columns(contents: &str, path: &Path, columns: &ColumnOverrides) -> Result<Self> {
        let delimiter = detect_delimiter(contents);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(contents.as_bytes());

        let headers = reader.headers()?.clone();
        let find = |name: &str| headers.iter().position(|h| h == name);
        let missing = |name: &str| BamuraiError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        };

        let barcode_idx = match columns.barcode.as_deref() {
            Some(name) => find(name).ok_or_else(|| missing(name))?,
            None => match (find(BARCODE_COLUMN), find(CELL_COLUMN)) {
                (Some(_), Some(_)) => {
                    return Err(BamuraiError::AmbiguousColumn {
                        path: path.to_path_buf(),
                    })
                }
                (Some(idx), None) | (None, Some(idx)) => idx,
                (None, None) => return Err(missing(BARCODE_COLUMN)),
            },
        };
        let donor_name = columns.donor_id.as_deref().unwrap_or(DONOR_ID_COLUMN);
        let donor_idx = find(donor_name).ok_or_else(|| missing(donor_name))?;

        let mut barcode_to_donor = HashMap::new();
        for result in reader.records() {
            let record = result?;
            // fixed-width rows are enforced by the csv reader
            let barcode = &record[barcode_idx];
            let donor_id = &record[donor_idx];
            barcode_to_donor.insert(barcode.to_string(), donor_id.to_string());
        }

        Ok(Self { barcode_to_donor })
    }

    pub fn donor_for(&self, barcode: &str) -> Option<&str> {
        self.barcode_to_donor.get(barcode).map(String::as_str)
    }

    /// Distinct donor ids in sorted order.
    pub fn donors(&self) -> BTreeSet<&str> {
        self.barcode_to_donor.values().map(String::as_str).collect()
    }

    /// Every barcode assigned to `donor_id`.
    pub fn barcodes_for(&self, donor_id: &str) -> HashSet<&str> {
        self.barcode_to_donor
            .iter()
            .filter(|(_, donor)| donor.as_str() == donor_id)
            .map(|(barcode, _)| barcode.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.barcode_to_donor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barcode_to_donor.is_empty()
    }
}

impl FromIterator<(String, String)> for BarcodeMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            barcode_to_donor: iter.into_iter().collect(),
        }
    }
}

fn detect_delimiter(contents: &str) -> u8 {
    let header = contents.lines().next().unwrap_or_default();
    if !header.contains('\t') && header.contains(',') {
        b','
    } else {
        b'\t'
    }
}
