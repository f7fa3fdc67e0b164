mod barcode_map;
mod record;

pub use barcode_map::{BarcodeMap, ColumnOverrides};
pub use record::{bam_records, RecordSink, TaggedRecord};

use crate::error::Result;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Which tags carry the barcode and which tag receives the donor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagScheme {
    /// Consulted in order; the first string tag present wins.
    pub barcode_tags: Vec<[u8; 2]>,
    pub read_group_tag: [u8; 2],
}

impl Default for TagScheme {
    fn default() -> Self {
        Self {
            barcode_tags: vec![*b"CB", *b"RX"],
            read_group_tag: *b"RG",
        }
    }
}

impl TagScheme {
    pub fn barcode<'r, R: TaggedRecord>(&self, record: &'r R) -> Option<&'r str> {
        self.barcode_tags
            .iter()
            .find_map(|tag| record.string_tag(tag))
            .filter(|barcode| !barcode.is_empty())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssignSummary {
    pub total: u64,
    pub assigned: u64,
    pub unmatched: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub total: u64,
    pub extracted: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartitionSummary {
    pub total: u64,
    pub per_donor: BTreeMap<String, u64>,
    pub unmapped: u64,
}

/// Tag every read whose barcode maps to a donor with that donor's id.
/// Other reads pass through untouched and are counted as unmatched.
pub fn assign_records<R, I, S>(
    records: I,
    map: &BarcodeMap,
    tags: &TagScheme,
    sink: &mut S,
) -> Result<AssignSummary>
where
    R: TaggedRecord,
    I: IntoIterator<Item = Result<R>>,
    S: RecordSink<R>,
{
    let mut summary = AssignSummary::default();

    for record in records {
        let mut record = record?;
        summary.total += 1;

        let donor = tags
            .barcode(&record)
            .and_then(|barcode| map.donor_for(barcode));
        match donor {
            Some(donor) => {
                record.set_string_tag(&tags.read_group_tag, donor)?;
                summary.assigned += 1;
            }
            None => summary.unmatched += 1,
        }

        sink.write_record(&record)?;
    }

    Ok(summary)
}

/// Keep only reads whose barcode is in `barcodes`.
pub fn extract_records<R, I, S>(
    records: I,
    barcodes: &HashSet<&str>,
    tags: &TagScheme,
    sink: &mut S,
) -> Result<ExtractSummary>
where
    R: TaggedRecord,
    I: IntoIterator<Item = Result<R>>,
    S: RecordSink<R>,
{
    let mut summary = ExtractSummary::default();

    for record in records {
        let record = record?;
        summary.total += 1;

        if tags
            .barcode(&record)
            .is_some_and(|barcode| barcodes.contains(barcode))
        {
            sink.write_record(&record)?;
            summary.extracted += 1;
        }
    }

    Ok(summary)
}

/// Route every read to its donor's sink, or to the unmapped sink when it has
/// no barcode or the barcode is unknown.
///
/// `open` is called once per donor (with `Some(donor)`) and once for the
/// unmapped sink (with `None`) before the first read is pulled.
pub fn partition_records<R, I, S, F>(
    records: I,
    map: &BarcodeMap,
    tags: &TagScheme,
    mut open: F,
) -> Result<PartitionSummary>
where
    R: TaggedRecord,
    I: IntoIterator<Item = Result<R>>,
    S: RecordSink<R>,
    F: FnMut(Option<&str>) -> Result<S>,
{
    let mut sinks = HashMap::new();
    for donor in map.donors() {
        sinks.insert(donor, open(Some(donor))?);
    }
    let mut unmapped = open(None)?;

    let mut summary = PartitionSummary {
        per_donor: map.donors().into_iter().map(|d| (d.to_string(), 0)).collect(),
        ..Default::default()
    };

    for record in records {
        let record = record?;
        summary.total += 1;

        let donor = tags.barcode(&record).and_then(|barcode| map.donor_for(barcode));
        match donor.and_then(|d| sinks.get_mut(d).map(|sink| (d, sink))) {
            Some((donor, sink)) => {
                sink.write_record(&record)?;
                if let Some(count) = summary.per_donor.get_mut(donor) {
                    *count += 1;
                }
            }
            None => {
                unmapped.write_record(&record)?;
                summary.unmapped += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BamuraiError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct MemRecord {
        name: String,
        tags: Vec<([u8; 2], String)>,
    }

    impl MemRecord {
        fn new(name: &str, tags: &[(&[u8; 2], &str)]) -> Self {
            Self {
                name: name.to_string(),
                tags: tags.iter().map(|(t, v)| (**t, v.to_string())).collect(),
            }
        }
    }

    impl TaggedRecord for MemRecord {
        fn string_tag(&self, tag: &[u8; 2]) -> Option<&str> {
            self.tags
                .iter()
                .find(|(t, _)| t == tag)
                .map(|(_, v)| v.as_str())
        }

        fn set_string_tag(&mut self, tag: &[u8; 2], value: &str) -> Result<()> {
            self.tags.retain(|(t, _)| t != tag);
            self.tags.push((*tag, value.to_string()));
            Ok(())
        }
    }

    impl RecordSink<MemRecord> for Vec<MemRecord> {
        fn write_record(&mut self, record: &MemRecord) -> Result<()> {
            self.push(record.clone());
            Ok(())
        }
    }

    fn map() -> BarcodeMap {
        [("AAAA", "D1"), ("CCCC", "D2"), ("GGGG", "D3"), ("TTTT", "D1")]
            .into_iter()
            .map(|(b, d)| (b.to_string(), d.to_string()))
            .collect()
    }

    fn ok(records: Vec<MemRecord>) -> Vec<Result<MemRecord>> {
        records.into_iter().map(Ok).collect()
    }

    #[test]
    fn test_barcode_prefers_cb_then_rx() {
        let tags = TagScheme::default();
        let both = MemRecord::new("r", &[(b"RX", "RXBC"), (b"CB", "CBBC")]);
        assert_eq!(tags.barcode(&both), Some("CBBC"));
        let rx = MemRecord::new("r", &[(b"RX", "RXBC")]);
        assert_eq!(tags.barcode(&rx), Some("RXBC"));
        let empty = MemRecord::new("r", &[(b"CB", "")]);
        assert_eq!(tags.barcode(&empty), None);
        assert_eq!(tags.barcode(&MemRecord::new("r", &[])), None);
    }

    #[test]
    fn test_assign() {
        let input = vec![
            MemRecord::new("matched", &[(b"CB", "AAAA"), (b"RG", "old")]),
            MemRecord::new("unknown", &[(b"CB", "ACGT")]),
            MemRecord::new("fallback", &[(b"RX", "CCCC")]),
            MemRecord::new("untagged", &[]),
        ];
        let mut out = Vec::new();
        let summary =
            assign_records(ok(input.clone()), &map(), &TagScheme::default(), &mut out).unwrap();

        assert_eq!(
            summary,
            AssignSummary {
                total: 4,
                assigned: 2,
                unmatched: 2
            }
        );
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].string_tag(b"RG"), Some("D1"));
        assert_eq!(out[0].string_tag(b"CB"), Some("AAAA"));
        assert_eq!(out[1], input[1]);
        assert_eq!(out[2].string_tag(b"RG"), Some("D2"));
        assert_eq!(out[3], input[3]);
    }

    #[test]
    fn test_assign_stops_on_first_error() {
        let records: Vec<Result<MemRecord>> = vec![
            Ok(MemRecord::new("a", &[(b"CB", "AAAA")])),
            Err(BamuraiError::format("in.bam", 2, "truncated")),
            Ok(MemRecord::new("c", &[(b"CB", "AAAA")])),
        ];
        let mut out = Vec::new();
        let err = assign_records(records, &map(), &TagScheme::default(), &mut out).unwrap_err();
        assert!(matches!(err, BamuraiError::Format { record: 2, .. }));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_extract() {
        let map = map();
        let barcodes = map.barcodes_for("D1");
        let input = vec![
            MemRecord::new("a", &[(b"CB", "AAAA")]),
            MemRecord::new("b", &[(b"CB", "CCCC")]),
            MemRecord::new("c", &[(b"RX", "TTTT")]),
            MemRecord::new("d", &[]),
        ];
        let mut out = Vec::new();
        let summary = extract_records(ok(input), &barcodes, &TagScheme::default(), &mut out).unwrap();

        assert_eq!(summary, ExtractSummary { total: 4, extracted: 2 });
        let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    struct NameSink(Rc<RefCell<Vec<String>>>);

    impl RecordSink<MemRecord> for NameSink {
        fn write_record(&mut self, record: &MemRecord) -> Result<()> {
            self.0.borrow_mut().push(record.name.clone());
            Ok(())
        }
    }

    #[test]
    fn test_partition_covers_every_read_once() {
        let input = vec![
            MemRecord::new("a", &[(b"CB", "AAAA")]),
            MemRecord::new("b", &[(b"CB", "CCCC")]),
            MemRecord::new("c", &[(b"CB", "GGGG")]),
            MemRecord::new("d", &[(b"CB", "TTTT")]),
            MemRecord::new("e", &[(b"CB", "NNNN")]),
            MemRecord::new("f", &[]),
        ];

        let outputs: RefCell<Vec<(String, Rc<RefCell<Vec<String>>>)>> = RefCell::new(Vec::new());
        let summary = partition_records(ok(input), &map(), &TagScheme::default(), |donor| {
            let names = Rc::new(RefCell::new(Vec::new()));
            let label = donor.unwrap_or("unmapped").to_string();
            outputs.borrow_mut().push((label, Rc::clone(&names)));
            Ok(NameSink(names))
        })
        .unwrap();

        let groups: Vec<(String, Vec<String>)> = outputs
            .into_inner()
            .into_iter()
            .map(|(label, names)| (label, names.borrow().clone()))
            .collect();
        let expected = [
            ("D1", vec!["a", "d"]),
            ("D2", vec!["b"]),
            ("D3", vec!["c"]),
            ("unmapped", vec!["e", "f"]),
        ];
        assert_eq!(groups.len(), expected.len());
        for ((label, names), (want_label, want_names)) in groups.iter().zip(expected.iter()) {
            assert_eq!(label.as_str(), *want_label);
            assert_eq!(names, want_names);
        }

        assert_eq!(summary.total, 6);
        assert_eq!(summary.unmapped, 2);
        assert_eq!(summary.per_donor["D1"], 2);
        assert_eq!(summary.per_donor["D2"], 1);
        assert_eq!(summary.per_donor["D3"], 1);
    }
}
