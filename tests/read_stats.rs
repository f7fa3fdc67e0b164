mod common;

use bamurai::cli::StatsFormat;
use bamurai::commands;
use bamurai::config::Config;

#[test]
fn stats_over_fastq() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_file(
        dir.path(),
        "reads.fastq",
        &common::fastq(&[("a", "AC"), ("b", "ACG"), ("c", "ACGT"), ("d", "ACGTA"), ("e", "ACGTAC")]),
    );

    let stats = commands::stats::run(&input, StatsFormat::Tsv, &Config::default()).unwrap();
    assert_eq!(stats.count, 5);
    assert_eq!(stats.total_bases, 20);
    assert_eq!(stats.mean_length, Some(4.0));
    assert_eq!(stats.n50, Some(6));
}

#[test]
fn stats_over_empty_fastq() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_file(dir.path(), "empty.fastq", "");

    let stats = commands::stats::run(&input, StatsFormat::Summary, &Config::default()).unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(stats.total_bases, 0);
    assert_eq!(stats.mean_length, None);
    assert_eq!(stats.n50, None);
}

#[test]
fn stats_over_bam() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("reads.bam");
    common::write_bam(&input, &[("r1", &[]), ("r2", &[(b"CB", "AAAA")])]);

    let stats = commands::stats::run(&input, StatsFormat::Json, &Config::default()).unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.total_bases, 16);
    assert_eq!(stats.n50, Some(8));
}

#[test]
fn validate_reports_record_count_and_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good = common::write_file(dir.path(), "good.fq", &common::fastq(&[("a", "ACGT"), ("b", "GG")]));
    assert_eq!(commands::validate::run(&good, &Config::default()).unwrap(), 2);

    let bad = common::write_file(dir.path(), "bad.fq", "@a\nACGT\n+\nIIII\nb\nACGT\n+\nIIII\n");
    let err = commands::validate::run(&bad, &Config::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("record 2"));

    let not_fastq = common::write_file(dir.path(), "reads.txt", "");
    assert!(commands::validate::run(&not_fastq, &Config::default()).is_err());
}
