//! Tests for command-line parsing.

use clap::Parser;
use std::path::PathBuf;

use subresolve::export::ExportFormat;
use subresolve::{MassDnsConfig, Opt};

#[test]
fn test_domain_and_input_are_required() {
    assert!(Opt::try_parse_from(["subresolve"]).is_err());
    assert!(Opt::try_parse_from(["subresolve", "x.com"]).is_err());
    assert!(Opt::try_parse_from(["subresolve", "x.com", "--input", "-"]).is_ok());
}

#[test]
fn test_defaults() {
    let opt = Opt::parse_from(["subresolve", "x.com", "--input", "x.jsonl"]);
    assert_eq!(opt.input, PathBuf::from("x.jsonl"));
    assert_eq!(opt.db_path, PathBuf::from("./results/result.sqlite3"));
    assert_eq!(opt.result_dir, PathBuf::from("./results"));
    assert_eq!(opt.massdns_config(), MassDnsConfig::default());
    assert!(opt.export.is_none());
    assert!(!opt.alive_only);
}

#[test]
fn test_export_to_file_defaults_to_csv() {
    let opt = Opt::parse_from([
        "subresolve",
        "x.com",
        "--input",
        "x.jsonl",
        "--export",
        "out/x.csv",
    ]);
    let export = opt.export_options("x_com").unwrap();
    assert_eq!(export.output, Some(PathBuf::from("out/x.csv")));
    assert_eq!(export.format, ExportFormat::Csv);
    assert_eq!(export.db_path, opt.db_path);
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Opt::try_parse_from([
        "subresolve",
        "x.com",
        "--input",
        "x.jsonl",
        "--export-format",
        "xml"
    ])
    .is_err());
    assert!(Opt::try_parse_from([
        "subresolve",
        "x.com",
        "--input",
        "x.jsonl",
        "--processes",
        "-1"
    ])
    .is_err());
    assert!(Opt::try_parse_from([
        "subresolve",
        "x.com",
        "--input",
        "x.jsonl",
        "--log-level",
        "loud"
    ])
    .is_err());
}
