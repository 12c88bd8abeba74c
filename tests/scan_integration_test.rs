//! Integration tests for scanning benchmark folders and writing reports.

mod common;

use benchgen::io::{create_writer, BenchmarkScanner, OutputFormat};
use common::bench_tree;
use std::fs;

#[test]
fn scan_reports_non_basic_folders_in_numeric_order() {
    let base = bench_tree(&[
        ("10", Some("func Walk(root *Node) int")),
        ("2", Some("func Add(a, b int) int")),
        ("1", Some("Write this function:\nfunc Load(cfg Config) (Result, error)\n")),
        ("3", None),
        ("readme", Some("func Ignored(x Thing)")),
    ]);

    let report = BenchmarkScanner::new(base.path()).scan().unwrap();

    let ids: Vec<u64> = report.entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 10]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id, 3);
    assert_eq!(report.non_basic_count(), 2);
    assert_eq!(
        report.entries[0].result.non_basic_types,
        vec!["Config", "Result"]
    );
}

#[test]
fn unparseable_instruction_keeps_poisoned_row() {
    let base = bench_tree(&[("1", Some("x + 1")), ("2", Some("func Ok(v int) bool"))]);

    let report = BenchmarkScanner::new(base.path()).scan().unwrap();

    assert_eq!(report.entries.len(), 2);
    let poisoned = &report.entries[0];
    assert_eq!(poisoned.result.non_basic_types, vec!["INVALID_SIGNATURE"]);
    assert!(poisoned.error.is_some());
    assert_eq!(report.non_basic_count(), 1);
}

#[test]
fn markdown_report_is_written_to_file() {
    let base = bench_tree(&[
        ("1", Some("func Walk(root *Node,\n\tdepth int) []Node")),
        ("2", Some("func Add(a, b int) int")),
    ]);
    let out = base.path().join("go_custom_types.md");

    let report = BenchmarkScanner::new(base.path()).scan().unwrap();
    let mut writer = create_writer(OutputFormat::Markdown, Some(out.as_path())).unwrap();
    writer.write_report(&report).unwrap();
    drop(writer);

    let markdown = fs::read_to_string(&out).unwrap();
    assert!(markdown.contains("| Folder | Signature | Non-basic types |"));
    assert!(markdown.contains("| 1 | `func Walk(root *Node, depth int) []Node` | Node |"));
    assert!(!markdown.contains("| 2 |"));
    assert!(markdown.contains("Found 1 benchmark(s) with non-basic types."));
}

#[test]
fn json_report_lists_skipped_folders() {
    let base = bench_tree(&[("1", None), ("2", Some("func Add(a, b int) int"))]);
    let out = base.path().join("report.json");

    let report = BenchmarkScanner::new(base.path()).scan().unwrap();
    let mut writer = create_writer(OutputFormat::Json, Some(out.as_path())).unwrap();
    writer.write_report(&report).unwrap();
    drop(writer);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["skipped"][0]["id"], 1);
    assert_eq!(json["entries"][0]["result"]["has_non_basic_types"], false);
}

#[test]
fn uncreatable_output_file_is_an_error() {
    let base = bench_tree(&[]);
    let out = base.path().join("missing-dir").join("report.md");
    assert!(create_writer(OutputFormat::Markdown, Some(out.as_path())).is_err());
}
