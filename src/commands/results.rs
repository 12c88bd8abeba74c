use crate::io;
use crate::runner::parse_go_test_output;
use anyhow::Result;
use colored::*;
use std::path::Path;

pub fn summarize_results(file: Option<&Path>, total: Option<usize>, json: bool) -> Result<()> {
    let text = io::read_file_or_stdin(file)?;
    let summary = parse_go_test_output(&text, total);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Passed:    {}", summary.passed_count.to_string().green());
    println!("Failed:    {}", summary.failed_count.to_string().red());
    println!("Total:     {}", summary.total_tests);
    println!("Pass rate: {}", summary.pass_percentage.bold());

    if !summary.failed_cases.is_empty() {
        println!();
        println!("Failed cases:");
        for case in &summary.failed_cases {
            println!(
                "  Case {}: {} ({}s)",
                case.case_number, case.test_name, case.duration
            );
        }
    }
    Ok(())
}
