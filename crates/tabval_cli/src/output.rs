use colored::*;
use tabval_core::Report;

pub fn print_validation_report(report: &Report, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &Report) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.valid {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    for (index, table) in report.tables.iter().enumerate() {
        println!(
            "\n{} {} ({}, {} row(s), {} error(s))",
            format!("Table {}:", index + 1).bold(),
            table.source,
            table.format,
            table.row_count,
            table.error_count,
        );
        for error in &table.errors {
            let position = match (error.row_number, error.column_number) {
                (Some(row), Some(column)) => format!("[{},{}]", row, column),
                (Some(row), None) => format!("[{},-]", row),
                (None, Some(column)) => format!("[-,{}]", column),
                (None, None) => "[-]".to_string(),
            };
            println!(
                "  {} {} {}",
                position.red(),
                error.code.red().bold(),
                error.message
            );
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (index, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", index + 1, warning.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Tables checked: {}", report.table_count);
    println!("  Total errors:   {}", report.error_count);
    println!("  Total warnings: {}", report.warnings.len());
    println!("  Time:           {:.3}s", report.time);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &Report) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Failed to serialize report: {}", e)),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}
