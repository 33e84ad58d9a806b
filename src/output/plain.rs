//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::storage::{SavedScan, StorageStats};
use chrono::DateTime;
use console::style;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write one scan with all of its regions.
pub fn write_plain<W: Write>(out: &mut W, scan: &SavedScan) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(
        out,
        "  {} {}",
        style("Scan:").bold(),
        style(scan.name.as_deref().unwrap_or("(unnamed)")).cyan().bold()
    )?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Scan ID:").bold(), scan.id)?;
    writeln!(out, "  {} {}", style("Created:").bold(), format_timestamp(scan.timestamp))?;
    writeln!(
        out,
        "  {} {} files, {} regions",
        style("Contents:").bold(),
        scan.file_count(),
        scan.results.len()
    )?;
    writeln!(out)?;

    if scan.results.is_empty() {
        writeln!(out, "  {}", style("No regions to display.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:>4}  {:>4}  {:<20}  {:>6}  {}",
            style("FILE").bold(),
            style("RECT").bold(),
            style("NAME").bold(),
            style("CONF").bold(),
            style("TEXT").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for result in &scan.results {
            writeln!(
                out,
                "  {:>4}  {:>4}  {:<20}  {:>6.2}  {}",
                result.file_index,
                result.rectangle_index,
                truncate_string(&result.file_name, 20),
                result.confidence,
                result.text.replace('\n', " ")
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    Ok(())
}

/// Print a table of scans, one line each.
pub fn print_history(scans: &[SavedScan], detailed: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if scans.is_empty() {
        writeln!(out, "{}", style("No saved scans.").dim())?;
        return Ok(());
    }

    writeln!(
        out,
        "\n{:<12} {:<17} {:>5} {:>7}  {}",
        "ID", "CREATED", "FILES", "REGIONS", "NAME"
    )?;
    writeln!(out, "{}", "-".repeat(70))?;

    for scan in scans {
        writeln!(
            out,
            "{:<12} {:<17} {:>5} {:>7}  {}",
            scan.id.short(),
            format_timestamp(scan.timestamp),
            scan.file_count(),
            scan.results.len(),
            truncate_string(scan.name.as_deref().unwrap_or(""), 30)
        )?;

        if detailed {
            for result in &scan.results {
                writeln!(
                    out,
                    "    {} #{}: {}",
                    style(&result.file_name).dim(),
                    result.rectangle_index,
                    truncate_string(&result.text.replace('\n', " "), 50)
                )?;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}

/// Print storage statistics.
pub fn print_stats(stats: &StorageStats, key: &str) {
    println!("\n{}", style("Storage").bold());
    println!("{}", "=".repeat(40));
    println!("Key:          {}", key);
    println!("Scans:        {}", stats.scan_count);
    println!("Regions:      {}", stats.result_count);
    println!("Size:         {} bytes", stats.total_size_bytes);
    println!(
        "Oldest:       {}",
        stats.oldest_scan.map_or_else(|| "-".to_string(), format_timestamp)
    );
    println!(
        "Newest:       {}",
        stats.newest_scan.map_or_else(|| "-".to_string(), format_timestamp)
    );
    println!();
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Format epoch milliseconds as a UTC date and minute.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map_or_else(|| ms.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

/// Truncate a string to a maximum number of characters, adding ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParsedResult, Rectangle};

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("ボルトナット", 5), "ボル...");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00");
        assert_eq!(format_timestamp(1_718_000_000_000), "2024-06-10 06:13");
    }

    #[test]
    fn test_write_plain_lists_regions() {
        console::set_colors_enabled(false);
        let scan = SavedScan {
            id: "scan-1-abc".parse().unwrap(),
            timestamp: 0,
            results: vec![ParsedResult::new(
                3,
                "page.png",
                7,
                Rectangle::default(),
                "line one\nline two",
                0.75,
            )],
            name: None,
        };

        let mut buf = Vec::new();
        write_plain(&mut buf, &scan).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("scan-1-abc"));
        assert!(text.contains("(unnamed)"));
        assert!(text.contains("1 files, 1 regions"));
        assert!(text.contains("line one line two"));
        assert!(text.contains("0.75"));
    }
}
