//! History and range subcommands.
//!
//! Handles `scanshelf history` and `scanshelf range <start> [end]`.

use super::{CliStore, OutputFormat};
use crate::error::CliResult;
use crate::output;
use chrono::NaiveDate;
use clap::Parser;

/// List saved scans, newest first.
#[derive(Parser, Debug)]
pub struct HistoryCommand {
    /// Number of recent scans to show
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Show the regions of each scan
    #[arg(short, long)]
    pub detailed: bool,
}

impl HistoryCommand {
    /// Execute the history command.
    pub fn execute(&self, store: &mut CliStore, _quiet: bool) -> CliResult<()> {
        let outcome = store.load_outcome();
        if outcome.is_recovered() {
            output::print_warning("Stored scans could not be read; showing an empty history");
        }

        let mut scans = outcome.into_scans();
        scans.truncate(self.count);

        output::print_history(&scans, self.detailed)?;
        Ok(())
    }
}

/// List scans created within a range of calendar days (UTC).
#[derive(Parser, Debug)]
pub struct RangeCommand {
    /// First day, YYYY-MM-DD
    #[arg(value_name = "START", value_parser = parse_day)]
    pub start: NaiveDate,

    /// Last day, YYYY-MM-DD (defaults to START)
    #[arg(value_name = "END", value_parser = parse_day)]
    pub end: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl RangeCommand {
    /// Execute the range command.
    pub fn execute(&self, store: &mut CliStore, quiet: bool) -> CliResult<()> {
        let start = day_start_ms(self.start);
        let end = day_start_ms(self.end.unwrap_or(self.start));

        let scans = store.scans_in_range(start, end);

        match self.format {
            OutputFormat::Plain => {
                output::print_history(&scans, false)?;
                if !quiet {
                    output::print_info(&format!("{} scan(s) in range", scans.len()));
                }
            }
            format => output::print_scans(&scans, format)?,
        }

        Ok(())
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Epoch milliseconds of UTC midnight starting `day`.
fn day_start_ms(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map_or(0, |t| t.and_utc().timestamp_millis())
}
