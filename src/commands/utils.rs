//! Shared output helpers for command implementations

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;
use taproom::error::Result;
use taproom::format::{location_line, truncate, type_label};
use taproom::model::{Brewery, BreweryType};
use taproom::report::ChartRow;

const MIN_NAME_WIDTH: usize = 20;
const MAX_NAME_WIDTH: usize = 48;
const BAR_WIDTH: usize = 30;

pub(super) fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdout())
}

/// Steady-tick spinner on a TTY, hidden otherwise.
pub(super) fn spinner(message: impl Into<String>, quiet: bool) -> ProgressBar {
    if quiet || !is_tty() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub(super) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Closest documented type name, if `value` looks like a typo of one.
pub(super) fn suggest_type(value: &str) -> Option<String> {
    let value = value.trim().to_lowercase();
    if BreweryType::from(value.as_str()).is_known() {
        return None;
    }

    BreweryType::KNOWN
        .iter()
        .map(|t| (t.as_str(), strsim::jaro_winkler(&value, t.as_str())))
        .filter(|(_, score)| *score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name.to_string())
}

pub(super) fn warn_unknown_type(value: &str) {
    if let Some(suggestion) = suggest_type(value) {
        eprintln!(
            "{} Unknown brewery type '{}', did you mean '{}'?",
            "⚠".yellow(),
            value,
            suggestion.bold()
        );
    }
}

/// Name column width derived from the terminal, clamped to a sane range.
pub(super) fn name_width() -> usize {
    term_size::dimensions()
        .map(|(cols, _)| cols.saturating_sub(40))
        .unwrap_or(MAX_NAME_WIDTH)
        .clamp(MIN_NAME_WIDTH, MAX_NAME_WIDTH)
}

pub(super) fn print_brewery_row(brewery: &Brewery, width: usize) {
    let name = truncate(&brewery.name, width);
    let kind = brewery
        .brewery_type
        .as_ref()
        .map(|t| type_label(t.as_str()))
        .unwrap_or_default();

    println!(
        "{:<width$}  {:<11}  {}",
        name.bold(),
        kind.cyan(),
        location_line(brewery).dimmed(),
        width = width
    );
}

/// Horizontal bar chart; bars are scaled to the largest count.
pub(super) fn print_chart(rows: &[ChartRow]) {
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);
    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);

    for row in rows {
        let filled = if max == 0 {
            0
        } else {
            (row.count * BAR_WIDTH).div_ceil(max)
        };
        println!(
            "  {:<label_width$}  {} {} ({:.1}%)",
            row.label,
            "█".repeat(filled).green(),
            row.count.to_string().bold(),
            row.percentage,
            label_width = label_width
        );
    }
}
