//! Display formatting utilities for CLI output

use colored::*;
use serde_json::Value;

use crate::server::models::{ComparisonMap, Record};

/// Render a JSON value compactly, without quotes around plain strings
pub fn format_value(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Signed difference with a fixed precision, e.g. `+5.00` or `-2.50`
pub fn format_difference(difference: f64) -> String {
  format!("{difference:+.2}")
}

/// Print each stored record on one line
pub fn display_records(records: &[Record]) {
  if records.is_empty() {
    println!("No records stored.");
    return;
  }

  for (index, record) in records.iter().enumerate() {
    let fields = record
      .iter()
      .map(|(name, value)| format!("{}={}", name.cyan(), format_value(value)))
      .collect::<Vec<_>>()
      .join(" ");
    println!("{} {fields}", format!("#{}", index + 1).dimmed());
  }
}

/// Print one block per stored record with a line per compared metric
pub fn display_comparisons(results: &[ComparisonMap]) {
  if results.is_empty() {
    println!("No records to compare against.");
    return;
  }

  for (index, comparison) in results.iter().enumerate() {
    println!("{} {}", "=== record".blue().bold(), (index + 1).to_string().yellow().bold());

    if comparison.is_empty() {
      println!("  {}", "no matching metrics".dimmed());
      continue;
    }

    for (metric, entry) in comparison {
      let difference = format_difference(entry.difference);
      let difference = if entry.difference > 0.0 {
        difference.red()
      } else if entry.difference < 0.0 {
        difference.green()
      } else {
        difference.normal()
      };

      println!(
        "  {:<16} you {:>10}  local {:>10}  diff {}",
        metric.as_str().bold(),
        format_value(&entry.user),
        format_value(&entry.local),
        difference
      );
    }
  }
}
