/* src/resolver/rust/src/format.rs */

//! Per-field value formatting (dates, money, counts, percentages).

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::eval::stringify;

/// How a resolved value is rendered into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
  /// Plain string form.
  Text,
  /// `D Month YYYY`, e.g. `12 April 2023`.
  Date,
  /// `$` prefix with thousands separators.
  Currency,
  /// Thousands separators, no prefix.
  Number,
  /// Trailing `%`.
  Percent,
  /// `true` / `false`.
  Boolean,
}

pub(crate) fn format_value(value: &Value, format: FieldFormat) -> String {
  match format {
    FieldFormat::Text => stringify(value),
    FieldFormat::Date => parse_date(value).map_or_else(|| stringify(value), format_date),
    FieldFormat::Currency => {
      as_number(value).map_or_else(|| stringify(value), |n| format!("${}", group_thousands(n)))
    }
    FieldFormat::Number => as_number(value).map_or_else(|| stringify(value), group_thousands),
    FieldFormat::Percent => as_number(value).map_or_else(|| stringify(value), |n| format!("{n}%")),
    FieldFormat::Boolean => match value {
      Value::Bool(b) => b.to_string(),
      other => stringify(other),
    },
  }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
  date.format("%-d %B %Y").to_string()
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
  let raw = value.as_str()?.trim();
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn as_number(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite()),
    _ => None,
  }
}

/// en-US grouping: at most three fraction digits, trailing zeros dropped.
pub(crate) fn group_thousands(n: f64) -> String {
  let fixed = format!("{:.3}", n.abs());
  let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
  let frac_part = frac_part.trim_end_matches('0');

  let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
  for (i, ch) in int_part.chars().enumerate() {
    if i > 0 && (int_part.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
  let sign = if n.is_sign_negative() && !is_zero { "-" } else { "" };
  if frac_part.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}.{frac_part}") }
}
