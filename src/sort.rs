use std::cmp::Ordering;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

/// Column sort categories. The set of known key names is closed; anything
/// else falls back to plain string comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Num,
    Created,
    Age,
    Text,
}

impl SortKey {
    pub fn from_name(name: &str) -> SortKey {
        match name {
            "num" => SortKey::Num,
            "created" => SortKey::Created,
            "age" => SortKey::Age,
            _ => SortKey::Text,
        }
    }

    /// Compares two raw cell values under this key. Never fails: malformed
    /// input collapses to a neutral default (0 / the epoch) instead.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            SortKey::Num => digits_value(a).cmp(&digits_value(b)),
            SortKey::Created => parse_date(a).cmp(&parse_date(b)),
            SortKey::Age => leading_int(a).cmp(&leading_int(b)),
            SortKey::Text => a.cmp(b),
        }
    }
}

static NON_DIGITS: OnceLock<Regex> = OnceLock::new();

/// Strips everything but digits and reads the remainder as one integer, so
/// "#12" is 12 and "1.2.3" is 123. Empty or overflowing digit runs count as 0.
fn digits_value(s: &str) -> i64 {
    let re = NON_DIGITS.get_or_init(|| Regex::new(r"\D+").unwrap());
    re.replace_all(s, "").parse::<i64>().unwrap_or(0)
}

/// Leading optionally-signed integer; "42 d" is 42, anything else is 0.
fn leading_int(s: &str) -> i64 {
    let t = s.trim();
    let (sign, rest) = match t.strip_prefix('-') {
        Some(r) => (-1, r),
        None => (1, t.strip_prefix('+').unwrap_or(t)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Unparseable dates sort as the Unix epoch.
fn parse_date(s: &str) -> DateTime<Utc> {
    let t = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) { return dt.with_timezone(&Utc); }
    if let Ok(naive) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S") { return DateTime::from_naive_utc_and_offset(naive, Utc); }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") { return DateTime::from_naive_utc_and_offset(d.and_time(NaiveTime::MIN), Utc); }
    DateTime::UNIX_EPOCH
}
