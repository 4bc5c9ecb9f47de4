use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

fn re_statement_date() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        Regex::new(r"^(?:[0-9]{4}/[0-9]{2}/[0-9]{2}|[0-9]{4}-[0-9]{2}-[0-9]{2})$")
            .expect("invalid regex")
    })
}

/// A posting date in `YYYY-MM-DD` form.
///
/// Only the shape is checked, never calendar validity: `2024-02-30` is kept
/// as-is. Because the shape is fixed-width, string order is date order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StatementDate(String);

impl StatementDate {
    /// Accepts `YYYY/MM/DD` or `YYYY-MM-DD` (one separator throughout) after
    /// trimming, and normalizes slashes to dashes.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if !re_statement_date().is_match(s) {
            return None;
        }
        Some(StatementDate(s.replace('/', "-")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatementDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
