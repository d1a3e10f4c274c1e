use crate::traits::DateFormatter;
use crate::types::{PlanetError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Go reference-layout tokens and their strftime equivalents.
/// Longer tokens must come before their prefixes. Output is always UTC, so
/// the `Z`-prefixed offsets collapse to a literal `Z`.
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("January", "%B"),
    ("Monday", "%A"),
    ("Z07:00", "Z"),
    ("Z0700", "Z"),
    ("-07:00", "%:z"),
    ("-0700", "%z"),
    ("-07", "%z"),
    (".000000000", "%.9f"),
    (".000000", "%.6f"),
    (".000", "%.3f"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("_2", "%e"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("15", "%H"),
    ("PM", "%p"),
    ("pm", "%P"),
    ("1", "%-m"),
    ("2", "%-d"),
    ("3", "%-I"),
    ("4", "%-M"),
    ("5", "%-S"),
];

/// A validated date format, stored as a strftime pattern.
///
/// Accepts either a Go-style reference layout (`2006-01-02`,
/// `Monday, January 2, 2006`) or, when the input contains `%`, a strftime
/// pattern that is used verbatim.
///
/// Timestamps are formatted in UTC. feed-rs normalizes every parsed date to
/// UTC, so a feed's own offset is not available and date headings for
/// non-UTC feeds follow the UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    strftime: String,
}

impl DateFormat {
    pub fn parse(spec: &str) -> Result<Self> {
        if spec.trim().is_empty() {
            return Err(PlanetError::DateFormat {
                format: spec.to_string(),
                reason: "format is empty".to_string(),
            });
        }

        let strftime = if spec.contains('%') {
            spec.to_string()
        } else {
            translate_layout(spec)
        };

        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(PlanetError::DateFormat {
                format: spec.to_string(),
                reason: format!("unsupported pattern {:?}", strftime),
            });
        }

        Ok(Self { strftime })
    }

    pub fn as_strftime(&self) -> &str {
        &self.strftime
    }
}

impl DateFormatter for DateFormat {
    fn format(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.format(&self.strftime).to_string()
    }
}

fn translate_layout(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;

    'outer: while let Some(ch) = rest.chars().next() {
        for (token, replacement) in LAYOUT_TOKENS {
            if rest.starts_with(token) {
                out.push_str(replacement);
                rest = &rest[token.len()..];
                continue 'outer;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
