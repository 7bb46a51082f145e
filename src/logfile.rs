//! Line grammar of the scanner logfile.
//!
//! The scanner writes a fixed header followed by one group per SSID:
//!
//! ```text
//! SSID
//!     timestamp  (latency)
//! =========================
//!
//! home-wifi
//!     12.345   (0.001234)
//!     14.120   (0.001310)
//!
//! other-wifi
//!     ...
//! ```
//!
//! Only the first group is read. Its first line is the label, the other
//! lines are `<time> (<latency>)` pairs, the time optionally in parentheses
//! and followed by any text without parentheses.
use crate::error::LatencyError;
use crate::HEADER_LINES;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATA_LINE: Regex = Regex::new(
        r"^[^()]*?\s*(?:\((?P<ptime>[^()]*)\)|(?P<time>[^\s()]+))\s*\((?P<latency>[^()]*)\)[^()]*$"
    )
    .expect("data line pattern does not compile");
}

/// One data line, still in the logfile units (seconds, seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyRecord {
    pub time: f64,
    pub latency: f64,
}

/// The first group of the logfile, lines numbered from 1 as in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub label: &'a str,
    pub lines: Vec<(usize, &'a str)>,
}

/// Skips the header and returns the first block of non-blank lines.
/// Blank lines right after the header are not part of any group.
pub fn first_group(text: &str) -> Result<Group<'_>, LatencyError> {
    let body = match text.splitn(HEADER_LINES + 1, '\n').nth(HEADER_LINES) {
        Some(body) => body,
        None => {
            return Err(LatencyError::TruncatedHeader {
                found: text.matches('\n').count(),
            })
        }
    };
    let mut lines = body
        .lines()
        .enumerate()
        .map(|(i, l)| (HEADER_LINES + i + 1, l))
        .skip_while(|(_, l)| is_blank(l));
    let (_, label) = lines.next().ok_or(LatencyError::MissingGroup)?;
    let lines = lines.take_while(|(_, l)| !is_blank(l)).collect();
    Ok(Group {
        label: label.trim(),
        lines,
    })
}

/// Parses one data line; `line_no` only ends up in the error.
pub fn parse_record(line: &str, line_no: usize) -> Result<LatencyRecord, LatencyError> {
    let caps = DATA_LINE.captures(line).ok_or_else(|| {
        LatencyError::parse(
            line_no,
            format!("expected `<time> (<latency>)`, found `{}`", line.trim()),
        )
    })?;
    let time = caps
        .name("ptime")
        .or_else(|| caps.name("time"))
        .map_or("", |m| m.as_str());
    let latency = caps.name("latency").map_or("", |m| m.as_str());
    Ok(LatencyRecord {
        time: parse_field(time, "time", line_no)?,
        latency: parse_field(latency, "latency", line_no)?,
    })
}

fn parse_field(field: &str, name: &str, line_no: usize) -> Result<f64, LatencyError> {
    let field = field.trim();
    field.parse::<f64>().map_err(|e| {
        LatencyError::parse(line_no, format!("invalid {} `{}`: {}", name, field, e))
    })
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
