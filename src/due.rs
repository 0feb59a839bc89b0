use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Time column value for tasks without a time of day, as wide as `hh:mm AM`.
pub const BLANK_TIME: &str = "        ";

/// How the report redisplays a due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `MM/DD/YY`, the order the export uses.
    #[default]
    MonthFirst,
    /// `DD/MM/YY`.
    DayFirst,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            DateStyle::MonthFirst => "%m/%d/%y",
            DateStyle::DayFirst => "%d/%m/%y",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDue {
    pub has_time: bool,
    pub instant: NaiveDateTime,
}

impl ParsedDue {
    pub fn display_date(&self, style: DateStyle) -> String {
        self.instant.format(style.pattern()).to_string()
    }

    /// `hh:mm AM/PM` when the due text carried a time, otherwise [`BLANK_TIME`].
    pub fn display_time(&self) -> String {
        if self.has_time {
            self.instant.format("%I:%M %p").to_string()
        } else {
            BLANK_TIME.to_string()
        }
    }

    pub fn day_of_week(&self) -> String {
        self.instant.format("%a").to_string()
    }
}

type DueParser = fn(&Captures<'_>) -> Option<ParsedDue>;

struct DuePattern {
    name: &'static str,
    regex: Regex,
    parse: DueParser,
}

// First match wins; order matters because a date-with-time also starts with a date.
static DUE_PATTERNS: LazyLock<Vec<DuePattern>> = LazyLock::new(|| {
    vec![
        DuePattern {
            name: "date_time",
            regex: Regex::new(
                r"^(\d{1,2})/(\d{1,2})/(\d{2})\b.*?\b(\d{1,2}):(\d{2})(?:\s*(?i:(am|pm))\b|\b)",
            )
            .expect("date_time pattern is valid"),
            parse: parse_date_time,
        },
        DuePattern {
            name: "date_only",
            regex: Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})\b[^:]*$")
                .expect("date_only pattern is valid"),
            parse: parse_date_only,
        },
    ]
});

/// Parses free-form due text from the export. Returns `None` for anything the
/// known patterns do not cover, including impossible dates like `02/30/26`.
pub fn parse_due(text: &str) -> Option<ParsedDue> {
    let text = text.trim();
    for pattern in DUE_PATTERNS.iter() {
        let Some(captures) = pattern.regex.captures(text) else {
            continue;
        };
        if let Some(parsed) = (pattern.parse)(&captures) {
            log::trace!("due text '{text}' matched {}", pattern.name);
            return Some(parsed);
        }
    }
    None
}

fn capture_u32(captures: &Captures<'_>, idx: usize) -> Option<u32> {
    captures.get(idx)?.as_str().parse().ok()
}

fn date_from_captures(captures: &Captures<'_>) -> Option<NaiveDate> {
    let month = capture_u32(captures, 1)?;
    let day = capture_u32(captures, 2)?;
    let year = 2000 + capture_u32(captures, 3)? as i32;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_date_time(captures: &Captures<'_>) -> Option<ParsedDue> {
    let date = date_from_captures(captures)?;
    let hour = capture_u32(captures, 4)?;
    let minute = capture_u32(captures, 5)?;
    let hour = match captures.get(6).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) => to_24_hour(hour, meridiem == "pm")?,
        None => hour,
    };
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(ParsedDue {
        has_time: true,
        instant: date.and_time(time),
    })
}

fn parse_date_only(captures: &Captures<'_>) -> Option<ParsedDue> {
    let date = date_from_captures(captures)?;
    Some(ParsedDue {
        has_time: false,
        instant: date.and_time(NaiveTime::MIN),
    })
}

fn to_24_hour(hour: u32, pm: bool) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    Some(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}
