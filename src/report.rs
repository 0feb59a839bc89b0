use crate::due::{DateStyle, ParsedDue, parse_due};
use crate::task::TaskRecord;
use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Overdue,
    Upcoming,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Overdue => "Overdue",
            Status::Upcoming => "Upcoming",
        }
    }

    /// A task is overdue only if it fell due before today's local midnight;
    /// anything due earlier today still counts as upcoming.
    pub fn classify(instant: NaiveDateTime, now: NaiveDateTime) -> Self {
        if instant < start_of_day(now) {
            Status::Overdue
        } else {
            Status::Upcoming
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn start_of_day(now: NaiveDateTime) -> NaiveDateTime {
    now.date().and_time(NaiveTime::MIN)
}

/// Restricts the report to one project and/or one label. Both comparisons
/// ignore case; an unset field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project: Option<String>,
    pub label: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, record: &TaskRecord) -> bool {
        if let Some(project) = &self.project {
            if record.project.trim().to_lowercase() != project.trim().to_lowercase() {
                return false;
            }
        }
        if let Some(label) = &self.label {
            let wanted = label.trim().trim_start_matches('@').to_lowercase();
            if !record
                .label_tokens()
                .any(|token| token.to_lowercase() == wanted)
            {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub window_days: u32,
    pub date_style: DateStyle,
    pub filter: TaskFilter,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            date_style: DateStyle::default(),
            filter: TaskFilter::default(),
        }
    }
}

impl ReportOptions {
    /// Latest instant still inside the window. A window too large for the
    /// calendar saturates at `NaiveDateTime::MAX`, i.e. no upper bound.
    pub fn horizon(&self, now: NaiveDateTime) -> NaiveDateTime {
        TimeDelta::try_days(i64::from(self.window_days))
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

/// One line of the report. `instant`, `priority`, `project` and `labels` are
/// carried for sorting and the table view but are not part of the CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Day")]
    pub day_of_week: String,
    #[serde(rename = "DateStr")]
    pub date_str: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Content")]
    pub content: String,
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(skip)]
    pub instant: NaiveDateTime,
    #[serde(skip)]
    pub priority: String,
    #[serde(skip)]
    pub project: String,
    #[serde(skip)]
    pub labels: String,
}

impl ReportRow {
    fn from_record(
        record: &TaskRecord,
        due: &ParsedDue,
        status: Status,
        style: DateStyle,
    ) -> Self {
        Self {
            id: record.id.clone(),
            day_of_week: due.day_of_week(),
            date_str: due.display_date(style),
            time: due.display_time(),
            content: record.content.clone(),
            status,
            instant: due.instant,
            priority: record.priority.clone(),
            project: record.project.clone(),
            labels: record.labels.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub unparseable: usize,
    pub beyond_window: usize,
    pub filtered_out: usize,
    pub overdue: usize,
    pub upcoming: usize,
}

impl ReportSummary {
    pub fn reported(&self) -> usize {
        self.overdue + self.upcoming
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = vec![
            format!("tasks={}", self.total),
            format!("reported={}", self.reported()),
        ];
        if self.overdue > 0 {
            parts.push(format!("overdue={}", self.overdue));
        }
        if self.unparseable > 0 {
            parts.push(format!("unparseable={}", self.unparseable));
        }
        if self.beyond_window > 0 {
            parts.push(format!("beyond_window={}", self.beyond_window));
        }
        if self.filtered_out > 0 {
            parts.push(format!("filtered={}", self.filtered_out));
        }
        parts.join(", ")
    }
}

pub fn build_report(
    records: &[TaskRecord],
    now: NaiveDateTime,
    options: &ReportOptions,
) -> Vec<ReportRow> {
    build_report_with_summary(records, now, options).0
}

/// Filters, classifies and sorts `records` relative to `now`. Rows whose due
/// text does not parse are dropped and counted, never reported as errors.
pub fn build_report_with_summary(
    records: &[TaskRecord],
    now: NaiveDateTime,
    options: &ReportOptions,
) -> (Vec<ReportRow>, ReportSummary) {
    let horizon = options.horizon(now);
    let mut summary = ReportSummary {
        total: records.len(),
        ..ReportSummary::default()
    };
    let mut rows = Vec::new();

    for record in records {
        let Some(due) = parse_due(&record.due_date_text) else {
            log::debug!(
                "skipping task {}: unrecognised due date '{}'",
                record.id,
                record.due_date_text
            );
            summary.unparseable += 1;
            continue;
        };
        if due.instant > horizon {
            summary.beyond_window += 1;
            continue;
        }
        if !options.filter.matches(record) {
            summary.filtered_out += 1;
            continue;
        }
        let status = Status::classify(due.instant, now);
        match status {
            Status::Overdue => summary.overdue += 1,
            Status::Upcoming => summary.upcoming += 1,
        }
        rows.push(ReportRow::from_record(record, &due, status, options.date_style));
    }

    // Stable, so equal instants keep export order.
    rows.sort_by_key(|row| row.instant);
    (rows, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn classify_boundary_is_local_midnight() {
        let now = dt(2026, 1, 8, 10, 0);
        assert_eq!(Status::classify(dt(2026, 1, 8, 0, 0), now), Status::Upcoming);
        assert_eq!(Status::classify(dt(2026, 1, 8, 9, 0), now), Status::Upcoming);
        assert_eq!(Status::classify(dt(2026, 1, 7, 23, 59), now), Status::Overdue);
    }

    #[test]
    fn horizon_adds_window_days() {
        let options = ReportOptions {
            window_days: 3,
            ..ReportOptions::default()
        };
        assert_eq!(options.horizon(dt(2026, 1, 8, 10, 0)), dt(2026, 1, 11, 10, 0));
    }

    #[test]
    fn horizon_saturates_instead_of_overflowing() {
        let options = ReportOptions {
            window_days: u32::MAX,
            ..ReportOptions::default()
        };
        assert_eq!(options.horizon(dt(2026, 1, 8, 10, 0)), NaiveDateTime::MAX);
    }

    #[test]
    fn summary_omits_zero_counters() {
        let summary = ReportSummary {
            total: 3,
            upcoming: 2,
            unparseable: 1,
            ..ReportSummary::default()
        };
        assert_eq!(summary.to_cli_summary(), "tasks=3, reported=2, unparseable=1");
    }
}
