use crate::report::ReportRow;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Csv,
    Table,
    Json,
}

pub const CSV_HEADER: [&str; 6] = ["ID", "Day", "DateStr", "Time", "Content", "Status"];

const TABLE_HEADER: [&str; 8] = [
    "ID", "Day", "Date", "Time", "Content", "Project", "Priority", "Status",
];

/// Writes rows as CSV with columns `ID,Day,DateStr,Time,Content,Status`.
/// Zero rows write nothing at all, header included.
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<(), csv::Error> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes rows as a pretty JSON array. Zero rows write nothing.
pub fn write_json<W: Write>(rows: &[ReportRow], mut writer: W) -> io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)
}

pub fn write_report<W: Write>(
    rows: &[ReportRow],
    format: OutputFormat,
    mut writer: W,
) -> io::Result<()> {
    match format {
        OutputFormat::Csv => write_csv(rows, writer).map_err(io::Error::from),
        OutputFormat::Json => write_json(rows, writer),
        OutputFormat::Table => writer.write_all(render_text_table(rows).as_bytes()),
    }
}

fn table_cells(row: &ReportRow) -> [&str; 8] {
    [
        row.id.as_str(),
        row.day_of_week.as_str(),
        row.date_str.as_str(),
        row.time.as_str(),
        row.content.as_str(),
        row.project.as_str(),
        row.priority.as_str(),
        row.status.as_str(),
    ]
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    out.push('|');
    for (cell, w) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        let pad = w.saturating_sub(width(cell));
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
}

/// Renders rows as an ASCII table with a separator between due days.
/// Returns an empty string for zero rows.
pub fn render_text_table(rows: &[ReportRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = TABLE_HEADER.iter().map(|h| width(h)).collect();
    for row in rows {
        for (ci, cell) in table_cells(row).iter().enumerate() {
            widths[ci] = widths[ci].max(width(cell));
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }
    sep.push('\n');

    let mut out = String::new();
    out.push_str(&sep);
    push_line(&mut out, &TABLE_HEADER, &widths);
    out.push_str(&sep);

    let mut current_day = None;
    for row in rows {
        let day = row.instant.date();
        if current_day.is_some_and(|prev| prev != day) {
            out.push_str(&sep);
        }
        current_day = Some(day);
        push_line(&mut out, &table_cells(row), &widths);
    }

    out.push_str(&sep);
    out
}
