use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tod_report::config::CONFIG_ENV_VAR;
use tod_report::{
    CommandSource, DateStyle, ExportSource, FileSource, OutputFormat, ReaderSource, ReportConfig,
    TaskFilter, build_report_with_summary, logging, write_report,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyleArg {
    MonthFirst,
    DayFirst,
}

impl From<DateStyleArg> for DateStyle {
    fn from(value: DateStyleArg) -> Self {
        match value {
            DateStyleArg::MonthFirst => DateStyle::MonthFirst,
            DateStyleArg::DayFirst => DateStyle::DayFirst,
        }
    }
}

/// Report overdue tasks and tasks due soon from a task-manager CSV export.
#[derive(Debug, Parser)]
#[command(name = "tod-report", version)]
struct Cli {
    /// Export CSV to read; `-` reads stdin
    #[arg(long, short)]
    input: Option<String>,

    /// TOML config file
    #[arg(long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Lookahead window in days
    #[arg(long)]
    days: Option<u32>,

    /// Reference time, e.g. 2026-01-08T10:00 (defaults to the local clock)
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    #[arg(long, value_enum)]
    date_style: Option<DateStyleArg>,

    /// Only tasks in this project (case-insensitive)
    #[arg(long)]
    project: Option<String>,

    /// Only tasks carrying this label (case-insensitive)
    #[arg(long)]
    label: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    /// Export command and its arguments; `{out}` is replaced by a scratch file path
    #[arg(last = true)]
    export_cmd: Vec<String>,
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value.trim(), fmt).ok())
        .ok_or_else(|| format!("invalid time '{value}' (expected YYYY-MM-DDTHH:MM)"))
}

fn select_source(cli: &Cli, config: &ReportConfig) -> Result<Box<dyn ExportSource>> {
    if let Some(input) = cli.input.as_deref() {
        if input == "-" {
            return Ok(Box::new(ReaderSource::new(io::stdin())));
        }
        return Ok(Box::new(FileSource::new(input)));
    }
    if !cli.export_cmd.is_empty() {
        return Ok(Box::new(CommandSource::from_argv(cli.export_cmd.clone())?));
    }
    if let Some(argv) = &config.export_command {
        return Ok(Box::new(CommandSource::from_argv(argv.clone())?));
    }
    Ok(Box::new(ReaderSource::new(io::stdin())))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ReportConfig::load_or_default(cli.config.as_deref())?;
    if let Some(days) = cli.days {
        config.window_days = days;
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if let Some(style) = cli.date_style {
        config.date_style = style.into();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    logging::init(config.level_filter()?);

    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());
    let filter = TaskFilter {
        project: cli.project.clone(),
        label: cli.label.clone(),
    };
    let options = config.report_options(filter);

    let source = select_source(&cli, &config)?;
    let records = source
        .read_records()
        .context("could not read the task export")?;
    let (rows, summary) = build_report_with_summary(&records, now, &options);
    log::info!("{}", summary.to_cli_summary());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&rows, config.format, &mut out).context("could not write the report")?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
