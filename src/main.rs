mod app;
mod calendar;
mod events_file;
mod help;
mod theme;
use crate::app::App;
use crate::calendar::{MonthWindow, ViewOptions};
use crate::events_file::load_events;
use anyhow::Context;
use barcal::layout::{DayMarking, FirstDay, LayoutConfig};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub(crate) static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Space left around a label inside its bar, in columns
const LABEL_PADDING: f64 = 2.0;

/// Labels are measured in terminal cells, so one "point" is one column
const FONT_SIZE: f64 = 1.0;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    events: Option<PathBuf>,
    first_day: FirstDay,
    marking: DayMarking,
    view: ViewOptions,
    log: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('e') | Arg::Long("events") => {
                    opts.events = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('m') | Arg::Long("monday") => opts.first_day = FirstDay::Monday,
                Arg::Short('w') | Arg::Long("week-numbers") => {
                    opts.view.show_week_numbers = true;
                }
                Arg::Short('x') | Arg::Long("hide-extra-days") => {
                    opts.view.hide_extra_days = true;
                }
                Arg::Long("marking") => opts.marking = parser.value()?.parse_with(parse_marking)?,
                Arg::Long("log") => opts.log = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(|s| Date::parse(s, &YMD_FMT))?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                if let Some(path) = &opts.log {
                    init_logging(path)?;
                }
                let events = match &opts.events {
                    Some(path) => load_events(path)
                        .with_context(|| format!("failed to load events from {}", path.display()))?,
                    None => Vec::new(),
                };
                info!(count = events.len(), "loaded events");
                let config = LayoutConfig::default()
                    .first_day(opts.first_day)
                    .day_marking(opts.marking)
                    .font_size(FONT_SIZE)
                    .label_padding(LABEL_PADDING);
                let mut window = MonthWindow::new(today, events, config);
                if let Some(date) = opts.date {
                    window = window
                        .start_month(date)
                        .with_context(|| format!("cannot show the month of {date}"))?;
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(window, opts.view).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: barcal [<options>] [YYYY-MM-DD]");
                println!();
                println!("Month calendar drawing multi-day events as bars across each week");
                println!();
                println!("Options:");
                println!("  -e, --events FILE         Read events from a JSON file");
                println!("  -m, --monday              Start weeks on Monday");
                println!("  -w, --week-numbers        Show ISO week numbers");
                println!("  -x, --hide-extra-days     Leave days of adjacent months blank");
                println!("      --marking KIND        Mark event days: simple, dots, or period");
                println!("      --log FILE            Write log messages to FILE");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown day marking {0:?}; expected simple, dots, or period")]
struct UnknownMarking(String);

fn parse_marking(s: &str) -> Result<DayMarking, UnknownMarking> {
    match s {
        "simple" => Ok(DayMarking::Simple),
        "dots" => Ok(DayMarking::MultiDot),
        "period" => Ok(DayMarking::Period),
        _ => Err(UnknownMarking(s.to_owned())),
    }
}

/// Sends `tracing` output to `path`.  The terminal belongs to the calendar,
/// so nothing is logged unless a file is given.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
