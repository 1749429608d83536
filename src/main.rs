use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use globalize::{Collator, CompareOptions, DateTimeValue, GlobalizationError, ShiftedCalendar};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "globalize",
    version,
    about = "Locale-aware string comparison and shifted-era calendars"
)]
struct Cli {
    /// Locale name, empty for the invariant locale
    #[arg(short, long, default_value = "", global = true)]
    locale: String,

    /// Comparison flags, comma separated
    #[arg(short, long, value_enum, value_delimiter = ',', global = true)]
    options: Vec<OptionFlag>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Compare two strings (-1, 0 or 1)
    Compare { a: String, b: String },
    /// Index of the first occurrence of VALUE in SOURCE
    IndexOf {
        source: String,
        value: String,
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i32>,
        #[arg(long, requires = "start", allow_negative_numbers = true)]
        count: Option<i32>,
    },
    /// Index of the last occurrence of VALUE in SOURCE
    LastIndexOf {
        source: String,
        value: String,
        #[arg(long, allow_negative_numbers = true)]
        start: Option<i32>,
        #[arg(long, requires = "start", allow_negative_numbers = true)]
        count: Option<i32>,
    },
    IsPrefix { source: String, prefix: String },
    IsSuffix { source: String, suffix: String },
    /// Hash code of VALUE under the selected options
    Hash { value: String },
    /// Convert a shifted-era date to the Gregorian calendar
    ToDate {
        #[arg(short, long, value_enum, default_value_t = CalendarKind::ThaiBuddhist)]
        calendar: CalendarKind,
        year: i32,
        month: i32,
        day: i32,
        #[arg(default_value_t = 0)]
        hour: i32,
        #[arg(default_value_t = 0)]
        minute: i32,
        #[arg(default_value_t = 0)]
        second: i32,
        #[arg(default_value_t = 0)]
        millisecond: i32,
        #[arg(long, allow_negative_numbers = true)]
        era: Option<i32>,
    },
    /// Convert a Gregorian date (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS) to a shifted era
    FromDate {
        #[arg(short, long, value_enum, default_value_t = CalendarKind::ThaiBuddhist)]
        calendar: CalendarKind,
        date: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OptionFlag {
    IgnoreCase,
    IgnoreNonSpace,
    IgnoreSymbols,
    IgnoreKanaType,
    IgnoreWidth,
    OrdinalIgnoreCase,
    StringSort,
    Ordinal,
}

impl From<OptionFlag> for CompareOptions {
    fn from(flag: OptionFlag) -> Self {
        match flag {
            OptionFlag::IgnoreCase => CompareOptions::IGNORE_CASE,
            OptionFlag::IgnoreNonSpace => CompareOptions::IGNORE_NON_SPACE,
            OptionFlag::IgnoreSymbols => CompareOptions::IGNORE_SYMBOLS,
            OptionFlag::IgnoreKanaType => CompareOptions::IGNORE_KANA_TYPE,
            OptionFlag::IgnoreWidth => CompareOptions::IGNORE_WIDTH,
            OptionFlag::OrdinalIgnoreCase => CompareOptions::ORDINAL_IGNORE_CASE,
            OptionFlag::StringSort => CompareOptions::STRING_SORT,
            OptionFlag::Ordinal => CompareOptions::ORDINAL,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CalendarKind {
    ThaiBuddhist,
    Korean,
    Taiwan,
}

impl From<CalendarKind> for ShiftedCalendar {
    fn from(kind: CalendarKind) -> Self {
        match kind {
            CalendarKind::ThaiBuddhist => ShiftedCalendar::thai_buddhist(),
            CalendarKind::Korean => ShiftedCalendar::korean(),
            CalendarKind::Taiwan => ShiftedCalendar::taiwan(),
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Globalization(#[from] GlobalizationError),

    #[error("Cannot parse date {0:?}")]
    BadDate(String),
}

fn combined_options(flags: &[OptionFlag]) -> CompareOptions {
    flags
        .iter()
        .fold(CompareOptions::NONE, |acc, &f| acc | CompareOptions::from(f))
}

fn parse_date(text: &str) -> Result<DateTimeValue, CliError> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::default()))
        })
        .map_err(|_| CliError::BadDate(text.to_string()))?;
    Ok(DateTimeValue::try_from(naive)?)
}

fn run_command(cli: &Cli, command: &Command) -> Result<String, CliError> {
    let options = combined_options(&cli.options);
    let collator = || Collator::get_collator(Some(cli.locale.as_str()));

    let output = match command {
        Command::Compare { a, b } => collator()?
            .compare(Some(a.as_str()), Some(b.as_str()), options)?
            .to_string(),
        Command::IndexOf {
            source,
            value,
            start,
            count,
        } => {
            let ci = collator()?;
            let (source, value) = (Some(source.as_str()), Some(value.as_str()));
            let index = match (start, count) {
                (Some(s), Some(c)) => ci.index_of_range(source, value, *s, *c, options)?,
                (Some(s), None) => ci.index_of_from(source, value, *s, options)?,
                _ => ci.index_of(source, value, options)?,
            };
            index.to_string()
        }
        Command::LastIndexOf {
            source,
            value,
            start,
            count,
        } => {
            let ci = collator()?;
            let (source, value) = (Some(source.as_str()), Some(value.as_str()));
            let index = match (start, count) {
                (Some(s), Some(c)) => ci.last_index_of_range(source, value, *s, *c, options)?,
                (Some(s), None) => ci.last_index_of_from(source, value, *s, options)?,
                _ => ci.last_index_of(source, value, options)?,
            };
            index.to_string()
        }
        Command::IsPrefix { source, prefix } => collator()?
            .is_prefix(Some(source.as_str()), Some(prefix.as_str()), options)?
            .to_string(),
        Command::IsSuffix { source, suffix } => collator()?
            .is_suffix(Some(source.as_str()), Some(suffix.as_str()), options)?
            .to_string(),
        Command::Hash { value } => collator()?.get_hash_code(Some(value.as_str()), options)?.to_string(),
        Command::ToDate {
            calendar,
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            era,
        } => {
            let cal = ShiftedCalendar::from(*calendar);
            let dt = match era {
                Some(e) => cal.to_date_time(*year, *month, *day, *hour, *minute, *second, *millisecond, *e)?,
                None => cal.to_date_time_current_era(*year, *month, *day, *hour, *minute, *second, *millisecond)?,
            };
            dt.to_string()
        }
        Command::FromDate { calendar, date } => {
            let cal = ShiftedCalendar::from(*calendar);
            let dt = parse_date(date)?;
            let shifted = cal.from_date_time(&dt)?;
            let mut line = format!(
                "era {} year {} month {} day {}",
                shifted.era, shifted.year, shifted.month, shifted.day
            );
            if let Some(icu) = cal.icu_era_year(&dt) {
                line.push_str(&format!(" (icu: {} {})", icu.era, icu.year));
            }
            line
        }
    };
    Ok(output)
}

fn execute(cli: &Cli, command: &Command) -> ExitCode {
    match run_command(cli, command) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run_repl() -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("globalize v{}", env!("CARGO_PKG_VERSION"));
    println!("Type a command (e.g. `compare -o ordinal a b`). Press Ctrl-D to exit.");

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        let read_result = stdin.lock().read_line(&mut line);

        match read_result {
            Ok(0) => break,
            Ok(_) => {
                let words = line.split_whitespace();
                match Cli::try_parse_from(std::iter::once("globalize").chain(words)) {
                    Ok(cli) => {
                        if let Some(command) = &cli.command {
                            execute(&cli, command);
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(e) => {
                eprintln!("Read error: {e}");
                return ExitCode::from(1);
            }
        }
    }

    println!();
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(command) => execute(&cli, command),
        None => run_repl(),
    }
}
