// Heatmark CLI - headless calendar heatmap editing

mod exit_codes;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};

use heatmark_config::settings::Settings;
use heatmark_config::theme::Palette;
use heatmark_engine::calendar;
use heatmark_engine::session::{Session, Tool};

use exit_codes::{EXIT_ERROR, EXIT_FORMAT, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Parser)]
#[command(name = "heatmark")]
#[command(about = "Paint calendar heatmaps from the command line")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new .heat document
    #[command(after_help = "\
Examples:
  heatmark new activity.heat
  heatmark new activity.heat --year 2023")]
    New {
        /// Document to create
        file: PathBuf,

        /// Year to open (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Add, remove, or list years in a document
    Year {
        #[command(subcommand)]
        command: YearCommands,
    },

    /// Paint a single day
    #[command(after_help = "\
Levels run 0-4; level 0 erases.

Examples:
  heatmark paint activity.heat 2024-03-05
  heatmark paint activity.heat 2024-03-05 --level 4
  heatmark paint activity.heat 2024-03-05 --level 0")]
    Paint {
        /// Document to edit
        file: PathBuf,

        /// Day to paint (YYYY-MM-DD)
        date: String,

        /// Intensity level 0-4
        #[arg(long, short = 'l')]
        level: Option<u8>,
    },

    /// Flood-fill the region of same-level days around a day
    #[command(after_help = "\
Examples:
  heatmark fill activity.heat 2024-03-05 --level 2")]
    Fill {
        /// Document to edit
        file: PathBuf,

        /// Day to fill from (YYYY-MM-DD)
        date: String,

        /// Intensity level 0-4
        #[arg(long, short = 'l')]
        level: Option<u8>,
    },

    /// Paint a rectangle of weeks and weekdays between two days
    #[command(after_help = "\
The rectangle spans the weeks and weekday rows between the two days;
both must fall in the same year.

Examples:
  heatmark rect activity.heat 2024-03-04 2024-04-12 --level 3
  heatmark rect activity.heat 2024-03-04 2024-04-12 --border")]
    Rect {
        /// Document to edit
        file: PathBuf,

        /// One corner (YYYY-MM-DD)
        start: String,

        /// Opposite corner (YYYY-MM-DD)
        end: String,

        /// Intensity level 0-4
        #[arg(long, short = 'l')]
        level: Option<u8>,

        /// Paint only the rectangle's outline
        #[arg(long)]
        border: bool,
    },

    /// Copy a region of days and stamp it elsewhere
    Region {
        #[command(subcommand)]
        command: RegionCommands,
    },

    /// Print a document as text
    Show {
        /// Document to read
        file: PathBuf,

        /// Show only this year
        #[arg(long)]
        year: Option<i32>,

        /// Render with the palette's colors (ANSI truecolor)
        #[arg(long)]
        color: bool,

        /// Use the dark palette (implies --color)
        #[arg(long)]
        dark: bool,
    },

    /// Export painted days as sparse JSON
    #[command(after_help = "\
Examples:
  heatmark export activity.heat
  heatmark export activity.heat -o activity.json")]
    Export {
        /// Document to read
        file: PathBuf,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Import a sparse JSON payload into a document
    #[command(after_help = "\
The payload is validated before anything is applied: one malformed
entry rejects the whole file and the document is left untouched.

Examples:
  heatmark import activity.heat activity.json
  curl -s https://example.com/activity.json | heatmark import activity.heat -")]
    Import {
        /// Document to edit
        file: PathBuf,

        /// JSON payload (file path, or - for stdin)
        input: String,
    },
}

#[derive(Subcommand)]
enum YearCommands {
    /// Open a year in the document
    Add {
        /// Document to edit
        file: PathBuf,
        /// Year to add
        year: i32,
    },
    /// Drop a year and all its painted days
    Remove {
        /// Document to edit
        file: PathBuf,
        /// Year to remove
        year: i32,
    },
    /// List open years
    List {
        /// Document to read
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum RegionCommands {
    /// Copy the rectangle between two days and stamp it at a third
    #[command(after_help = "\
The source corners must share a year; the destination may be any open
year. Days the copy cannot land on (outside the destination year's
calendar) are skipped.

Examples:
  heatmark region copy activity.heat --from 2024-01-01 --to 2024-01-21 --at 2024-06-02
  heatmark region copy activity.heat --from 2024-01-01 --to 2024-01-21 --at 2025-06-02")]
    Copy {
        /// Document to edit
        file: PathBuf,

        /// One corner of the source rectangle (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Opposite corner of the source rectangle (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Top-left destination day (YYYY-MM-DD)
        #[arg(long)]
        at: String,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  heatmark-engine ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("TARGET"),
        "\nformat:  .heat v1",
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New { file, year } => cmd_new(&file, year),
        Commands::Year { command } => match command {
            YearCommands::Add { file, year } => cmd_year_add(&file, year),
            YearCommands::Remove { file, year } => cmd_year_remove(&file, year),
            YearCommands::List { file } => cmd_year_list(&file),
        },
        Commands::Paint { file, date, level } => cmd_draw(&file, &date, level, Tool::Pencil),
        Commands::Fill { file, date, level } => cmd_draw(&file, &date, level, Tool::Fill),
        Commands::Rect {
            file,
            start,
            end,
            level,
            border,
        } => cmd_rect(&file, &start, &end, level, border),
        Commands::Region { command } => match command {
            RegionCommands::Copy { file, from, to, at } => cmd_region_copy(&file, &from, &to, &at),
        },
        Commands::Show { file, year, color, dark } => cmd_show(&file, year, color || dark, dark),
        Commands::Export { file, output } => cmd_export(&file, output.as_deref()),
        Commands::Import { file, input } => cmd_import(&file, &input),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self { code: EXIT_FORMAT, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

fn load_doc(path: &Path) -> Result<Session, CliError> {
    heatmark_io::native::load(path).map_err(CliError::io)
}

fn save_doc(session: &Session, path: &Path) -> Result<(), CliError> {
    heatmark_io::native::save(session, path).map_err(CliError::io)
}

fn parse_date(text: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CliError::usage(format!("invalid date: {:?} (expected YYYY-MM-DD)", text)))
}

fn parse_level(level: Option<u8>) -> Result<u8, CliError> {
    let level = match level {
        Some(l) => l,
        None => Settings::load().default_intensity,
    };
    if level > 4 {
        return Err(CliError::usage(format!("level {} out of range 0-4", level)));
    }
    Ok(level)
}

fn require_year(session: &Session, year: i32) -> Result<(), CliError> {
    if session.grid(year).is_some() {
        return Ok(());
    }
    Err(CliError::usage(format!("year {} is not open in this document", year))
        .with_hint(format!("add it first: heatmark year add <file> {}", year)))
}

// ============================================================================
// new / year
// ============================================================================

fn cmd_new(file: &Path, year: Option<i32>) -> Result<(), CliError> {
    if file.exists() {
        return Err(CliError::general(format!("{} already exists", file.display())));
    }
    let year = year.unwrap_or_else(|| chrono::Local::now().year());
    let mut session = Session::new();
    if !session.add_year(year) {
        return Err(CliError::usage(format!("cannot open year {}", year)));
    }
    save_doc(&session, file)?;
    println!("created {} with year {}", file.display(), year);
    Ok(())
}

fn cmd_year_add(file: &Path, year: i32) -> Result<(), CliError> {
    let mut session = load_doc(file)?;
    if !session.add_year(year) {
        return Err(CliError::usage(format!("year {} is already open or invalid", year)));
    }
    save_doc(&session, file)
}

fn cmd_year_remove(file: &Path, year: i32) -> Result<(), CliError> {
    let mut session = load_doc(file)?;
    if !session.remove_year(year) {
        return Err(
            CliError::usage(format!("year {} is not open in this document", year))
                .with_hint("heatmark year list <file> shows open years"),
        );
    }
    save_doc(&session, file)
}

fn cmd_year_list(file: &Path) -> Result<(), CliError> {
    let session = load_doc(file)?;
    for year in session.years() {
        println!("{}", year);
    }
    Ok(())
}

// ============================================================================
// paint / fill / rect
// ============================================================================

fn cmd_draw(file: &Path, date: &str, level: Option<u8>, tool: Tool) -> Result<(), CliError> {
    let date = parse_date(date)?;
    let level = parse_level(level)?;

    let mut session = load_doc(file)?;
    let year = date.year();
    require_year(&session, year)?;

    session.set_tool(tool);
    session.set_intensity(level);
    let at = calendar::date_to_cell(date);
    session.begin_gesture(year, at);
    session.end_gesture(None);

    save_doc(&session, file)
}

fn cmd_rect(
    file: &Path,
    start: &str,
    end: &str,
    level: Option<u8>,
    border: bool,
) -> Result<(), CliError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let level = parse_level(level)?;

    if start.year() != end.year() {
        return Err(CliError::usage("rectangle corners must fall in the same year"));
    }

    let mut session = load_doc(file)?;
    let year = start.year();
    require_year(&session, year)?;

    session.set_tool(if border {
        Tool::RectangleBorder
    } else {
        Tool::Rectangle
    });
    session.set_intensity(level);
    session.begin_gesture(year, calendar::date_to_cell(start));
    session.end_gesture(Some(calendar::date_to_cell(end)));

    save_doc(&session, file)
}

// ============================================================================
// region copy
// ============================================================================

fn cmd_region_copy(file: &Path, from: &str, to: &str, at: &str) -> Result<(), CliError> {
    let from = parse_date(from)?;
    let to = parse_date(to)?;
    let at = parse_date(at)?;

    if from.year() != to.year() {
        return Err(CliError::usage("source corners must fall in the same year"));
    }

    let mut session = load_doc(file)?;
    require_year(&session, from.year())?;
    require_year(&session, at.year())?;

    session.set_tool(Tool::Select);
    session.begin_gesture(from.year(), calendar::date_to_cell(from));
    session.update_gesture(calendar::date_to_cell(to));
    session.end_gesture(None);
    if !session.copy() {
        return Err(CliError::general("nothing to copy"));
    }

    session.set_tool(Tool::Paste);
    if !session.begin_gesture(at.year(), calendar::date_to_cell(at)) {
        return Err(CliError::general(
            "nothing to paste: no destination day accepts the copied region",
        ));
    }

    save_doc(&session, file)
}

// ============================================================================
// show / export / import
// ============================================================================

fn cmd_show(file: &Path, year: Option<i32>, color: bool, dark: bool) -> Result<(), CliError> {
    let session = load_doc(file)?;
    let years = match year {
        Some(y) => {
            require_year(&session, y)?;
            vec![y]
        }
        None => session.years(),
    };
    let palette = if dark { Palette::dark() } else { Palette::light() };
    for (i, y) in years.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if let Some(grid) = session.grid(*y) {
            if color {
                print!("{}", render::render_year_color(grid, &palette));
            } else {
                print!("{}", render::render_year(grid));
            }
        }
    }
    Ok(())
}

fn cmd_export(file: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let session = load_doc(file)?;
    match output {
        Some(path) => heatmark_io::json::export(&session, path).map_err(CliError::io),
        None => {
            let text = heatmark_io::json::to_string(&session).map_err(CliError::io)?;
            println!("{}", text);
            Ok(())
        }
    }
}

fn cmd_import(file: &Path, input: &str) -> Result<(), CliError> {
    let payload = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::io(e.to_string()))?;
        text
    } else {
        std::fs::read_to_string(input).map_err(|e| CliError::io(e.to_string()))?
    };

    let mut session = load_doc(file)?;
    let changed = heatmark_io::json::import(&mut session, &payload).map_err(CliError::format)?;
    save_doc(&session, file)?;

    if changed.is_empty() {
        println!("nothing to apply");
    } else {
        let years: Vec<String> = changed.iter().map(|y| y.to_string()).collect();
        println!("updated {}", years.join(", "));
    }
    Ok(())
}
