//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use timetable_core::{Color, Weekday};

/// Weekly timetable builder
#[derive(Parser, Debug)]
#[command(name = "timetable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite file holding subjects and slots
    #[arg(long, global = true, env = "TIMETABLE_DB")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, env = "TIMETABLE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "TIMETABLE_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage subjects
    #[command(subcommand)]
    Subject(SubjectCommand),

    /// Manage class slots
    #[command(subcommand)]
    Slot(SlotCommand),

    /// Print the weekly grid
    Show(ShowArgs),

    /// Write all subjects and slots as pretty JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = timetable_core::EXPORT_FILE_NAME)]
        out: PathBuf,
    },

    /// Remove every subject and slot
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Commands {
    /// Short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Subject(SubjectCommand::Add { .. }) => "subject_add",
            Self::Subject(SubjectCommand::Remove { .. }) => "subject_remove",
            Self::Subject(SubjectCommand::List) => "subject_list",
            Self::Slot(SlotCommand::Add { .. }) => "slot_add",
            Self::Slot(SlotCommand::Remove { .. }) => "slot_remove",
            Self::Slot(SlotCommand::List) => "slot_list",
            Self::Show(_) => "show",
            Self::Export { .. } => "export",
            Self::Clear { .. } => "clear",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SubjectCommand {
    /// Add a subject
    Add {
        name: String,

        /// Hex color (#rgb or #rrggbb)
        #[arg(short, long, default_value = Color::DEFAULT_HEX)]
        color: Color,
    },
    /// Remove a subject and all of its slots
    Remove { id: String },
    /// List subjects
    List,
}

#[derive(Subcommand, Debug)]
pub enum SlotCommand {
    /// Add a slot
    Add {
        /// Subject ID or exact subject name
        #[arg(short, long)]
        subject: String,

        /// Mon|Tue|Wed|Thu|Fri|Sat|Sun
        #[arg(short, long)]
        day: Weekday,

        /// Start time (HH:MM)
        #[arg(long, default_value = "09:00")]
        start: String,

        /// End time (HH:MM)
        #[arg(long, default_value = "10:00")]
        end: String,
    },
    /// Remove a slot
    Remove { id: String },
    /// List slots
    List,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// First visible hour
    #[arg(long, default_value_t = timetable_core::layout::grid::DEFAULT_START_HOUR)]
    pub start_hour: u8,

    /// Last visible hour
    #[arg(long, default_value_t = timetable_core::layout::grid::DEFAULT_END_HOUR)]
    pub end_hour: u8,
}
