//! `timetable` command-line shell.
//!
//! # Responsibility
//! - Map subcommands onto `TimetableService` use-cases.
//! - Own storage location, logging setup and confirmation prompts.

mod cli;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ShowArgs, SlotCommand, SubjectCommand};
use dialoguer::Confirm;
use log::info;
use std::path::{Path, PathBuf};
use timetable_core::db::open_db;
use timetable_core::{
    default_log_level, init_logging, slot_line, SlotRequest, SqliteKeyValueStore, SubjectId,
    TimetableService, VisibleWindow,
};
use uuid::Uuid;

const APP_DIR: &str = "timetable";
const DB_FILE_NAME: &str = "timetable.sqlite3";

type CliService<'conn> = TimetableService<SqliteKeyValueStore<'conn>>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli);
    info!(
        "event=cli_run module=cli status=start command={}",
        cli.command.name()
    );

    let db_path = match cli.db.clone() {
        Some(path) => path,
        None => default_data_dir()?.join(DB_FILE_NAME),
    };
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open timetable database `{}`", db_path.display()))?;
    let mut service = TimetableService::load(SqliteKeyValueStore::new(&conn))
        .context("failed to load timetable")?;

    match cli.command {
        Commands::Subject(command) => run_subject(&mut service, command),
        Commands::Slot(command) => run_slot(&mut service, command),
        Commands::Show(args) => show(&service, &args),
        Commands::Export { out } => export(&service, &out),
        Commands::Clear { yes } => clear(&mut service, yes),
    }
}

fn run_subject(service: &mut CliService<'_>, command: SubjectCommand) -> Result<()> {
    match command {
        SubjectCommand::Add { name, color } => {
            let subject = service.add_subject(&name, color)?;
            println!("{}  {}  {}", subject.id, subject.name, subject.color);
        }
        SubjectCommand::Remove { id } => {
            let removal = service.remove_subject(parse_id(&id)?)?;
            match removal.subject {
                Some(subject) => println!(
                    "removed {} and {} slot(s)",
                    subject.name,
                    removal.removed_slots.len()
                ),
                None => println!("nothing to remove"),
            }
        }
        SubjectCommand::List => {
            if service.subjects().is_empty() {
                println!("No subjects yet.");
            }
            for subject in service.subjects().iter() {
                println!("{}  {}  {}", subject.id, subject.name, subject.color);
            }
        }
    }
    Ok(())
}

fn run_slot(service: &mut CliService<'_>, command: SlotCommand) -> Result<()> {
    match command {
        SlotCommand::Add {
            subject,
            day,
            start,
            end,
        } => {
            let request = SlotRequest {
                subject_id: Some(resolve_subject_ref(service, &subject)?),
                day,
                start,
                end,
            };
            let slot = service.add_slot(&request)?;
            println!("{}  {}", slot.id, slot_line(service.subjects(), &slot));
        }
        SlotCommand::Remove { id } => match service.remove_slot(parse_id(&id)?)? {
            Some(slot) => println!("removed {}", slot_line(service.subjects(), &slot)),
            None => println!("nothing to remove"),
        },
        SlotCommand::List => {
            if service.slots().is_empty() {
                println!("No slots yet.");
            }
            for slot in service.slots().iter() {
                println!("{}  {}", slot.id, slot_line(service.subjects(), slot));
            }
        }
    }
    Ok(())
}

fn show(service: &CliService<'_>, args: &ShowArgs) -> Result<()> {
    let window = VisibleWindow::new(args.start_hour, args.end_hour)?;
    let layout = service.layout(&window);
    let labels = window.hour_labels();
    println!(
        "Weekly view {} - {}",
        labels.first().map(String::as_str).unwrap_or_default(),
        labels.last().map(String::as_str).unwrap_or_default()
    );

    for column in &layout.days {
        println!("{}", column.day);
        if column.blocks.is_empty() {
            println!("  -");
        }
        for block in &column.blocks {
            let label = service.subject_label(block.subject_id);
            println!(
                "  {}-{}  {:<20} {}  top {:>5.1}%  height {:>5.1}%{}",
                block.start,
                block.end,
                label.name,
                label.color,
                block.top_percent(),
                block.height_percent(),
                if block.clipped { "  (clipped)" } else { "" }
            );
        }
    }

    if service.slots().is_empty() {
        println!("No slots yet. Add some to see them here.");
    }
    Ok(())
}

fn export(service: &CliService<'_>, out: &Path) -> Result<()> {
    if !service.can_export() {
        bail!("nothing to export; add a subject or slot first");
    }
    service.export_document().write_to(out)?;
    println!("exported to {}", out.display());
    Ok(())
}

fn clear(service: &mut CliService<'_>, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Clear all subjects and slots?")
            .default(false)
            .interact()?;
    if !confirmed {
        println!("cancelled");
        return Ok(());
    }
    service.clear_all()?;
    println!("cleared");
    Ok(())
}

/// Accepts a subject UUID or an exact (case-insensitive) subject name.
fn resolve_subject_ref(service: &CliService<'_>, value: &str) -> Result<SubjectId> {
    if let Ok(id) = Uuid::parse_str(value.trim()) {
        return Ok(id);
    }
    let wanted = value.trim();
    service
        .subjects()
        .iter()
        .find(|subject| subject.name.eq_ignore_ascii_case(wanted))
        .map(|subject| subject.id)
        .ok_or_else(|| anyhow!("subject not found: `{wanted}`"))
}

fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim()).with_context(|| format!("invalid id `{}`", value.trim()))
}

fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| anyhow!("cannot determine data directory"))?;
    Ok(base.join(APP_DIR))
}

fn setup_logging(cli: &Cli) {
    let log_dir = match cli.log_dir.clone() {
        Some(dir) => dir,
        None => match default_data_dir() {
            Ok(dir) => dir.join("logs"),
            Err(_) => return,
        },
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}
