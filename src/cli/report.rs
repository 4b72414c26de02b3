//! Rendering students for the terminal.

use std::io::Write;

use roster::{RecordStore, Student};

use super::terminal::{self, Colorize};

/// Output format for printing every student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ListFormat {
    /// Human-readable listing with courses indented under each student.
    #[default]
    Table,
    /// A JSON array of students.
    Json,
}

/// Prints every student in the store.
pub fn print_all(
    store: &RecordStore,
    format: ListFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        ListFormat::Table => print_table(store, out),
        ListFormat::Json => {
            let students: Vec<&Student> = store.students().collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&students)?)?;
            Ok(())
        }
    }
}

fn print_table(store: &RecordStore, out: &mut impl Write) -> anyhow::Result<()> {
    if store.is_empty() {
        writeln!(out, "No students in the database.")?;
        return Ok(());
    }

    let rule = separator();
    writeln!(out, "{}", "STUDENT DATABASE".info())?;
    writeln!(out, "{}", rule.dim())?;
    for student in store.students() {
        writeln!(out, "{}", summary(student))?;
        for course in student.courses() {
            writeln!(out, "\t{course}")?;
        }
        writeln!(out, "{}", rule.dim())?;
    }
    Ok(())
}

/// One line per student: identifier followed by the display form.
pub fn summary(student: &Student) -> String {
    match student.id() {
        Some(id) => format!("[{id}] {student}"),
        None => student.to_string(),
    }
}

/// Prints search results, or `empty_message` when there are none.
pub fn print_matches(
    matches: &[&Student],
    empty_message: &str,
    out: &mut impl Write,
) -> std::io::Result<()> {
    if matches.is_empty() {
        return writeln!(out, "{}", empty_message.dim());
    }
    for student in matches {
        writeln!(out, "{}", summary(student))?;
    }
    Ok(())
}

fn separator() -> String {
    let width = if terminal::is_narrow() {
        17
    } else {
        terminal::terminal_width().map_or(40, |w| usize::from(w).min(40))
    };
    "-".repeat(width)
}
