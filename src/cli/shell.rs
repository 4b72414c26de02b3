//! The interactive menu loop.
//!
//! The shell only gathers input and prints results; every change goes through
//! [`RecordStore`] operations.

use std::{fmt::Display, io::Write, str::FromStr};

use dialoguer::{Confirm, Input, Select};
use roster::{Config, Course, RecordStore, Student, StudentId, StudentPatch};

use super::{
    report::{self, ListFormat},
    terminal::Colorize,
};

/// Source of user answers.
pub trait Prompter {
    /// Picks one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize>;

    /// Reads a line of text. An empty answer yields `default` when one is
    /// given.
    fn text(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String>;

    /// Reads a value, asking again until it parses.
    fn value<T>(&mut self, prompt: &str, default: Option<T>) -> anyhow::Result<T>
    where
        T: Clone + Display + FromStr,
        T::Err: Display;

    /// Asks a yes/no question, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool>;
}

/// Reads answers from the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?)
    }

    fn text(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn value<T>(&mut self, prompt: &str, default: Option<T>) -> anyhow::Result<T>
    where
        T: Clone + Display + FromStr,
        T::Err: Display,
    {
        let mut input = Input::<T>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default);
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }
}

const MENU: [&str; 6] = [
    "Print the student details",
    "Search for a student",
    "Add a student record",
    "Delete a student record",
    "Update a student record",
    "Exit the database",
];

const SEARCH_MENU: [&str; 3] = ["By ID", "By name", "By course"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Print,
    Search,
    Add,
    Delete,
    Update,
    Exit,
}

impl Action {
    const ALL: [Self; 6] = [
        Self::Print,
        Self::Search,
        Self::Add,
        Self::Delete,
        Self::Update,
        Self::Exit,
    ];
}

/// Menu loop over a store.
pub struct Shell<P, W> {
    store: RecordStore,
    config: Config,
    format: ListFormat,
    prompter: P,
    out: W,
}

impl<P: Prompter, W: Write> Shell<P, W> {
    pub const fn new(
        store: RecordStore,
        config: Config,
        format: ListFormat,
        prompter: P,
        out: W,
    ) -> Self {
        Self {
            store,
            config,
            format,
            prompter,
            out,
        }
    }

    pub fn into_parts(self) -> (RecordStore, Config, P, W) {
        (self.store, self.config, self.prompter, self.out)
    }

    /// Runs menu actions until the user exits.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{}", "DATABASE OF STUDENTS!".info())?;
            let choice = self.prompter.select("Choose from the menu of options", &MENU)?;
            let Some(&action) = Action::ALL.get(choice) else {
                writeln!(self.out, "{}", "Invalid option. Please try again.".warning())?;
                continue;
            };

            match action {
                Action::Print => report::print_all(&self.store, self.format, &mut self.out)?,
                Action::Search => self.search()?,
                Action::Add => self.add()?,
                Action::Delete => self.delete()?,
                Action::Update => self.update()?,
                Action::Exit => return Ok(()),
            }
        }
    }

    fn search(&mut self) -> anyhow::Result<()> {
        match self.prompter.select("Search by", &SEARCH_MENU)? {
            0 => {
                let id: StudentId = self.prompter.value("Enter student ID", None)?;
                match self.store.find_by_id(id) {
                    Some(student) => writeln!(self.out, "{}", report::summary(student))?,
                    None => writeln!(self.out, "{}", format!("No student found with ID {id}").dim())?,
                }
            }
            1 => {
                let name = self.prompter.text("Enter student name", None)?;
                match self.store.find_by_name(&name) {
                    Ok(found) => report::print_matches(
                        &found,
                        &format!("No students found with name containing '{name}'"),
                        &mut self.out,
                    )?,
                    Err(e) => writeln!(self.out, "{}", e.to_string().warning())?,
                }
            }
            2 => {
                let department = self.prompter.text("Enter course department", None)?;
                let department = self.config.search_department(department.trim());
                let number = self.prompter.value("Enter course number", None)?;
                let credits = self.prompter.value("Enter course credits", None)?;
                let course = Course::new(department, number, credits);
                report::print_matches(
                    &self.store.find_by_course(&course),
                    "No students found taking that course.",
                    &mut self.out,
                )?;
            }
            _ => writeln!(self.out, "{}", "Invalid search option.".warning())?,
        }
        Ok(())
    }

    fn add(&mut self) -> anyhow::Result<()> {
        let name = self.prompter.text("Enter student name", None)?;
        let year_of_birth = self.prompter.value("Enter year of birth", None)?;
        let mut student = Student::new(name, year_of_birth);

        for course in self.read_courses()? {
            if let Err(e) = student.add_course(course) {
                writeln!(
                    self.out,
                    "{}",
                    format!("{e}. Student not added.").warning()
                )?;
                return Ok(());
            }
        }

        let id = self.store.add_student(student);
        writeln!(
            self.out,
            "{}",
            format!("Student added successfully with ID: {id}").success()
        )?;
        Ok(())
    }

    fn delete(&mut self) -> anyhow::Result<()> {
        let id: StudentId = self.prompter.value("Enter student ID to delete", None)?;
        match self.store.delete_student(id) {
            Ok(_) => writeln!(
                self.out,
                "{}",
                format!("Student with ID {id} has been deleted.").success()
            )?,
            Err(e) => writeln!(self.out, "{}", e.to_string().warning())?,
        }
        Ok(())
    }

    fn update(&mut self) -> anyhow::Result<()> {
        let id: StudentId = self.prompter.value("Enter student ID to update", None)?;
        let Some(current) = self.store.find_by_id(id) else {
            writeln!(
                self.out,
                "{}",
                format!("No student found with ID {id}").warning()
            )?;
            return Ok(());
        };
        writeln!(self.out, "Current student details: {current}")?;

        let name = self
            .prompter
            .text("Enter new name (leave blank to keep current)", None)?;
        let year_of_birth = self
            .prompter
            .value("Enter new year of birth (0 to keep current)", Some(0))?;
        let patch = StudentPatch {
            name,
            year_of_birth,
            courses: self.read_courses()?,
        };

        let report = self.store.update_student(id, patch)?;
        if report.name_updated {
            writeln!(self.out, "{}", "Student name updated successfully.".success())?;
        }
        if report.year_of_birth_updated {
            writeln!(self.out, "{}", "Year of birth updated successfully.".success())?;
        }
        for course in &report.added_courses {
            writeln!(
                self.out,
                "{}",
                format!("Course added successfully: {course}").success()
            )?;
        }
        for duplicate in &report.duplicate_courses {
            writeln!(self.out, "{}", duplicate.to_string().warning())?;
        }
        if report.is_unchanged() && report.duplicate_courses.is_empty() {
            writeln!(self.out, "{}", "Nothing to update.".dim())?;
        }
        Ok(())
    }

    fn read_courses(&mut self) -> anyhow::Result<Vec<Course>> {
        let count: usize = self.prompter.value("Enter number of courses to add", Some(0))?;
        let mut courses = Vec::new();
        for _ in 0..count {
            let department = self.prompter.text("Enter course department", None)?;
            let number = self.prompter.value("Enter course number", None)?;
            let credits = self.prompter.value("Enter course credits", None)?;
            courses.push(Course::new(department.trim(), number, credits));
        }
        Ok(courses)
    }
}
