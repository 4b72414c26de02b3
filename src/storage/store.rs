//! The in-memory record store.
//!
//! The [`RecordStore`] owns every student, hands out identifiers, and
//! implements add, delete, update and search along with bulk import and
//! export of the flat-file record format.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use thiserror::Error;
use tracing::instrument;

use crate::{
    domain::{Course, DuplicateCourse, Student, StudentId, StudentPatch},
    storage::{
        id_pool::IdPool,
        line_format::{self, ImportError},
    },
};

/// Non-fatal failures of store operations.
///
/// The store is left unchanged whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No student has the given identifier.
    #[error("No student found with ID {0}")]
    NotFound(StudentId),

    /// A search argument was unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Error writing an export.
#[derive(Debug, Error)]
#[error("failed to export student records: {0}")]
pub struct ExportError(#[from] io::Error);

/// What an update changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Whether the name was replaced.
    pub name_updated: bool,
    /// Whether the year of birth was replaced.
    pub year_of_birth_updated: bool,
    /// Courses the student was newly enrolled in.
    pub added_courses: Vec<Course>,
    /// Courses skipped because the student already took them.
    pub duplicate_courses: Vec<DuplicateCourse>,
}

impl UpdateReport {
    /// Whether the update left the student unchanged.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        !self.name_updated && !self.year_of_birth_updated && self.added_courses.is_empty()
    }
}

/// An in-memory collection of students.
///
/// Students are kept in the order they were added. Every student in the store
/// has a unique identifier; identifiers freed by deletion are reused, smallest
/// first, before new ones are issued.
#[derive(Debug, Default)]
pub struct RecordStore {
    students: Vec<Student>,
    ids: IdPool,
}

impl RecordStore {
    /// Creates an empty store whose first identifier is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store populated from an import file.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] if the file cannot be read or any record in
    /// it is malformed.
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let mut store = Self::new();
        store.import_file(path)?;
        Ok(store)
    }

    /// The number of students held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the store holds no students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Iterates over every student in the order they were added.
    pub fn students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.students.iter()
    }

    /// Adds a student, assigning it the next identifier.
    ///
    /// Any identifier the student already carries is replaced.
    #[instrument(skip(self, student), fields(name = student.name()))]
    pub fn add_student(&mut self, mut student: Student) -> StudentId {
        let id = self.ids.allocate();
        student.assign_id(id);
        self.students.push(student);
        tracing::info!(%id, "Student added successfully with ID: {id}");
        id
    }

    /// Removes a student and returns it. Its identifier becomes available for
    /// reuse.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no student has the identifier.
    #[instrument(skip(self))]
    pub fn delete_student(&mut self, id: StudentId) -> Result<Student, StoreError> {
        let Some(index) = self.position(id) else {
            tracing::warn!("No student found with ID {id}");
            return Err(StoreError::NotFound(id));
        };

        let student = self.students.remove(index);
        self.ids.release(id);
        tracing::info!("Student with ID {id} has been deleted");
        Ok(student)
    }

    /// Applies a patch to a student.
    ///
    /// A blank name and a non-positive year of birth leave those fields
    /// unchanged. Courses the student already takes are recorded in the
    /// report and skipped; the remaining courses are still added.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no student has the identifier.
    #[instrument(skip(self, patch))]
    pub fn update_student(
        &mut self,
        id: StudentId,
        patch: StudentPatch,
    ) -> Result<UpdateReport, StoreError> {
        let Some(index) = self.position(id) else {
            tracing::warn!("No student found with ID {id}");
            return Err(StoreError::NotFound(id));
        };
        let student = &mut self.students[index];
        let mut report = UpdateReport::default();

        if let Some(name) = patch.new_name() {
            student.set_name(name);
            report.name_updated = true;
            tracing::info!("Student name updated successfully");
        }

        if let Some(year) = patch.new_year_of_birth() {
            student.set_year_of_birth(year);
            report.year_of_birth_updated = true;
            tracing::info!("Year of birth updated successfully");
        }

        for course in patch.courses {
            match student.add_course(course.clone()) {
                Ok(()) => {
                    tracing::info!("Course added successfully: {course}");
                    report.added_courses.push(course);
                }
                Err(duplicate) => {
                    tracing::warn!("{duplicate}");
                    report.duplicate_courses.push(duplicate);
                }
            }
        }

        Ok(report)
    }

    /// Finds a student by identifier.
    #[must_use]
    pub fn find_by_id(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|student| student.id() == Some(id))
    }

    /// Finds every student whose name contains `term`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if `term` is blank.
    pub fn find_by_name(&self, term: &str) -> Result<Vec<&Student>, StoreError> {
        if term.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "search name cannot be empty",
            ));
        }

        let term = term.to_lowercase();
        Ok(self
            .students
            .iter()
            .filter(|student| student.name().to_lowercase().contains(&term))
            .collect())
    }

    /// Finds every student enrolled in a course equal to `course`.
    #[must_use]
    pub fn find_by_course(&self, course: &Course) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|student| student.takes(course))
            .collect()
    }

    /// Appends every record read from `reader`.
    ///
    /// All records are parsed before any is added, so a failed import leaves
    /// the store unchanged. Returns the identifiers assigned, in input order.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] if the input cannot be read or any record
    /// is malformed.
    #[instrument(skip_all)]
    pub fn import(&mut self, reader: impl Read) -> Result<Vec<StudentId>, ImportError> {
        let students = line_format::read_records(BufReader::new(reader))?;
        tracing::debug!(count = students.len(), "import parsed");
        Ok(students
            .into_iter()
            .map(|student| self.add_student(student))
            .collect())
    }

    /// Appends every record in the file at `path`.
    ///
    /// # Errors
    ///
    /// See [`RecordStore::import`].
    pub fn import_file(&mut self, path: &Path) -> Result<Vec<StudentId>, ImportError> {
        let file = File::open(path)?;
        self.import(file)
    }

    /// Writes every student's display form, one per line.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if writing fails.
    #[instrument(skip_all)]
    pub fn export(&self, writer: impl Write) -> Result<(), ExportError> {
        line_format::write_records(writer, &self.students)?;
        Ok(())
    }

    /// Writes an export to the file at `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the file cannot be created or written.
    pub fn export_file(&self, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.export(BufWriter::new(file))
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.students
            .iter()
            .position(|student| student.id() == Some(id))
    }
}
