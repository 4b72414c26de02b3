use std::{fmt, num::NonZeroUsize, str::FromStr};

use serde::Serialize;

use crate::domain::Course;

/// The identifier of a student held in a [`RecordStore`](crate::RecordStore).
///
/// Identifiers start at 1 and are only ever issued by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StudentId(NonZeroUsize);

impl StudentId {
    /// The first identifier a fresh store hands out.
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// The identifier following this one, or `None` on overflow.
    #[must_use]
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = InvalidStudentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NonZeroUsize>()
            .map(Self)
            .map_err(|_| InvalidStudentId(s.to_string()))
    }
}

impl TryFrom<usize> for StudentId {
    type Error = InvalidStudentId;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| InvalidStudentId(value.to_string()))
    }
}

/// Error returned when a string is not a positive integer identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid student ID '{0}': must be a positive integer")]
pub struct InvalidStudentId(String);

/// Error returned when a course is added to a student who already takes it.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Course already added: {0}")]
pub struct DuplicateCourse(pub Course);

/// A student record.
///
/// A student is built with a name and year of birth, has courses added to
/// it, and then receives its identifier when it is added to a
/// [`RecordStore`](crate::RecordStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<StudentId>,
    name: String,
    year_of_birth: i32,
    courses: Vec<Course>,
}

impl Student {
    /// Creates a student with no courses and no identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, year_of_birth: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            year_of_birth,
            courses: Vec::new(),
        }
    }

    /// The identifier assigned by the store, if the student has been added to
    /// one.
    #[must_use]
    pub const fn id(&self) -> Option<StudentId> {
        self.id
    }

    pub(crate) const fn assign_id(&mut self, id: StudentId) {
        self.id = Some(id);
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the student's name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The student's year of birth.
    #[must_use]
    pub const fn year_of_birth(&self) -> i32 {
        self.year_of_birth
    }

    /// Replaces the student's year of birth.
    pub const fn set_year_of_birth(&mut self, year_of_birth: i32) {
        self.year_of_birth = year_of_birth;
    }

    /// The courses the student is enrolled in, in the order they were added.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Whether the student is enrolled in a course equal to `course`.
    #[must_use]
    pub fn takes(&self, course: &Course) -> bool {
        self.courses.contains(course)
    }

    /// Enrols the student in a course.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateCourse`] if the student already takes an equal
    /// course. The student is left unchanged.
    pub fn add_course(&mut self, course: Course) -> Result<(), DuplicateCourse> {
        if self.takes(&course) {
            return Err(DuplicateCourse(course));
        }
        self.courses.push(course);
        Ok(())
    }

    /// Builder form of [`Student::add_course`].
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateCourse`] if the student already takes an equal
    /// course.
    pub fn with_course(mut self, course: Course) -> Result<Self, DuplicateCourse> {
        self.add_course(course)?;
        Ok(self)
    }
}

/// The export form: `name, year` followed by each course.
impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.year_of_birth)?;
        for course in &self.courses {
            write!(f, ", {course}")?;
        }
        Ok(())
    }
}

/// A partial update to a student.
///
/// A blank name and a year of birth of zero or less both mean "leave
/// unchanged". Every course listed is added to the student; courses the
/// student already takes are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    /// Replacement name, ignored when blank.
    pub name: String,
    /// Replacement year of birth, ignored when not strictly positive.
    pub year_of_birth: i32,
    /// Courses to enrol the student in.
    pub courses: Vec<Course>,
}

impl StudentPatch {
    /// A patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the replacement year of birth.
    #[must_use]
    pub const fn year_of_birth(mut self, year_of_birth: i32) -> Self {
        self.year_of_birth = year_of_birth;
        self
    }

    /// Adds a course to enrol the student in.
    #[must_use]
    pub fn course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub(crate) fn new_name(&self) -> Option<&str> {
        (!self.name.trim().is_empty()).then_some(self.name.as_str())
    }

    pub(crate) fn new_year_of_birth(&self) -> Option<i32> {
        (self.year_of_birth > 0).then_some(self.year_of_birth)
    }
}
