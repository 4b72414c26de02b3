//! Domain models for student records.
//!
//! This module contains the value types held by the record store: courses,
//! students and their identifiers, plus the shell configuration.

/// Course value type.
pub mod course;
pub use course::Course;

mod config;
pub use config::Config;

/// Student entity, identifiers and update patches.
pub mod student;
pub use student::{DuplicateCourse, InvalidStudentId, Student, StudentId, StudentPatch};
