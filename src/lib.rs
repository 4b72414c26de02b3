//! In-memory Student Records
//!
//! Students are imported from a flat comma-separated file, edited in memory,
//! and optionally exported as a plain-text report.

pub mod domain;
pub use domain::{Config, Course, DuplicateCourse, Student, StudentId, StudentPatch};

/// The record store and its import and export formats.
pub mod storage;
pub use storage::{ExportError, ImportError, RecordStore, StoreError, UpdateReport};
