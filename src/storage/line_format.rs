//! The flat-file student record format.
//!
//! Import reads one student per line:
//!
//! ```text
//! name,yearOfBirth,dept1,num1,credits1,dept2,num2,credits2,...
//! ```
//!
//! Fields are separated by commas with no quoting, so names cannot contain
//! commas. Trailing empty fields are ignored.
//!
//! Export writes each student's display form, one per line:
//!
//! ```text
//! name, yearOfBirth, dept1 num1 (credits1 credits), ...
//! ```
//!
//! The export form is a report and is not valid import input.

use std::{
    io::{self, BufRead, Write},
    num::ParseIntError,
    str::FromStr,
};

use thiserror::Error;

use crate::domain::{Course, DuplicateCourse, Student};

/// Errors that abort an import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input could not be read.
    #[error("failed to read student records: {0}")]
    Io(#[from] io::Error),

    /// A line did not have a name, a year of birth and whole course triples.
    #[error("Invalid student record format on line {line_number}: {line}")]
    InvalidRecordFormat {
        /// 1-based line number.
        line_number: usize,
        /// The offending line.
        line: String,
    },

    /// A year, course number or credit field was not an integer.
    #[error("Invalid number format in student record on line {line_number}: '{field}'")]
    InvalidNumber {
        /// 1-based line number.
        line_number: usize,
        /// The field that failed to parse.
        field: String,
        /// The underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// A line listed the same course twice.
    #[error("Duplicate course in student record on line {line_number}: {source}")]
    DuplicateCourse {
        /// 1-based line number.
        line_number: usize,
        /// The repeated course.
        #[source]
        source: DuplicateCourse,
    },
}

/// Parses a single import line into a student without an identifier.
///
/// # Errors
///
/// Returns an [`ImportError`] describing the first problem found in the line.
pub fn parse_record(line: &str, line_number: usize) -> Result<Student, ImportError> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    let [name, year, courses @ ..] = fields.as_slice() else {
        return Err(invalid_format(line, line_number));
    };
    if courses.is_empty() || courses.len() % 3 != 0 {
        return Err(invalid_format(line, line_number));
    }

    let mut student = Student::new(*name, parse_number(year, line_number)?);

    for triple in courses.chunks_exact(3) {
        let course = Course::new(
            triple[0],
            parse_number(triple[1], line_number)?,
            parse_number(triple[2], line_number)?,
        );
        student
            .add_course(course)
            .map_err(|source| ImportError::DuplicateCourse {
                line_number,
                source,
            })?;
    }

    Ok(student)
}

/// Parses every line of `reader`.
///
/// Nothing is returned unless every line parses.
///
/// # Errors
///
/// Returns the first [`ImportError`] encountered.
pub fn read_records(reader: impl BufRead) -> Result<Vec<Student>, ImportError> {
    let mut students = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let student = parse_record(&line, index + 1)?;
        tracing::debug!(line_number = index + 1, name = student.name(), "parsed student record");
        students.push(student);
    }
    Ok(students)
}

/// Writes each student's display form on its own line.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_records<'a>(
    mut writer: impl Write,
    students: impl IntoIterator<Item = &'a Student>,
) -> io::Result<()> {
    for student in students {
        writeln!(writer, "{student}")?;
    }
    writer.flush()
}

fn parse_number<T>(field: &str, line_number: usize) -> Result<T, ImportError>
where
    T: FromStr<Err = ParseIntError>,
{
    field.parse().map_err(|source| ImportError::InvalidNumber {
        line_number,
        field: field.to_string(),
        source,
    })
}

fn invalid_format(line: &str, line_number: usize) -> ImportError {
    ImportError::InvalidRecordFormat {
        line_number,
        line: line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn parses_single_course() {
        let student = parse_record("Alice,2000,CS,101,3", 1).unwrap();

        assert_eq!(student.name(), "Alice");
        assert_eq!(student.year_of_birth(), 2000);
        assert_eq!(student.courses(), &[Course::new("CS", 101, 3)]);
        assert!(student.id().is_none());
    }

    #[test]
    fn parses_several_courses_in_order() {
        let student = parse_record("Ivan,1998,MATH,200,4,CS,101,3,PHYS,150,2", 1).unwrap();

        assert_eq!(
            student.courses(),
            &[
                Course::new("MATH", 200, 4),
                Course::new("CS", 101, 3),
                Course::new("PHYS", 150, 2),
            ]
        );
    }

    #[test_case("Alice,2000,CS,-101,-3", Course::new("CS", -101, -3); "negative number and credits")]
    #[test_case("Alice,2000,CS,+101,3", Course::new("CS", 101, 3); "explicit plus sign")]
    #[test_case("Alice,2000,CS,0,0", Course::new("CS", 0, 0); "zero")]
    fn course_fields_accept_any_integer(line: &str, expected: Course) {
        let student = parse_record(line, 1).unwrap();
        assert_eq!(student.courses(), &[expected]);
    }

    #[test]
    fn trailing_empty_fields_are_ignored() {
        let student = parse_record("Alice,2000,CS,101,3,,,", 1).unwrap();
        assert_eq!(student.courses().len(), 1);
    }

    #[test_case(""; "empty line")]
    #[test_case("Alice"; "name only")]
    #[test_case("Alice,2000"; "no courses")]
    #[test_case("Bob,2000,CS,101"; "incomplete triple")]
    #[test_case("Bob,2000,CS,101,3,MATH"; "second triple incomplete")]
    fn rejects_bad_shape(line: &str) {
        let err = parse_record(line, 4).unwrap_err();
        match err {
            ImportError::InvalidRecordFormat { line_number, line: reported } => {
                assert_eq!(line_number, 4);
                assert_eq!(reported, line);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test_case("Eve,abc,CS,101,3", "abc"; "year")]
    #[test_case("Eve,2000,CS,x1,3", "x1"; "course number")]
    #[test_case("Eve,2000,CS,101,three", "three"; "credits")]
    #[test_case("Eve, 2000,CS,101,3", " 2000"; "fields are not trimmed")]
    fn rejects_bad_numbers(line: &str, bad_field: &str) {
        let err = parse_record(line, 2).unwrap_err();
        match err {
            ImportError::InvalidNumber {
                line_number, field, ..
            } => {
                assert_eq!(line_number, 2);
                assert_eq!(field, bad_field);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_course_in_line() {
        let err = parse_record("Zed,2002,CS,101,3,CS,101,3", 9).unwrap_err();
        match err {
            ImportError::DuplicateCourse {
                line_number,
                source,
            } => {
                assert_eq!(line_number, 9);
                assert_eq!(source.0, Course::new("CS", 101, 3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_records_reports_failing_line() {
        let input = "Alice,2000,CS,101,3\nBob,2000,CS,101\n";
        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidRecordFormat { line_number: 2, .. }
        ));
    }

    #[test]
    fn read_records_handles_crlf() {
        let students = read_records("Alice,2000,CS,101,3\r\nBob,1999,MATH,200,4\r\n".as_bytes())
            .unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].courses(), &[Course::new("MATH", 200, 4)]);
    }

    #[test]
    fn export_lines_use_display_form() {
        let students = [
            Student::new("Alice", 2000)
                .with_course(Course::new("CS", 101, 3))
                .unwrap(),
            Student::new("Bob", 1999),
        ];

        let mut out = Vec::new();
        write_records(&mut out, &students).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Alice, 2000, CS 101 (3 credits)\nBob, 1999\n"
        );
    }

    #[test]
    fn exported_line_is_not_importable() {
        let student = Student::new("Alice", 2000)
            .with_course(Course::new("CS", 101, 3))
            .unwrap();
        assert!(parse_record(&student.to_string(), 1).is_err());
    }
}
