use std::fmt;

use serde::Serialize;

/// A course a student can be enrolled in.
///
/// Courses are plain values. Two courses are the same course only if the
/// department, the course number and the credit count all match; the
/// department comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Course {
    department: String,
    number: i32,
    credits: i32,
}

impl Course {
    /// Creates a new course.
    #[must_use]
    pub fn new(department: impl Into<String>, number: i32, credits: i32) -> Self {
        Self {
            department: department.into(),
            number,
            credits,
        }
    }

    /// The department code, for example `CS`.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// The course number within the department.
    #[must_use]
    pub const fn number(&self) -> i32 {
        self.number
    }

    /// The number of credits the course is worth.
    #[must_use]
    pub const fn credits(&self) -> i32 {
        self.credits
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} credits)",
            self.department, self.number, self.credits
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_case::test_case;

    use super::*;

    #[test]
    fn display_form() {
        let course = Course::new("CS", 101, 3);
        assert_eq!(course.to_string(), "CS 101 (3 credits)");
    }

    #[test_case(Course::new("cs", 101, 3); "department is case sensitive")]
    #[test_case(Course::new("CS", 102, 3); "different number")]
    #[test_case(Course::new("CS", 101, 4); "different credits")]
    fn courses_differing_in_one_field_are_distinct(other: Course) {
        assert_ne!(Course::new("CS", 101, 3), other);
    }

    #[test]
    fn equal_courses_hash_together() {
        let mut set = HashSet::new();
        assert!(set.insert(Course::new("MATH", 200, 4)));
        assert!(!set.insert(Course::new(String::from("MATH"), 200, 4)));
        assert_eq!(set.len(), 1);
    }
}
