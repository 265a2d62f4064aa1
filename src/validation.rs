//! Input checks applied before a record reaches the repository.
//!
//! Only the GPA is checked: it must parse as a number and sit in
//! `[MIN_GPA, MAX_GPA]`. Text fields pass through untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::student::Student;

pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("GPA must be a number")]
    GpaNotNumber,
    #[error("GPA must be between 0 and 4.0")]
    GpaOutOfRange,
}

/// Raw submitted values, GPA still as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentForm {
    pub roll_number: String,
    pub name: String,
    pub course: String,
    pub gpa: String,
}

impl StudentForm {
    pub fn into_student(self) -> Result<Student, FormError> {
        let gpa = parse_gpa(&self.gpa)?;
        Ok(Student::new(self.roll_number, self.name, self.course, gpa))
    }
}

/// Editable fields of an existing record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditForm {
    pub name: String,
    pub course: String,
    pub gpa: String,
}

impl EditForm {
    /// Validate, then overwrite the mutable fields of `student`.
    /// `student` is left unchanged when validation fails.
    pub fn apply_to(self, student: &mut Student) -> Result<(), FormError> {
        let gpa = parse_gpa(&self.gpa)?;
        student.name = self.name;
        student.course = self.course;
        student.gpa = gpa;
        Ok(())
    }
}

pub fn parse_gpa(raw: &str) -> Result<f64, FormError> {
    let gpa: f64 = raw.trim().parse().map_err(|_| FormError::GpaNotNumber)?;
    validate_gpa(gpa)?;
    Ok(gpa)
}

pub fn validate_gpa(gpa: f64) -> Result<(), FormError> {
    // NaN fails both comparisons, so test containment rather than exclusion.
    if (MIN_GPA..=MAX_GPA).contains(&gpa) {
        Ok(())
    } else {
        Err(FormError::GpaOutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(parse_gpa("0"), Ok(0.0));
        assert_eq!(parse_gpa("4.0"), Ok(4.0));
        assert_eq!(parse_gpa(" 3.25 "), Ok(3.25));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(parse_gpa("4.01"), Err(FormError::GpaOutOfRange));
        assert_eq!(parse_gpa("-0.5"), Err(FormError::GpaOutOfRange));
        assert_eq!(parse_gpa("NaN"), Err(FormError::GpaOutOfRange));
        assert_eq!(parse_gpa("inf"), Err(FormError::GpaOutOfRange));
    }

    #[test]
    fn not_a_number() {
        assert_eq!(parse_gpa(""), Err(FormError::GpaNotNumber));
        assert_eq!(parse_gpa("three"), Err(FormError::GpaNotNumber));
        assert_eq!(
            FormError::GpaNotNumber.to_string(),
            "GPA must be a number"
        );
    }

    #[test]
    fn edit_form_keeps_roll_number() {
        let mut student = Student::new("R1", "Alice", "CS", 3.5);
        let form = EditForm {
            name: "Alice B".into(),
            course: "EE".into(),
            gpa: "3.8".into(),
        };
        form.apply_to(&mut student).unwrap();
        assert_eq!(student, Student::new("R1", "Alice B", "EE", 3.8));

        let bad = EditForm {
            name: "X".into(),
            course: "Y".into(),
            gpa: "9".into(),
        };
        assert_eq!(bad.apply_to(&mut student), Err(FormError::GpaOutOfRange));
        assert_eq!(student.name, "Alice B");
    }

    #[test]
    fn form_converts_to_student() {
        let form = StudentForm {
            roll_number: "R7".into(),
            name: "Grace".into(),
            course: "Math".into(),
            gpa: "3.9".into(),
        };
        assert_eq!(
            form.into_student(),
            Ok(Student::new("R7", "Grace", "Math", 3.9))
        );
    }
}
