//! Request flows for managing student records.
//!
//! Each method is one user action: it validates input, talks to the
//! repository and answers with a [`Notice`] for the presentation layer.
//! Storage failures are reported with a generic message only.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::sqlite::StorageManager;
use crate::student::{Student, StudentRepository};
use crate::validation::{EditForm, StudentForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
    Danger,
}

/// A one-shot message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Level::Danger, message)
    }

    pub fn is_success(&self) -> bool {
        self.level == Level::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub struct Registry<'a> {
    students: StudentRepository<'a>,
}

impl<'a> Registry<'a> {
    pub fn new(storage: &'a StorageManager) -> Self {
        Self {
            students: StudentRepository::new(storage),
        }
    }

    pub fn list(&self) -> Vec<Student> {
        self.students.list_all()
    }

    pub fn add(&self, form: StudentForm) -> Notice {
        let student = match form.into_student() {
            Ok(student) => student,
            Err(err) => return Notice::danger(err.to_string()),
        };

        if self.students.find_by_roll(&student.roll_number).is_some() {
            return Notice::danger("A student with this roll number already exists");
        }

        if self.students.create(&student) {
            info!(roll_number = %student.roll_number, "student added");
            Notice::success("Student added successfully!")
        } else {
            Notice::danger("An error occurred while adding the student")
        }
    }

    pub fn search(&self, roll_number: &str) -> Result<Student, Notice> {
        self.students
            .find_by_roll(roll_number)
            .ok_or_else(|| Notice::warning("No student found with that roll number"))
    }

    pub fn edit(&self, roll_number: &str, form: EditForm) -> Notice {
        let Some(mut student) = self.students.find_by_roll(roll_number) else {
            return Notice::danger("Student not found");
        };

        if let Err(err) = form.apply_to(&mut student) {
            return Notice::danger(err.to_string());
        }

        if self.students.update(&student) {
            info!(roll_number, "student updated");
            Notice::success("Student information updated successfully!")
        } else {
            Notice::danger("An error occurred while updating the student information")
        }
    }

    pub fn delete(&self, roll_number: &str) -> Notice {
        let Some(student) = self.students.find_by_roll(roll_number) else {
            return Notice::danger("Student not found");
        };

        if self.students.delete(&student.roll_number) {
            info!(roll_number, "student deleted");
            Notice::success("Student deleted successfully!")
        } else {
            Notice::danger("An error occurred while deleting the student")
        }
    }
}
