//! The `Student` entity and its repository.

use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::sqlite::StorageManager;

const SELECT_COLUMNS: &str = "SELECT roll_number, name, course, gpa FROM students";

/// A single student record.
///
/// `roll_number` is the natural key and is never rewritten by `update`.
/// The GPA range is a caller-side rule; the store accepts any real.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub roll_number: String,
    pub name: String,
    pub course: String,
    pub gpa: f64,
}

impl Student {
    pub fn new(
        roll_number: impl Into<String>,
        name: impl Into<String>,
        course: impl Into<String>,
        gpa: f64,
    ) -> Self {
        Self {
            roll_number: roll_number.into(),
            name: name.into(),
            course: course.into(),
            gpa,
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            roll_number: row.get(0)?,
            name: row.get(1)?,
            course: row.get(2)?,
            gpa: row.get(3)?,
        })
    }
}

/// Create/read/update/delete over the `students` table.
///
/// Every operation acquires its own connection and releases it before
/// returning. The plain methods (`create`, `update`, ...) log failures and
/// answer with `bool`/`Option`/`Vec`; the `try_*` methods report the cause.
pub struct StudentRepository<'a> {
    storage: &'a StorageManager,
}

impl<'a> StudentRepository<'a> {
    pub fn new(storage: &'a StorageManager) -> Self {
        Self { storage }
    }

    /// Insert a new row. Does not look for an existing roll number first;
    /// the unique constraint rejects duplicates.
    pub fn try_create(&self, student: &Student) -> Result<()> {
        let conn = self.storage.acquire_connection()?;
        conn.execute(
            "INSERT INTO students (roll_number, name, course, gpa) VALUES (?1, ?2, ?3, ?4)",
            params![student.roll_number, student.name, student.course, student.gpa],
        )
        .map_err(|err| StoreError::from_insert(err, &student.roll_number))?;
        debug!(roll_number = %student.roll_number, "student inserted");
        Ok(())
    }

    /// Rewrite name, course and GPA. Zero matching rows is `NotFound`.
    pub fn try_update(&self, student: &Student) -> Result<()> {
        let affected = self.update_rows(student)?;
        if affected == 0 {
            return Err(StoreError::NotFound {
                roll_number: student.roll_number.clone(),
            });
        }
        Ok(())
    }

    /// Remove the row. Zero matching rows is `NotFound`.
    pub fn try_delete(&self, roll_number: &str) -> Result<()> {
        let affected = self.delete_rows(roll_number)?;
        if affected == 0 {
            return Err(StoreError::NotFound {
                roll_number: roll_number.to_string(),
            });
        }
        Ok(())
    }

    pub fn try_find_by_roll(&self, roll_number: &str) -> Result<Option<Student>> {
        let conn = self.storage.acquire_connection()?;
        let student = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE roll_number = ?1"),
                [roll_number],
                Student::from_row,
            )
            .optional()?;
        debug!(roll_number, found = student.is_some(), "student looked up");
        Ok(student)
    }

    /// All rows in the store's natural order.
    pub fn try_list_all(&self) -> Result<Vec<Student>> {
        let conn = self.storage.acquire_connection()?;
        let mut stmt = conn.prepare(SELECT_COLUMNS)?;
        let students = stmt
            .query_map([], Student::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = students.len(), "students listed");
        Ok(students)
    }

    pub fn create(&self, student: &Student) -> bool {
        match self.try_create(student) {
            Ok(()) => true,
            Err(err) => {
                warn!(roll_number = %student.roll_number, error = %err, code = err.code(), "error saving student");
                false
            }
        }
    }

    /// Matching nothing still counts as success here; use `try_update` to
    /// tell the two apart.
    pub fn update(&self, student: &Student) -> bool {
        match self.update_rows(student) {
            Ok(affected) => {
                debug!(roll_number = %student.roll_number, affected, "student updated");
                true
            }
            Err(err) => {
                warn!(roll_number = %student.roll_number, error = %err, code = err.code(), "error updating student");
                false
            }
        }
    }

    /// Same no-match behavior as `update`.
    pub fn delete(&self, roll_number: &str) -> bool {
        match self.delete_rows(roll_number) {
            Ok(affected) => {
                debug!(roll_number, affected, "student deleted");
                true
            }
            Err(err) => {
                warn!(roll_number, error = %err, code = err.code(), "error deleting student");
                false
            }
        }
    }

    pub fn find_by_roll(&self, roll_number: &str) -> Option<Student> {
        self.try_find_by_roll(roll_number).unwrap_or_else(|err| {
            warn!(roll_number, error = %err, code = err.code(), "error getting student by roll");
            None
        })
    }

    pub fn list_all(&self) -> Vec<Student> {
        self.try_list_all().unwrap_or_else(|err| {
            warn!(error = %err, code = err.code(), "error getting all students");
            Vec::new()
        })
    }

    fn update_rows(&self, student: &Student) -> Result<usize> {
        let conn = self.storage.acquire_connection()?;
        let affected = conn.execute(
            "UPDATE students SET name = ?1, course = ?2, gpa = ?3 WHERE roll_number = ?4",
            params![student.name, student.course, student.gpa, student.roll_number],
        )?;
        Ok(affected)
    }

    fn delete_rows(&self, roll_number: &str) -> Result<usize> {
        let conn = self.storage.acquire_connection()?;
        let affected = conn.execute("DELETE FROM students WHERE roll_number = ?1", [roll_number])?;
        Ok(affected)
    }
}
