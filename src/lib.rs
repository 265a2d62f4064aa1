//! SQLite-backed storage for student records.
//!
//! # Intention
//!
//! - Own the lifecycle of a single-table SQLite store (`students`).
//! - Expose create/read/update/delete over `Student` values, converting
//!   storage failures into plain success/absence signals.
//! - Provide the request flows (validate, check, persist, notify) used by a
//!   front end.
//!
//! # Architectural Boundaries
//!
//! - [`sqlite`]: schema and connection issuance; no knowledge of students
//!   beyond the table definition.
//! - [`student`]: the entity and its repository. One statement per operation.
//! - [`validation`] and [`registry`]: caller-side rules and flows. No SQL.

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod sqlite;
pub mod student;
pub mod validation;

pub use config::Settings;
pub use error::{Result, StoreError};
pub use registry::{Level, Notice, Registry};
pub use sqlite::{ConnectionMode, StorageConfig, StorageManager, StoreConnection};
pub use student::{Student, StudentRepository};
pub use validation::{EditForm, FormError, StudentForm};
