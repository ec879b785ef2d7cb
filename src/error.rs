//! Error types for roster input, report selection, and configuration.
//!
//! The allocator itself never fails; every variant here comes from input
//! the user supplied.

use thiserror::Error;

/// Main error type for timetable operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// A required form field was left empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A department with this code is already registered.
    #[error("Department code already exists: {0}")]
    DuplicateDepartment(String),

    /// No department with this code is registered.
    #[error("Department not found: {0}")]
    UnknownDepartment(String),

    /// A subject literal did not follow `id|Title|hours|kind`.
    #[error("Malformed subject entry '{0}' (expected id|Title|hours|theory-or-lab)")]
    MalformedSubject(String),

    /// Subject kind was neither `theory` nor `lab`.
    #[error("Subject kind must be 'theory' or 'lab', got '{0}'")]
    UnknownSubjectKind(String),

    /// A report was requested for something that is not in the roster.
    #[error("Unknown report target: {0}")]
    UnknownReportTarget(String),

    /// Configuration could not be read or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
