//! Teacher model.

use serde::{Deserialize, Serialize};

/// A teacher belonging to a department.
///
/// `subjects` lists the subject ids the teacher can take. The ids are not
/// checked against the department's subject list; see
/// [`validate_roster`](crate::validation::validate_roster).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Teacher identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Weekly hour cap.
    pub max_hours: u32,
    /// Subject ids this teacher can teach, in entry order.
    pub subjects: Vec<String>,
}

impl Teacher {
    /// Creates a teacher with no subjects.
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hours: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_hours,
            subjects: Vec::new(),
        }
    }

    /// Adds a subject id to the teacher's capability list.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects.push(subject_id.into());
        self
    }

    /// Whether this teacher can teach the given subject.
    pub fn can_teach(&self, subject_id: &str) -> bool {
        self.subjects.iter().any(|s| s == subject_id)
    }
}
