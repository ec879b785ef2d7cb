//! Department ("technology") model.
//!
//! A department owns its rooms, subjects, and teachers. Room and teacher
//! list order matters: the allocator always takes the first free match.

use serde::{Deserialize, Serialize};

use super::{RoomKind, Subject, Teacher};

/// Room names of a department, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSet {
    /// Theory classrooms, in preference order.
    pub theory: Vec<String>,
    /// Labs, in preference order.
    pub lab: Vec<String>,
}

impl RoomSet {
    /// Creates a room set from explicit name lists.
    pub fn new(theory: Vec<String>, lab: Vec<String>) -> Self {
        Self { theory, lab }
    }

    /// Generates `{code}-T{n}` and `{code}-L{n}` names (n from 1).
    pub fn numbered(code: &str, theory_count: u32, lab_count: u32) -> Self {
        Self {
            theory: (1..=theory_count).map(|n| format!("{code}-T{n}")).collect(),
            lab: (1..=lab_count).map(|n| format!("{code}-L{n}")).collect(),
        }
    }

    /// Rooms of the given kind.
    pub fn of_kind(&self, kind: RoomKind) -> &[String] {
        match kind {
            RoomKind::Theory => &self.theory,
            RoomKind::Lab => &self.lab,
        }
    }

    /// All rooms, theory first.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.theory.iter().chain(self.lab.iter())
    }

    /// Total number of rooms.
    pub fn len(&self) -> usize {
        self.theory.len() + self.lab.len()
    }

    /// Whether the department has no rooms at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An academic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department code, unique within a roster.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classrooms and labs.
    pub rooms: RoomSet,
    /// Subjects offered, unique by id.
    pub subjects: Vec<Subject>,
    /// Teaching staff.
    pub teachers: Vec<Teacher>,
}

impl Department {
    /// Creates a department with no rooms, subjects, or teachers.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            rooms: RoomSet::default(),
            subjects: Vec::new(),
            teachers: Vec::new(),
        }
    }

    /// Sets the room set.
    pub fn with_rooms(mut self, rooms: RoomSet) -> Self {
        self.rooms = rooms;
        self
    }

    /// Adds a subject unless one with the same id already exists.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.add_subject(subject);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a subject unless its id is already present.
    ///
    /// Returns `true` if the subject was inserted.
    pub fn add_subject(&mut self, subject: Subject) -> bool {
        if self.subject(&subject.id).is_some() {
            return false;
        }
        self.subjects.push(subject);
        true
    }

    /// Looks up a subject by id.
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Sum of weekly hours over all subjects.
    pub fn requested_hours(&self) -> u64 {
        self.subjects.iter().map(|s| u64::from(s.hours)).sum()
    }
}
