//! Subject model.
//!
//! A subject is a weekly teaching requirement: a number of hours that must
//! be placed in rooms of one kind (theory classroom or lab).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

/// The kind of room a subject must be taught in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    /// Ordinary classroom.
    #[default]
    Theory,
    /// Laboratory.
    Lab,
}

impl RoomKind {
    /// Lowercase label used in input literals and rendered reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Theory => "theory",
            RoomKind::Lab => "lab",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomKind {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "theory" => Ok(RoomKind::Theory),
            "lab" => Ok(RoomKind::Lab),
            other => Err(TimetableError::UnknownSubjectKind(other.to_string())),
        }
    }
}

/// A subject taught within a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Identifier, unique within the owning department.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Weekly hours to schedule.
    pub hours: u32,
    /// Required room kind.
    pub kind: RoomKind,
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<String>, title: impl Into<String>, hours: u32, kind: RoomKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hours,
            kind,
        }
    }

    /// Creates a theory subject.
    pub fn theory(id: impl Into<String>, title: impl Into<String>, hours: u32) -> Self {
        Self::new(id, title, hours, RoomKind::Theory)
    }

    /// Creates a lab subject.
    pub fn lab(id: impl Into<String>, title: impl Into<String>, hours: u32) -> Self {
        Self::new(id, title, hours, RoomKind::Lab)
    }
}
