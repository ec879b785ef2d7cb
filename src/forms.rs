//! Typed form inputs for building a roster.
//!
//! Each form corresponds to one user submission: registering a department,
//! or registering a teacher together with the subjects they teach. Forms are
//! plain data; [`Roster`](crate::roster::Roster) applies them.
//!
//! Subjects are entered as [`SubjectEntry`] values. The compact
//! `id|Title|hours|kind` literal is still accepted as an input convenience
//! (command line, roster files) and parsed into the same type.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::error::{Result, TimetableError};
use crate::models::{RoomKind, RoomSet, Subject};

fn default_theory_count() -> u32 {
    2
}

fn default_lab_count() -> u32 {
    1
}

fn default_max_hours() -> u32 {
    10
}

/// Splits a comma-separated name list, trimming and dropping empties.
pub fn parse_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// "Add department" submission.
///
/// Explicit room names win over counts: when `theory_rooms` (or
/// `lab_rooms`) lists at least one name, the matching count is ignored.
///
/// `subjects` registers department subjects up front, in the order the
/// allocator should queue them. Teacher forms may add more later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentForm {
    /// Department code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Comma-separated theory room names.
    #[serde(default)]
    pub theory_rooms: String,
    /// Comma-separated lab names.
    #[serde(default)]
    pub lab_rooms: String,
    /// Number of theory rooms to auto-name.
    #[serde(default = "default_theory_count")]
    pub theory_count: u32,
    /// Number of labs to auto-name.
    #[serde(default = "default_lab_count")]
    pub lab_count: u32,
    /// Subjects offered, in queue order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<SubjectEntry>,
}

impl DepartmentForm {
    /// Creates a form with default room counts.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            theory_rooms: String::new(),
            lab_rooms: String::new(),
            theory_count: default_theory_count(),
            lab_count: default_lab_count(),
            subjects: Vec::new(),
        }
    }

    /// Sets explicit theory room names (comma-separated).
    pub fn with_theory_rooms(mut self, names: impl Into<String>) -> Self {
        self.theory_rooms = names.into();
        self
    }

    /// Sets explicit lab names (comma-separated).
    pub fn with_lab_rooms(mut self, names: impl Into<String>) -> Self {
        self.lab_rooms = names.into();
        self
    }

    /// Sets the auto-named room counts.
    pub fn with_counts(mut self, theory: u32, lab: u32) -> Self {
        self.theory_count = theory;
        self.lab_count = lab;
        self
    }

    /// Appends a department subject.
    pub fn with_subject(mut self, entry: SubjectEntry) -> Self {
        self.subjects.push(entry);
        self
    }

    /// Checks required fields and every listed subject.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(TimetableError::MissingField("department code"));
        }
        if self.name.trim().is_empty() {
            return Err(TimetableError::MissingField("department name"));
        }
        self.subjects.iter().try_for_each(SubjectEntry::validate)
    }

    /// Resolves the room lists.
    pub fn rooms(&self) -> RoomSet {
        let code = self.code.trim();
        let numbered = RoomSet::numbered(code, self.theory_count, self.lab_count);

        let theory = parse_names(&self.theory_rooms);
        let lab = parse_names(&self.lab_rooms);

        RoomSet::new(
            if theory.is_empty() { numbered.theory } else { theory },
            if lab.is_empty() { numbered.lab } else { lab },
        )
    }
}

/// Subject as written in a roster file: a typed record or a
/// pipe-delimited literal.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubjectInput {
    /// `{"id": .., "title": .., "hours": .., "kind": ..}`
    Entry {
        /// Subject id.
        id: String,
        /// Subject title.
        title: String,
        /// Weekly hours.
        hours: u32,
        /// Required room kind.
        kind: RoomKind,
    },
    /// `"id|Title|hours|kind"`
    Literal(String),
}

/// One subject entered on a teacher form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubjectInput")]
pub struct SubjectEntry {
    /// Subject id.
    pub id: String,
    /// Subject title.
    pub title: String,
    /// Weekly hours.
    pub hours: u32,
    /// Required room kind.
    pub kind: RoomKind,
}

impl SubjectEntry {
    /// Creates an entry.
    pub fn new(id: impl Into<String>, title: impl Into<String>, hours: u32, kind: RoomKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            hours,
            kind,
        }
    }

    /// Rejects empty ids or titles and zero hours.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() || self.title.trim().is_empty() || self.hours == 0 {
            return Err(TimetableError::MalformedSubject(format!(
                "{}|{}|{}|{}",
                self.id, self.title, self.hours, self.kind
            )));
        }
        Ok(())
    }

    /// Converts into a department subject.
    pub fn to_subject(&self) -> Subject {
        Subject::new(self.id.clone(), self.title.clone(), self.hours, self.kind)
    }
}

impl FromStr for SubjectEntry {
    type Err = TimetableError;

    /// Parses `id|Title|hours|kind`, trimming each part.
    fn from_str(literal: &str) -> Result<Self> {
        let parts: Vec<&str> = literal.split('|').map(str::trim).collect();
        let [id, title, hours, kind] = parts.as_slice() else {
            return Err(TimetableError::MalformedSubject(literal.to_string()));
        };

        let hours: u32 = hours
            .parse()
            .map_err(|_| TimetableError::MalformedSubject(literal.to_string()))?;
        let kind: RoomKind = kind.parse()?;

        let entry = SubjectEntry::new(*id, *title, hours, kind);
        entry
            .validate()
            .map_err(|_| TimetableError::MalformedSubject(literal.to_string()))?;
        Ok(entry)
    }
}

impl TryFrom<SubjectInput> for SubjectEntry {
    type Error = TimetableError;

    fn try_from(input: SubjectInput) -> Result<Self> {
        match input {
            SubjectInput::Entry {
                id,
                title,
                hours,
                kind,
            } => {
                let entry = SubjectEntry::new(id, title, hours, kind);
                entry.validate()?;
                Ok(entry)
            }
            SubjectInput::Literal(s) => s.parse(),
        }
    }
}

/// "Add teacher" submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherForm {
    /// Code of the department the teacher joins.
    pub department: String,
    /// Teacher id.
    pub id: String,
    /// Teacher name.
    pub name: String,
    /// Weekly hour cap.
    #[serde(default = "default_max_hours")]
    pub max_hours: u32,
    /// Subjects the teacher takes, in entry order.
    #[serde(default)]
    pub subjects: Vec<SubjectEntry>,
}

impl TeacherForm {
    /// Creates a form with the default weekly cap and no subjects.
    pub fn new(
        department: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            department: department.into(),
            id: id.into(),
            name: name.into(),
            max_hours: default_max_hours(),
            subjects: Vec::new(),
        }
    }

    /// Sets the weekly hour cap.
    pub fn with_max_hours(mut self, max_hours: u32) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Adds a subject without validating it.
    pub fn with_subject(mut self, entry: SubjectEntry) -> Self {
        self.subjects.push(entry);
        self
    }

    /// Adds a typed subject entry after validating it.
    pub fn push_subject(&mut self, entry: SubjectEntry) -> Result<()> {
        entry.validate()?;
        self.subjects.push(entry);
        Ok(())
    }

    /// Parses and adds an `id|Title|hours|kind` literal.
    ///
    /// Zero hours are refused as `MalformedSubject`, like any other
    /// malformed part. On error the subject list is left unchanged.
    pub fn push_subject_literal(&mut self, literal: &str) -> Result<()> {
        match literal.parse::<SubjectEntry>() {
            Ok(entry) => {
                self.subjects.push(entry);
                Ok(())
            }
            Err(e) => {
                warn!(literal, error = %e, "Rejected subject entry");
                Err(e)
            }
        }
    }

    /// Checks required fields.
    pub fn validate(&self) -> Result<()> {
        if self.department.trim().is_empty() {
            return Err(TimetableError::MissingField("department"));
        }
        if self.id.trim().is_empty() {
            return Err(TimetableError::MissingField("teacher id"));
        }
        if self.name.trim().is_empty() {
            return Err(TimetableError::MissingField("teacher name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_names(" A, B ,,C "), vec!["A", "B", "C"]);
        assert!(parse_names("  ,  ").is_empty());
    }

    #[test]
    fn test_department_rooms_from_counts() {
        let form = DepartmentForm::new("ME", "Mechanical").with_counts(3, 2);
        let rooms = form.rooms();
        assert_eq!(rooms.theory, vec!["ME-T1", "ME-T2", "ME-T3"]);
        assert_eq!(rooms.lab, vec!["ME-L1", "ME-L2"]);
    }

    #[test]
    fn test_department_subjects_validated() {
        let form = DepartmentForm::new("CS", "Computer Science")
            .with_subject(SubjectEntry::new("cs101", "Programming I", 4, RoomKind::Theory))
            .with_subject(SubjectEntry::new("cs102", "Physics for CS", 0, RoomKind::Theory));
        assert_eq!(
            form.validate(),
            Err(TimetableError::MalformedSubject("cs102|Physics for CS|0|theory".into()))
        );
    }

    #[test]
    fn test_zero_hour_literal_refused() {
        let mut form = TeacherForm::new("CS", "t1", "Alice");
        assert_eq!(
            form.push_subject_literal("cs101|Programming I|0|theory"),
            Err(TimetableError::MalformedSubject("cs101|Programming I|0|theory".into()))
        );
        assert!(form.subjects.is_empty());
    }

    #[test]
    fn test_department_default_counts() {
        let rooms = DepartmentForm::new("CE", "Civil").rooms();
        assert_eq!(rooms.theory, vec!["CE-T1", "CE-T2"]);
        assert_eq!(rooms.lab, vec!["CE-L1"]);
    }

    #[test]
    fn test_department_explicit_rooms_win() {
        let form = DepartmentForm::new("ME", "Mechanical")
            .with_theory_rooms("ME-101, ME-102")
            .with_counts(5, 1);
        let rooms = form.rooms();
        assert_eq!(rooms.theory, vec!["ME-101", "ME-102"]);
        // Lab list empty → count used
        assert_eq!(rooms.lab, vec!["ME-L1"]);
    }

    #[test]
    fn test_department_missing_fields() {
        assert_eq!(
            DepartmentForm::new("", "Name").validate(),
            Err(TimetableError::MissingField("department code"))
        );
        assert_eq!(
            DepartmentForm::new("X", "  ").validate(),
            Err(TimetableError::MissingField("department name"))
        );
        assert!(DepartmentForm::new("X", "Name").validate().is_ok());
    }

    #[test]
    fn test_subject_literal_ok() {
        let e: SubjectEntry = " cs101 | Programming I | 4 | theory ".parse().unwrap();
        assert_eq!(e, SubjectEntry::new("cs101", "Programming I", 4, RoomKind::Theory));
    }

    #[test]
    fn test_subject_literal_rejections() {
        assert!(matches!(
            "bad-format".parse::<SubjectEntry>(),
            Err(TimetableError::MalformedSubject(_))
        ));
        assert!(matches!(
            "a|b|c".parse::<SubjectEntry>(),
            Err(TimetableError::MalformedSubject(_))
        ));
        assert!(matches!(
            "a|b|4|lab|extra".parse::<SubjectEntry>(),
            Err(TimetableError::MalformedSubject(_))
        ));
        assert!(matches!(
            "a|b|four|lab".parse::<SubjectEntry>(),
            Err(TimetableError::MalformedSubject(_))
        ));
        assert!(matches!(
            "a|b|0|lab".parse::<SubjectEntry>(),
            Err(TimetableError::MalformedSubject(_))
        ));
        assert!(matches!(
            "|b|2|lab".parse::<SubjectEntry>(),
            Err(TimetableError::MalformedSubject(_))
        ));
        assert_eq!(
            "a|b|2|seminar".parse::<SubjectEntry>(),
            Err(TimetableError::UnknownSubjectKind("seminar".into()))
        );
    }

    #[test]
    fn test_bad_literal_leaves_subjects_unchanged() {
        let mut form = TeacherForm::new("CS", "t1", "Alice");
        form.push_subject_literal("cs101|Programming I|4|theory")
            .unwrap();
        let before = form.subjects.clone();

        assert!(form.push_subject_literal("bad-format").is_err());
        assert_eq!(form.subjects, before);
    }

    #[test]
    fn test_push_typed_subject() {
        let mut form = TeacherForm::new("CS", "t1", "Alice");
        assert!(form
            .push_subject(SubjectEntry::new("", "Untitled", 2, RoomKind::Lab))
            .is_err());
        assert!(form.subjects.is_empty());
        form.push_subject(SubjectEntry::new("csLab", "Prog Lab", 4, RoomKind::Lab))
            .unwrap();
        assert_eq!(form.subjects.len(), 1);
    }

    #[test]
    fn test_teacher_missing_fields() {
        assert_eq!(
            TeacherForm::new("", "t1", "Alice").validate(),
            Err(TimetableError::MissingField("department"))
        );
        assert_eq!(
            TeacherForm::new("CS", "", "Alice").validate(),
            Err(TimetableError::MissingField("teacher id"))
        );
        assert_eq!(
            TeacherForm::new("CS", "t1", "").validate(),
            Err(TimetableError::MissingField("teacher name"))
        );
    }

    #[test]
    fn test_teacher_form_json_mixed_subjects() {
        let json = r#"{
            "department": "CS",
            "id": "t1",
            "name": "Alice",
            "subjects": [
                "cs101|Programming I|4|theory",
                {"id": "csLab", "title": "Prog Lab", "hours": 4, "kind": "lab"}
            ]
        }"#;
        let form: TeacherForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.max_hours, 10);
        assert_eq!(form.subjects.len(), 2);
        assert_eq!(form.subjects[0].kind, RoomKind::Theory);
        assert_eq!(form.subjects[1].kind, RoomKind::Lab);
    }

    #[test]
    fn test_teacher_form_json_bad_literal() {
        let json = r#"{"department": "CS", "id": "t1", "name": "A", "subjects": ["bad-format"]}"#;
        assert!(serde_json::from_str::<TeacherForm>(json).is_err());
    }

    #[test]
    fn test_department_form_json_defaults() {
        let form: DepartmentForm = serde_json::from_str(r#"{"code": "ME", "name": "Mech"}"#).unwrap();
        assert_eq!(form.theory_count, 2);
        assert_eq!(form.lab_count, 1);
        assert!(form.theory_rooms.is_empty());
    }
}
