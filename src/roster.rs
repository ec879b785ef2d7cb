//! The department roster.
//!
//! A [`Roster`] is the caller-owned list of departments that the allocator
//! reads. It changes only through [`Roster::add_department`] and
//! [`Roster::add_teacher`], which enforce the two roster invariants:
//! unique department codes, and unique subject ids within a department.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TimetableError};
use crate::forms::{DepartmentForm, SubjectEntry, TeacherForm};
use crate::models::{Department, RoomSet, Subject, Teacher};

/// Ordered list of departments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    departments: Vec<Department>,
}

/// A sequence of form submissions, replayed in order onto an empty roster.
///
/// This is the on-disk shape read by the `routine` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterInput {
    /// Department registrations.
    #[serde(default)]
    pub departments: Vec<DepartmentForm>,
    /// Teacher registrations, applied after all departments.
    #[serde(default)]
    pub teachers: Vec<TeacherForm>,
}

impl RosterInput {
    /// Applies every form; stops at the first rejected submission.
    pub fn build(self) -> Result<Roster> {
        let mut roster = Roster::new();
        for form in self.departments {
            roster.add_department(form)?;
        }
        for form in self.teachers {
            roster.add_teacher(form)?;
        }
        Ok(roster)
    }
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster from already-built departments.
    ///
    /// No invariants are checked; use [`validate_roster`](crate::validation::validate_roster)
    /// to inspect the result.
    pub fn from_departments(departments: Vec<Department>) -> Self {
        Self { departments }
    }

    /// Departments in registration order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Looks up a department by code.
    pub fn department(&self, code: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.code == code)
    }

    /// Looks up a teacher by id across all departments (first match).
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.departments.iter().find_map(|d| d.teacher(id))
    }

    /// Number of departments.
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    /// Whether the roster has no departments.
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Registers a department.
    ///
    /// # Errors
    /// - `MissingField` if code or name is empty.
    /// - `MalformedSubject` if a listed subject is malformed.
    /// - `DuplicateDepartment` if the code is already registered.
    pub fn add_department(&mut self, form: DepartmentForm) -> Result<&Department> {
        form.validate()?;
        let code = form.code.trim().to_string();
        if self.department(&code).is_some() {
            return Err(TimetableError::DuplicateDepartment(code));
        }

        let rooms = form.rooms();
        let mut department = Department::new(code, form.name.trim()).with_rooms(rooms);
        for entry in &form.subjects {
            department.add_subject(entry.to_subject());
        }
        info!(
            code = %department.code,
            theory = department.rooms.theory.len(),
            lab = department.rooms.lab.len(),
            subjects = department.subjects.len(),
            "Registered department"
        );
        self.departments.push(department);
        Ok(&self.departments[self.departments.len() - 1])
    }

    /// Registers a teacher and merges their subjects into the department.
    ///
    /// Subjects whose id already exists in the department are not replaced.
    /// The teacher can teach every subject id on the form, in entry order.
    ///
    /// # Errors
    /// - `MissingField` if department, id, or name is empty.
    /// - `UnknownDepartment` if no department has the given code.
    pub fn add_teacher(&mut self, form: TeacherForm) -> Result<&Teacher> {
        form.validate()?;
        let code = form.department.trim();
        let department = self
            .departments
            .iter_mut()
            .find(|d| d.code == code)
            .ok_or_else(|| TimetableError::UnknownDepartment(code.to_string()))?;

        for entry in &form.subjects {
            department.add_subject(entry.to_subject());
        }

        let mut teacher = Teacher::new(form.id.trim(), form.name.trim(), form.max_hours);
        teacher.subjects = form.subjects.iter().map(|s| s.id.clone()).collect();

        info!(
            department = %department.code,
            teacher = %teacher.id,
            max_hours = teacher.max_hours,
            subjects = teacher.subjects.len(),
            "Registered teacher"
        );
        department.teachers.push(teacher);
        let idx = department.teachers.len() - 1;
        Ok(&department.teachers[idx])
    }

    /// The demo roster: Computer Science and Electrical Engineering.
    pub fn sample() -> Self {
        Self::from_departments(vec![
            Department::new("CS", "Computer Science")
                .with_rooms(RoomSet::new(
                    vec!["CS-101".into(), "CS-102".into()],
                    vec!["CS-Lab1".into()],
                ))
                .with_subject(Subject::theory("cs101", "Programming I", 4))
                .with_subject(Subject::theory("cs102", "Physics for CS", 2))
                .with_subject(Subject::lab("csLab", "Prog Lab", 4))
                .with_teacher(
                    Teacher::new("t1", "Alice", 8)
                        .with_subject("cs101")
                        .with_subject("csLab"),
                )
                .with_teacher(Teacher::new("t2", "Bob", 4).with_subject("cs102")),
            Department::new("EE", "Electrical Eng")
                .with_rooms(RoomSet::new(
                    vec!["EE-201".into()],
                    vec!["EE-Lab1".into(), "EE-Lab2".into()],
                ))
                .with_subject(Subject::theory("ee101", "Circuits", 5))
                .with_subject(Subject::lab("eeLab", "Circuits Lab", 3))
                .with_teacher(
                    Teacher::new("t3", "Carla", 8)
                        .with_subject("ee101")
                        .with_subject("eeLab"),
                ),
        ])
    }

    /// The sample roster expressed as form submissions.
    ///
    /// Replaying it with [`RosterInput::build`] yields exactly
    /// [`Roster::sample`], subject order included.
    pub fn sample_input() -> RosterInput {
        let entry =
            |s: &Subject| SubjectEntry::new(s.id.clone(), s.title.clone(), s.hours, s.kind);
        let mut input = RosterInput::default();
        for dept in Self::sample().departments {
            let mut form = DepartmentForm::new(dept.code.clone(), dept.name.clone())
                .with_theory_rooms(dept.rooms.theory.join(", "))
                .with_lab_rooms(dept.rooms.lab.join(", "));
            for subject in &dept.subjects {
                form = form.with_subject(entry(subject));
            }
            input.departments.push(form);
            for teacher in &dept.teachers {
                let mut form =
                    TeacherForm::new(dept.code.clone(), teacher.id.clone(), teacher.name.clone())
                        .with_max_hours(teacher.max_hours);
                for subject_id in &teacher.subjects {
                    if let Some(s) = dept.subject(subject_id) {
                        form = form.with_subject(entry(s));
                    }
                }
                input.teachers.push(form);
            }
        }
        input
    }
}
