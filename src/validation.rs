//! Roster integrity checks.
//!
//! Form submission only enforces unique department codes and unique
//! subject ids within a department. This module looks for the problems
//! that slip through and would silently cost schedule hours:
//! - Duplicate department codes, subject ids, or teacher ids
//! - Teachers referencing subjects their department does not offer
//! - Subjects that no teacher can take
//! - Subjects needing a room kind the department does not have
//! - Teachers with a zero weekly cap
//! - Room names shared by several departments
//! - Weekly demand larger than the grid
//!
//! Findings are advisory; the allocator runs on any roster.

use std::collections::{HashMap, HashSet};

use crate::models::WeekGrid;
use crate::roster::Roster;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationIssue>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Issue category.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Two entities share the same identifier.
    DuplicateId,
    /// A teacher lists a subject id the department does not offer.
    UnknownSubjectReference,
    /// No teacher in the department can take a subject.
    NoQualifiedTeacher,
    /// A subject needs a room kind the department has none of.
    NoMatchingRoom,
    /// A teacher's weekly cap is zero.
    ZeroCapacity,
    /// The same room name is owned by more than one department.
    SharedRoom,
    /// Total weekly hours exceed the number of slots in the grid.
    DemandExceedsGrid,
}

impl ValidationIssue {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster against the grid it will be scheduled on.
///
/// # Returns
/// `Ok(())` if nothing was found, `Err(issues)` with every finding.
pub fn validate_roster(roster: &Roster, grid: &WeekGrid) -> ValidationResult {
    let mut issues = Vec::new();

    let mut codes = HashSet::new();
    let mut teacher_ids = HashSet::new();
    let mut room_owner: HashMap<&str, &str> = HashMap::new();
    let mut total_hours: u64 = 0;

    for dept in roster.departments() {
        if !codes.insert(dept.code.as_str()) {
            issues.push(ValidationIssue::new(
                IssueKind::DuplicateId,
                format!("Duplicate department code: {}", dept.code),
            ));
        }

        let mut subject_ids = HashSet::new();
        for subject in &dept.subjects {
            total_hours += u64::from(subject.hours);
            if !subject_ids.insert(subject.id.as_str()) {
                issues.push(ValidationIssue::new(
                    IssueKind::DuplicateId,
                    format!("Duplicate subject ID in '{}': {}", dept.code, subject.id),
                ));
            }

            if !dept.teachers.iter().any(|t| t.can_teach(&subject.id)) {
                issues.push(ValidationIssue::new(
                    IssueKind::NoQualifiedTeacher,
                    format!(
                        "No teacher in '{}' can take subject '{}'",
                        dept.code, subject.id
                    ),
                ));
            }

            if dept.rooms.of_kind(subject.kind).is_empty() {
                issues.push(ValidationIssue::new(
                    IssueKind::NoMatchingRoom,
                    format!(
                        "Subject '{}' needs a {} room but '{}' has none",
                        subject.id, subject.kind, dept.code
                    ),
                ));
            }
        }

        for teacher in &dept.teachers {
            if !teacher_ids.insert(teacher.id.as_str()) {
                issues.push(ValidationIssue::new(
                    IssueKind::DuplicateId,
                    format!("Duplicate teacher ID: {}", teacher.id),
                ));
            }
            if teacher.max_hours == 0 {
                issues.push(ValidationIssue::new(
                    IssueKind::ZeroCapacity,
                    format!("Teacher '{}' has a weekly cap of zero", teacher.id),
                ));
            }
            for subject_id in &teacher.subjects {
                if dept.subject(subject_id).is_none() {
                    issues.push(ValidationIssue::new(
                        IssueKind::UnknownSubjectReference,
                        format!(
                            "Teacher '{}' references unknown subject '{}'",
                            teacher.id, subject_id
                        ),
                    ));
                }
            }
        }

        for room in dept.rooms.all() {
            match room_owner.get(room.as_str()) {
                Some(&owner) if owner != dept.code => {
                    issues.push(ValidationIssue::new(
                        IssueKind::SharedRoom,
                        format!(
                            "Room '{}' is declared by both '{}' and '{}'",
                            room, owner, dept.code
                        ),
                    ));
                }
                Some(_) => {}
                None => {
                    room_owner.insert(room.as_str(), dept.code.as_str());
                }
            }
        }
    }

    let capacity = grid.slot_count() as u64;
    if total_hours > capacity {
        issues.push(ValidationIssue::new(
            IssueKind::DemandExceedsGrid,
            format!("Weekly demand of {total_hours} hours exceeds the {capacity} available slots"),
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
