//! Greedy fixed-point slot allocator.
//!
//! # Algorithm
//!
//! 1. Queue one `(department, subject, remaining hours)` item per subject,
//!    in department then subject order.
//! 2. Sweep the queue repeatedly. For each item with hours left, scan the
//!    slots in day-major order and place one hour in the first slot where
//!    the global cell is free, a room of the right kind is free, and the
//!    first qualified teacher under their cap is free.
//! 3. Stop after a sweep that places nothing.
//!
//! One hour per item per sweep spreads subjects across the week instead of
//! packing each subject into consecutive slots. There is no backtracking:
//! whatever cannot be placed on the fixed point is reported as
//! [`UnmetDemand`] and the run still succeeds.
//!
//! # Complexity
//! O(H * S * (R + T)) where H=total hours, S=slots, R=rooms, T=teachers.
//!
//! # Reference
//! de Werra (1985), "An introduction to timetabling", EJOR 19(2)

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{
    Department, ScheduleEntry, Subject, Teacher, Timetable, UnmetDemand, WeekGrid,
};
use crate::roster::Roster;

/// Order in which a department's teachers are tried for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherOrder {
    /// Roster order.
    #[default]
    Declared,
    /// Smallest weekly cap first; ties keep roster order.
    AscendingCap,
}

#[derive(Debug)]
struct QueueItem<'a> {
    dept_idx: usize,
    department: &'a Department,
    subject: &'a Subject,
    remaining: u32,
}

/// Greedy timetable allocator.
///
/// # Example
///
/// ```
/// use u_timetable::roster::Roster;
/// use u_timetable::scheduler::GreedyAllocator;
///
/// let roster = Roster::sample();
/// let timetable = GreedyAllocator::new().allocate(&roster);
///
/// // 18 weekly hours requested, 30 slots available
/// assert_eq!(timetable.assignment_count(), 18);
/// assert!(timetable.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyAllocator {
    grid: WeekGrid,
    teacher_order: TeacherOrder,
}

impl GreedyAllocator {
    /// Creates an allocator on the default 5 × 6 grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekly grid.
    pub fn with_grid(mut self, grid: WeekGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the teacher candidate order.
    pub fn with_teacher_order(mut self, order: TeacherOrder) -> Self {
        self.teacher_order = order;
        self
    }

    /// The grid this allocator fills.
    pub fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    /// Builds a timetable for the roster.
    ///
    /// Never fails: demand that cannot be placed is left out of the
    /// timetable and listed in [`Timetable::unmet`].
    pub fn allocate(&self, roster: &Roster) -> Timetable {
        let mut timetable = Timetable::new(self.grid.clone());

        for dept in roster.departments() {
            timetable.register_department(&dept.code);
            for room in dept.rooms.all() {
                timetable.register_room(room);
            }
            for teacher in &dept.teachers {
                timetable.register_teacher(&teacher.id);
            }
        }

        let candidates: Vec<Vec<&Teacher>> = roster
            .departments()
            .iter()
            .map(|d| self.order_teachers(d))
            .collect();

        let mut queue: Vec<QueueItem<'_>> = roster
            .departments()
            .iter()
            .enumerate()
            .flat_map(|(dept_idx, department)| {
                department.subjects.iter().map(move |subject| QueueItem {
                    dept_idx,
                    department,
                    subject,
                    remaining: subject.hours,
                })
            })
            .collect();

        let mut passes = 0usize;
        loop {
            passes += 1;
            let mut placed = 0usize;

            for item in queue.iter_mut() {
                if item.remaining == 0 {
                    continue;
                }
                let teachers = &candidates[item.dept_idx];
                if let Some(entry) = self.place_one(&timetable, item, teachers) {
                    debug!(
                        department = %entry.department,
                        subject = %entry.subject_id,
                        teacher = %entry.teacher_id,
                        room = %entry.room,
                        slot = entry.slot,
                        "Placed hour"
                    );
                    timetable.commit(entry);
                    item.remaining -= 1;
                    placed += 1;
                }
            }

            debug!(pass = passes, placed, "Allocation pass finished");
            if placed == 0 {
                break;
            }
        }

        for item in &queue {
            if item.remaining > 0 {
                let unmet = UnmetDemand {
                    department: item.department.code.clone(),
                    subject_id: item.subject.id.clone(),
                    title: item.subject.title.clone(),
                    requested: item.subject.hours,
                    assigned: item.subject.hours - item.remaining,
                };
                warn!(
                    department = %unmet.department,
                    subject = %unmet.subject_id,
                    missing = unmet.missing(),
                    "Subject hours left unplaced"
                );
                timetable.unmet.push(unmet);
            }
        }

        info!(
            passes,
            assigned = timetable.assignment_count(),
            unmet = timetable.unmet.len(),
            "Timetable generated"
        );
        timetable
    }

    /// Finds the first slot where one hour of the item fits.
    fn place_one(
        &self,
        timetable: &Timetable,
        item: &QueueItem<'_>,
        teachers: &[&Teacher],
    ) -> Option<ScheduleEntry> {
        let subject = item.subject;
        let rooms = item.department.rooms.of_kind(subject.kind);

        for slot in 0..self.grid.slot_count() {
            if timetable.is_slot_taken(slot) {
                continue;
            }

            let Some(room) = rooms.iter().find(|r| !timetable.is_room_busy(r, slot)) else {
                continue;
            };

            let Some(teacher) = teachers.iter().find(|t| {
                t.can_teach(&subject.id) && timetable.teacher_load(&t.id) < t.max_hours as usize
            }) else {
                continue;
            };

            // Only the first qualified teacher is considered.
            if timetable.is_teacher_busy(&teacher.id, slot) {
                continue;
            }

            return Some(ScheduleEntry {
                department: item.department.code.clone(),
                subject_id: subject.id.clone(),
                title: subject.title.clone(),
                teacher_id: teacher.id.clone(),
                teacher_name: teacher.name.clone(),
                room: room.clone(),
                kind: subject.kind,
                slot,
                day: self.grid.day_of(slot),
                period: self.grid.period_of(slot),
            });
        }

        None
    }

    fn order_teachers<'a>(&self, department: &'a Department) -> Vec<&'a Teacher> {
        let mut teachers: Vec<&Teacher> = department.teachers.iter().collect();
        if self.teacher_order == TeacherOrder::AscendingCap {
            teachers.sort_by_key(|t| t.max_hours);
        }
        teachers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoomSet, Subject};

    fn one_room_dept(subject: Subject, teacher: Teacher) -> Roster {
        Roster::from_departments(vec![Department::new("CS", "Computer Science")
            .with_rooms(RoomSet::new(vec!["R1".into()], vec!["L1".into()]))
            .with_subject(subject)
            .with_teacher(teacher)])
    }

    #[test]
    fn test_two_hours_first_two_slots() {
        let roster = one_room_dept(
            Subject::theory("s1", "Algebra", 2),
            Teacher::new("t1", "Alice", 2).with_subject("s1"),
        );
        let tt = GreedyAllocator::new().allocate(&roster);

        assert_eq!(tt.assignment_count(), 2);
        let slots: Vec<usize> = tt.entries().map(|e| e.slot).collect();
        assert_eq!(slots, vec![0, 1]);
        assert!(tt.entries().all(|e| e.room == "R1" && e.teacher_id == "t1"));
        assert!(tt.is_complete());
    }

    #[test]
    fn test_teacher_cap_leaves_demand_unmet() {
        let roster = one_room_dept(
            Subject::theory("s1", "Algebra", 4),
            Teacher::new("t1", "Alice", 2).with_subject("s1"),
        );
        let tt = GreedyAllocator::new().allocate(&roster);

        assert_eq!(tt.assignment_count(), 2);
        assert_eq!(tt.teacher_load("t1"), 2);
        assert_eq!(tt.unmet.len(), 1);
        assert_eq!(tt.unmet[0].requested, 4);
        assert_eq!(tt.unmet[0].assigned, 2);
        assert_eq!(tt.unmet[0].missing(), 2);
    }

    #[test]
    fn test_lab_subject_uses_lab_room() {
        let roster = one_room_dept(
            Subject::lab("l1", "Lab Work", 3),
            Teacher::new("t1", "Alice", 10).with_subject("l1"),
        );
        let tt = GreedyAllocator::new().allocate(&roster);
        assert_eq!(tt.assignment_count(), 3);
        assert!(tt.entries().all(|e| e.room == "L1"));
        assert_eq!(tt.rooms["L1"].occupied(), 3);
        assert_eq!(tt.rooms["R1"].occupied(), 0);
    }

    #[test]
    fn test_no_room_of_kind() {
        let roster = Roster::from_departments(vec![Department::new("CS", "CS")
            .with_rooms(RoomSet::new(vec!["R1".into()], vec![]))
            .with_subject(Subject::lab("l1", "Lab Work", 2))
            .with_teacher(Teacher::new("t1", "Alice", 10).with_subject("l1"))]);
        let tt = GreedyAllocator::new().allocate(&roster);
        assert_eq!(tt.assignment_count(), 0);
        assert_eq!(tt.unmet[0].assigned, 0);
    }

    #[test]
    fn test_no_qualified_teacher() {
        let roster = one_room_dept(
            Subject::theory("s1", "Algebra", 2),
            Teacher::new("t1", "Alice", 10).with_subject("other"),
        );
        let tt = GreedyAllocator::new().allocate(&roster);
        assert_eq!(tt.assignment_count(), 0);
        assert_eq!(tt.unmet.len(), 1);
    }

    #[test]
    fn test_round_robin_interleaves_subjects() {
        let roster = Roster::from_departments(vec![Department::new("CS", "CS")
            .with_rooms(RoomSet::numbered("CS", 1, 0))
            .with_subject(Subject::theory("a", "A", 2))
            .with_subject(Subject::theory("b", "B", 2))
            .with_teacher(
                Teacher::new("t1", "Alice", 10)
                    .with_subject("a")
                    .with_subject("b"),
            )]);
        let tt = GreedyAllocator::new().allocate(&roster);
        let order: Vec<&str> = tt.entries().map(|e| e.subject_id.as_str()).collect();
        // One hour per subject per pass
        assert_eq!(order, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn test_global_slots_limit_everything() {
        // Two departments with separate rooms still share the 30 global slots.
        let dept = |code: &str| {
            Department::new(code, code)
                .with_rooms(RoomSet::numbered(code, 1, 0))
                .with_subject(Subject::theory(format!("{code}-s"), "S", 20))
                .with_teacher(
                    Teacher::new(format!("{code}-t"), "T", 30).with_subject(format!("{code}-s")),
                )
        };
        let roster = Roster::from_departments(vec![dept("A"), dept("B")]);
        let tt = GreedyAllocator::new().allocate(&roster);

        assert_eq!(tt.assignment_count(), 30);
        assert_eq!(tt.departments["A"].occupied(), 15);
        assert_eq!(tt.departments["B"].occupied(), 15);
        let missing: u32 = tt.unmet.iter().map(UnmetDemand::missing).sum();
        assert_eq!(missing, 10);
    }

    #[test]
    fn test_first_teacher_under_cap_is_used() {
        let roster = Roster::from_departments(vec![Department::new("CS", "CS")
            .with_rooms(RoomSet::numbered("CS", 1, 0))
            .with_subject(Subject::theory("s1", "Algebra", 3))
            .with_teacher(Teacher::new("big", "Big", 10).with_subject("s1"))
            .with_teacher(Teacher::new("small", "Small", 1).with_subject("s1"))]);

        let declared = GreedyAllocator::new().allocate(&roster);
        assert_eq!(declared.teacher_load("big"), 3);
        assert_eq!(declared.teacher_load("small"), 0);

        let ascending = GreedyAllocator::new()
            .with_teacher_order(TeacherOrder::AscendingCap)
            .allocate(&roster);
        assert_eq!(ascending.teacher_load("small"), 1);
        assert_eq!(ascending.teacher_load("big"), 2);
        assert_eq!(ascending.entries().next().unwrap().teacher_id, "small");
    }

    #[test]
    fn test_teacher_cap_shared_across_departments() {
        // Same teacher id in two departments: one load counter.
        let dept = |code: &str| {
            Department::new(code, code)
                .with_rooms(RoomSet::numbered(code, 1, 0))
                .with_subject(Subject::theory("s", "S", 3))
                .with_teacher(Teacher::new("shared", "Sam", 4).with_subject("s"))
        };
        let roster = Roster::from_departments(vec![dept("A"), dept("B")]);
        let tt = GreedyAllocator::new().allocate(&roster);
        assert_eq!(tt.teacher_load("shared"), 4);
        assert_eq!(tt.assignment_count(), 4);
    }

    #[test]
    fn test_small_grid() {
        let roster = one_room_dept(
            Subject::theory("s1", "Algebra", 5),
            Teacher::new("t1", "Alice", 10).with_subject("s1"),
        );
        let grid = WeekGrid::new(vec!["Mon".into()], 3);
        let tt = GreedyAllocator::new().with_grid(grid).allocate(&roster);
        assert_eq!(tt.assignment_count(), 3);
        assert_eq!(tt.unmet[0].missing(), 2);
        let last = tt.slots.get(2).unwrap();
        assert_eq!((last.day, last.period), (0, 3));
    }

    #[test]
    fn test_empty_roster() {
        let tt = GreedyAllocator::new().allocate(&Roster::new());
        assert_eq!(tt.assignment_count(), 0);
        assert!(tt.is_complete());
        assert_eq!(tt.slots.len(), 30);
    }

    #[test]
    fn test_sample_roster_complete() {
        let tt = GreedyAllocator::new().allocate(&Roster::sample());
        assert_eq!(tt.assignment_count(), 18);
        assert!(tt.is_complete());
        assert_eq!(tt.teacher_load("t1"), 8);
        assert_eq!(tt.teacher_load("t2"), 2);
        assert_eq!(tt.teacher_load("t3"), 8);
        // Tables exist for idle rooms too
        assert!(tt.rooms.contains_key("CS-102"));
        assert_eq!(tt.rooms["CS-102"].occupied(), 0);
    }
}
