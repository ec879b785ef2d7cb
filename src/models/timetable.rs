//! Timetable (solution) model.
//!
//! A timetable is the result of one allocation run: a global slot table
//! plus per-room, per-teacher, and per-department views of the same
//! entries, and the demand the allocator could not place.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{RoomKind, WeekGrid};

/// One subject-hour placed at a (teacher, room, slot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Owning department code.
    pub department: String,
    /// Subject id.
    pub subject_id: String,
    /// Subject title (denormalized for rendering).
    pub title: String,
    /// Assigned teacher id.
    pub teacher_id: String,
    /// Assigned teacher name (denormalized for rendering).
    pub teacher_name: String,
    /// Assigned room name.
    pub room: String,
    /// Room kind the subject required.
    pub kind: RoomKind,
    /// Flat slot index.
    pub slot: usize,
    /// 0-based day index.
    pub day: usize,
    /// 1-based period within the day.
    pub period: usize,
}

/// Slot-indexed cells; `None` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTable {
    cells: Vec<Option<ScheduleEntry>>,
}

impl SlotTable {
    /// Creates an empty table with `slot_count` cells.
    pub fn new(slot_count: usize) -> Self {
        Self {
            cells: vec![None; slot_count],
        }
    }

    /// Entry at a slot.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&ScheduleEntry> {
        self.cells.get(slot).and_then(Option::as_ref)
    }

    /// Whether a slot holds an entry.
    #[inline]
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Writes an entry into its slot.
    ///
    /// Returns `false` (and writes nothing) if the slot is out of range.
    pub fn put(&mut self, entry: ScheduleEntry) -> bool {
        match self.cells.get_mut(entry.slot) {
            Some(cell) => {
                *cell = Some(entry);
                true
            }
            None => false,
        }
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied entries in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.cells.iter().flatten()
    }

    /// All cells, including empty ones.
    pub fn cells(&self) -> &[Option<ScheduleEntry>] {
        &self.cells
    }
}

/// Weekly hours of a subject that were not placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetDemand {
    /// Department code.
    pub department: String,
    /// Subject id.
    pub subject_id: String,
    /// Subject title.
    pub title: String,
    /// Hours requested.
    pub requested: u32,
    /// Hours actually placed.
    pub assigned: u32,
}

impl UnmetDemand {
    /// Hours left unplaced.
    #[inline]
    pub fn missing(&self) -> u32 {
        self.requested - self.assigned
    }
}

/// A generated weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Grid the timetable was built on.
    pub grid: WeekGrid,
    /// Global slot table (master view).
    pub slots: SlotTable,
    /// Room name → slots.
    pub rooms: IndexMap<String, SlotTable>,
    /// Teacher id → slots.
    pub teachers: IndexMap<String, SlotTable>,
    /// Department code → slots.
    pub departments: IndexMap<String, SlotTable>,
    /// Subjects whose hours were not fully placed.
    pub unmet: Vec<UnmetDemand>,
}

impl Timetable {
    /// Creates an empty timetable on the given grid.
    pub fn new(grid: WeekGrid) -> Self {
        let slots = SlotTable::new(grid.slot_count());
        Self {
            grid,
            slots,
            rooms: IndexMap::new(),
            teachers: IndexMap::new(),
            departments: IndexMap::new(),
            unmet: Vec::new(),
        }
    }

    /// Creates an empty table for a room unless it already has one.
    pub fn register_room(&mut self, room: &str) {
        let n = self.grid.slot_count();
        self.rooms
            .entry(room.to_string())
            .or_insert_with(|| SlotTable::new(n));
    }

    /// Creates an empty table for a teacher unless it already has one.
    pub fn register_teacher(&mut self, teacher_id: &str) {
        let n = self.grid.slot_count();
        self.teachers
            .entry(teacher_id.to_string())
            .or_insert_with(|| SlotTable::new(n));
    }

    /// Creates an empty table for a department unless it already has one.
    pub fn register_department(&mut self, code: &str) {
        let n = self.grid.slot_count();
        self.departments
            .entry(code.to_string())
            .or_insert_with(|| SlotTable::new(n));
    }

    /// Writes an entry into the global, room, teacher, and department tables.
    pub fn commit(&mut self, entry: ScheduleEntry) {
        let n = self.grid.slot_count();
        self.rooms
            .entry(entry.room.clone())
            .or_insert_with(|| SlotTable::new(n))
            .put(entry.clone());
        self.teachers
            .entry(entry.teacher_id.clone())
            .or_insert_with(|| SlotTable::new(n))
            .put(entry.clone());
        self.departments
            .entry(entry.department.clone())
            .or_insert_with(|| SlotTable::new(n))
            .put(entry.clone());
        self.slots.put(entry);
    }

    /// Whether the global slot is taken.
    #[inline]
    pub fn is_slot_taken(&self, slot: usize) -> bool {
        self.slots.is_occupied(slot)
    }

    /// Whether a room is occupied at a slot.
    pub fn is_room_busy(&self, room: &str, slot: usize) -> bool {
        self.rooms.get(room).is_some_and(|t| t.is_occupied(slot))
    }

    /// Whether a teacher is occupied at a slot.
    pub fn is_teacher_busy(&self, teacher_id: &str, slot: usize) -> bool {
        self.teachers
            .get(teacher_id)
            .is_some_and(|t| t.is_occupied(slot))
    }

    /// Number of slots assigned to a teacher.
    pub fn teacher_load(&self, teacher_id: &str) -> usize {
        self.teachers
            .get(teacher_id)
            .map(SlotTable::occupied)
            .unwrap_or(0)
    }

    /// All committed entries in slot order.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.slots.entries()
    }

    /// Number of committed entries.
    pub fn assignment_count(&self) -> usize {
        self.slots.occupied()
    }

    /// Committed entries for one subject of one department.
    pub fn entries_for_subject<'a>(
        &'a self,
        department: &'a str,
        subject_id: &'a str,
    ) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        self.entries()
            .filter(move |e| e.department == department && e.subject_id == subject_id)
    }

    /// Whether every subject received its full weekly hours.
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty()
    }
}
