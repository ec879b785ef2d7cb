//! Report projections and printable rendering.
//!
//! A report is a read-only view of one slot table of a [`Timetable`]:
//! the master (global) table, or the table of one department, teacher, or
//! room. [`render`] lays it out as a days × periods text grid suitable for
//! printing.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TimetableError};
use crate::models::{SlotTable, Timetable, WeekGrid};
use crate::roster::Roster;

/// Default marker for an empty cell.
pub const BLANK_MARKER: &str = "—";

/// Which report to show.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportTarget {
    /// Global slot table.
    Master,
    /// One department, by code.
    Department(String),
    /// One teacher, by id.
    Teacher(String),
    /// One room, by name.
    Room(String),
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTarget::Master => f.write_str("master"),
            ReportTarget::Department(code) => write!(f, "department:{code}"),
            ReportTarget::Teacher(id) => write!(f, "teacher:{id}"),
            ReportTarget::Room(name) => write!(f, "room:{name}"),
        }
    }
}

impl FromStr for ReportTarget {
    type Err = TimetableError;

    /// Parses `master`, `department:<code>` (or `tech:<code>`),
    /// `teacher:<id>`, or `room:<name>`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "master" {
            return Ok(ReportTarget::Master);
        }
        let (kind, key) = s
            .split_once(':')
            .ok_or_else(|| TimetableError::UnknownReportTarget(s.to_string()))?;
        if key.is_empty() {
            return Err(TimetableError::UnknownReportTarget(s.to_string()));
        }
        match kind {
            "department" | "tech" => Ok(ReportTarget::Department(key.to_string())),
            "teacher" => Ok(ReportTarget::Teacher(key.to_string())),
            "room" => Ok(ReportTarget::Room(key.to_string())),
            _ => Err(TimetableError::UnknownReportTarget(s.to_string())),
        }
    }
}

/// Every report a roster offers: master, then departments, teachers, rooms.
pub fn available_targets(roster: &Roster) -> Vec<ReportTarget> {
    let mut targets = vec![ReportTarget::Master];
    for dept in roster.departments() {
        targets.push(ReportTarget::Department(dept.code.clone()));
    }
    for dept in roster.departments() {
        for teacher in &dept.teachers {
            targets.push(ReportTarget::Teacher(teacher.id.clone()));
        }
    }
    for dept in roster.departments() {
        for room in dept.rooms.all() {
            targets.push(ReportTarget::Room(room.clone()));
        }
    }
    targets
}

/// A projected report.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    /// Heading.
    pub title: String,
    /// Selection key, e.g. `teacher:t1`.
    pub target: String,
    /// Grid shape.
    pub grid: &'a WeekGrid,
    /// Slot cells.
    pub table: &'a SlotTable,
}

/// Selects the slot table for a target.
///
/// # Errors
/// `UnknownReportTarget` if the department, teacher, or room has no table
/// in the timetable.
pub fn project<'a>(
    timetable: &'a Timetable,
    roster: &Roster,
    target: &ReportTarget,
) -> Result<Report<'a>> {
    let unknown = || TimetableError::UnknownReportTarget(target.to_string());
    let (title, table) = match target {
        ReportTarget::Master => ("Master Routine".to_string(), &timetable.slots),
        ReportTarget::Department(code) => {
            let table = timetable.departments.get(code).ok_or_else(unknown)?;
            let name = roster
                .department(code)
                .map(|d| d.name.as_str())
                .unwrap_or(code);
            (format!("{name} Routine"), table)
        }
        ReportTarget::Teacher(id) => {
            let table = timetable.teachers.get(id).ok_or_else(unknown)?;
            (format!("Routine — Teacher: {id}"), table)
        }
        ReportTarget::Room(name) => {
            let table = timetable.rooms.get(name).ok_or_else(unknown)?;
            (format!("Room: {name}"), table)
        }
    };

    Ok(Report {
        title,
        target: target.to_string(),
        grid: &timetable.grid,
        table,
    })
}

/// Rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Text shown in empty cells.
    pub blank_marker: String,
    /// Timestamp line printed under the title, if set.
    pub generated_at: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            blank_marker: BLANK_MARKER.to_string(),
            generated_at: None,
        }
    }
}

impl RenderOptions {
    /// Sets the blank marker.
    pub fn with_blank_marker(mut self, marker: impl Into<String>) -> Self {
        self.blank_marker = marker.into();
        self
    }

    /// Sets the timestamp line.
    pub fn with_generated_at(mut self, at: impl Into<String>) -> Self {
        self.generated_at = Some(at.into());
        self
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn push_row(out: &mut String, cells: &[&str], widths: &[usize]) {
    out.push('|');
    for (cell, &w) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(w - width(cell)));
        out.push_str(" |");
    }
    out.push('\n');
}

/// Renders a report as a printable text grid.
///
/// Each day is one row of two text lines: the subject title, then
/// `teacher • room`. Empty cells show the blank marker.
pub fn render(report: &Report<'_>, options: &RenderOptions) -> String {
    let grid = report.grid;
    let periods = grid.periods_per_day;

    let header: Vec<String> = std::iter::once("Day/Period".to_string())
        .chain((1..=periods).map(|p| format!("P{p}")))
        .collect();

    // (title line, detail line) per day per period
    let mut rows: Vec<(Vec<String>, Vec<String>)> = Vec::with_capacity(grid.days.len());
    for (day_idx, day) in grid.days.iter().enumerate() {
        let mut top = vec![day.clone()];
        let mut bottom = vec![String::new()];
        for period in 1..=periods {
            let cell = grid
                .slot(day_idx, period)
                .and_then(|slot| report.table.get(slot));
            match cell {
                Some(entry) => {
                    top.push(entry.title.clone());
                    bottom.push(format!("{} • {}", entry.teacher_name, entry.room));
                }
                None => {
                    top.push(options.blank_marker.clone());
                    bottom.push(String::new());
                }
            }
        }
        rows.push((top, bottom));
    }

    let mut widths: Vec<usize> = header.iter().map(|h| width(h)).collect();
    for (top, bottom) in &rows {
        for (i, (a, b)) in top.iter().zip(bottom).enumerate() {
            widths[i] = widths[i].max(width(a)).max(width(b));
        }
    }

    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');
    if let Some(at) = &options.generated_at {
        out.push_str(&format!("Generated at: {at}\n"));
    }
    out.push('\n');

    let header_refs: Vec<&str> = header.iter().map(String::as_str).collect();
    push_row(&mut out, &header_refs, &widths);

    out.push('|');
    for &w in &widths {
        out.push_str(&"-".repeat(w + 2));
        out.push('|');
    }
    out.push('\n');

    for (top, bottom) in &rows {
        let top_refs: Vec<&str> = top.iter().map(String::as_str).collect();
        let bottom_refs: Vec<&str> = bottom.iter().map(String::as_str).collect();
        push_row(&mut out, &top_refs, &widths);
        push_row(&mut out, &bottom_refs, &widths);
    }

    out
}

/// Projects and renders in one step.
pub fn render_target(
    timetable: &Timetable,
    roster: &Roster,
    target: &ReportTarget,
    options: &RenderOptions,
) -> Result<String> {
    let report = project(timetable, roster, target)?;
    Ok(render(&report, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, RoomSet, Subject, Teacher};
    use crate::scheduler::GreedyAllocator;
    use pretty_assertions::assert_eq;

    fn tiny() -> (Roster, Timetable) {
        let roster = Roster::from_departments(vec![Department::new("CS", "Computer Science")
            .with_rooms(RoomSet::new(vec!["R1".into()], vec![]))
            .with_subject(Subject::theory("s1", "Algebra", 1))
            .with_teacher(Teacher::new("t1", "Alice", 5).with_subject("s1"))]);
        let tt = GreedyAllocator::new()
            .with_grid(WeekGrid::new(vec!["Mon".into()], 2))
            .allocate(&roster);
        (roster, tt)
    }

    #[test]
    fn test_parse_targets() {
        assert_eq!("master".parse::<ReportTarget>().unwrap(), ReportTarget::Master);
        assert_eq!(
            "tech:CS".parse::<ReportTarget>().unwrap(),
            ReportTarget::Department("CS".into())
        );
        assert_eq!(
            "department:CS".parse::<ReportTarget>().unwrap(),
            ReportTarget::Department("CS".into())
        );
        assert_eq!(
            "teacher:t1".parse::<ReportTarget>().unwrap(),
            ReportTarget::Teacher("t1".into())
        );
        assert_eq!(
            "room:CS-Lab1".parse::<ReportTarget>().unwrap(),
            ReportTarget::Room("CS-Lab1".into())
        );
        assert!("teacher:".parse::<ReportTarget>().is_err());
        assert!("teacher".parse::<ReportTarget>().is_err());
        assert!("desk:1".parse::<ReportTarget>().is_err());
    }

    #[test]
    fn test_target_display_roundtrip() {
        for t in available_targets(&Roster::sample()) {
            assert_eq!(t.to_string().parse::<ReportTarget>().unwrap(), t);
        }
    }

    #[test]
    fn test_available_targets() {
        let targets = available_targets(&Roster::sample());
        // master + 2 departments + 3 teachers + 6 rooms
        assert_eq!(targets.len(), 12);
        assert_eq!(targets[0], ReportTarget::Master);
        assert_eq!(targets[1], ReportTarget::Department("CS".into()));
        assert!(targets.contains(&ReportTarget::Room("EE-Lab2".into())));
    }

    #[test]
    fn test_project_titles() {
        let roster = Roster::sample();
        let tt = GreedyAllocator::new().allocate(&roster);

        let master = project(&tt, &roster, &ReportTarget::Master).unwrap();
        assert_eq!(master.title, "Master Routine");
        assert_eq!(master.table.occupied(), 18);

        let dept = project(&tt, &roster, &ReportTarget::Department("EE".into())).unwrap();
        assert_eq!(dept.title, "Electrical Eng Routine");
        assert_eq!(dept.table.occupied(), 8);

        let teacher = project(&tt, &roster, &ReportTarget::Teacher("t2".into())).unwrap();
        assert_eq!(teacher.title, "Routine — Teacher: t2");
        assert_eq!(teacher.table.occupied(), 2);

        let room = project(&tt, &roster, &ReportTarget::Room("CS-Lab1".into())).unwrap();
        assert_eq!(room.title, "Room: CS-Lab1");
        assert_eq!(room.table.occupied(), 4);
    }

    #[test]
    fn test_project_unknown_target() {
        let roster = Roster::sample();
        let tt = GreedyAllocator::new().allocate(&roster);
        let err = project(&tt, &roster, &ReportTarget::Room("Nowhere".into())).unwrap_err();
        assert_eq!(err, TimetableError::UnknownReportTarget("room:Nowhere".into()));
    }

    #[test]
    fn test_render_grid() {
        let (roster, tt) = tiny();
        let text = render_target(&tt, &roster, &ReportTarget::Master, &RenderOptions::default())
            .unwrap();
        let expected = "\
Master Routine

| Day/Period | P1         | P2 |
|------------|------------|----|
| Mon        | Algebra    | —  |
|            | Alice • R1 |    |
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_options() {
        let (roster, tt) = tiny();
        let options = RenderOptions::default()
            .with_blank_marker("-")
            .with_generated_at("2026-01-05 09:00");
        let text = render_target(&tt, &roster, &ReportTarget::Teacher("t1".into()), &options)
            .unwrap();
        assert!(text.starts_with("Routine — Teacher: t1\nGenerated at: 2026-01-05 09:00\n"));
        assert!(text.contains("| Mon        | Algebra    | -  |"));
    }

    #[test]
    fn test_render_default_grid_shape() {
        let roster = Roster::sample();
        let tt = GreedyAllocator::new().allocate(&roster);
        let text = render_target(&tt, &roster, &ReportTarget::Master, &RenderOptions::default())
            .unwrap();
        // title, blank, header, separator, 5 days × 2 lines
        assert_eq!(text.lines().count(), 14);
        assert!(text.contains("P6"));
        assert!(text.contains("| Fri"));
    }

    #[test]
    fn test_report_json() {
        let (roster, tt) = tiny();
        let report = project(&tt, &roster, &ReportTarget::Room("R1".into())).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["title"], "Room: R1");
        assert_eq!(json["target"], "room:R1");
        assert_eq!(json["grid"]["periods_per_day"], 2);
        assert_eq!(json["table"]["cells"][0]["subject_id"], "s1");
        assert!(json["table"]["cells"][1].is_null());
    }
}
