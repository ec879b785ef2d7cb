//! Timetable coverage metrics.
//!
//! Summarizes how much of the roster's demand a timetable satisfied.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Requested Hours | Sum of subject weekly hours |
//! | Assigned Hours | Committed entries |
//! | Fill Rate | assigned / requested |
//! | Teacher Load | assigned / weekly cap, per teacher |
//! | Room Utilization | occupied / grid slots, per room |
//! | Grid Utilization | occupied / grid slots, global |

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{Timetable, UnmetDemand};
use crate::roster::Roster;

/// Coverage indicators for one timetable.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    /// Total weekly hours requested by all subjects.
    pub requested_hours: u64,
    /// Hours placed in the timetable.
    pub assigned_hours: u64,
    /// Fraction of requested hours placed (1.0 when nothing was requested).
    pub fill_rate: f64,
    /// Fraction of global slots occupied.
    pub grid_utilization: f64,
    /// Teacher id → assigned / cap (0.0 for a zero cap).
    pub teacher_load: IndexMap<String, f64>,
    /// Room name → occupied / slots.
    pub room_utilization: IndexMap<String, f64>,
    /// Subjects left short.
    pub unmet: Vec<UnmetDemand>,
}

impl CoverageReport {
    /// Computes coverage from a roster and the timetable generated for it.
    pub fn calculate(roster: &Roster, timetable: &Timetable) -> Self {
        let requested_hours: u64 = roster
            .departments()
            .iter()
            .map(|d| d.requested_hours())
            .sum();
        let assigned_hours = timetable.assignment_count() as u64;
        let slots = timetable.grid.slot_count();

        let fill_rate = if requested_hours == 0 {
            1.0
        } else {
            assigned_hours as f64 / requested_hours as f64
        };

        let grid_utilization = if slots == 0 {
            0.0
        } else {
            assigned_hours as f64 / slots as f64
        };

        let mut teacher_load = IndexMap::new();
        for dept in roster.departments() {
            for teacher in &dept.teachers {
                let load = if teacher.max_hours == 0 {
                    0.0
                } else {
                    timetable.teacher_load(&teacher.id) as f64 / f64::from(teacher.max_hours)
                };
                teacher_load.entry(teacher.id.clone()).or_insert(load);
            }
        }

        let room_utilization = timetable
            .rooms
            .iter()
            .map(|(room, table)| {
                let util = if slots == 0 {
                    0.0
                } else {
                    table.occupied() as f64 / slots as f64
                };
                (room.clone(), util)
            })
            .collect();

        Self {
            requested_hours,
            assigned_hours,
            fill_rate,
            grid_utilization,
            teacher_load,
            room_utilization,
            unmet: timetable.unmet.clone(),
        }
    }

    /// Hours requested but not placed.
    pub fn missing_hours(&self) -> u64 {
        self.requested_hours.saturating_sub(self.assigned_hours)
    }

    /// Whether every requested hour was placed.
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Plain-text summary for terminal output.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Coverage: {}/{} hours placed ({:.0}%), grid {:.0}% full\n",
            self.assigned_hours,
            self.requested_hours,
            self.fill_rate * 100.0,
            self.grid_utilization * 100.0
        );
        for u in &self.unmet {
            out.push_str(&format!(
                "  unplaced: {}/{} ({}) {} of {} hours\n",
                u.department,
                u.subject_id,
                u.title,
                u.missing(),
                u.requested
            ));
        }
        out
    }
}
