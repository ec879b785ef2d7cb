//! Timetabling domain models.
//!
//! Provides the data types for describing a school roster and the weekly
//! timetable produced from it.
//!
//! # Domain Mappings
//!
//! | u-timetable | School | Training Center | Clinic |
//! |-------------|--------|-----------------|--------|
//! | Department | Technology/Faculty | Program | Ward |
//! | Subject | Course | Module | Session Type |
//! | Teacher | Lecturer | Trainer | Practitioner |
//! | Room (theory/lab) | Classroom/Lab | Room/Workshop | Consult/Procedure Room |
//! | Timetable | Class Routine | Course Calendar | Weekly Rota |

mod department;
mod grid;
mod subject;
mod teacher;
mod timetable;

pub use department::{Department, RoomSet};
pub use grid::{WeekGrid, DEFAULT_DAYS, DEFAULT_PERIODS_PER_DAY};
pub use subject::{RoomKind, Subject};
pub use teacher::Teacher;
pub use timetable::{ScheduleEntry, SlotTable, Timetable, UnmetDemand};
