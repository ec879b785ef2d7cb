//! Weekly class-timetable builder.
//!
//! Describe departments with their rooms, subjects, and teachers, run a
//! greedy allocator over a fixed weekly grid, and print the resulting
//! routine for the whole school, one department, one teacher, or one room.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Department`, `Subject`, `Teacher`,
//!   `WeekGrid`, `ScheduleEntry`, `Timetable`
//! - **`forms`**: Typed form inputs and the `id|Title|hours|kind` literal
//! - **`roster`**: The department roster and its invariants
//! - **`validation`**: Advisory roster checks (dangling references, missing rooms)
//! - **`scheduler`**: `GreedyAllocator` and `CoverageReport`
//! - **`report`**: Master / department / teacher / room projections and rendering
//! - **`config`**: TOML configuration
//!
//! # Example
//!
//! ```
//! use u_timetable::forms::{DepartmentForm, TeacherForm};
//! use u_timetable::report::{render_target, RenderOptions, ReportTarget};
//! use u_timetable::roster::Roster;
//! use u_timetable::scheduler::GreedyAllocator;
//!
//! let mut roster = Roster::new();
//! roster.add_department(DepartmentForm::new("ME", "Mechanical").with_counts(1, 1))?;
//!
//! let mut teacher = TeacherForm::new("ME", "m1", "Dana").with_max_hours(6);
//! teacher.push_subject_literal("me101|Statics|3|theory")?;
//! teacher.push_subject_literal("meLab|Workshop|2|lab")?;
//! roster.add_teacher(teacher)?;
//!
//! let timetable = GreedyAllocator::new().allocate(&roster);
//! assert_eq!(timetable.assignment_count(), 5);
//!
//! let text = render_target(&timetable, &roster, &ReportTarget::Room("ME-L1".into()), &RenderOptions::default())?;
//! assert!(text.starts_with("Room: ME-L1"));
//! # Ok::<(), u_timetable::TimetableError>(())
//! ```
//!
//! # References
//!
//! - de Werra (1985), "An introduction to timetabling", EJOR 19(2)
//! - Schaerf (1999), "A Survey of Automated Timetabling", AI Review 13(2)

pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod report;
pub mod roster;
pub mod scheduler;
pub mod validation;

pub use error::{Result, TimetableError};
