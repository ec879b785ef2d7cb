//! Greedy timetable allocation and coverage evaluation.
//!
//! # Algorithm
//!
//! `GreedyAllocator` sweeps a queue of subject demands until a fixed point,
//! placing at most one hour per subject per sweep in the first feasible
//! slot. It is not optimal and does not backtrack, but it is deterministic
//! and never fails.
//!
//! # Coverage
//!
//! `CoverageReport` measures requested versus placed hours, teacher load,
//! and room utilization.
//!
//! # References
//!
//! - de Werra (1985), "An introduction to timetabling", EJOR 19(2)
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling", EJOR 140(2)

mod coverage;
mod greedy;

pub use coverage::CoverageReport;
pub use greedy::{GreedyAllocator, TeacherOrder};
