//! Weekly slot grid.
//!
//! The week is a fixed grid of `days × periods_per_day` slots addressed by
//! a flat, day-major index: slot `s` falls on day `s / periods_per_day`,
//! period `s % periods_per_day + 1`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Default teaching days.
pub const DEFAULT_DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Default periods per day.
pub const DEFAULT_PERIODS_PER_DAY: usize = 6;

/// Shape of the weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekGrid {
    /// Day labels, in week order.
    pub days: Vec<String>,
    /// Number of periods in each day.
    pub periods_per_day: usize,
}

impl Default for WeekGrid {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
            periods_per_day: DEFAULT_PERIODS_PER_DAY,
        }
    }
}

impl WeekGrid {
    /// Creates a grid.
    pub fn new(days: Vec<String>, periods_per_day: usize) -> Self {
        Self {
            days,
            periods_per_day,
        }
    }

    /// Rejects a grid without any slots.
    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(TimetableError::Config("grid has no days".into()));
        }
        if self.periods_per_day == 0 {
            return Err(TimetableError::Config("grid has zero periods per day".into()));
        }
        Ok(())
    }

    /// Total number of slots in the week.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.periods_per_day
    }

    /// Slot index for a 0-based day and 1-based period.
    pub fn slot(&self, day: usize, period: usize) -> Option<usize> {
        if day >= self.days.len() || period == 0 || period > self.periods_per_day {
            return None;
        }
        Some(day * self.periods_per_day + period - 1)
    }

    /// 0-based day of a slot.
    #[inline]
    pub fn day_of(&self, slot: usize) -> usize {
        slot / self.periods_per_day
    }

    /// 1-based period of a slot.
    #[inline]
    pub fn period_of(&self, slot: usize) -> usize {
        slot % self.periods_per_day + 1
    }

    /// Label of a day, if in range.
    pub fn day_label(&self, day: usize) -> Option<&str> {
        self.days.get(day).map(String::as_str)
    }
}
