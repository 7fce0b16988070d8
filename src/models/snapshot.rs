//! The read-only history snapshot consumed by every analyzer.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, EmployeeProfile, Goal, LeaveRecord, PayrollRecord, PerformanceReview};

/// A read-only bundle of one employee's historical records.
///
/// The snapshot is assembled by the caller (typically the data store
/// collaborator) with time-bounded collections: roughly the last 12 months of
/// leave, review, goal, and payroll history, and a shorter rolling attendance
/// window. Analyzers are pure functions of a snapshot plus a configuration and
/// never mutate it.
///
/// The `as_of` date anchors all window arithmetic. Two calls with an
/// identical snapshot produce bit-identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeHistorySnapshot {
    /// Identity and employment dates.
    pub profile: EmployeeProfile,
    /// The reference date for all trailing-window arithmetic.
    pub as_of: NaiveDate,
    /// Attendance records within the rolling attendance window.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Leave applications, typically the trailing 12 months.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
    /// Performance reviews, newest first.
    #[serde(default)]
    pub reviews: Vec<PerformanceReview>,
    /// Goals, typically the trailing 12 months.
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// Payroll entries, newest first.
    #[serde(default)]
    pub payroll: Vec<PayrollRecord>,
}

impl EmployeeHistorySnapshot {
    /// Creates a snapshot with empty history collections.
    pub fn new(profile: EmployeeProfile, as_of: NaiveDate) -> Self {
        Self {
            profile,
            as_of,
            attendance: Vec::new(),
            leaves: Vec::new(),
            reviews: Vec::new(),
            goals: Vec::new(),
            payroll: Vec::new(),
        }
    }

    /// Returns the first day of the trailing 12-month window ending at `as_of`.
    pub fn trailing_year_start(&self) -> NaiveDate {
        self.as_of
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN)
    }
}
