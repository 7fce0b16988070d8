//! Leave record model.
//!
//! This module defines the LeaveRecord struct and LeaveStatus enum for the
//! leave-application history the pattern analyzer consumes.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Workflow state of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a manager decision.
    Pending,
    /// Approved and counted against the employee's balance.
    Approved,
    /// Rejected by a manager.
    Rejected,
    /// Withdrawn by the employee.
    Cancelled,
}

/// One leave application for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The leave-type name (e.g., "annual", "sick").
    pub leave_type: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Business-day count, which may be fractional for half days.
    pub days: Decimal,
    /// Workflow state of the application.
    pub status: LeaveStatus,
    /// When the application was created.
    pub created_at: NaiveDateTime,
}

impl LeaveRecord {
    /// Returns true if the leave starts on a Monday or ends on a Friday.
    ///
    /// Used by the weekend-extension heuristic in leave pattern analysis.
    pub fn extends_weekend(&self) -> bool {
        self.start_date.weekday() == Weekday::Mon || self.end_date.weekday() == Weekday::Fri
    }
}
