//! Core data models for the People Analytics Engine.
//!
//! This module contains the historical record types and the read-only
//! [`EmployeeHistorySnapshot`] that analyzers consume.

mod attendance;
mod employee;
mod leave;
mod payroll;
mod performance;
mod snapshot;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use employee::EmployeeProfile;
pub use leave::{LeaveRecord, LeaveStatus};
pub use payroll::PayrollRecord;
pub use performance::{Goal, GoalStatus, PerformanceReview};
pub use snapshot::EmployeeHistorySnapshot;
