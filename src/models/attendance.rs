//! Attendance record model.
//!
//! This module defines the AttendanceRecord struct and AttendanceStatus enum
//! for the daily clock-in/out history the detectors consume.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Daily attendance classification.
///
/// The status is assigned upstream by the attendance capture layer (clock-in
/// time against the configured late-minute threshold); the analytics engine
/// treats it as ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// On-time full day.
    Present,
    /// No attendance recorded for a working day.
    Absent,
    /// Clocked in after the late-minute threshold.
    Late,
    /// Worked half of the scheduled day.
    HalfDay,
    /// Worked remotely for the full day.
    WorkFromHome,
}

/// One day of attendance for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The working day this record covers.
    pub date: NaiveDate,
    /// The attendance classification for the day.
    pub status: AttendanceStatus,
    /// Clock-in timestamp, if captured.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out timestamp, if captured.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Total worked hours for the day, if captured.
    #[serde(default)]
    pub total_hours: Option<f64>,
    /// Overtime hours for the day, if captured.
    #[serde(default)]
    pub overtime_hours: Option<f64>,
}

impl AttendanceRecord {
    /// Returns how much of a working day this record credits as presence.
    ///
    /// Present and work-from-home days count in full, a half day counts 0.5.
    /// Late days carry no presence credit here; the attendance score credits
    /// them separately at a reduced factor.
    pub fn presence_credit(&self) -> f64 {
        match self.status {
            AttendanceStatus::Present | AttendanceStatus::WorkFromHome => 1.0,
            AttendanceStatus::HalfDay => 0.5,
            AttendanceStatus::Late | AttendanceStatus::Absent => 0.0,
        }
    }
}
