//! Attendance anomaly detection.
//!
//! Derives punctuality and absence rates, a composite attendance score, and
//! anomaly flags with severity from the rolling attendance window.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::{AttendanceRecord, AttendanceStatus, EmployeeHistorySnapshot};

use super::anomaly::{AnomalySeverity, RiskBand};
use super::risk_factor::clamp_score;

/// Late-rate percentage above which the frequent-late anomaly fires.
pub const FREQUENT_LATE_RATE_THRESHOLD: f64 = 20.0;

/// Absence-rate percentage above which the absenteeism anomaly fires.
pub const ABSENTEEISM_RATE_THRESHOLD: f64 = 10.0;

/// Share of hour-bearing records deviating from the mean above which the
/// irregular-hours anomaly fires.
pub const IRREGULAR_HOURS_RATIO_THRESHOLD: f64 = 0.3;

/// Presence credit granted to a late day in the attendance score.
pub const LATE_PRESENCE_CREDIT: f64 = 0.7;

/// Hours a record may deviate from the employee's own mean before it counts
/// as irregular.
const HOURS_DEVIATION_LIMIT: f64 = 2.0;

/// Late/absence rate below which the punctuality positive pattern fires.
const PUNCTUALITY_RATE_LIMIT: f64 = 5.0;

/// Attendance score below which risk escalates and HR review is recommended.
const ESCALATION_SCORE: f64 = 70.0;

/// Attendance score below which risk is at least medium.
const WATCH_SCORE: f64 = 85.0;

/// Kinds of attendance anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceAnomalyType {
    /// Late arrivals above the firing threshold.
    FrequentLate,
    /// Absences above the firing threshold.
    Absenteeism,
    /// Worked hours deviating from the employee's own mean.
    IrregularHours,
}

/// One flagged attendance anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceAnomaly {
    /// The kind of anomaly.
    pub anomaly_type: AttendanceAnomalyType,
    /// How serious the anomaly is.
    pub severity: AnomalySeverity,
    /// Human-readable explanation.
    pub description: String,
}

/// Derived attendance analysis for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceAnomalyDetection {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Records in the analysis window.
    pub total_days: usize,
    /// Late days in the window.
    pub late_days: usize,
    /// Absent days in the window.
    pub absent_days: usize,
    /// Composite attendance score in [0,100]; 100 when no records exist.
    pub attendance_score: f64,
    /// Late days as a percentage of the window.
    pub late_rate: f64,
    /// Absent days as a percentage of the window.
    pub absenteeism_rate: f64,
    /// Flagged anomalies, any subset may be present.
    pub anomalies: Vec<AttendanceAnomaly>,
    /// Positive patterns worth surfacing alongside anomalies.
    pub positive_patterns: Vec<String>,
    /// Overall attendance risk classification.
    pub risk_band: RiskBand,
    /// Advisory strings keyed off anomalies plus an escalation when the
    /// score falls below the escalation threshold.
    pub recommendations: Vec<String>,
    /// The snapshot date the analysis was derived from.
    pub generated_on: NaiveDate,
}

fn late_severity(late_rate: f64) -> AnomalySeverity {
    if late_rate > 40.0 {
        AnomalySeverity::High
    } else {
        AnomalySeverity::Medium
    }
}

fn absence_severity(absence_rate: f64) -> AnomalySeverity {
    if absence_rate > 25.0 {
        AnomalySeverity::High
    } else if absence_rate > 15.0 {
        AnomalySeverity::Medium
    } else {
        AnomalySeverity::Low
    }
}

fn irregular_hours_anomaly(records: &[&AttendanceRecord]) -> Option<AttendanceAnomaly> {
    let hours: Vec<f64> = records.iter().filter_map(|r| r.total_hours).collect();
    if hours.is_empty() {
        return None;
    }

    let mean = hours.iter().sum::<f64>() / hours.len() as f64;
    let deviating = hours
        .iter()
        .filter(|h| (**h - mean).abs() > HOURS_DEVIATION_LIMIT)
        .count();
    let ratio = deviating as f64 / hours.len() as f64;
    if ratio <= IRREGULAR_HOURS_RATIO_THRESHOLD {
        return None;
    }

    let severity = if deviating * 2 > hours.len() {
        AnomalySeverity::High
    } else {
        AnomalySeverity::Medium
    };
    Some(AttendanceAnomaly {
        anomaly_type: AttendanceAnomalyType::IrregularHours,
        severity,
        description: format!(
            "{deviating} of {} hour-bearing days deviate more than {HOURS_DEVIATION_LIMIT:.0}h \
             from the {mean:.1}h mean",
            hours.len()
        ),
    })
}

/// Analyzes one employee's attendance over the rolling window.
///
/// An empty window scores 100 — absence of data is treated as perfect
/// attendance.
pub fn detect_attendance_anomalies(
    snapshot: &EmployeeHistorySnapshot,
    config: &AnalyticsConfig,
) -> AttendanceAnomalyDetection {
    let window_start = snapshot
        .as_of
        .checked_sub_days(Days::new(config.attendance.window_days.unsigned_abs()))
        .unwrap_or(NaiveDate::MIN);
    let records: Vec<&AttendanceRecord> = snapshot
        .attendance
        .iter()
        .filter(|r| r.date >= window_start && r.date <= snapshot.as_of)
        .collect();

    let total_days = records.len();
    let late_days = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Late)
        .count();
    let absent_days = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Absent)
        .count();

    let (attendance_score, late_rate, absenteeism_rate) = if total_days == 0 {
        (100.0, 0.0, 0.0)
    } else {
        let presence: f64 = records.iter().map(|r| r.presence_credit()).sum();
        let total = total_days as f64;
        let score = (presence + LATE_PRESENCE_CREDIT * late_days as f64) / total * 100.0;
        (
            clamp_score(score),
            late_days as f64 / total * 100.0,
            absent_days as f64 / total * 100.0,
        )
    };

    let mut anomalies = Vec::new();
    if late_rate > FREQUENT_LATE_RATE_THRESHOLD {
        anomalies.push(AttendanceAnomaly {
            anomaly_type: AttendanceAnomalyType::FrequentLate,
            severity: late_severity(late_rate),
            description: format!("Late on {late_rate:.1}% of days in the window"),
        });
    }
    if absenteeism_rate > ABSENTEEISM_RATE_THRESHOLD {
        anomalies.push(AttendanceAnomaly {
            anomaly_type: AttendanceAnomalyType::Absenteeism,
            severity: absence_severity(absenteeism_rate),
            description: format!("Absent on {absenteeism_rate:.1}% of days in the window"),
        });
    }
    if let Some(anomaly) = irregular_hours_anomaly(&records) {
        anomalies.push(anomaly);
    }

    let mut positive_patterns = Vec::new();
    if late_rate < PUNCTUALITY_RATE_LIMIT && absenteeism_rate < PUNCTUALITY_RATE_LIMIT {
        positive_patterns.push("Excellent Punctuality".to_string());
    }

    let has_high_severity = anomalies
        .iter()
        .any(|a| a.severity == AnomalySeverity::High);
    let risk_band = if has_high_severity || attendance_score < ESCALATION_SCORE {
        RiskBand::High
    } else if anomalies.len() > 1 || attendance_score < WATCH_SCORE {
        RiskBand::Medium
    } else {
        RiskBand::Low
    };

    let mut recommendations = Vec::new();
    for anomaly in &anomalies {
        let text = match anomaly.anomaly_type {
            AttendanceAnomalyType::FrequentLate => {
                "Discuss punctuality expectations and commute constraints"
            }
            AttendanceAnomalyType::Absenteeism => {
                "Hold an absence review meeting with the employee"
            }
            AttendanceAnomalyType::IrregularHours => {
                "Clarify expected working hours and shift boundaries"
            }
        };
        recommendations.push(text.to_string());
    }
    if attendance_score < ESCALATION_SCORE {
        recommendations.push("Escalate to HR for a formal attendance review".to_string());
    }

    AttendanceAnomalyDetection {
        employee_id: snapshot.profile.id.clone(),
        employee_name: snapshot.profile.name.clone(),
        total_days,
        late_days,
        absent_days,
        attendance_score,
        late_rate,
        absenteeism_rate,
        anomalies,
        positive_patterns,
        risk_band,
        recommendations,
        generated_on: snapshot.as_of,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeProfile;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn snapshot() -> EmployeeHistorySnapshot {
        EmployeeHistorySnapshot::new(
            EmployeeProfile {
                id: "emp_001".to_string(),
                name: "Asha Rahman".to_string(),
                department: "Engineering".to_string(),
                join_date: date("2022-01-15").into(),
                termination_date: None,
            },
            date("2025-06-01"),
        )
    }

    fn record(status: AttendanceStatus, day: &str) -> AttendanceRecord {
        AttendanceRecord {
            date: date(day),
            status,
            clock_in: None,
            clock_out: None,
            total_hours: None,
            overtime_hours: None,
        }
    }

    fn window_records(counts: &[(AttendanceStatus, usize)]) -> Vec<AttendanceRecord> {
        // Spread records across April/May 2025, inside the default 90-day
        // window ending at the fixture's as_of date. Dates may repeat.
        let base = date("2025-04-01");
        let mut records = Vec::new();
        let mut day = 0u64;
        for (status, count) in counts {
            for _ in 0..*count {
                let record_date = base
                    .checked_add_days(Days::new(day % 56))
                    .expect("in-range date");
                records.push(AttendanceRecord {
                    date: record_date,
                    status: *status,
                    clock_in: None,
                    clock_out: None,
                    total_hours: None,
                    overtime_hours: None,
                });
                day += 1;
            }
        }
        records
    }

    #[test]
    fn test_quarter_late_scores_ninety_two_and_a_half() {
        let mut snap = snapshot();
        snap.attendance = window_records(&[
            (AttendanceStatus::Present, 75),
            (AttendanceStatus::Late, 25),
        ]);
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());

        assert_eq!(detection.total_days, 100);
        assert_eq!(detection.late_rate, 25.0);
        assert_eq!(detection.attendance_score, 92.5);
        let late = detection
            .anomalies
            .iter()
            .find(|a| a.anomaly_type == AttendanceAnomalyType::FrequentLate)
            .unwrap();
        // 25% is above the 20% firing threshold but not above 40%.
        assert_eq!(late.severity, AnomalySeverity::Medium);
    }

    #[test]
    fn test_no_records_scores_perfect() {
        let detection = detect_attendance_anomalies(&snapshot(), &AnalyticsConfig::default());
        assert_eq!(detection.attendance_score, 100.0);
        assert_eq!(detection.total_days, 0);
        assert!(detection.anomalies.is_empty());
        assert_eq!(detection.risk_band, RiskBand::Low);
        assert!(
            detection
                .positive_patterns
                .contains(&"Excellent Punctuality".to_string())
        );
    }

    #[test]
    fn test_late_severity_bands() {
        assert_eq!(late_severity(25.0), AnomalySeverity::Medium);
        assert_eq!(late_severity(40.0), AnomalySeverity::Medium);
        assert_eq!(late_severity(40.1), AnomalySeverity::High);
    }

    #[test]
    fn test_absence_severity_bands() {
        assert_eq!(absence_severity(12.0), AnomalySeverity::Low);
        assert_eq!(absence_severity(15.1), AnomalySeverity::Medium);
        assert_eq!(absence_severity(25.1), AnomalySeverity::High);
    }

    #[test]
    fn test_absenteeism_drives_high_risk() {
        let mut snap = snapshot();
        snap.attendance = window_records(&[
            (AttendanceStatus::Present, 70),
            (AttendanceStatus::Absent, 30),
        ]);
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());

        // Score (70 + 0) / 100 * 100 = 70, absence 30% -> High anomaly.
        assert_eq!(detection.attendance_score, 70.0);
        let absence = detection
            .anomalies
            .iter()
            .find(|a| a.anomaly_type == AttendanceAnomalyType::Absenteeism)
            .unwrap();
        assert_eq!(absence.severity, AnomalySeverity::High);
        assert_eq!(detection.risk_band, RiskBand::High);
        assert!(
            detection
                .recommendations
                .iter()
                .any(|r| r.contains("absence review"))
        );
    }

    #[test]
    fn test_escalation_below_seventy() {
        let mut snap = snapshot();
        snap.attendance = window_records(&[
            (AttendanceStatus::Present, 60),
            (AttendanceStatus::Absent, 40),
        ]);
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());
        assert!(detection.attendance_score < 70.0);
        assert_eq!(detection.risk_band, RiskBand::High);
        assert!(
            detection
                .recommendations
                .iter()
                .any(|r| r.contains("Escalate to HR"))
        );
    }

    #[test]
    fn test_half_day_credit() {
        let mut snap = snapshot();
        snap.attendance = window_records(&[
            (AttendanceStatus::Present, 8),
            (AttendanceStatus::HalfDay, 2),
        ]);
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());
        // (8 + 2*0.5) / 10 * 100 = 90
        assert_eq!(detection.attendance_score, 90.0);
    }

    #[test]
    fn test_irregular_hours_medium_then_high() {
        let mut snap = snapshot();
        let mut records = window_records(&[(AttendanceStatus::Present, 10)]);
        // Mean of [8,8,8,8,8,8,12,12,12,12] = 9.6; the four 12h days deviate
        // by 2.4h, the 8h days by 1.6h -> 4/10 = 40% > 30%, not > half.
        for (i, record) in records.iter_mut().enumerate() {
            record.total_hours = Some(if i < 6 { 8.0 } else { 12.0 });
        }
        snap.attendance = records;
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());
        let irregular = detection
            .anomalies
            .iter()
            .find(|a| a.anomaly_type == AttendanceAnomalyType::IrregularHours)
            .unwrap();
        assert_eq!(irregular.severity, AnomalySeverity::Medium);

        // Mean of [4,14,4,14,4,14,4,14,4,14] = 9; every day deviates by 5h.
        let mut records = window_records(&[(AttendanceStatus::Present, 10)]);
        for (i, record) in records.iter_mut().enumerate() {
            record.total_hours = Some(if i % 2 == 0 { 4.0 } else { 14.0 });
        }
        snap.attendance = records;
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());
        let irregular = detection
            .anomalies
            .iter()
            .find(|a| a.anomaly_type == AttendanceAnomalyType::IrregularHours)
            .unwrap();
        assert_eq!(irregular.severity, AnomalySeverity::High);
    }

    #[test]
    fn test_records_outside_window_ignored() {
        let mut snap = snapshot();
        let mut records = window_records(&[(AttendanceStatus::Present, 5)]);
        records.push(record(AttendanceStatus::Absent, "2024-06-01"));
        snap.attendance = records;
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());
        assert_eq!(detection.total_days, 5);
        assert_eq!(detection.absent_days, 0);
    }

    #[test]
    fn test_two_anomalies_raise_medium_risk() {
        let mut snap = snapshot();
        snap.attendance = window_records(&[
            (AttendanceStatus::Present, 66),
            (AttendanceStatus::Late, 22),
            (AttendanceStatus::Absent, 12),
        ]);
        let detection = detect_attendance_anomalies(&snap, &AnalyticsConfig::default());
        // late 22% -> Low severity anomaly; absent 12% -> Low severity anomaly.
        assert_eq!(detection.anomalies.len(), 2);
        // Score (66 + 0.7*22)/100*100 = 81.4 < 85 and two anomalies.
        assert_eq!(detection.risk_band, RiskBand::Medium);
    }

    #[test]
    fn test_idempotent_detection() {
        let mut snap = snapshot();
        snap.attendance = window_records(&[
            (AttendanceStatus::Present, 20),
            (AttendanceStatus::Late, 5),
        ]);
        let config = AnalyticsConfig::default();
        assert_eq!(
            detect_attendance_anomalies(&snap, &config),
            detect_attendance_anomalies(&snap, &config)
        );
    }
}
