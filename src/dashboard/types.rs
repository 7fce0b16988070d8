//! Request and result types for the analytics dashboard.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::analytics::TeamPerformanceInsight;

/// Selects the population a dashboard report covers.
///
/// An absent department and employee means the whole workforce. When both are
/// supplied, the explicit employee wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardScope {
    /// Restrict the report to one department.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Restrict the report to one employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl DashboardScope {
    /// Scope covering the whole workforce.
    pub fn workforce() -> Self {
        Self::default()
    }

    /// Scope covering one department.
    pub fn department(id: impl Into<String>) -> Self {
        Self {
            department_id: Some(id.into()),
            employee_id: None,
        }
    }

    /// Scope covering one employee.
    pub fn employee(id: impl Into<String>) -> Self {
        Self {
            department_id: None,
            employee_id: Some(id.into()),
        }
    }
}

/// Reporting period granularity.
///
/// Determines the default window length when explicit dates are absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingPeriod {
    /// Trailing 7 days.
    Week,
    /// Trailing 30 days.
    Month,
    /// Trailing 90 days.
    Quarter,
    /// Trailing 365 days.
    Year,
}

impl ReportingPeriod {
    /// Default window length for this granularity, in days.
    pub fn default_window_days(self) -> u64 {
        match self {
            ReportingPeriod::Week => 7,
            ReportingPeriod::Month => 30,
            ReportingPeriod::Quarter => 90,
            ReportingPeriod::Year => 365,
        }
    }

    /// Builds the default window of this granularity ending at `end`.
    pub fn window_ending(self, end: NaiveDate) -> DateRange {
        let start = end
            .checked_sub_days(Days::new(self.default_window_days() - 1))
            .unwrap_or(NaiveDate::MIN);
        DateRange { start, end }
    }
}

/// An inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl DateRange {
    /// Number of days in the window, inclusive of both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the date falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window of equal length immediately before this one.
    pub fn previous(&self) -> DateRange {
        let span = (self.end - self.start).num_days().unsigned_abs();
        let end = self
            .start
            .checked_sub_days(Days::new(1))
            .unwrap_or(NaiveDate::MIN);
        let start = end.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
        DateRange { start, end }
    }
}

/// Workforce headcount and composition rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkforceOverview {
    /// Employees active at the end of the window.
    pub headcount: usize,
    /// Employees whose join date falls inside the window.
    pub new_hires: usize,
    /// Employees whose termination date falls inside the window.
    pub departures: usize,
    /// Net headcount change over the window as a percentage of the starting
    /// headcount.
    pub growth_rate_pct: f64,
    /// Mean tenure in months of employees active at the end of the window.
    pub average_tenure_months: f64,
    /// Active employees per department, ordered by department name.
    pub department_distribution: BTreeMap<String, usize>,
}

/// Population rollup of the attendance analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceMetrics {
    /// Mean attendance score over the population.
    pub average_score: f64,
    /// Mean late rate over the population.
    pub average_late_rate: f64,
    /// Mean absence rate over the population.
    pub average_absenteeism_rate: f64,
    /// Employees with at least one attendance anomaly.
    pub employees_with_anomalies: usize,
    /// Employees with at least one high-severity attendance anomaly.
    pub high_severity_count: usize,
}

/// Population rollup of the leave pattern analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveMetrics {
    /// Total leave days across the population.
    pub total_days: Decimal,
    /// Mean leave days per employee.
    pub average_days_per_employee: f64,
    /// Employees classified at high burnout risk.
    pub high_burnout_risk_count: usize,
    /// Total leave anomalies across the population.
    pub anomaly_count: usize,
}

/// Recruitment funnel rollup, supplied by the recruitment collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentFunnelMetrics {
    /// Positions open during the window.
    pub open_positions: usize,
    /// Applications received during the window.
    pub applications: usize,
    /// Interviews held during the window.
    pub interviews: usize,
    /// Offers extended during the window.
    pub offers: usize,
    /// Offers accepted during the window.
    pub hires: usize,
    /// Accepted offers as a percentage of offers extended.
    pub offer_acceptance_rate: f64,
}

/// Population rollup of the attrition scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttritionMetrics {
    /// Mean composite risk score over the population.
    pub average_risk_score: f64,
    /// Employees at high risk.
    pub high_risk_count: usize,
    /// Employees at critical risk.
    pub critical_risk_count: usize,
    /// Employees scored.
    pub scored_employees: usize,
}

/// One period-over-period comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// The metric being compared.
    pub metric: String,
    /// Value over the current window.
    pub current: f64,
    /// Value over the preceding window of equal length.
    pub previous: f64,
    /// Percentage change from previous to current; 0 when the previous value
    /// is 0.
    pub change_pct: f64,
}

/// Period-over-period trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// The window the deltas were computed against.
    pub previous_window: DateRange,
    /// One comparison per tracked metric.
    pub points: Vec<TrendPoint>,
}

/// Kinds of system alerts the dashboard can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// One or more employees score high or critical attrition risk.
    AttritionRisk,
}

/// One system alert raised by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemAlert {
    /// The kind of alert.
    pub alert_type: AlertType,
    /// Human-readable summary.
    pub message: String,
    /// Employees the alert concerns.
    pub employee_ids: Vec<String>,
    /// Fixed follow-up recommendations for this alert kind.
    pub recommendations: Vec<String>,
}

/// The composite dashboard report.
///
/// Sections are `None` when their computation failed or timed out; the
/// section names are then listed in `degraded_sections` so callers can
/// distinguish "no data" from "section unavailable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardAnalytics {
    /// Unique id of this report.
    pub id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The scope the report was generated for.
    pub scope: DashboardScope,
    /// The reporting period granularity.
    pub period: ReportingPeriod,
    /// The window the report covers.
    pub window: DateRange,
    /// Workforce overview section.
    pub overview: Option<WorkforceOverview>,
    /// Attendance rollup section.
    pub attendance: Option<AttendanceMetrics>,
    /// Leave rollup section.
    pub leave: Option<LeaveMetrics>,
    /// Performance rollup section.
    pub performance: Option<TeamPerformanceInsight>,
    /// Recruitment funnel section.
    pub recruitment: Option<RecruitmentFunnelMetrics>,
    /// Attrition rollup section.
    pub attrition: Option<AttritionMetrics>,
    /// Period-over-period trend section.
    pub trends: Option<TrendSeries>,
    /// System alerts; empty when nothing fired or the section degraded.
    pub alerts: Vec<SystemAlert>,
    /// Names of sections that failed or timed out.
    pub degraded_sections: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_default_window_days() {
        assert_eq!(ReportingPeriod::Week.default_window_days(), 7);
        assert_eq!(ReportingPeriod::Month.default_window_days(), 30);
        assert_eq!(ReportingPeriod::Quarter.default_window_days(), 90);
        assert_eq!(ReportingPeriod::Year.default_window_days(), 365);
    }

    #[test]
    fn test_window_ending_is_inclusive() {
        let window = ReportingPeriod::Week.window_ending(date("2025-06-07"));
        assert_eq!(window.start, date("2025-06-01"));
        assert_eq!(window.end, date("2025-06-07"));
        assert_eq!(window.days(), 7);
    }

    #[test]
    fn test_previous_window_is_adjacent_and_equal_length() {
        let window = DateRange {
            start: date("2025-06-01"),
            end: date("2025-06-30"),
        };
        let previous = window.previous();
        assert_eq!(previous.end, date("2025-05-31"));
        assert_eq!(previous.days(), window.days());
        assert!(!previous.contains(window.start));
    }

    #[test]
    fn test_contains_bounds() {
        let window = DateRange {
            start: date("2025-06-01"),
            end: date("2025-06-30"),
        };
        assert!(window.contains(date("2025-06-01")));
        assert!(window.contains(date("2025-06-30")));
        assert!(!window.contains(date("2025-05-31")));
        assert!(!window.contains(date("2025-07-01")));
    }

    #[test]
    fn test_scope_constructors() {
        assert_eq!(DashboardScope::workforce(), DashboardScope::default());
        let scope = DashboardScope::department("dept_eng");
        assert_eq!(scope.department_id.as_deref(), Some("dept_eng"));
        assert!(scope.employee_id.is_none());
    }

    #[test]
    fn test_period_serialization() {
        assert_eq!(
            serde_json::to_string(&ReportingPeriod::Quarter).unwrap(),
            "\"quarter\""
        );
        assert_eq!(
            serde_json::to_string(&AlertType::AttritionRisk).unwrap(),
            "\"attrition_risk\""
        );
    }
}
