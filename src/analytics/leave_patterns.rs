//! Leave pattern analysis and burnout detection.
//!
//! Derives usage statistics, a per-type breakdown, a month-of-year seasonal
//! histogram, anomaly flags, and a burnout classification from the trailing
//! year of leave records.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::AnalyticsConfig;
use crate::models::{EmployeeHistorySnapshot, LeaveRecord};

use super::anomaly::{AnomalySeverity, RiskBand};

/// Share of leaves starting Monday or ending Friday beyond which the
/// weekend-extension pattern fires.
pub const WEEKEND_PATTERN_RATIO: f64 = 0.6;

/// More than this many long-duration leaves raises the anomaly to high
/// severity.
pub const LONG_DURATION_HIGH_COUNT: usize = 2;

/// Frequency beyond this multiple of the threshold raises excessive
/// frequency to high severity.
const EXCESSIVE_FREQUENCY_HIGH_MULTIPLIER: f64 = 1.5;

/// Fraction of the burnout threshold at which burnout risk turns medium.
const BURNOUT_WARNING_RATIO: f64 = 0.7;

/// Kinds of leave-pattern anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveAnomalyType {
    /// Leave frequency exceeds the configured monthly threshold.
    ExcessiveFrequency,
    /// One or more leaves exceed the long-duration day threshold.
    LongDuration,
    /// Most leaves start on Monday or end on Friday.
    MondayFridayPattern,
}

/// One flagged leave-pattern anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveAnomaly {
    /// The kind of anomaly.
    pub anomaly_type: LeaveAnomalyType,
    /// How serious the anomaly is.
    pub severity: AnomalySeverity,
    /// Human-readable explanation.
    pub description: String,
    /// Date range covered by the qualifying leaves, where applicable.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// Per-leave-type usage rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveTypeBreakdown {
    /// The leave-type name.
    pub leave_type: String,
    /// Total days taken of this type.
    pub total_days: Decimal,
    /// Number of leaves of this type.
    pub count: usize,
    /// Share of all leave days, as a percentage.
    pub percentage: f64,
}

/// One month-of-year bucket in the seasonal histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyLeaveBucket {
    /// Calendar month, 1–12.
    pub month: u32,
    /// Total leave days starting in this month, across all years in the
    /// window.
    pub total_days: Decimal,
    /// Number of leaves starting in this month.
    pub count: usize,
}

/// Derived leave pattern analysis for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeavePatternAnalysis {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Total leave days in the trailing year.
    pub total_days: Decimal,
    /// Number of leaves in the trailing year.
    pub leave_count: usize,
    /// Leaves per month over the trailing year.
    pub frequency_per_month: f64,
    /// Mean days per leave, 0 if none.
    pub average_duration_days: f64,
    /// Per-type rollup, ordered by type name.
    pub by_type: Vec<LeaveTypeBreakdown>,
    /// Twelve month-of-year buckets, January first.
    pub monthly_distribution: Vec<MonthlyLeaveBucket>,
    /// Flagged anomalies, any subset may be present.
    pub anomalies: Vec<LeaveAnomaly>,
    /// Burnout classification from total days against the yearly threshold.
    pub burnout_risk: RiskBand,
    /// Advisory strings keyed off anomalies and burnout level. Duplicates
    /// from overlapping triggers are preserved.
    pub recommendations: Vec<String>,
    /// The snapshot date the analysis was derived from.
    pub generated_on: NaiveDate,
}

fn detect_anomalies(
    leaves: &[&LeaveRecord],
    frequency_per_month: f64,
    config: &AnalyticsConfig,
) -> Vec<LeaveAnomaly> {
    let mut anomalies = Vec::new();
    let thresholds = &config.leave;

    if frequency_per_month > thresholds.excessive_monthly_frequency {
        let severity = if frequency_per_month
            > thresholds.excessive_monthly_frequency * EXCESSIVE_FREQUENCY_HIGH_MULTIPLIER
        {
            AnomalySeverity::High
        } else {
            AnomalySeverity::Medium
        };
        anomalies.push(LeaveAnomaly {
            anomaly_type: LeaveAnomalyType::ExcessiveFrequency,
            severity,
            description: format!(
                "{frequency_per_month:.2} leaves/month exceeds the {:.2}/month threshold",
                thresholds.excessive_monthly_frequency
            ),
            date_range: None,
        });
    }

    let long_leaves: Vec<&&LeaveRecord> = leaves
        .iter()
        .filter(|l| l.days.to_f64().unwrap_or(0.0) > thresholds.long_duration_days)
        .collect();
    if !long_leaves.is_empty() {
        let severity = if long_leaves.len() > LONG_DURATION_HIGH_COUNT {
            AnomalySeverity::High
        } else {
            AnomalySeverity::Medium
        };
        let earliest = long_leaves.iter().map(|l| l.start_date).min();
        let latest = long_leaves.iter().map(|l| l.end_date).max();
        anomalies.push(LeaveAnomaly {
            anomaly_type: LeaveAnomalyType::LongDuration,
            severity,
            description: format!(
                "{} leaves longer than {:.0} days",
                long_leaves.len(),
                thresholds.long_duration_days
            ),
            date_range: earliest.zip(latest),
        });
    }

    if !leaves.is_empty() {
        let weekend_adjacent = leaves.iter().filter(|l| l.extends_weekend()).count();
        let ratio = weekend_adjacent as f64 / leaves.len() as f64;
        if ratio > WEEKEND_PATTERN_RATIO {
            anomalies.push(LeaveAnomaly {
                anomaly_type: LeaveAnomalyType::MondayFridayPattern,
                severity: AnomalySeverity::Medium,
                description: format!(
                    "{:.0}% of leaves start on Monday or end on Friday",
                    ratio * 100.0
                ),
                date_range: None,
            });
        }
    }

    anomalies
}

fn burnout_band(total_days: f64, burnout_yearly_days: f64) -> RiskBand {
    if total_days >= burnout_yearly_days {
        RiskBand::High
    } else if total_days >= burnout_yearly_days * BURNOUT_WARNING_RATIO {
        RiskBand::Medium
    } else {
        RiskBand::Low
    }
}

fn recommendations_for(anomalies: &[LeaveAnomaly], burnout_risk: RiskBand) -> Vec<String> {
    let mut recommendations = Vec::new();
    for anomaly in anomalies {
        let text = match anomaly.anomaly_type {
            LeaveAnomalyType::ExcessiveFrequency => {
                "Discuss leave frequency and underlying workload with the employee"
            }
            LeaveAnomalyType::LongDuration => {
                "Verify supporting documentation for extended leaves"
            }
            LeaveAnomalyType::MondayFridayPattern => {
                "Review weekend-adjacent leave requests for a recurring pattern"
            }
        };
        recommendations.push(text.to_string());
    }
    match burnout_risk {
        RiskBand::High => recommendations
            .push("Plan workload rebalancing and a wellbeing check-in".to_string()),
        RiskBand::Medium => {
            recommendations.push("Monitor leave usage over the next quarter".to_string())
        }
        RiskBand::Low => {}
    }
    recommendations
}

/// Analyzes one employee's leave patterns over the trailing year.
pub fn analyze_leave_patterns(
    snapshot: &EmployeeHistorySnapshot,
    config: &AnalyticsConfig,
) -> LeavePatternAnalysis {
    let year_start = snapshot.trailing_year_start();
    let leaves: Vec<&LeaveRecord> = snapshot
        .leaves
        .iter()
        .filter(|l| l.start_date >= year_start && l.start_date <= snapshot.as_of)
        .collect();

    let total_days: Decimal = leaves.iter().map(|l| l.days).sum();
    let leave_count = leaves.len();
    let frequency_per_month = leave_count as f64 / 12.0;
    let average_duration_days = if leave_count == 0 {
        0.0
    } else {
        total_days.to_f64().unwrap_or(0.0) / leave_count as f64
    };

    let mut type_totals: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for leave in &leaves {
        let entry = type_totals
            .entry(leave.leave_type.as_str())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += leave.days;
        entry.1 += 1;
    }
    let total_days_f64 = total_days.to_f64().unwrap_or(0.0);
    let by_type: Vec<LeaveTypeBreakdown> = type_totals
        .into_iter()
        .map(|(leave_type, (days, count))| LeaveTypeBreakdown {
            leave_type: leave_type.to_string(),
            total_days: days,
            count,
            percentage: if total_days_f64 > 0.0 {
                days.to_f64().unwrap_or(0.0) / total_days_f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let mut monthly_distribution: Vec<MonthlyLeaveBucket> = (1..=12)
        .map(|month| MonthlyLeaveBucket {
            month,
            total_days: Decimal::ZERO,
            count: 0,
        })
        .collect();
    for leave in &leaves {
        let bucket = &mut monthly_distribution[leave.start_date.month0() as usize];
        bucket.total_days += leave.days;
        bucket.count += 1;
    }

    let anomalies = detect_anomalies(&leaves, frequency_per_month, config);
    let burnout_risk = burnout_band(total_days_f64, config.leave.burnout_yearly_days);
    let recommendations = recommendations_for(&anomalies, burnout_risk);

    LeavePatternAnalysis {
        employee_id: snapshot.profile.id.clone(),
        employee_name: snapshot.profile.name.clone(),
        total_days,
        leave_count,
        frequency_per_month,
        average_duration_days,
        by_type,
        monthly_distribution,
        anomalies,
        burnout_risk,
        recommendations,
        generated_on: snapshot.as_of,
    }
}
