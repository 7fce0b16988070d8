//! Attrition risk scoring.
//!
//! Combines six weighted risk factors per employee into one composite score
//! in [0,100] with a risk level and retention recommendations. Each factor
//! function reads a narrow slice of the history snapshot and follows the
//! factor contract: pure, never failing, neutral on insufficient data.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::{
    AttendanceRecord, AttendanceStatus, EmployeeHistorySnapshot, EmployeeProfile, Goal, GoalStatus,
    LeaveRecord, PayrollRecord, PerformanceReview,
};

use super::risk_factor::{FactorImpact, RiskFactor, clamp_score};

/// Tenure below this many months carries elevated attrition risk.
pub const TENURE_EARLY_MONTHS: f64 = 6.0;

/// Tenure above this many months carries mildly elevated attrition risk.
pub const TENURE_VETERAN_MONTHS: f64 = 60.0;

/// Neutral value for the salary-growth factor when growth cannot be computed.
///
/// Deliberately higher than the generic neutral 50: unknown salary growth is
/// a mild risk signal in its own right.
pub const UNKNOWN_SALARY_GROWTH_RISK: f64 = 60.0;

const FACTOR_PERFORMANCE: &str = "Performance Rating";
const FACTOR_ATTENDANCE: &str = "Attendance";
const FACTOR_LEAVE_FREQUENCY: &str = "Leave Frequency";
const FACTOR_TENURE: &str = "Tenure";
const FACTOR_SALARY_GROWTH: &str = "Salary Growth";
const FACTOR_GOAL_COMPLETION: &str = "Goal Completion";

/// Composite attrition risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Composite score below 40.
    Low,
    /// Composite score in [40,60).
    Medium,
    /// Composite score in [60,80).
    High,
    /// Composite score of 80 or above.
    Critical,
}

impl RiskLevel {
    /// Classifies a composite score.
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            RiskLevel::Low
        } else if score < 60.0 {
            RiskLevel::Medium
        } else if score < 80.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// Composite attrition risk score for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttritionRiskScore {
    /// The scored employee's id.
    pub employee_id: String,
    /// The scored employee's display name.
    pub employee_name: String,
    /// The scored employee's department.
    pub department: String,
    /// Composite score in [0,100]; higher is worse.
    pub risk_score: f64,
    /// Classification of the composite score.
    pub risk_level: RiskLevel,
    /// The six weighted factors, in scoring order.
    pub factors: Vec<RiskFactor>,
    /// Retention recommendations derived from negative factors and level.
    pub recommendations: Vec<String>,
    /// The snapshot date the score was derived from.
    pub generated_on: NaiveDate,
}

/// Post-hoc filter for batch scoring.
///
/// All supplied criteria must match; absent criteria match everything, so the
/// level filter and the score-range filters compose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreFilter {
    /// Keep only scores at exactly this risk level.
    pub risk_level: Option<RiskLevel>,
    /// Keep only scores at or above this value.
    pub min_risk_score: Option<f64>,
    /// Keep only scores at or below this value.
    pub max_risk_score: Option<f64>,
}

impl ScoreFilter {
    /// Returns true if the score passes every supplied criterion.
    pub fn matches(&self, score: &AttritionRiskScore) -> bool {
        if self.risk_level.is_some_and(|level| level != score.risk_level) {
            return false;
        }
        if self.min_risk_score.is_some_and(|min| score.risk_score < min) {
            return false;
        }
        if self.max_risk_score.is_some_and(|max| score.risk_score > max) {
            return false;
        }
        true
    }
}

/// Performance factor: risk from the single most recent review rating.
///
/// `risk = (5 − latest rating) × 25`. No reviews yields the neutral 50.
pub fn performance_factor(reviews: &[PerformanceReview], weight: f64) -> RiskFactor {
    let Some(latest) = reviews.iter().max_by_key(|r| r.created_at) else {
        return RiskFactor::insufficient(FACTOR_PERFORMANCE, weight, "no performance reviews");
    };

    let risk = (5.0 - latest.overall_rating) * 25.0;
    RiskFactor::scored(
        FACTOR_PERFORMANCE,
        weight,
        risk,
        format!("Latest review rating {:.1}/5", latest.overall_rating),
        serde_json::json!({
            "latest_rating": latest.overall_rating,
            "period": latest.period,
        }),
    )
}

/// Attendance factor: risk from presence and punctuality over the window.
///
/// `risk = max(0, 100 − present rate) + 0.5 × late rate`. Late days count
/// toward the present rate *and* feed the late penalty — the double counting
/// of the source system, reproduced as-is. No records yields the neutral 50.
pub fn attendance_factor(records: &[AttendanceRecord], weight: f64) -> RiskFactor {
    if records.is_empty() {
        return RiskFactor::insufficient(FACTOR_ATTENDANCE, weight, "no attendance records");
    }

    let total = records.len() as f64;
    let present = records
        .iter()
        .filter(|r| r.status != AttendanceStatus::Absent)
        .count() as f64;
    let late = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Late)
        .count() as f64;

    let present_rate = present / total * 100.0;
    let late_rate = late / total * 100.0;
    let risk = (100.0 - present_rate).max(0.0) + 0.5 * late_rate;

    RiskFactor::scored(
        FACTOR_ATTENDANCE,
        weight,
        risk,
        format!("Present rate {present_rate:.1}%, late rate {late_rate:.1}%"),
        serde_json::json!({
            "total_days": records.len(),
            "present_rate": present_rate,
            "late_rate": late_rate,
        }),
    )
}

/// Leave-frequency factor: risk from leaves taken in the trailing 12 months.
///
/// `risk = min(100, (leaves per month / excessive threshold) × 50)`, so usage
/// at the threshold scores the midpoint 50. An empty leave history yields the
/// neutral 50; a present-but-quiet history scores low.
pub fn leave_frequency_factor(
    leaves: &[LeaveRecord],
    as_of: NaiveDate,
    excessive_monthly_frequency: f64,
    weight: f64,
) -> RiskFactor {
    if leaves.is_empty() {
        return RiskFactor::insufficient(FACTOR_LEAVE_FREQUENCY, weight, "no leave records");
    }

    let year_start = as_of
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);
    let count = leaves
        .iter()
        .filter(|l| l.start_date >= year_start && l.start_date <= as_of)
        .count();
    let per_month = count as f64 / 12.0;
    let risk = (per_month / excessive_monthly_frequency * 50.0).min(100.0);

    RiskFactor::scored(
        FACTOR_LEAVE_FREQUENCY,
        weight,
        risk,
        format!("{count} leaves in the trailing year ({per_month:.2}/month)"),
        serde_json::json!({
            "leaves_in_year": count,
            "per_month": per_month,
            "threshold_per_month": excessive_monthly_frequency,
        }),
    )
}

/// Tenure factor: U-shaped risk over months of service.
///
/// Under 6 months scores 70, over 60 months scores 40, everything between
/// scores 20 — both very new and very long-tenured employees carry elevated
/// risk. An unrecorded join date yields the neutral 50.
pub fn tenure_factor(profile: &EmployeeProfile, as_of: NaiveDate, weight: f64) -> RiskFactor {
    let Some(months) = profile.tenure_months(as_of) else {
        return RiskFactor::insufficient(FACTOR_TENURE, weight, "join date not recorded");
    };

    let risk = if months < TENURE_EARLY_MONTHS {
        70.0
    } else if months > TENURE_VETERAN_MONTHS {
        40.0
    } else {
        20.0
    };

    RiskFactor::scored(
        FACTOR_TENURE,
        weight,
        risk,
        format!("{months:.0} months of service"),
        serde_json::json!({ "tenure_months": months }),
    )
}

/// Salary-growth factor: risk from net-salary growth over the trailing year.
///
/// `risk = max(0, 50 − 2 × growth rate %)` using the oldest and newest of the
/// last 12 months of payroll. Fewer than two usable records yields 60, the
/// deliberately elevated unknown-growth neutral.
pub fn salary_growth_factor(payroll: &[PayrollRecord], as_of: NaiveDate, weight: f64) -> RiskFactor {
    let year_start = as_of
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);
    let windowed: Vec<&PayrollRecord> = payroll
        .iter()
        .filter(|p| p.created_at.date() >= year_start && p.created_at.date() <= as_of)
        .collect();

    if windowed.len() < 2 {
        return RiskFactor::neutral_at(
            FACTOR_SALARY_GROWTH,
            weight,
            UNKNOWN_SALARY_GROWTH_RISK,
            "fewer than 2 payroll records in the trailing year",
        );
    }

    let oldest = windowed.iter().min_by_key(|p| p.created_at);
    let newest = windowed.iter().max_by_key(|p| p.created_at);
    let (Some(oldest), Some(newest)) = (oldest, newest) else {
        return RiskFactor::neutral_at(
            FACTOR_SALARY_GROWTH,
            weight,
            UNKNOWN_SALARY_GROWTH_RISK,
            "fewer than 2 payroll records in the trailing year",
        );
    };

    let oldest_salary = oldest.net_salary.to_f64().unwrap_or(0.0);
    let newest_salary = newest.net_salary.to_f64().unwrap_or(0.0);
    if oldest_salary <= 0.0 {
        return RiskFactor::neutral_at(
            FACTOR_SALARY_GROWTH,
            weight,
            UNKNOWN_SALARY_GROWTH_RISK,
            "baseline salary unusable for growth computation",
        );
    }

    let growth_pct = (newest_salary - oldest_salary) / oldest_salary * 100.0;
    let risk = (50.0 - 2.0 * growth_pct).max(0.0);

    RiskFactor::scored(
        FACTOR_SALARY_GROWTH,
        weight,
        risk,
        format!("Net salary growth {growth_pct:.1}% over the trailing year"),
        serde_json::json!({
            "oldest_net_salary": oldest_salary,
            "newest_net_salary": newest_salary,
            "growth_pct": growth_pct,
        }),
    )
}

/// Goal-completion factor: risk as the complement of the completion rate.
///
/// `risk = 100 − completion rate %`. No goals yields the neutral 50.
pub fn goal_completion_factor(goals: &[Goal], weight: f64) -> RiskFactor {
    if goals.is_empty() {
        return RiskFactor::insufficient(FACTOR_GOAL_COMPLETION, weight, "no goals recorded");
    }

    let total = goals.len() as f64;
    let completed = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Completed)
        .count() as f64;
    let completion_rate = completed / total * 100.0;

    RiskFactor::scored(
        FACTOR_GOAL_COMPLETION,
        weight,
        100.0 - completion_rate,
        format!("{completion_rate:.0}% of goals completed"),
        serde_json::json!({
            "total_goals": goals.len(),
            "completed_goals": completed as usize,
            "completion_rate": completion_rate,
        }),
    )
}

fn recommendation_for(factor_name: &str) -> Option<&'static str> {
    match factor_name {
        FACTOR_PERFORMANCE => Some("Schedule a performance improvement plan with the employee"),
        FACTOR_ATTENDANCE => Some("Review attendance expectations and underlying causes"),
        FACTOR_LEAVE_FREQUENCY => Some("Discuss recent leave usage and workload"),
        FACTOR_TENURE => Some("Check in on role fit and growth path"),
        FACTOR_SALARY_GROWTH => Some("Review compensation against market benchmarks"),
        FACTOR_GOAL_COMPLETION => Some("Revisit goal scope and remove delivery blockers"),
        _ => None,
    }
}

/// Scores one employee's attrition risk from their history snapshot.
pub fn score_employee(
    snapshot: &EmployeeHistorySnapshot,
    config: &AnalyticsConfig,
) -> AttritionRiskScore {
    let weights = &config.attrition;
    let factors = vec![
        performance_factor(&snapshot.reviews, weights.performance_rating),
        attendance_factor(&snapshot.attendance, weights.attendance_score),
        leave_frequency_factor(
            &snapshot.leaves,
            snapshot.as_of,
            config.leave.excessive_monthly_frequency,
            weights.leave_frequency,
        ),
        tenure_factor(&snapshot.profile, snapshot.as_of, weights.tenure),
        salary_growth_factor(&snapshot.payroll, snapshot.as_of, weights.salary_growth),
        goal_completion_factor(&snapshot.goals, weights.goal_completion),
    ];

    let risk_score = clamp_score(factors.iter().map(RiskFactor::weighted_value).sum());
    let risk_level = RiskLevel::from_score(risk_score);

    let mut recommendations: Vec<String> = factors
        .iter()
        .filter(|f| f.impact == FactorImpact::Negative)
        .filter_map(|f| recommendation_for(&f.name))
        .map(String::from)
        .collect();
    if matches!(risk_level, RiskLevel::High | RiskLevel::Critical) {
        recommendations.push("Schedule a retention conversation as soon as possible".to_string());
    }

    AttritionRiskScore {
        employee_id: snapshot.profile.id.clone(),
        employee_name: snapshot.profile.name.clone(),
        department: snapshot.profile.department.clone(),
        risk_score,
        risk_level,
        factors,
        recommendations,
        generated_on: snapshot.as_of,
    }
}

/// Scores a batch of employees, applies the filter, and sorts by descending
/// score.
///
/// The sort is stable, so equal scores keep their original iteration order.
pub fn score_batch(
    snapshots: &[EmployeeHistorySnapshot],
    config: &AnalyticsConfig,
    filter: &ScoreFilter,
) -> Vec<AttritionRiskScore> {
    let mut scores: Vec<AttritionRiskScore> = snapshots
        .iter()
        .map(|snapshot| score_employee(snapshot, config))
        .filter(|score| filter.matches(score))
        .collect();
    scores.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scores
}
