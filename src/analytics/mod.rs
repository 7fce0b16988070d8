//! Analytics logic for the People Analytics Engine.
//!
//! This module contains the analyzers that derive insight from history
//! snapshots: the shared weighted risk-factor primitive, attrition risk
//! scoring, performance trend analysis with team aggregation, leave-pattern
//! and burnout analysis, and attendance anomaly detection. Every analyzer is
//! a pure function of a snapshot plus the analytics configuration.

mod anomaly;
mod attendance;
mod attrition;
mod leave_patterns;
mod performance;
mod risk_factor;

pub use anomaly::{AnomalySeverity, RiskBand};
pub use attendance::{
    ABSENTEEISM_RATE_THRESHOLD, AttendanceAnomaly, AttendanceAnomalyDetection,
    AttendanceAnomalyType, FREQUENT_LATE_RATE_THRESHOLD, IRREGULAR_HOURS_RATIO_THRESHOLD,
    LATE_PRESENCE_CREDIT, detect_attendance_anomalies,
};
pub use attrition::{
    AttritionRiskScore, RiskLevel, ScoreFilter, TENURE_EARLY_MONTHS, TENURE_VETERAN_MONTHS,
    UNKNOWN_SALARY_GROWTH_RISK, attendance_factor, goal_completion_factor, leave_frequency_factor,
    performance_factor, salary_growth_factor, score_batch, score_employee, tenure_factor,
};
pub use leave_patterns::{
    LONG_DURATION_HIGH_COUNT, LeaveAnomaly, LeaveAnomalyType, LeavePatternAnalysis,
    LeaveTypeBreakdown, MonthlyLeaveBucket, WEEKEND_PATTERN_RATIO, analyze_leave_patterns,
};
pub use performance::{
    PerformanceInsight, PerformanceTrend, PerformerRanking, REVIEW_TREND_WINDOW,
    TREND_RATING_BAND, TeamPerformanceInsight, analyze_performance, analyze_team_performance,
};
pub use risk_factor::{FactorImpact, NEUTRAL_FACTOR_VALUE, RiskFactor, clamp_score};
