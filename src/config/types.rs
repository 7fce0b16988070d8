//! Configuration types for the analytics engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! serde default mirroring the shipped `config/analytics.yaml`, so partial
//! files only override what they name.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Weights for the six attrition risk factors.
///
/// Each weight is in [0,1] and the six must sum to 1.0; the composite risk
/// score is the weight-blended sum of the factor values. Validation rejects
/// configurations whose weights do not sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttritionWeights {
    /// Weight of the latest-review performance factor.
    #[serde(default = "default_performance_rating_weight")]
    pub performance_rating: f64,
    /// Weight of the attendance factor.
    #[serde(default = "default_attendance_score_weight")]
    pub attendance_score: f64,
    /// Weight of the leave-frequency factor.
    #[serde(default = "default_leave_frequency_weight")]
    pub leave_frequency: f64,
    /// Weight of the tenure factor.
    #[serde(default = "default_tenure_weight")]
    pub tenure: f64,
    /// Weight of the salary-growth factor.
    #[serde(default = "default_salary_growth_weight")]
    pub salary_growth: f64,
    /// Weight of the goal-completion factor.
    #[serde(default = "default_goal_completion_weight")]
    pub goal_completion: f64,
}

fn default_performance_rating_weight() -> f64 {
    0.25
}
fn default_attendance_score_weight() -> f64 {
    0.20
}
fn default_leave_frequency_weight() -> f64 {
    0.15
}
fn default_tenure_weight() -> f64 {
    0.15
}
fn default_salary_growth_weight() -> f64 {
    0.15
}
fn default_goal_completion_weight() -> f64 {
    0.10
}

impl Default for AttritionWeights {
    fn default() -> Self {
        Self {
            performance_rating: default_performance_rating_weight(),
            attendance_score: default_attendance_score_weight(),
            leave_frequency: default_leave_frequency_weight(),
            tenure: default_tenure_weight(),
            salary_growth: default_salary_growth_weight(),
            goal_completion: default_goal_completion_weight(),
        }
    }
}

impl AttritionWeights {
    /// Returns the sum of the six weights.
    pub fn sum(&self) -> f64 {
        self.performance_rating
            + self.attendance_score
            + self.leave_frequency
            + self.tenure
            + self.salary_growth
            + self.goal_completion
    }
}

/// Attendance thresholds.
///
/// The minute/hour thresholds govern how the attendance capture layer
/// classifies clock-in/out events; they travel with the shared configuration
/// object so the whole backend reads one source of truth. The engine itself
/// consumes `window_days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceThresholds {
    /// Minutes after scheduled start before a day is marked late.
    #[serde(default = "default_late_minutes")]
    pub late_minutes: i64,
    /// Minutes before scheduled end that count as an early departure.
    #[serde(default = "default_early_departure_minutes")]
    pub early_departure_minutes: i64,
    /// Break minutes per day above which breaks are considered excessive.
    #[serde(default = "default_excessive_break_minutes")]
    pub excessive_break_minutes: i64,
    /// Minimum expected worked hours for a full day.
    #[serde(default = "default_minimum_work_hours")]
    pub minimum_work_hours: f64,
    /// Length of the rolling attendance analysis window, in days.
    #[serde(default = "default_attendance_window_days")]
    pub window_days: i64,
}

fn default_late_minutes() -> i64 {
    15
}
fn default_early_departure_minutes() -> i64 {
    30
}
fn default_excessive_break_minutes() -> i64 {
    90
}
fn default_minimum_work_hours() -> f64 {
    8.0
}
fn default_attendance_window_days() -> i64 {
    90
}

impl Default for AttendanceThresholds {
    fn default() -> Self {
        Self {
            late_minutes: default_late_minutes(),
            early_departure_minutes: default_early_departure_minutes(),
            excessive_break_minutes: default_excessive_break_minutes(),
            minimum_work_hours: default_minimum_work_hours(),
            window_days: default_attendance_window_days(),
        }
    }
}

/// Leave thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveThresholds {
    /// Monthly leave frequency above which usage is excessive.
    #[serde(default = "default_excessive_monthly_frequency")]
    pub excessive_monthly_frequency: f64,
    /// Day count above which a single leave is long-duration.
    #[serde(default = "default_long_duration_days")]
    pub long_duration_days: f64,
    /// Yearly leave days at which burnout risk becomes high.
    #[serde(default = "default_burnout_yearly_days")]
    pub burnout_yearly_days: f64,
}

fn default_excessive_monthly_frequency() -> f64 {
    2.0
}
fn default_long_duration_days() -> f64 {
    5.0
}
fn default_burnout_yearly_days() -> f64 {
    25.0
}

impl Default for LeaveThresholds {
    fn default() -> Self {
        Self {
            excessive_monthly_frequency: default_excessive_monthly_frequency(),
            long_duration_days: default_long_duration_days(),
            burnout_yearly_days: default_burnout_yearly_days(),
        }
    }
}

/// Performance thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceThresholds {
    /// Rating below which performance is a gap.
    #[serde(default = "default_low_rating")]
    pub low_rating: f64,
    /// Rating at or above which performance is a strength.
    #[serde(default = "default_high_rating")]
    pub high_rating: f64,
    /// Goal completion percentage at or above which completion is a strength.
    #[serde(default = "default_goal_completion_target")]
    pub goal_completion_target: f64,
}

fn default_low_rating() -> f64 {
    3.0
}
fn default_high_rating() -> f64 {
    4.0
}
fn default_goal_completion_target() -> f64 {
    80.0
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            low_rating: default_low_rating(),
            high_rating: default_high_rating(),
            goal_completion_target: default_goal_completion_target(),
        }
    }
}

/// The complete analytics configuration.
///
/// One instance is shared by every analyzer and the dashboard aggregator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Attrition factor weights.
    #[serde(default)]
    pub attrition: AttritionWeights,
    /// Attendance thresholds.
    #[serde(default)]
    pub attendance: AttendanceThresholds,
    /// Leave thresholds.
    #[serde(default)]
    pub leave: LeaveThresholds,
    /// Performance thresholds.
    #[serde(default)]
    pub performance: PerformanceThresholds,
}

/// Tolerance for the weight-sum check, covering f64 representation error.
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

impl AnalyticsConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the attrition weights do not
    /// sum to 1.0, if any weight is outside [0,1], or if any threshold is
    /// non-positive.
    pub fn validate(&self) -> EngineResult<()> {
        let weights = [
            ("performance_rating", self.attrition.performance_rating),
            ("attendance_score", self.attrition.attendance_score),
            ("leave_frequency", self.attrition.leave_frequency),
            ("tenure", self.attrition.tenure),
            ("salary_growth", self.attrition.salary_growth),
            ("goal_completion", self.attrition.goal_completion),
        ];
        for (name, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(EngineError::InvalidConfig {
                    message: format!("attrition weight '{name}' must be in [0,1], got {weight}"),
                });
            }
        }

        let sum = self.attrition.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(EngineError::InvalidConfig {
                message: format!("attrition weights must sum to 1.0, got {sum}"),
            });
        }

        if self.attendance.window_days <= 0 {
            return Err(EngineError::InvalidConfig {
                message: "attendance window_days must be positive".to_string(),
            });
        }
        if self.leave.excessive_monthly_frequency <= 0.0 {
            return Err(EngineError::InvalidConfig {
                message: "leave excessive_monthly_frequency must be positive".to_string(),
            });
        }
        if self.leave.burnout_yearly_days <= 0.0 {
            return Err(EngineError::InvalidConfig {
                message: "leave burnout_yearly_days must be positive".to_string(),
            });
        }
        if self.performance.low_rating > self.performance.high_rating {
            return Err(EngineError::InvalidConfig {
                message: "performance low_rating must not exceed high_rating".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_exactly_one() {
        let weights = AttritionWeights::default();
        assert_eq!(weights.sum(), 1.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_weights_not_summing_to_one() {
        let mut config = AnalyticsConfig::default();
        config.attrition.tenure = 0.30;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_weight() {
        let mut config = AnalyticsConfig::default();
        config.attrition.performance_rating = 1.25;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("performance_rating"));
    }

    #[test]
    fn test_validate_rejects_inverted_rating_cutoffs() {
        let mut config = AnalyticsConfig::default();
        config.performance.low_rating = 4.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_burnout_threshold() {
        let mut config = AnalyticsConfig::default();
        config.leave.burnout_yearly_days = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults_for_omitted_fields() {
        let yaml = r#"
leave:
  burnout_yearly_days: 30.0
"#;
        let config: AnalyticsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.leave.burnout_yearly_days, 30.0);
        assert_eq!(config.leave.long_duration_days, 5.0);
        assert_eq!(config.attrition.performance_rating, 0.25);
        assert_eq!(config.attendance.window_days, 90);
    }

    #[test]
    fn test_default_thresholds() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.attendance.late_minutes, 15);
        assert_eq!(config.attendance.early_departure_minutes, 30);
        assert_eq!(config.attendance.excessive_break_minutes, 90);
        assert_eq!(config.attendance.minimum_work_hours, 8.0);
        assert_eq!(config.leave.excessive_monthly_frequency, 2.0);
        assert_eq!(config.performance.low_rating, 3.0);
        assert_eq!(config.performance.high_rating, 4.0);
        assert_eq!(config.performance.goal_completion_target, 80.0);
    }
}
