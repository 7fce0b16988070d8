//! Performance trend analysis and team aggregation.
//!
//! Derives a rating trend, goal-completion rate, strengths, gaps, and
//! recommendations from an employee's recent reviews and goals, and
//! aggregates per-employee results to team level.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::{EmployeeHistorySnapshot, GoalStatus, PerformanceReview};

/// Number of most-recent reviews considered for trend derivation.
pub const REVIEW_TREND_WINDOW: usize = 5;

/// Rating delta beyond which a trend counts as improving or declining.
pub const TREND_RATING_BAND: f64 = 0.2;

/// Goal completion percentage below which completion is flagged as a gap.
pub const LOW_GOAL_COMPLETION_PCT: f64 = 50.0;

/// Number of employees listed in the top/bottom performer rankings.
const RANKING_SIZE: usize = 3;

/// Direction of an employee's or team's rating movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    /// Rating rose by more than the trend band.
    Improving,
    /// Rating fell by more than the trend band.
    Declining,
    /// Rating moved within the trend band.
    Stable,
}

impl PerformanceTrend {
    /// Classifies a current-minus-previous rating delta.
    pub fn from_delta(delta: f64) -> Self {
        if delta > TREND_RATING_BAND {
            PerformanceTrend::Improving
        } else if delta < -TREND_RATING_BAND {
            PerformanceTrend::Declining
        } else {
            PerformanceTrend::Stable
        }
    }
}

/// Derived performance insight for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInsight {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Rating of the most recent review, or 0 if none exists.
    pub current_rating: f64,
    /// Rating of the second most recent review; equals `current_rating` when
    /// only one review exists.
    pub previous_rating: f64,
    /// Direction of the rating movement.
    pub trend: PerformanceTrend,
    /// Percentage of trailing-year goals completed, 0 if no goals.
    pub goal_completion_rate: f64,
    /// Rule-derived strengths.
    pub strengths: Vec<String>,
    /// Rule-derived gaps.
    pub gaps: Vec<String>,
    /// Trend- and threshold-keyed recommendations.
    pub recommendations: Vec<String>,
    /// The snapshot date the insight was derived from.
    pub generated_on: NaiveDate,
}

/// One entry in a team performer ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerRanking {
    /// The employee's id.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's current rating.
    pub current_rating: f64,
}

/// Team-level performance aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPerformanceInsight {
    /// Mean current rating over employees with at least one review.
    pub average_rating: f64,
    /// Mean current-minus-previous delta over employees with at least two
    /// reviews.
    pub average_rating_delta: f64,
    /// Classification of the mean delta.
    pub trend: PerformanceTrend,
    /// Up to three highest-rated employees.
    pub top_performers: Vec<PerformerRanking>,
    /// Up to three lowest-rated employees below the low-performance cutoff.
    pub needs_improvement: Vec<PerformerRanking>,
    /// Employees with at least one review.
    pub reviews_completed: usize,
    /// Employees with no review on file.
    pub pending_reviews: usize,
}

/// Returns (current, previous) ratings from the trend window, newest first.
fn rating_pair(reviews: &[PerformanceReview]) -> (Option<f64>, Option<f64>) {
    let mut recent: Vec<&PerformanceReview> = reviews.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(REVIEW_TREND_WINDOW);
    (
        recent.first().map(|r| r.overall_rating),
        recent.get(1).map(|r| r.overall_rating),
    )
}

/// Derives the performance insight for one employee.
pub fn analyze_performance(
    snapshot: &EmployeeHistorySnapshot,
    config: &AnalyticsConfig,
) -> PerformanceInsight {
    let thresholds = &config.performance;

    let (current, previous) = rating_pair(&snapshot.reviews);
    let current_rating = current.unwrap_or(0.0);
    let previous_rating = previous.unwrap_or(current_rating);
    let trend = PerformanceTrend::from_delta(current_rating - previous_rating);

    let year_start = snapshot.trailing_year_start();
    let recent_goals: Vec<_> = snapshot
        .goals
        .iter()
        .filter(|g| g.created_at.date() >= year_start && g.created_at.date() <= snapshot.as_of)
        .collect();
    let goal_completion_rate = if recent_goals.is_empty() {
        0.0
    } else {
        let completed = recent_goals
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .count();
        completed as f64 / recent_goals.len() as f64 * 100.0
    };

    let mut strengths = Vec::new();
    let mut gaps = Vec::new();

    if current_rating >= thresholds.high_rating {
        strengths.push("Consistently high review ratings".to_string());
    }
    if current_rating < thresholds.low_rating {
        gaps.push("Below-expectation review ratings".to_string());
    }
    if goal_completion_rate >= thresholds.goal_completion_target {
        strengths.push("Strong goal completion".to_string());
    }
    if goal_completion_rate < LOW_GOAL_COMPLETION_PCT {
        gaps.push("Low goal completion".to_string());
    }
    let not_started = recent_goals
        .iter()
        .filter(|g| g.status == GoalStatus::NotStarted)
        .count();
    if not_started > recent_goals.len() - not_started {
        gaps.push("Many goals not yet started".to_string());
    }

    let mut recommendations = Vec::new();
    if trend == PerformanceTrend::Declining {
        recommendations
            .push("Schedule a coaching conversation to address the rating decline".to_string());
    }
    if current_rating < thresholds.low_rating {
        recommendations.push("Put a performance improvement plan in place".to_string());
    }
    if goal_completion_rate < LOW_GOAL_COMPLETION_PCT {
        recommendations
            .push("Break goals into smaller milestones and review blockers".to_string());
    }
    if trend == PerformanceTrend::Improving && current_rating >= thresholds.high_rating {
        recommendations.push("Consider stretch assignments or a promotion review".to_string());
    }

    PerformanceInsight {
        employee_id: snapshot.profile.id.clone(),
        employee_name: snapshot.profile.name.clone(),
        current_rating,
        previous_rating,
        trend,
        goal_completion_rate,
        strengths,
        gaps,
        recommendations,
        generated_on: snapshot.as_of,
    }
}

/// Aggregates per-employee performance to team level.
///
/// Employees without reviews count as pending and are excluded from the
/// average and from both rankings; the team trend averages deltas only over
/// employees with at least two reviews.
pub fn analyze_team_performance(
    snapshots: &[EmployeeHistorySnapshot],
    config: &AnalyticsConfig,
) -> TeamPerformanceInsight {
    let mut reviewed: Vec<PerformerRanking> = Vec::new();
    let mut deltas: Vec<f64> = Vec::new();

    for snapshot in snapshots {
        let (current, previous) = rating_pair(&snapshot.reviews);
        let Some(current) = current else {
            continue;
        };
        reviewed.push(PerformerRanking {
            employee_id: snapshot.profile.id.clone(),
            employee_name: snapshot.profile.name.clone(),
            current_rating: current,
        });
        if let Some(previous) = previous {
            deltas.push(current - previous);
        }
    }

    let average_rating = if reviewed.is_empty() {
        0.0
    } else {
        reviewed.iter().map(|r| r.current_rating).sum::<f64>() / reviewed.len() as f64
    };
    let average_rating_delta = if deltas.is_empty() {
        0.0
    } else {
        deltas.iter().sum::<f64>() / deltas.len() as f64
    };

    let mut top_performers = reviewed.clone();
    top_performers.sort_by(|a, b| {
        b.current_rating
            .partial_cmp(&a.current_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_performers.truncate(RANKING_SIZE);

    let mut needs_improvement: Vec<PerformerRanking> = reviewed
        .iter()
        .filter(|r| r.current_rating < config.performance.low_rating)
        .cloned()
        .collect();
    needs_improvement.sort_by(|a, b| {
        a.current_rating
            .partial_cmp(&b.current_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    needs_improvement.truncate(RANKING_SIZE);

    TeamPerformanceInsight {
        average_rating,
        average_rating_delta,
        trend: PerformanceTrend::from_delta(average_rating_delta),
        top_performers,
        needs_improvement,
        reviews_completed: reviewed.len(),
        pending_reviews: snapshots.len() - reviewed.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeProfile, Goal};
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn snapshot(id: &str) -> EmployeeHistorySnapshot {
        EmployeeHistorySnapshot::new(
            EmployeeProfile {
                id: id.to_string(),
                name: format!("Employee {id}"),
                department: "Engineering".to_string(),
                join_date: date("2023-01-15").into(),
                termination_date: None,
            },
            date("2025-06-01"),
        )
    }

    fn review(rating: f64, created: &str) -> crate::models::PerformanceReview {
        crate::models::PerformanceReview {
            period: "2025-Q1".to_string(),
            overall_rating: rating,
            status: "completed".to_string(),
            created_at: datetime(created),
        }
    }

    fn goal(status: GoalStatus, created: &str) -> Goal {
        Goal {
            title: "goal".to_string(),
            status,
            created_at: datetime(created),
        }
    }

    #[test]
    fn test_trend_band_boundaries() {
        assert_eq!(PerformanceTrend::from_delta(0.21), PerformanceTrend::Improving);
        assert_eq!(PerformanceTrend::from_delta(0.2), PerformanceTrend::Stable);
        assert_eq!(PerformanceTrend::from_delta(-0.2), PerformanceTrend::Stable);
        assert_eq!(PerformanceTrend::from_delta(-0.21), PerformanceTrend::Declining);
    }

    #[test]
    fn test_trend_uses_two_most_recent_reviews() {
        let mut snap = snapshot("emp_001");
        snap.reviews = vec![
            review(3.0, "2024-10-01 09:00:00"),
            review(4.0, "2025-04-01 09:00:00"),
            review(2.0, "2024-04-01 09:00:00"),
        ];
        let insight = analyze_performance(&snap, &AnalyticsConfig::default());
        assert_eq!(insight.current_rating, 4.0);
        assert_eq!(insight.previous_rating, 3.0);
        assert_eq!(insight.trend, PerformanceTrend::Improving);
    }

    #[test]
    fn test_single_review_is_stable() {
        let mut snap = snapshot("emp_001");
        snap.reviews = vec![review(4.5, "2025-04-01 09:00:00")];
        let insight = analyze_performance(&snap, &AnalyticsConfig::default());
        assert_eq!(insight.previous_rating, insight.current_rating);
        assert_eq!(insight.trend, PerformanceTrend::Stable);
    }

    #[test]
    fn test_no_reviews_rates_zero() {
        let insight = analyze_performance(&snapshot("emp_001"), &AnalyticsConfig::default());
        assert_eq!(insight.current_rating, 0.0);
        assert_eq!(insight.trend, PerformanceTrend::Stable);
    }

    #[test]
    fn test_goal_completion_over_trailing_year() {
        let mut snap = snapshot("emp_001");
        snap.goals = vec![
            goal(GoalStatus::Completed, "2025-01-15 09:00:00"),
            goal(GoalStatus::InProgress, "2025-02-15 09:00:00"),
            // Outside the trailing year, ignored.
            goal(GoalStatus::NotStarted, "2023-02-15 09:00:00"),
        ];
        let insight = analyze_performance(&snap, &AnalyticsConfig::default());
        assert_eq!(insight.goal_completion_rate, 50.0);
    }

    #[test]
    fn test_high_rating_and_completion_are_strengths() {
        let mut snap = snapshot("emp_001");
        snap.reviews = vec![review(4.5, "2025-04-01 09:00:00")];
        snap.goals = vec![
            goal(GoalStatus::Completed, "2025-01-15 09:00:00"),
            goal(GoalStatus::Completed, "2025-02-15 09:00:00"),
            goal(GoalStatus::Completed, "2025-03-15 09:00:00"),
            goal(GoalStatus::Completed, "2025-04-15 09:00:00"),
            goal(GoalStatus::InProgress, "2025-05-15 09:00:00"),
        ];
        let insight = analyze_performance(&snap, &AnalyticsConfig::default());
        assert!(insight.strengths.iter().any(|s| s.contains("high review ratings")));
        assert!(insight.strengths.iter().any(|s| s.contains("goal completion")));
        assert!(insight.gaps.is_empty());
    }

    #[test]
    fn test_unstarted_goal_majority_is_a_gap() {
        let mut snap = snapshot("emp_001");
        snap.reviews = vec![review(3.5, "2025-04-01 09:00:00")];
        snap.goals = vec![
            goal(GoalStatus::NotStarted, "2025-01-15 09:00:00"),
            goal(GoalStatus::NotStarted, "2025-02-15 09:00:00"),
            goal(GoalStatus::Completed, "2025-03-15 09:00:00"),
        ];
        let insight = analyze_performance(&snap, &AnalyticsConfig::default());
        assert!(insight.gaps.iter().any(|g| g.contains("not yet started")));
    }

    #[test]
    fn test_declining_trend_recommends_coaching() {
        let mut snap = snapshot("emp_001");
        snap.reviews = vec![
            review(4.2, "2024-10-01 09:00:00"),
            review(3.1, "2025-04-01 09:00:00"),
        ];
        let insight = analyze_performance(&snap, &AnalyticsConfig::default());
        assert_eq!(insight.trend, PerformanceTrend::Declining);
        assert!(
            insight
                .recommendations
                .iter()
                .any(|r| r.contains("coaching conversation"))
        );
    }

    #[test]
    fn test_recommendations_compose_additively() {
        let mut snap = snapshot("emp_001");
        snap.reviews = vec![
            review(3.5, "2024-10-01 09:00:00"),
            review(2.0, "2025-04-01 09:00:00"),
        ];
        snap.goals = vec![
            goal(GoalStatus::NotStarted, "2025-01-15 09:00:00"),
            goal(GoalStatus::InProgress, "2025-02-15 09:00:00"),
        ];
        let insight = analyze_performance(&snap, &AnalyticsConfig::default());
        // Declining + below low rating + low goal completion.
        assert_eq!(insight.recommendations.len(), 3);
    }

    #[test]
    fn test_idempotent_analysis() {
        let mut snap = snapshot("emp_001");
        snap.reviews = vec![review(3.8, "2025-04-01 09:00:00")];
        let config = AnalyticsConfig::default();
        assert_eq!(
            analyze_performance(&snap, &config),
            analyze_performance(&snap, &config)
        );
    }

    // =========================================================================
    // Team aggregation
    // =========================================================================
    #[test]
    fn test_team_counts_unreviewed_as_pending_and_excludes_from_ranking() {
        let mut a = snapshot("emp_a");
        a.reviews = vec![review(4.0, "2025-04-01 09:00:00")];
        let mut b = snapshot("emp_b");
        b.reviews = vec![review(3.2, "2025-04-01 09:00:00")];
        let c = snapshot("emp_c");
        let d = snapshot("emp_d");

        let team = analyze_team_performance(&[a, b, c, d], &AnalyticsConfig::default());
        assert_eq!(team.reviews_completed, 2);
        assert_eq!(team.pending_reviews, 2);
        let ranked: Vec<&str> = team
            .top_performers
            .iter()
            .map(|r| r.employee_id.as_str())
            .collect();
        assert!(!ranked.contains(&"emp_c"));
        assert!(!ranked.contains(&"emp_d"));
        assert_eq!(team.average_rating, 3.6);
    }

    #[test]
    fn test_team_trend_averages_deltas_over_multi_review_employees() {
        let mut a = snapshot("emp_a");
        a.reviews = vec![
            review(3.0, "2024-10-01 09:00:00"),
            review(4.0, "2025-04-01 09:00:00"), // delta +1.0
        ];
        let mut b = snapshot("emp_b");
        b.reviews = vec![review(2.0, "2025-04-01 09:00:00")]; // single review, excluded

        let team = analyze_team_performance(&[a, b], &AnalyticsConfig::default());
        assert_eq!(team.average_rating_delta, 1.0);
        assert_eq!(team.trend, PerformanceTrend::Improving);
    }

    #[test]
    fn test_team_rankings() {
        let ratings = [("emp_a", 4.8), ("emp_b", 2.1), ("emp_c", 3.9), ("emp_d", 2.8)];
        let snapshots: Vec<EmployeeHistorySnapshot> = ratings
            .iter()
            .map(|(id, rating)| {
                let mut snap = snapshot(id);
                snap.reviews = vec![review(*rating, "2025-04-01 09:00:00")];
                snap
            })
            .collect();

        let team = analyze_team_performance(&snapshots, &AnalyticsConfig::default());
        assert_eq!(team.top_performers.len(), 3);
        assert_eq!(team.top_performers[0].employee_id, "emp_a");
        assert_eq!(team.top_performers[1].employee_id, "emp_c");

        // Only ratings below 3.0 qualify, lowest first.
        let needs: Vec<&str> = team
            .needs_improvement
            .iter()
            .map(|r| r.employee_id.as_str())
            .collect();
        assert_eq!(needs, vec!["emp_b", "emp_d"]);
    }

    #[test]
    fn test_empty_team() {
        let team = analyze_team_performance(&[], &AnalyticsConfig::default());
        assert_eq!(team.average_rating, 0.0);
        assert_eq!(team.trend, PerformanceTrend::Stable);
        assert!(team.top_performers.is_empty());
        assert_eq!(team.pending_reviews, 0);
    }
}
