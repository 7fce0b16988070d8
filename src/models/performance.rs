//! Performance review and goal models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One periodic performance review for an employee.
///
/// Reviews are supplied newest-first by the caller; analyzers sort by
/// `created_at` defensively before trend comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    /// The review period label (e.g., "2025-Q1").
    pub period: String,
    /// Overall rating on a 0–5 scale.
    pub overall_rating: f64,
    /// Workflow state of the review, as recorded upstream.
    pub status: String,
    /// When the review was created.
    pub created_at: NaiveDateTime,
}

/// Progress state of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// No work recorded against the goal yet.
    NotStarted,
    /// Work is underway.
    InProgress,
    /// The goal has been achieved.
    Completed,
}

/// One goal assigned to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Short description of the goal.
    pub title: String,
    /// Progress state of the goal.
    pub status: GoalStatus,
    /// When the goal was created.
    pub created_at: NaiveDateTime,
}
