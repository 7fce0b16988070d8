//! The injected history-fetch capability.
//!
//! The original system gave every analyzer its own data-access client; here
//! the dashboard receives one [`HistoryProvider`] so tests can supply
//! in-memory fixtures and production can wire the data store.

use std::future::Future;

use crate::error::EngineResult;
use crate::models::EmployeeHistorySnapshot;

use super::types::{DateRange, RecruitmentFunnelMetrics};

/// Supplies history snapshots and recruitment metrics per query.
///
/// Implementations should anchor each returned snapshot's `as_of` at the end
/// of the requested window so trailing-window arithmetic lines up with the
/// query. Missing or empty collections are fine; analyzers tolerate them.
pub trait HistoryProvider: Send + Sync {
    /// Fetches one employee's snapshot, or `None` if the employee is unknown.
    fn employee_snapshot(
        &self,
        employee_id: &str,
        window: &DateRange,
    ) -> impl Future<Output = EngineResult<Option<EmployeeHistorySnapshot>>> + Send;

    /// Fetches all snapshots for one department, or `None` if the department
    /// is unknown. An existing department with no employees returns an empty
    /// vector.
    fn department_snapshots(
        &self,
        department_id: &str,
        window: &DateRange,
    ) -> impl Future<Output = EngineResult<Option<Vec<EmployeeHistorySnapshot>>>> + Send;

    /// Fetches snapshots for the whole workforce.
    fn workforce_snapshots(
        &self,
        window: &DateRange,
    ) -> impl Future<Output = EngineResult<Vec<EmployeeHistorySnapshot>>> + Send;

    /// Fetches recruitment funnel metrics for the window from the
    /// recruitment collaborator.
    fn recruitment_funnel(
        &self,
        window: &DateRange,
    ) -> impl Future<Output = EngineResult<RecruitmentFunnelMetrics>> + Send;
}
