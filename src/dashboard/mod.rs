//! Dashboard aggregation for the People Analytics Engine.
//!
//! This module composes the individual analyzers into one dashboard report
//! for a requested scope and window, fanned out concurrently over an
//! injected [`HistoryProvider`].

mod aggregator;
mod provider;
mod types;

pub use aggregator::{DEFAULT_SECTION_TIMEOUT, DashboardAggregator};
pub use provider::HistoryProvider;
pub use types::{
    AlertType, AttendanceMetrics, AttritionMetrics, DashboardAnalytics, DashboardScope, DateRange,
    LeaveMetrics, RecruitmentFunnelMetrics, ReportingPeriod, SystemAlert, TrendPoint, TrendSeries,
    WorkforceOverview,
};
