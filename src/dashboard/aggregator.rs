//! The dashboard aggregator.
//!
//! Fans out to every analyzer concurrently for a requested scope and window
//! and assembles one composite report plus system alerts. The eight section
//! computations are independent; each runs behind its own timeout, and a
//! section that fails or times out is omitted from the report and recorded in
//! `degraded_sections` without disturbing its siblings.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;
use tokio::time::{Timeout, error::Elapsed, timeout};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics::{
    RiskLevel, ScoreFilter, TeamPerformanceInsight, analyze_leave_patterns,
    analyze_team_performance, detect_attendance_anomalies, score_batch,
};
use crate::analytics::{AnomalySeverity, RiskBand};
use crate::config::AnalyticsConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::EmployeeHistorySnapshot;

use super::provider::HistoryProvider;
use super::types::{
    AlertType, AttendanceMetrics, AttritionMetrics, DashboardAnalytics, DashboardScope, DateRange,
    LeaveMetrics, RecruitmentFunnelMetrics, ReportingPeriod, SystemAlert, TrendPoint, TrendSeries,
    WorkforceOverview,
};

/// Default per-section deadline before a section is dropped as degraded.
pub const DEFAULT_SECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Generates composite dashboard reports over an injected history provider.
///
/// # Example
///
/// ```no_run
/// # async fn example<P: people_analytics::dashboard::HistoryProvider>(provider: std::sync::Arc<P>) {
/// use people_analytics::config::AnalyticsConfig;
/// use people_analytics::dashboard::{DashboardAggregator, DashboardScope, ReportingPeriod};
///
/// let aggregator = DashboardAggregator::new(provider, AnalyticsConfig::default());
/// let report = aggregator
///     .generate(DashboardScope::workforce(), ReportingPeriod::Month, None)
///     .await
///     .unwrap();
/// println!("{} alerts", report.alerts.len());
/// # }
/// ```
pub struct DashboardAggregator<P> {
    provider: Arc<P>,
    config: Arc<AnalyticsConfig>,
    section_timeout: Duration,
}

impl<P: HistoryProvider> DashboardAggregator<P> {
    /// Creates an aggregator over the given provider and configuration.
    pub fn new(provider: Arc<P>, config: AnalyticsConfig) -> Self {
        Self {
            provider,
            config: Arc::new(config),
            section_timeout: DEFAULT_SECTION_TIMEOUT,
        }
    }

    /// Overrides the per-section deadline.
    pub fn with_section_timeout(mut self, section_timeout: Duration) -> Self {
        self.section_timeout = section_timeout;
        self
    }

    /// Generates one dashboard report.
    ///
    /// When `window` is absent the period's default window ending today is
    /// used. An explicitly requested employee or department that does not
    /// exist fails the whole request with the matching NotFound error; any
    /// other section failure degrades only that section.
    pub async fn generate(
        &self,
        scope: DashboardScope,
        period: ReportingPeriod,
        window: Option<DateRange>,
    ) -> EngineResult<DashboardAnalytics> {
        let window = window.unwrap_or_else(|| period.window_ending(Utc::now().date_naive()));
        let report_id = Uuid::new_v4();
        info!(
            report_id = %report_id,
            department = scope.department_id.as_deref().unwrap_or("*"),
            employee = scope.employee_id.as_deref().unwrap_or("*"),
            window_start = %window.start,
            window_end = %window.end,
            "generating dashboard analytics"
        );

        // Resolve the scope up front so an unknown explicit entity fails the
        // whole request instead of degrading all eight sections.
        self.fetch_population(&scope, &window).await?;

        let (overview, attendance, leave, performance, recruitment, attrition, trends, alerts) = tokio::join!(
            self.bounded(self.overview_section(&scope, &window)),
            self.bounded(self.attendance_section(&scope, &window)),
            self.bounded(self.leave_section(&scope, &window)),
            self.bounded(self.performance_section(&scope, &window)),
            self.bounded(self.recruitment_section(&window)),
            self.bounded(self.attrition_section(&scope, &window)),
            self.bounded(self.trends_section(&scope, &window)),
            self.bounded(self.alerts_section(&scope, &window)),
        );

        let mut degraded_sections = Vec::new();
        let overview = section("overview", overview, &mut degraded_sections);
        let attendance = section("attendance", attendance, &mut degraded_sections);
        let leave = section("leave", leave, &mut degraded_sections);
        let performance = section("performance", performance, &mut degraded_sections);
        let recruitment = section("recruitment", recruitment, &mut degraded_sections);
        let attrition = section("attrition", attrition, &mut degraded_sections);
        let trends = section("trends", trends, &mut degraded_sections);
        let alerts = section("alerts", alerts, &mut degraded_sections).unwrap_or_default();

        if !degraded_sections.is_empty() {
            warn!(
                report_id = %report_id,
                degraded = degraded_sections.join(","),
                "dashboard generated with degraded sections"
            );
        }

        Ok(DashboardAnalytics {
            id: report_id,
            generated_at: Utc::now(),
            scope,
            period,
            window,
            overview,
            attendance,
            leave,
            performance,
            recruitment,
            attrition,
            trends,
            alerts,
            degraded_sections,
        })
    }

    fn bounded<F>(&self, future: F) -> Timeout<F>
    where
        F: Future,
    {
        timeout(self.section_timeout, future)
    }

    /// Fetches the population for the scope, each section independently.
    async fn fetch_population(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<Vec<EmployeeHistorySnapshot>> {
        if let Some(employee_id) = &scope.employee_id {
            let snapshot = self
                .provider
                .employee_snapshot(employee_id, window)
                .await?
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    id: employee_id.clone(),
                })?;
            return Ok(vec![snapshot]);
        }
        if let Some(department_id) = &scope.department_id {
            return self
                .provider
                .department_snapshots(department_id, window)
                .await?
                .ok_or_else(|| EngineError::DepartmentNotFound {
                    id: department_id.clone(),
                });
        }
        self.provider.workforce_snapshots(window).await
    }

    async fn overview_section(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<WorkforceOverview> {
        let population = self.fetch_population(scope, window).await?;
        Ok(compute_overview(&population, window))
    }

    async fn attendance_section(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<AttendanceMetrics> {
        let population = self.fetch_population(scope, window).await?;
        Ok(compute_attendance_metrics(&population, &self.config))
    }

    async fn leave_section(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<LeaveMetrics> {
        let population = self.fetch_population(scope, window).await?;
        Ok(compute_leave_metrics(&population, &self.config))
    }

    async fn performance_section(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<TeamPerformanceInsight> {
        let population = self.fetch_population(scope, window).await?;
        Ok(analyze_team_performance(&population, &self.config))
    }

    async fn recruitment_section(
        &self,
        window: &DateRange,
    ) -> EngineResult<RecruitmentFunnelMetrics> {
        self.provider.recruitment_funnel(window).await
    }

    async fn attrition_section(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<AttritionMetrics> {
        let population = self.fetch_population(scope, window).await?;
        Ok(compute_attrition_metrics(&population, &self.config))
    }

    async fn trends_section(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<TrendSeries> {
        let previous_window = window.previous();
        let current = self.fetch_population(scope, window).await?;
        let previous = self.fetch_population(scope, &previous_window).await?;

        let current_metrics = window_metrics(&current, window, &self.config);
        let previous_metrics = window_metrics(&previous, &previous_window, &self.config);

        let points = current_metrics
            .into_iter()
            .zip(previous_metrics)
            .map(|((metric, current), (_, previous))| TrendPoint {
                metric: metric.to_string(),
                current,
                previous,
                change_pct: if previous == 0.0 {
                    0.0
                } else {
                    (current - previous) / previous * 100.0
                },
            })
            .collect();

        Ok(TrendSeries {
            previous_window,
            points,
        })
    }

    async fn alerts_section(
        &self,
        scope: &DashboardScope,
        window: &DateRange,
    ) -> EngineResult<Vec<SystemAlert>> {
        let population = self.fetch_population(scope, window).await?;
        let scores = score_batch(&population, &self.config, &ScoreFilter::default());

        let affected: Vec<String> = scores
            .iter()
            .filter(|s| s.risk_level >= RiskLevel::High)
            .map(|s| s.employee_id.clone())
            .collect();
        if affected.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![SystemAlert {
            alert_type: AlertType::AttritionRisk,
            message: format!(
                "{} employee(s) at high or critical attrition risk",
                affected.len()
            ),
            employee_ids: affected,
            recommendations: vec![
                "Schedule retention conversations with the affected employees".to_string(),
                "Review compensation and growth paths for the affected employees".to_string(),
            ],
        }])
    }
}

fn section<T>(
    name: &str,
    outcome: Result<EngineResult<T>, Elapsed>,
    degraded: &mut Vec<String>,
) -> Option<T> {
    match outcome {
        Ok(Ok(value)) => Some(value),
        Ok(Err(error)) => {
            warn!(section = name, error = %error, "dashboard section failed");
            degraded.push(name.to_string());
            None
        }
        Err(_) => {
            warn!(section = name, "dashboard section timed out");
            degraded.push(name.to_string());
            None
        }
    }
}

fn compute_overview(
    population: &[EmployeeHistorySnapshot],
    window: &DateRange,
) -> WorkforceOverview {
    let headcount = population
        .iter()
        .filter(|s| s.profile.is_active_on(window.end))
        .count();
    let new_hires = population
        .iter()
        .filter(|s| s.profile.join_date.is_some_and(|d| window.contains(d)))
        .count();
    let departures = population
        .iter()
        .filter(|s| {
            s.profile
                .termination_date
                .is_some_and(|d| window.contains(d))
        })
        .count();
    let starting_headcount = population
        .iter()
        .filter(|s| s.profile.is_active_on(window.start))
        .count();
    let growth_rate_pct = if starting_headcount == 0 {
        0.0
    } else {
        (new_hires as f64 - departures as f64) / starting_headcount as f64 * 100.0
    };

    let tenures: Vec<f64> = population
        .iter()
        .filter(|s| s.profile.is_active_on(window.end))
        .filter_map(|s| s.profile.tenure_months(window.end))
        .collect();
    let average_tenure_months = if tenures.is_empty() {
        0.0
    } else {
        tenures.iter().sum::<f64>() / tenures.len() as f64
    };

    let mut department_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for snapshot in population {
        if snapshot.profile.is_active_on(window.end) {
            *department_distribution
                .entry(snapshot.profile.department.clone())
                .or_insert(0) += 1;
        }
    }

    WorkforceOverview {
        headcount,
        new_hires,
        departures,
        growth_rate_pct,
        average_tenure_months,
        department_distribution,
    }
}

fn compute_attendance_metrics(
    population: &[EmployeeHistorySnapshot],
    config: &AnalyticsConfig,
) -> AttendanceMetrics {
    let detections: Vec<_> = population
        .iter()
        .map(|s| detect_attendance_anomalies(s, config))
        .collect();
    let count = detections.len() as f64;
    if detections.is_empty() {
        return AttendanceMetrics {
            average_score: 0.0,
            average_late_rate: 0.0,
            average_absenteeism_rate: 0.0,
            employees_with_anomalies: 0,
            high_severity_count: 0,
        };
    }

    AttendanceMetrics {
        average_score: detections.iter().map(|d| d.attendance_score).sum::<f64>() / count,
        average_late_rate: detections.iter().map(|d| d.late_rate).sum::<f64>() / count,
        average_absenteeism_rate: detections
            .iter()
            .map(|d| d.absenteeism_rate)
            .sum::<f64>()
            / count,
        employees_with_anomalies: detections
            .iter()
            .filter(|d| !d.anomalies.is_empty())
            .count(),
        high_severity_count: detections
            .iter()
            .filter(|d| {
                d.anomalies
                    .iter()
                    .any(|a| a.severity == AnomalySeverity::High)
            })
            .count(),
    }
}

fn compute_leave_metrics(
    population: &[EmployeeHistorySnapshot],
    config: &AnalyticsConfig,
) -> LeaveMetrics {
    let analyses: Vec<_> = population
        .iter()
        .map(|s| analyze_leave_patterns(s, config))
        .collect();
    let total_days: Decimal = analyses.iter().map(|a| a.total_days).sum();
    let average_days_per_employee = if analyses.is_empty() {
        0.0
    } else {
        total_days.to_f64().unwrap_or(0.0) / analyses.len() as f64
    };

    LeaveMetrics {
        total_days,
        average_days_per_employee,
        high_burnout_risk_count: analyses
            .iter()
            .filter(|a| a.burnout_risk == RiskBand::High)
            .count(),
        anomaly_count: analyses.iter().map(|a| a.anomalies.len()).sum(),
    }
}

fn compute_attrition_metrics(
    population: &[EmployeeHistorySnapshot],
    config: &AnalyticsConfig,
) -> AttritionMetrics {
    let scores = score_batch(population, config, &ScoreFilter::default());
    let average_risk_score = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|s| s.risk_score).sum::<f64>() / scores.len() as f64
    };

    AttritionMetrics {
        average_risk_score,
        high_risk_count: scores
            .iter()
            .filter(|s| s.risk_level == RiskLevel::High)
            .count(),
        critical_risk_count: scores
            .iter()
            .filter(|s| s.risk_level == RiskLevel::Critical)
            .count(),
        scored_employees: scores.len(),
    }
}

/// Metric values compared period over period, in a fixed order.
fn window_metrics(
    population: &[EmployeeHistorySnapshot],
    window: &DateRange,
    config: &AnalyticsConfig,
) -> Vec<(&'static str, f64)> {
    let headcount = population
        .iter()
        .filter(|s| s.profile.is_active_on(window.end))
        .count() as f64;
    let attendance = compute_attendance_metrics(population, config);
    let leave = compute_leave_metrics(population, config);
    let performance = analyze_team_performance(population, config);

    vec![
        ("headcount", headcount),
        ("average_attendance_score", attendance.average_score),
        ("total_leave_days", leave.total_days.to_f64().unwrap_or(0.0)),
        ("average_rating", performance.average_rating),
    ]
}
