//! Employee identity model.
//!
//! This module defines the EmployeeProfile struct carried at the head of
//! every history snapshot handed to the analytics engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity and employment dates for one employee.
///
/// The profile is the caller-owned identity slice of a history snapshot.
/// The analytics engine reads it for tenure arithmetic and for labelling
/// result objects; it never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The department the employee belongs to.
    pub department: String,
    /// The date the employee joined the organization, if recorded.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// The date employment ended, if it has.
    #[serde(default)]
    pub termination_date: Option<NaiveDate>,
}

impl EmployeeProfile {
    /// Returns true if the employee is active on the given date.
    ///
    /// An unrecorded join date is treated as joined-before-the-window; an
    /// unrecorded termination date means still employed.
    ///
    /// # Examples
    ///
    /// ```
    /// use people_analytics::models::EmployeeProfile;
    /// use chrono::NaiveDate;
    ///
    /// let profile = EmployeeProfile {
    ///     id: "emp_001".to_string(),
    ///     name: "Asha Rahman".to_string(),
    ///     department: "Engineering".to_string(),
    ///     join_date: NaiveDate::from_ymd_opt(2023, 6, 1),
    ///     termination_date: None,
    /// };
    /// assert!(profile.is_active_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    /// ```
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.join_date.is_none_or(|join| join <= date)
            && self.termination_date.is_none_or(|end| end > date)
    }

    /// Returns tenure in months as of the given date, if the join date is known.
    ///
    /// Uses the mean month length (30.44 days) so tenure thresholds behave
    /// consistently across month boundaries. Dates before the join date yield
    /// 0.0.
    pub fn tenure_months(&self, as_of: NaiveDate) -> Option<f64> {
        let join = self.join_date?;
        let days = (as_of - join).num_days();
        if days <= 0 {
            return Some(0.0);
        }
        Some(days as f64 / 30.44)
    }
}
