//! The shared weighted risk-factor primitive.
//!
//! Every attrition factor function produces one [`RiskFactor`]: a named,
//! weighted, 0–100 value (higher = worse) with a directional impact and a
//! human-readable description. The contract for factor functions is strict:
//! they never fail, they are pure, and empty or insufficient input yields the
//! documented neutral value with [`FactorImpact::Neutral`].

use serde::{Deserialize, Serialize};

/// The neutral value assigned when a factor cannot be computed from history.
pub const NEUTRAL_FACTOR_VALUE: f64 = 50.0;

/// Value at or above which a computed factor counts against the employee.
const NEGATIVE_IMPACT_FLOOR: f64 = 60.0;

/// Value at or below which a computed factor counts in the employee's favor.
const POSITIVE_IMPACT_CEILING: f64 = 40.0;

/// Clamps a score or percentage into the [0,100] range.
///
/// NaN collapses to the neutral 50 so downstream arithmetic never sees it.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return NEUTRAL_FACTOR_VALUE;
    }
    value.clamp(0.0, 100.0)
}

/// Direction in which a factor moves the composite risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    /// The factor reduces attrition risk.
    Positive,
    /// The factor raises attrition risk.
    Negative,
    /// The factor is inconclusive.
    Neutral,
}

impl FactorImpact {
    /// Classifies a computed factor value.
    ///
    /// Values of 60 and above read as negative, 40 and below as positive,
    /// anything between as neutral. Applies only to computed factors;
    /// insufficient-data factors are always neutral.
    pub fn from_value(value: f64) -> Self {
        if value >= NEGATIVE_IMPACT_FLOOR {
            FactorImpact::Negative
        } else if value <= POSITIVE_IMPACT_CEILING {
            FactorImpact::Positive
        } else {
            FactorImpact::Neutral
        }
    }
}

/// One weighted component of a composite risk score.
///
/// Produced fresh per scoring call and never persisted by the engine. The
/// `details` payload records the inputs that produced the value, in the same
/// spirit as an audit step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Display name of the factor.
    pub name: String,
    /// Weight of this factor in the composite, in [0,1].
    pub weight: f64,
    /// Factor value in [0,100]; higher is worse.
    pub value: f64,
    /// Direction in which this factor moves the composite.
    pub impact: FactorImpact,
    /// Human-readable explanation of the value.
    pub description: String,
    /// The inputs that produced the value.
    pub details: serde_json::Value,
}

impl RiskFactor {
    /// Creates a computed factor, clamping the value and classifying impact.
    pub fn scored(
        name: &str,
        weight: f64,
        value: f64,
        description: String,
        details: serde_json::Value,
    ) -> Self {
        let value = clamp_score(value);
        Self {
            name: name.to_string(),
            weight,
            value,
            impact: FactorImpact::from_value(value),
            description,
            details,
        }
    }

    /// Creates an insufficient-data factor at the standard neutral value.
    pub fn insufficient(name: &str, weight: f64, reason: &str) -> Self {
        Self::neutral_at(name, weight, NEUTRAL_FACTOR_VALUE, reason)
    }

    /// Creates an insufficient-data factor at a caller-chosen neutral value.
    ///
    /// The salary-growth factor uses 60 rather than 50: unknown growth is a
    /// mild risk signal, not a clean unknown. Impact stays neutral either way.
    pub fn neutral_at(name: &str, weight: f64, value: f64, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            weight,
            value: clamp_score(value),
            impact: FactorImpact::Neutral,
            description: format!("Insufficient data: {reason}"),
            details: serde_json::json!({ "insufficient_data": true }),
        }
    }

    /// The factor's contribution to the composite score.
    pub fn weighted_value(&self) -> f64 {
        self.value * self.weight
    }
}
