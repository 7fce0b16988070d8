//! Shared anomaly severity and risk band classifications.

use serde::{Deserialize, Serialize};

/// Severity of a flagged anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    /// Worth noting, no action required.
    Low,
    /// Should be reviewed by a manager.
    Medium,
    /// Needs prompt attention.
    High,
}

impl std::fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalySeverity::Low => write!(f, "Low"),
            AnomalySeverity::Medium => write!(f, "Medium"),
            AnomalySeverity::High => write!(f, "High"),
        }
    }
}

/// Three-level risk classification used for burnout and attendance risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Within normal bounds.
    Low,
    /// Elevated, worth monitoring.
    Medium,
    /// Outside normal bounds, needs intervention.
    High,
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Low => write!(f, "Low"),
            RiskBand::Medium => write!(f, "Medium"),
            RiskBand::High => write!(f, "High"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AnomalySeverity::High > AnomalySeverity::Medium);
        assert!(AnomalySeverity::Medium > AnomalySeverity::Low);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&AnomalySeverity::Medium).unwrap(),
            "\"medium\""
        );
        assert_eq!(serde_json::to_string(&RiskBand::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(AnomalySeverity::High.to_string(), "High");
        assert_eq!(RiskBand::Low.to_string(), "Low");
    }
}
