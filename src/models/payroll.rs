//! Payroll record model.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One processed payroll entry for an employee.
///
/// Entries are supplied newest-first by the caller; the salary-growth factor
/// selects oldest and newest by `created_at` regardless of ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Net salary paid for the period.
    pub net_salary: Decimal,
    /// When the payroll entry was created.
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_payroll_record() {
        let json = r#"{
            "net_salary": "5250.75",
            "created_at": "2025-03-31T00:00:00"
        }"#;

        let record: PayrollRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.net_salary, Decimal::new(525075, 2));
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = PayrollRecord {
            net_salary: Decimal::new(480000, 2),
            created_at: NaiveDateTime::parse_from_str("2025-02-28 00:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: PayrollRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
