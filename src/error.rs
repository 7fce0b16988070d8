//! Error types for the People Analytics Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can surface at the engine boundary.
//!
//! Scoring arithmetic itself never fails: missing history resolves to
//! documented neutral defaults and divisions are guarded. Only configuration
//! loading, scope resolution, and data-source access produce errors.

use thiserror::Error;

/// The main error type for the People Analytics Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use people_analytics::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/analytics.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/analytics.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration values failed validation.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of what made the configuration invalid.
        message: String,
    },

    /// An explicitly requested employee does not exist.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was requested.
        id: String,
    },

    /// An explicitly requested department does not exist.
    #[error("Department not found: {id}")]
    DepartmentNotFound {
        /// The department id that was requested.
        id: String,
    },

    /// The history data source failed to supply records.
    #[error("Data source error: {message}")]
    DataSource {
        /// A description of the data-source failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/analytics.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/analytics.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "attrition weights sum to 0.9".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: attrition weights sum to 0.9"
        );
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            id: "emp_404".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: emp_404");
    }

    #[test]
    fn test_department_not_found_displays_id() {
        let error = EngineError::DepartmentNotFound {
            id: "dept_404".to_string(),
        };
        assert_eq!(error.to_string(), "Department not found: dept_404");
    }

    #[test]
    fn test_data_source_displays_message() {
        let error = EngineError::DataSource {
            message: "connection reset".to_string(),
        };
        assert_eq!(error.to_string(), "Data source error: connection reset");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_employee_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                id: "emp_404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_employee_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
