use serde::{Deserialize, Serialize};

use super::result::RunIdentifier;

/// Key under which the host stores a validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultIdentifier {
    ValidationResult {
        expectation_suite_name: String,
        run_id: RunIdentifier,
        batch_identifier: String,
    },
    Cloud {
        resource_type: String,
        cloud_id: Option<String>,
    },
    ExpectationSuite {
        expectation_suite_name: String,
    },
}

impl ResultIdentifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationResult { .. } => "ValidationResultIdentifier",
            Self::Cloud { .. } => "CloudIdentifier",
            Self::ExpectationSuite { .. } => "ExpectationSuiteIdentifier",
        }
    }

    /// Whether this identifies a stored validation result (local or cloud).
    pub fn is_validation_result(&self) -> bool {
        matches!(self, Self::ValidationResult { .. } | Self::Cloud { .. })
    }
}
