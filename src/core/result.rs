use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::batch::batch_id_from_kwargs;

pub const NO_SUITE_NAME: &str = "__no_expectation_suite_name__";
pub const NO_RUN_ID: &str = "__no_run_id__";
pub const NO_DATA_ASSET_NAME: &str = "__no_data_asset_name__";

/// Outcome record of one validation run, as handed over by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub statistics: ValidationStatistics,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStatistics {
    #[serde(default)]
    pub evaluated_expectations: u64,
    #[serde(default)]
    pub successful_expectations: u64,
    #[serde(default)]
    pub unsuccessful_expectations: Option<u64>,
    #[serde(default)]
    pub success_percent: Option<f64>,
}

impl ValidationResult {
    pub fn new(success: bool) -> Self {
        Self {
            success: Some(success),
            ..Self::default()
        }
    }

    pub fn with_statistics(mut self, evaluated: u64, successful: u64) -> Self {
        self.statistics.evaluated_expectations = evaluated;
        self.statistics.successful_expectations = successful;
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    pub fn with_run_id(self, run_id: &RunIdentifier) -> serde_json::Result<Self> {
        Ok(self.with_meta("run_id", run_id.to_json()?))
    }

    /// Absent success flag counts as a failed run.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false)
    }

    pub fn suite_name(&self) -> &str {
        self.meta
            .get("expectation_suite_name")
            .and_then(Value::as_str)
            .unwrap_or(NO_SUITE_NAME)
    }

    pub fn run_id(&self) -> Value {
        self.meta
            .get("run_id")
            .cloned()
            .unwrap_or_else(|| Value::String(NO_RUN_ID.to_string()))
    }

    /// Legacy `batch_kwargs` wins over `active_batch_definition`, even when it
    /// carries no asset name.
    pub fn data_asset_name(&self) -> &str {
        if let Some(kwargs) = self.meta.get("batch_kwargs") {
            return kwargs
                .get("data_asset_name")
                .and_then(Value::as_str)
                .unwrap_or(NO_DATA_ASSET_NAME);
        }
        self.meta
            .get("active_batch_definition")
            .and_then(|def| def.get("data_asset_name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(NO_DATA_ASSET_NAME)
    }

    pub fn batch_id(&self) -> String {
        match self.meta.get("batch_kwargs").and_then(Value::as_object) {
            Some(kwargs) => batch_id_from_kwargs(kwargs),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentifier {
    pub run_name: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub run_time: Option<OffsetDateTime>,
}

impl RunIdentifier {
    pub fn new(run_name: impl Into<String>, run_time: OffsetDateTime) -> Self {
        Self {
            run_name: Some(run_name.into()),
            run_time: Some(run_time),
        }
    }

    /// Fails when `run_time` has no RFC 3339 form (e.g. sub-minute offsets).
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
