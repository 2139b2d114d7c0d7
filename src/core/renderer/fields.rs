//! Values printed on a certificate

use super::error::RenderError;
use serde::Serialize;
use std::collections::BTreeMap;

/// The full set of values substituted into a template.
///
/// Every field is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValues {
    pub student_name: String,
    pub training_name: String,
    pub workload: String,
    /// Already formatted for printing
    pub completion_date: String,
    pub location: String,
    pub city: String,
}

impl FieldValues {
    /// Placeholder keys in template order
    pub const KEYS: [&'static str; 6] = [
        "studentName",
        "trainingName",
        "workload",
        "completionDate",
        "location",
        "city",
    ];

    fn values(&self) -> [&str; 6] {
        [
            &self.student_name,
            &self.training_name,
            &self.workload,
            &self.completion_date,
            &self.location,
            &self.city,
        ]
    }

    /// Names of the fields that are empty or whitespace
    pub fn missing(&self) -> Vec<&'static str> {
        Self::KEYS
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Fail with `IncompleteFieldSet` when any field is empty
    pub fn ensure_complete(&self) -> Result<(), RenderError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RenderError::IncompleteFieldSet { missing })
        }
    }

    /// Map of `{{key}}` placeholder to its value
    pub fn placeholders(&self) -> BTreeMap<String, String> {
        Self::KEYS
            .iter()
            .zip(self.values())
            .map(|(key, value)| (format!("{{{{{}}}}}", key), value.trim().to_string()))
            .collect()
    }
}
