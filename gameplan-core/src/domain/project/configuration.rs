// gameplan-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::issue::Severity;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    #[validate(nested)]
    pub validation: ValidationSettings,

    #[serde(default)]
    #[validate(nested)]
    pub rules: RuleSettings,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            validation: ValidationSettings::default(),
            rules: RuleSettings::default(),
        }
    }
}

/// Batch-level knobs. None of them change which issues are produced,
/// except `unlinked_campaign_severity`.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ValidationSettings {
    #[serde(default = "default_chunk_size")]
    #[validate(range(min = 1, message = "chunk_size must be at least 1"))]
    pub chunk_size: usize,

    #[serde(default = "default_report_limit")]
    #[validate(range(min = 1, message = "report_limit must be at least 1"))]
    pub report_limit: usize,

    /// Spreadsheet row number of the first data line (header is row 1).
    #[serde(default = "default_first_data_row")]
    pub first_data_row: usize,

    #[serde(default = "default_unlinked_severity")]
    pub unlinked_campaign_severity: Severity,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            report_limit: default_report_limit(),
            first_data_row: default_first_data_row(),
            unlinked_campaign_severity: default_unlinked_severity(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct RuleSettings {
    /// Subtypes whose TV demographics are mandatory.
    #[serde(default = "default_broadcast_subtypes")]
    pub broadcast_subtypes: Vec<String>,

    #[serde(default = "default_tv_media")]
    pub tv_media: Vec<String>,

    #[serde(default = "default_digital_media")]
    pub digital_media: Vec<String>,

    #[serde(default = "default_affirmative_values")]
    #[validate(length(min = 1, message = "at least one affirmative value is required"))]
    pub affirmative_values: Vec<String>,

    #[serde(default = "default_negative_values")]
    pub negative_values: Vec<String>,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            broadcast_subtypes: default_broadcast_subtypes(),
            tv_media: default_tv_media(),
            digital_media: default_digital_media(),
            affirmative_values: default_affirmative_values(),
            negative_values: default_negative_values(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_name() -> String {
    "gameplan".to_string()
}
fn default_chunk_size() -> usize {
    500
}
fn default_report_limit() -> usize {
    1000
}
fn default_first_data_row() -> usize {
    2
}
fn default_unlinked_severity() -> Severity {
    Severity::Critical
}
fn default_broadcast_subtypes() -> Vec<String> {
    strings(&["Open TV", "Paytv"])
}
fn default_tv_media() -> Vec<String> {
    strings(&["TV", "Television"])
}
fn default_digital_media() -> Vec<String> {
    strings(&["Digital"])
}
fn default_affirmative_values() -> Vec<String> {
    strings(&["yes", "y", "true", "1"])
}
fn default_negative_values() -> Vec<String> {
    strings(&["no", "n", "false", "0"])
}
