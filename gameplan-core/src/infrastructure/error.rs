// gameplan-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(gameplan::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(gameplan::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    // --- REPORTS / JSON ---
    #[error("JSON Error: {0}")]
    #[diagnostic(code(gameplan::infra::json))]
    JsonError(#[from] serde_json::Error),

    // --- UPLOADS / CSV ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(gameplan::infra::csv),
        help("The upload must be a comma-separated file with a header row.")
    )]
    CsvError(#[from] csv::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(gameplan::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid project configuration: {0}")]
    #[diagnostic(
        code(gameplan::infra::config_invalid),
        help("chunk_size and report_limit must be at least 1.")
    )]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Unsupported file format '{0}'")]
    #[diagnostic(
        code(gameplan::infra::format),
        help("Reference snapshots must be .json, .yaml or .yml files.")
    )]
    UnsupportedFormat(String),
}
