use anyhow::{Context, Result};
use clap::ValueEnum;

use retire_core::{CalculationResponse, ValidationIssue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable breakdown.
    #[default]
    Text,
    /// The response object as pretty-printed camelCase JSON.
    Json,
}

pub fn render_response(
    response: &CalculationResponse,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(response.to_string()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(response).context("cannot encode response as JSON")
        }
    }
}

/// One indented `field: message` line per issue, in validation order.
pub fn render_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|issue| format!("  {issue}\n")).collect()
}
