mod cli;
mod json;

pub use cli::{print_plain_line, print_table};
pub use json::print_json;

use crate::model::Comparison;
use anyhow::Result;

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One colored line per component, emitted as results arrive
    Plain,
    /// Human-readable table format
    Table,
    /// JSON format for programmatic use
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(OutputFormat::Plain),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Use 'plain', 'table', or 'json'",
                s
            )),
        }
    }
}

/// Renders collected results in the given format.
///
/// Plain mode is normally streamed line by line via [`print_plain_line`];
/// this entry point covers the collected case as well.
pub fn print_results(results: &[Comparison], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            for result in results {
                print_plain_line(result);
            }
            Ok(())
        }
        OutputFormat::Table => print_table(results),
        OutputFormat::Json => print_json(results),
    }
}

/// Format results to a string for file output.
pub fn format_results_to_string(results: &[Comparison]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("plain").unwrap(), OutputFormat::Plain);
        assert_eq!(OutputFormat::from_str("Table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("yaml").is_err());
    }
}
