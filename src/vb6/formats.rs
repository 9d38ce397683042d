//! Output formats
//!
//! `csharp` is what Doxygen reads. `json` and `yaml` dump the scanner's [`ModuleReport`]
//! for inspecting how lines were classified.

use super::emit::EmitOptions;
use super::filter::filter_source;
use super::scanner::{collect_report, ModuleReport};
use super::source::SourceUnit;
use std::fmt;
use std::str::FromStr;

/// Error that can occur during rendering
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Unknown format name
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    CSharp,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::CSharp, OutputFormat::Json, OutputFormat::Yaml];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::CSharp => "csharp",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::CSharp => "C# declarations for Doxygen (default)",
            OutputFormat::Json => "classified declarations as JSON",
            OutputFormat::Yaml => "classified declarations as YAML",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormatError::FormatNotFound(s.to_string()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render a unit in the given format. C# output ends with a newline unless it is empty.
pub fn render(
    unit: &SourceUnit,
    format: OutputFormat,
    options: &EmitOptions,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::CSharp => {
            let mut text = filter_source(unit, options).join("\n");
            if !text.is_empty() {
                text.push('\n');
            }
            Ok(text)
        }
        OutputFormat::Json => to_json(&collect_report(unit)),
        OutputFormat::Yaml => to_yaml(&collect_report(unit)),
    }
}

fn to_json(report: &ModuleReport) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report)
        .map(|mut text| {
            text.push('\n');
            text
        })
        .map_err(|e| FormatError::SerializationError(e.to_string()))
}

fn to_yaml(report: &ModuleReport) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(|e| FormatError::SerializationError(e.to_string()))
}
