//! Source loading
//!
//! This module provides [`SourceUnit`] - the text of one VB6 module together with its
//! [`ModuleKind`]. VB6 projects written on Japanese Windows are stored in Shift_JIS (code page
//! 932), so files are decoded with a configurable `encoding_rs` label instead of being read
//! as UTF-8.
//!
//! # Example
//!
//! ```rust,ignore
//! use doxyvb::vb6::source::{ModuleKind, SourceUnit};
//!
//! // From file, kind taken from the extension
//! let unit = SourceUnit::from_path("Calc.bas", "shift_jis").unwrap();
//!
//! // From string
//! let unit = SourceUnit::from_string("Public Sub Main()\nEnd Sub\n", ModuleKind::Standard);
//! ```

use super::tokens::{continues_on_next_line, strip_comment};
use encoding_rs::Encoding;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Error that can occur when loading sources
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// IO error when reading the file
    IoError(String),
    /// The encoding label is not known to encoding_rs
    UnknownEncoding(String),
    /// Unknown module kind name
    UnknownModuleKind(String),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::UnknownEncoding(label) => write!(f, "Unknown encoding '{}'", label),
            LoaderError::UnknownModuleKind(name) => {
                write!(f, "Unknown module kind '{}' (expected bas, cls or frm)", name)
            }
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

/// The three kinds of VB6 code modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    /// `.bas`
    Standard,
    /// `.cls`
    Class,
    /// `.frm`
    Form,
}

impl ModuleKind {
    /// Pick the kind from a file extension; anything unknown is a standard module
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match extension.as_str() {
            "cls" => ModuleKind::Class,
            "frm" => ModuleKind::Form,
            _ => ModuleKind::Standard,
        }
    }
}

impl FromStr for ModuleKind {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bas" | "standard" => Ok(ModuleKind::Standard),
            "cls" | "class" => Ok(ModuleKind::Class),
            "frm" | "form" => Ok(ModuleKind::Form),
            _ => Err(LoaderError::UnknownModuleKind(s.to_string())),
        }
    }
}

/// Resolve an encoding label. `cp932` is accepted as an alias of Shift_JIS.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, LoaderError> {
    if label.eq_ignore_ascii_case("cp932") {
        return Ok(encoding_rs::SHIFT_JIS);
    }
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| LoaderError::UnknownEncoding(label.to_string()))
}

/// The full text of one VB6 module
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    kind: ModuleKind,
    text: String,
}

impl SourceUnit {
    /// Build a unit from text. Line endings are normalized to `\n`.
    pub fn from_string<S: Into<String>>(text: S, kind: ModuleKind) -> Self {
        let text: String = text.into();
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text).replace("\r\n", "\n");
        SourceUnit { kind, text }
    }

    /// Decode raw bytes. A byte order mark overrides the given encoding.
    pub fn from_bytes(
        bytes: &[u8],
        kind: ModuleKind,
        encoding_label: &str,
    ) -> Result<Self, LoaderError> {
        let encoding = resolve_encoding(encoding_label)?;
        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            tracing::warn!(
                encoding = used.name(),
                "source contains bytes that are invalid in this encoding; they were replaced"
            );
        }
        Ok(Self::from_string(text.into_owned(), kind))
    }

    /// Load from a file path, module kind taken from the extension
    pub fn from_path<P: AsRef<Path>>(path: P, encoding_label: &str) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded source");
        Self::from_bytes(&bytes, ModuleKind::from_path(path), encoding_label)
    }

    /// Override the module kind
    pub fn with_kind(mut self, kind: ModuleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the unit has no non-blank line
    pub fn is_blank(&self) -> bool {
        self.text.lines().all(|line| line.trim().is_empty())
    }

    /// Iterate over logical lines, joining ` _` continuations
    pub fn logical_lines(&self) -> LogicalLines<'_> {
        LogicalLines {
            lines: self.text.lines(),
        }
    }
}

/// Iterator over logical lines of a [`SourceUnit`]
pub struct LogicalLines<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.lines.next()?;
        if !continues_on_next_line(first) {
            return Some(first.to_string());
        }

        let mut joined = without_continuation(first).to_string();
        for line in self.lines.by_ref() {
            joined.push(' ');
            if continues_on_next_line(line) {
                joined.push_str(without_continuation(line).trim_start());
            } else {
                joined.push_str(line.trim_start());
                break;
            }
        }
        Some(joined)
    }
}

/// Drop the trailing ` _` of a continued line
fn without_continuation(line: &str) -> &str {
    let code = strip_comment(line).trim_end();
    code.strip_suffix('_').unwrap_or(code).trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_kind_from_path() {
        assert_eq!(ModuleKind::from_path("a/Calc.BAS"), ModuleKind::Standard);
        assert_eq!(ModuleKind::from_path("Shape.cls"), ModuleKind::Class);
        assert_eq!(ModuleKind::from_path("Main.Frm"), ModuleKind::Form);
        assert_eq!(ModuleKind::from_path("README"), ModuleKind::Standard);
    }

    #[test]
    fn test_module_kind_from_str() {
        assert_eq!("cls".parse::<ModuleKind>(), Ok(ModuleKind::Class));
        assert_eq!("Form".parse::<ModuleKind>(), Ok(ModuleKind::Form));
        assert!("xls".parse::<ModuleKind>().is_err());
    }

    #[test]
    fn test_line_endings_and_bom() {
        let unit = SourceUnit::from_string("\u{feff}a\r\nb\r\n", ModuleKind::Standard);
        assert_eq!(unit.text(), "a\nb\n");
    }

    #[test]
    fn test_logical_lines_join_continuations() {
        let unit = SourceUnit::from_string(
            "Function F(a As Long, _\n           b As Long) _\n    As Long\nEnd Function\n",
            ModuleKind::Standard,
        );
        let lines: Vec<String> = unit.logical_lines().collect();
        assert_eq!(
            lines,
            vec!["Function F(a As Long, b As Long) As Long", "End Function"]
        );
    }

    #[test]
    fn test_logical_lines_continuation_at_eof() {
        let unit = SourceUnit::from_string("Dim x _", ModuleKind::Standard);
        let lines: Vec<String> = unit.logical_lines().collect();
        assert_eq!(lines, vec!["Dim x"]);
    }

    #[test]
    fn test_decode_shift_jis() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("'* 合計を返す\n");
        let unit = SourceUnit::from_bytes(&bytes, ModuleKind::Standard, "cp932").unwrap();
        assert_eq!(unit.text(), "'* 合計を返す\n");
    }

    #[test]
    fn test_unknown_encoding() {
        let err = SourceUnit::from_bytes(b"", ModuleKind::Standard, "klingon").unwrap_err();
        assert_eq!(err, LoaderError::UnknownEncoding("klingon".to_string()));
    }

    #[test]
    fn test_is_blank() {
        assert!(SourceUnit::from_string("\n  \n", ModuleKind::Standard).is_blank());
        assert!(!SourceUnit::from_string("x\n", ModuleKind::Standard).is_blank());
    }
}
