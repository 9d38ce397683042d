//! Module pre-scan
//!
//! The synthesized class header comes first in the output, but what it needs can be spread
//! over the whole module: `'!` lines, the `VB_Name` attribute, `Implements` and the
//! interface marker. [`ModuleHeader::scan`] collects them in one pass before filtering.

use super::patterns;
use super::source::{ModuleKind, SourceUnit};
use super::tokens::strip_comment;
use serde::Serialize;

/// Name used when a module carries no `Attribute VB_Name`
pub const DEFAULT_MODULE_NAME: &str = "DummyName";

/// Everything the synthesized module header is built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleHeader {
    pub kind: ModuleKind,
    pub name: String,
    /// Text of every `'!` line, in source order
    pub doc_lines: Vec<String>,
    pub is_interface: bool,
    pub implements: Option<String>,
}

impl ModuleHeader {
    /// Scan a source unit. The first `VB_Name` and `Implements` win.
    ///
    /// The interface marker and `Implements` only count in class and form modules.
    pub fn scan(unit: &SourceUnit) -> Self {
        let object_module = matches!(unit.kind(), ModuleKind::Class | ModuleKind::Form);
        let mut header = ModuleHeader {
            kind: unit.kind(),
            name: DEFAULT_MODULE_NAME.to_string(),
            doc_lines: Vec::new(),
            is_interface: false,
            implements: None,
        };
        let mut name_found = false;

        for line in unit.logical_lines() {
            if let Some(caps) = patterns::MODULE_DOC.captures(&line) {
                header.doc_lines.push(caps["text"].to_string());
                continue;
            }
            if patterns::INTERFACE_MARKER.is_match(&line) {
                if !object_module {
                    tracing::debug!(module = %header.name, "interface marker ignored outside a class");
                    continue;
                }
                if !header.is_interface {
                    tracing::debug!(module = %header.name, "interface marker found");
                }
                header.is_interface = true;
                continue;
            }
            let code = strip_comment(&line);
            if !name_found {
                if let Some(caps) = patterns::VB_NAME.captures(code) {
                    header.name = caps["name"].to_string();
                    name_found = true;
                    continue;
                }
            }
            if object_module && header.implements.is_none() {
                if let Some(caps) = patterns::IMPLEMENTS.captures(code) {
                    header.implements = Some(caps["name"].to_string());
                }
            }
        }
        header
    }

    /// Namespace wrapping the class, one per module kind
    pub fn namespace(&self) -> &'static str {
        match self.kind {
            ModuleKind::Standard => "Standard",
            ModuleKind::Class => "Class",
            ModuleKind::Form => "Form",
        }
    }
}
