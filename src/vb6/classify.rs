//! Line Classification
//!
//! Core classification logic for logical VB6 lines. Rules are evaluated top to bottom and the
//! first match wins:
//!
//! 1. blank line
//! 2. `'!` module doc line
//! 3. `'*` member doc line
//! 4. `'# Interface` marker
//! 5. any other comment (`'` or `Rem`)
//! 6. `End Function|Sub|Property|Enum|Type`
//! 7. a declaration line
//! 8. a procedure header the declaration patterns reject
//! 9. anything else (executable code, attributes, form designer blocks)
//!
//! Classification is context free. Whether a line is inside a procedure body is the
//! scanner's business.
use super::declaration::Declaration;
use super::patterns;
use super::signature::match_declaration;
use super::tokens::strip_comment;
use serde::Serialize;

/// Blocks closed by an `End` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Function,
    Sub,
    Property,
    Enum,
    Type,
}

impl BlockKind {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "function" => Some(BlockKind::Function),
            "sub" => Some(BlockKind::Sub),
            "property" => Some(BlockKind::Property),
            "enum" => Some(BlockKind::Enum),
            "type" => Some(BlockKind::Type),
            _ => None,
        }
    }
}

/// Classification of one logical line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    Blank,
    /// Text after `'!`
    ModuleDoc(&'a str),
    /// Text after `'*`
    MemberDoc(&'a str),
    InterfaceMarker,
    Comment,
    EndBlock(BlockKind),
    Declaration(Declaration),
    /// Opens a procedure body without a recognizable signature
    ProcedureStart(BlockKind),
    Other,
}

/// Determine the kind of a logical line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if let Some(text) = capture_text(&patterns::MODULE_DOC, line) {
        return LineKind::ModuleDoc(text);
    }
    if let Some(text) = capture_text(&patterns::MEMBER_DOC, line) {
        return LineKind::MemberDoc(text);
    }
    if patterns::INTERFACE_MARKER.is_match(line) {
        return LineKind::InterfaceMarker;
    }
    if patterns::COMMENT.is_match(line) {
        return LineKind::Comment;
    }

    let code = strip_comment(line);
    if let Some(kind) = end_block(code) {
        return LineKind::EndBlock(kind);
    }
    if let Some(decl) = match_declaration(code) {
        return LineKind::Declaration(decl);
    }
    match procedure_start(code) {
        Some(kind) => LineKind::ProcedureStart(kind),
        None => LineKind::Other,
    }
}

fn procedure_start(code: &str) -> Option<BlockKind> {
    let caps = patterns::PROCEDURE_OPEN.captures(code)?;
    BlockKind::from_keyword(&caps["kind"])
}

/// Check if the code part of a line closes a block
pub fn end_block(code: &str) -> Option<BlockKind> {
    let caps = patterns::END_BLOCK.captures(code)?;
    BlockKind::from_keyword(&caps["kind"])
}

fn capture_text<'a>(pattern: &regex::Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.name("text"))
        .map(|m| m.as_str())
}
