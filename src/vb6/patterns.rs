//! Declaration patterns
//!
//! One anchored, case-insensitive regex per construct. Patterns are matched against the code
//! part of a logical line (trailing comments already stripped), so none of them has to deal
//! with comments. They are compiled once and shared.
//!
//! Naming follows the capture groups used by [`signature`](super::signature):
//!
//! ```text
//! access   Public | Private | Friend | Global
//! static   Static
//! name     the declared identifier, with an optional type suffix (`$ % & ! # @`)
//! args     raw text between the parentheses of a procedure
//! ret      return or declared type
//! arr      `()` / `(1 To 10)` array marker
//! value    constant value or enum member value
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

const ACCESS: &str = r"(?:(?P<access>Public|Private|Friend|Global)\s+)?(?:(?P<static>Static)\s+)?";

const STRING_LITERAL: &str = r#""(?:[^"]|"")*""#;

/// Identifier with an optional type-declaration character
const NAME: &str = r"(?P<name>\w+[$%&!#@]?)";

/// Argument list text: literals, one level of parentheses (array markers, calls in default
/// values) and the characters of simple expressions
const ARGS: &str = r#"(?P<args>(?:"(?:[^"]|"")*"|\((?:"(?:[^"]|"")*"|[^()"])*\)|[\w\s=,+\-*/.&#!@%$<>:])*)"#;

const RET_TYPE: &str = r"(?:\s*As\s+(?P<ret>[\w.]+)(?P<arr>\(\s*\))?)?";

fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).unwrap()
}

pub static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^\s*{ACCESS}Function\s+{NAME}\s*\({ARGS}\){RET_TYPE}\s*$"
    ))
});

pub static SUB: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{ACCESS}Sub\s+{NAME}\s*\({ARGS}\)\s*$")));

pub static PROPERTY_GET: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^\s*{ACCESS}Property\s+Get\s+{NAME}\s*\({ARGS}\){RET_TYPE}\s*$"
    ))
});

pub static PROPERTY_LET_SET: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^\s*{ACCESS}Property\s+(?P<mode>Let|Set)\s+{NAME}\s*\({ARGS}\)\s*$"
    ))
});

pub static ENUM: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{ACCESS}Enum\s+(?P<name>\w+)\s*$")));

pub static TYPE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{ACCESS}Type\s+(?P<name>\w+)\s*$")));

/// Module level data: `Dim`, `Const`, or an access keyword followed by a name.
///
/// The pattern alone also accepts a bare `Name`; callers require `scope` or `const`.
pub static VARIABLE: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^\s*(?:(?P<scope>Public|Private|Friend|Global|Static|Dim)\s+)?(?:(?P<const>Const)\s+)?(?P<name>\w+[$%&!#@]?)(?P<arr>\([^)]*\))?(?:\s+As\s+(?:New\s+)?(?P<ret>[\w.]+)(?:\s*\*\s*\d+)?)?(?:\s*=\s*(?P<value>.+?))?\s*$",
    )
});

/// One argument of a procedure, after the list was split on top-level commas
pub static ARGUMENT: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^\s*(?:(?P<optional>Optional)\s+)?(?:(?P<pass>ByVal|ByRef)\s+)?(?:(?P<param_array>ParamArray)\s+)?(?P<name>\w+[$%&!#@]?)(?P<arr>\(\s*\))?(?:\s+As\s+(?:New\s+)?(?P<ret>[\w.]+))?(?:\s*=\s*(?P<value>.+?))?\s*$",
    )
});

/// Enum member line: `Name` or `Name = value`, bracketed names allowed
pub static ENUM_MEMBER: Lazy<Regex> = Lazy::new(|| {
    compile(r"^\s*(?P<name>\[[^\]]+\]|\w+)(?:\s*=\s*(?P<value>.+?))?\s*$")
});

/// Field of a `Type` block
pub static TYPE_FIELD: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"^\s*(?P<name>\w+)(?P<arr>\([^)]*\))?(?:\s+As\s+(?:New\s+)?(?P<ret>[\w.]+)(?:\s*\*\s*\d+)?)?\s*$",
    )
});

/// Opening line of any procedure, whatever follows the name.
///
/// Used when the full signature patterns reject a header, so that the body is still skipped.
pub static PROCEDURE_OPEN: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"^\s*{ACCESS}(?P<kind>Function|Sub|Property)\s+(?:(?:Get|Let|Set)\s+)?{NAME}"
    ))
});

pub static END_BLOCK: Lazy<Regex> =
    Lazy::new(|| compile(r"^\s*End\s+(?P<kind>Function|Sub|Property|Enum|Type)\b"));

pub static MODULE_DOC: Lazy<Regex> = Lazy::new(|| compile(r"^\s*'!(?P<text>.*)$"));

pub static MEMBER_DOC: Lazy<Regex> = Lazy::new(|| compile(r"^\s*'\*(?P<text>.*)$"));

/// `'# Interface`; the marker word itself is case-sensitive like the rest of the markers
pub static INTERFACE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*'#\s*Interface\s*$").unwrap());

pub static COMMENT: Lazy<Regex> = Lazy::new(|| compile(r"^\s*(?:'|Rem(?:\s|$))"));

pub static VB_NAME: Lazy<Regex> =
    Lazy::new(|| compile(r#"^\s*Attribute\s+VB_Name\s*=\s*"(?P<name>\w+)""#));

pub static IMPLEMENTS: Lazy<Regex> =
    Lazy::new(|| compile(r"^\s*Implements\s+(?P<name>[\w.]+)\s*$"));

/// A whole string literal, used to decide whether a value needs re-escaping
pub static STRING_VALUE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^\s*{STRING_LITERAL}\s*$")));
