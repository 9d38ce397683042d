//! Declaration data model
//!
//! A [`Declaration`] is what the classifier extracts from one declaration line. It keeps VB
//! spellings (type names like `Integer`, literals like `&H10`); translating them into the
//! output syntax is the emitter's job.

use serde::Serialize;
use std::fmt;

/// The construct a declaration line introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    Function,
    Sub,
    PropertyGet,
    PropertyLet,
    PropertySet,
    Enum,
    Type,
    Constant,
    Variable,
}

impl DeclKind {
    /// Procedures own a body that is skipped up to the matching `End` line
    pub fn has_body(&self) -> bool {
        matches!(
            self,
            DeclKind::Function
                | DeclKind::Sub
                | DeclKind::PropertyGet
                | DeclKind::PropertyLet
                | DeclKind::PropertySet
        )
    }

    pub fn is_property(&self) -> bool {
        matches!(
            self,
            DeclKind::PropertyGet | DeclKind::PropertyLet | DeclKind::PropertySet
        )
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclKind::Function => "function",
            DeclKind::Sub => "sub",
            DeclKind::PropertyGet => "property-get",
            DeclKind::PropertyLet => "property-let",
            DeclKind::PropertySet => "property-set",
            DeclKind::Enum => "enum",
            DeclKind::Type => "type",
            DeclKind::Constant => "constant",
            DeclKind::Variable => "variable",
        };
        write!(f, "{}", name)
    }
}

/// Declared visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    Unspecified,
    Public,
    Private,
    /// VB's `Friend`, visible inside the project
    Friend,
}

impl Accessibility {
    /// Map a VB scope keyword. `Global` is an old spelling of `Public`, `Dim` is private.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "public" | "global" => Accessibility::Public,
            "private" | "dim" => Accessibility::Private,
            "friend" => Accessibility::Friend,
            _ => Accessibility::Unspecified,
        }
    }
}

/// A procedure argument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    /// VB type, `Variant` when undeclared, `[]` suffixed for arrays
    pub type_name: String,
    /// VB passes by reference unless `ByVal` is given
    pub by_ref: bool,
    pub optional: bool,
    pub param_array: bool,
    pub default_value: Option<String>,
    pub default_is_string: bool,
}

/// One declaration line, parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub kind: DeclKind,
    pub access: Accessibility,
    pub is_static: bool,
    pub name: String,
    /// Return type for functions and property getters, declared type for data and
    /// property setters (taken from the value argument). `None` for subs, enums and types.
    pub type_name: Option<String>,
    pub arguments: Vec<Argument>,
    /// Constant value, VB spelling. For string constants the unquoted text.
    pub value: Option<String>,
    pub value_is_string: bool,
}

impl Declaration {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Declaration {
            kind,
            access: Accessibility::Unspecified,
            is_static: false,
            name: name.into(),
            type_name: None,
            arguments: Vec::new(),
            value: None,
            value_is_string: false,
        }
    }
}

/// A member line inside an `Enum` or `Type` block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub name: String,
    /// Enum member value, verbatim
    pub value: Option<String>,
    /// Type field type, `Variant` when undeclared, `[]` suffixed for arrays
    pub type_name: Option<String>,
}
