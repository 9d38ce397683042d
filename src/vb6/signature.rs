//! Declaration matching
//!
//! Turns the code part of a logical line into a [`Declaration`] when one of the patterns in
//! [`patterns`](super::patterns) accepts it. Matching is best effort: anything the patterns
//! reject is simply not a declaration.

use super::declaration::{Accessibility, Argument, DeclKind, Declaration, Member};
use super::patterns;
use regex::Captures;

/// Match a declaration line. `code` must already be stripped of its trailing comment.
pub fn match_declaration(code: &str) -> Option<Declaration> {
    match_property_get(code)
        .or_else(|| match_property_let_set(code))
        .or_else(|| match_block_header(code))
        .or_else(|| match_function(code))
        .or_else(|| match_sub(code))
        .or_else(|| match_variable(code))
}

fn match_function(code: &str) -> Option<Declaration> {
    let caps = patterns::FUNCTION.captures(code)?;
    let mut decl = procedure(&caps, DeclKind::Function);
    decl.type_name = Some(return_type(&caps, suffix_type(&caps)));
    Some(decl)
}

fn match_sub(code: &str) -> Option<Declaration> {
    let caps = patterns::SUB.captures(code)?;
    Some(procedure(&caps, DeclKind::Sub))
}

fn match_property_get(code: &str) -> Option<Declaration> {
    let caps = patterns::PROPERTY_GET.captures(code)?;
    let mut decl = procedure(&caps, DeclKind::PropertyGet);
    decl.type_name = Some(return_type(&caps, suffix_type(&caps)));
    Some(decl)
}

fn match_property_let_set(code: &str) -> Option<Declaration> {
    let caps = patterns::PROPERTY_LET_SET.captures(code)?;
    let kind = if caps["mode"].eq_ignore_ascii_case("set") {
        DeclKind::PropertySet
    } else {
        DeclKind::PropertyLet
    };
    let mut decl = procedure(&caps, kind);
    // The assigned value is the last argument; leading ones are indexes.
    decl.type_name = decl.arguments.last().map(|arg| arg.type_name.clone());
    Some(decl)
}

fn match_block_header(code: &str) -> Option<Declaration> {
    let (caps, kind) = match patterns::ENUM.captures(code) {
        Some(caps) => (caps, DeclKind::Enum),
        None => (patterns::TYPE.captures(code)?, DeclKind::Type),
    };
    let mut decl = Declaration::new(kind, &caps["name"]);
    let (access, is_static) = resolve_scope(&caps, "access", Accessibility::Public);
    decl.access = access;
    decl.is_static = is_static;
    Some(decl)
}

fn match_variable(code: &str) -> Option<Declaration> {
    let caps = patterns::VARIABLE.captures(code)?;
    let is_const = caps.name("const").is_some();
    if caps.name("scope").is_none() && !is_const {
        return None;
    }

    let kind = if is_const {
        DeclKind::Constant
    } else {
        DeclKind::Variable
    };
    let (name, suffix) = split_type_suffix(&caps["name"]);
    let mut decl = Declaration::new(kind, name);
    let (access, is_static) = resolve_scope(&caps, "scope", Accessibility::Private);
    decl.access = access;
    decl.is_static = is_static;
    decl.type_name = Some(format_array_type(
        caps.name("ret").map(|m| m.as_str()).or(suffix),
        caps.name("arr").is_some(),
    ));
    if is_const {
        if let Some(value) = caps.name("value") {
            let (value, is_string) = extract_string_literal(value.as_str());
            decl.value = Some(value);
            decl.value_is_string = is_string;
        }
    }
    Some(decl)
}

/// Match one line of an `Enum` body
pub fn match_enum_member(code: &str) -> Option<Member> {
    let caps = patterns::ENUM_MEMBER.captures(code)?;
    Some(Member {
        name: caps["name"].to_string(),
        value: caps.name("value").map(|m| m.as_str().trim().to_string()),
        type_name: None,
    })
}

/// Match one line of a `Type` body
pub fn match_type_field(code: &str) -> Option<Member> {
    let caps = patterns::TYPE_FIELD.captures(code)?;
    Some(Member {
        name: caps["name"].to_string(),
        value: None,
        type_name: Some(format_array_type(
            caps.name("ret").map(|m| m.as_str()),
            caps.name("arr").is_some(),
        )),
    })
}

fn procedure(caps: &Captures<'_>, kind: DeclKind) -> Declaration {
    let (name, _) = split_type_suffix(&caps["name"]);
    let mut decl = Declaration::new(kind, name);
    let (access, is_static) = resolve_scope(caps, "access", Accessibility::Public);
    decl.access = access;
    decl.is_static = is_static;
    decl.arguments = parse_arguments(caps.name("args").map_or("", |m| m.as_str()));
    decl
}

fn return_type(caps: &Captures<'_>, suffix: Option<&str>) -> String {
    format_array_type(
        caps.name("ret").map(|m| m.as_str()).or(suffix),
        caps.name("arr").is_some(),
    )
}

fn suffix_type(caps: &Captures<'_>) -> Option<&'static str> {
    split_type_suffix(&caps["name"]).1
}

/// Split a type-declaration character off an identifier, e.g. `Trim$` is a `String`.
pub fn split_type_suffix(name: &str) -> (&str, Option<&'static str>) {
    let type_name = match name.chars().last() {
        Some('$') => "String",
        Some('%') => "Integer",
        Some('&') => "Long",
        Some('!') => "Single",
        Some('#') => "Double",
        Some('@') => "Currency",
        _ => return (name, None),
    };
    (&name[..name.len() - 1], Some(type_name))
}

/// Resolve the scope keyword in `group` (plus an optional `static` group).
///
/// A lone `Static` reads as public and static.
fn resolve_scope(caps: &Captures<'_>, group: &str, default: Accessibility) -> (Accessibility, bool) {
    let keyword = caps.name(group).map(|m| m.as_str());
    let is_static = caps.name("static").is_some()
        || keyword.is_some_and(|k| k.eq_ignore_ascii_case("static"));
    let access = match keyword {
        Some(k) if k.eq_ignore_ascii_case("static") => Accessibility::Public,
        Some(k) => Accessibility::from_keyword(k),
        None if is_static => Accessibility::Public,
        None => default,
    };
    (access, is_static)
}

/// `Variant` for undeclared types, `[]` appended for arrays
pub fn format_array_type(type_name: Option<&str>, is_array: bool) -> String {
    let base = match type_name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => "Variant",
    };
    if is_array {
        format!("{}[]", base)
    } else {
        base.to_string()
    }
}

/// Unquote a VB string literal (`""` is an escaped quote).
///
/// Returns the text and whether it was a string literal; anything else is returned trimmed.
pub fn extract_string_literal(text: &str) -> (String, bool) {
    let text = text.trim();
    if patterns::STRING_VALUE.is_match(text) {
        let inner = &text[1..text.len() - 1];
        (inner.replace("\"\"", "\""), true)
    } else {
        (text.to_string(), false)
    }
}

/// Split an argument list on top-level commas, ignoring commas in strings and parentheses
pub fn split_arguments(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '(' if !in_string => depth += 1,
            ')' if !in_string => depth = depth.saturating_sub(1),
            ',' if !in_string && depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&args[start..]);
    parts.retain(|part| !part.trim().is_empty());
    parts
}

/// Parse the text between a procedure's parentheses
pub fn parse_arguments(args: &str) -> Vec<Argument> {
    split_arguments(args)
        .into_iter()
        .filter_map(|part| {
            let argument = parse_argument(part);
            if argument.is_none() {
                tracing::debug!(argument = part.trim(), "skipping unrecognized argument");
            }
            argument
        })
        .collect()
}

fn parse_argument(text: &str) -> Option<Argument> {
    let caps = patterns::ARGUMENT.captures(text)?;
    let (default_value, default_is_string) = match caps.name("value") {
        Some(value) => {
            let (value, is_string) = extract_string_literal(value.as_str());
            (Some(value), is_string)
        }
        None => (None, false),
    };
    let (name, suffix) = split_type_suffix(&caps["name"]);
    Some(Argument {
        name: name.to_string(),
        type_name: format_array_type(
            caps.name("ret").map(|m| m.as_str()).or(suffix),
            caps.name("arr").is_some(),
        ),
        by_ref: !caps
            .name("pass")
            .is_some_and(|m| m.as_str().eq_ignore_ascii_case("byval")),
        optional: caps.name("optional").is_some(),
        param_array: caps.name("param_array").is_some(),
        default_value,
        default_is_string,
    })
}
