//! C# emission
//!
//!     Turns scanner [`Event`]s into the lines Doxygen's C# front end reads. The emitter keeps
//!     only what it needs across events: whether the module is an interface and whether a
//!     member was already written (for the blank separator line).
//!
//!     Layout, with the default four-space indent:
//!
//!         namespace Standard {
//!             /**
//!              * module doc
//!              */
//!             public class Calc {
//!                 /**
//!                  * member doc
//!                  */
//!                 public int Add(ref int a, ref int b);
//!
//!                 public enum Color {
//!                     Red = 1,
//!                 }
//!             }
//!         }
//!
//!     Every emitted declaration ends in `;` or an opening brace on the same line, so
//!     feeding the output back through the filter matches nothing.

use super::declaration::{Accessibility, Argument, DeclKind, Declaration, Member};
use super::header::ModuleHeader;
use super::scanner::Event;

/// Emitter settings, mirrors the `[filter]` config table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// One level of indentation
    pub indent: String,
    /// Map VB type names to C# keywords
    pub map_types: bool,
    /// Separate top-level members with one blank line
    pub blank_line_between_members: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            indent: "    ".to_string(),
            map_types: true,
            blank_line_between_members: true,
        }
    }
}

/// VB name (lowercase) to C# keyword
const TYPE_MAP: &[(&str, &str)] = &[
    ("integer", "int"),
    ("long", "long"),
    ("string", "string"),
    ("boolean", "bool"),
    ("double", "double"),
    ("single", "float"),
    ("byte", "byte"),
    ("currency", "decimal"),
    ("date", "DateTime"),
    ("variant", "object"),
    ("object", "object"),
];

pub struct CSharpEmitter {
    options: EmitOptions,
    is_interface: bool,
    members_written: usize,
}

impl CSharpEmitter {
    pub fn new(options: EmitOptions) -> Self {
        CSharpEmitter {
            options,
            is_interface: false,
            members_written: 0,
        }
    }

    /// Render one event into output lines
    pub fn emit(&mut self, event: Event) -> Vec<String> {
        let mut out = Vec::new();
        match event {
            Event::ModuleStart(header) => self.module_start(&header, &mut out),
            Event::Declaration { doc, decl } => {
                if self.options.blank_line_between_members && self.members_written > 0 {
                    out.push(String::new());
                }
                self.members_written += 1;
                self.doc_block(&doc, 2, &mut out);
                let line = self.declaration(&decl);
                out.push(self.indented(2, &line));
            }
            Event::Member { doc, member } => {
                self.doc_block(&doc, 3, &mut out);
                let line = self.member(&member);
                out.push(self.indented(3, &line));
            }
            Event::BlockEnd => out.push(self.indented(2, "}")),
            Event::ModuleEnd => {
                out.push(self.indented(1, "}"));
                out.push("}".to_string());
            }
        }
        out
    }

    fn module_start(&mut self, header: &ModuleHeader, out: &mut Vec<String>) {
        self.is_interface = header.is_interface;
        self.members_written = 0;

        out.push(format!("namespace {} {{", header.namespace()));
        self.doc_block(&header.doc_lines, 1, out);
        let keyword = if header.is_interface {
            "interface"
        } else {
            "class"
        };
        let base = header
            .implements
            .as_ref()
            .map(|name| format!(" : {}", name))
            .unwrap_or_default();
        let line = format!("public {} {}{} {{", keyword, header.name, base);
        out.push(self.indented(1, &line));
    }

    /// Javadoc style block, nothing at all for an empty doc.
    ///
    /// A `*/` in the text would close the block early; it is written as `*&#47;`, which
    /// Doxygen renders as `*/`.
    fn doc_block(&self, doc: &[String], level: usize, out: &mut Vec<String>) {
        if doc.is_empty() {
            return;
        }
        out.push(self.indented(level, "/**"));
        for text in doc {
            let text = text.trim_end().replace("*/", "*&#47;");
            let line = if text.is_empty() || text.starts_with(' ') {
                format!(" *{}", text)
            } else {
                format!(" * {}", text)
            };
            out.push(self.indented(level, &line));
        }
        out.push(self.indented(level, " */"));
    }

    fn declaration(&self, decl: &Declaration) -> String {
        let modifiers = self.modifiers(decl);
        let name = &decl.name;
        match decl.kind {
            DeclKind::Function => format!(
                "{}{} {}({});",
                modifiers,
                self.declared_type(decl),
                name,
                self.arguments(&decl.arguments)
            ),
            DeclKind::Sub => format!(
                "{}void {}({});",
                modifiers,
                name,
                self.arguments(&decl.arguments)
            ),
            DeclKind::PropertyGet => {
                format!("{}{} {} {{ get; }}", modifiers, self.declared_type(decl), name)
            }
            DeclKind::PropertyLet | DeclKind::PropertySet => {
                format!("{}{} {} {{ set; }}", modifiers, self.declared_type(decl), name)
            }
            DeclKind::Enum => format!("{}enum {} {{", modifiers, name),
            DeclKind::Type => format!("{}struct {} {{", modifiers, name),
            DeclKind::Constant => {
                let mut line = format!("{}const {} {}", modifiers, self.constant_type(decl), name);
                if let Some(value) = &decl.value {
                    line.push_str(" = ");
                    line.push_str(&convert_literal(value, decl.value_is_string));
                }
                line.push(';');
                line
            }
            DeclKind::Variable => {
                format!("{}{} {};", modifiers, self.declared_type(decl), name)
            }
        }
    }

    fn member(&self, member: &Member) -> String {
        match &member.type_name {
            Some(type_name) => format!("public {} {};", self.map_type(type_name), member.name),
            None => match &member.value {
                Some(value) => format!("{} = {},", member.name, value),
                None => format!("{},", member.name),
            },
        }
    }

    /// Access keyword plus `static`, with a trailing space; empty for interface members
    fn modifiers(&self, decl: &Declaration) -> String {
        if self.is_interface && decl.kind.has_body() {
            return String::new();
        }
        let access = match decl.access {
            Accessibility::Public => "public",
            Accessibility::Private => "private",
            Accessibility::Friend => "internal",
            Accessibility::Unspecified if decl.kind.has_body() => "public",
            Accessibility::Unspecified => "private",
        };
        if decl.is_static && decl.kind != DeclKind::Constant {
            format!("{} static ", access)
        } else {
            format!("{} ", access)
        }
    }

    fn declared_type(&self, decl: &Declaration) -> String {
        self.map_type(decl.type_name.as_deref().unwrap_or("Variant"))
    }

    /// Untyped constants take the type of their literal when it is obvious
    fn constant_type(&self, decl: &Declaration) -> String {
        let declared = decl.type_name.as_deref().unwrap_or("Variant");
        if !declared.eq_ignore_ascii_case("variant") {
            return self.map_type(declared);
        }
        let inferred = match decl.value.as_deref() {
            Some(_) if decl.value_is_string => "String",
            Some(v) if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false") => {
                "Boolean"
            }
            _ => declared,
        };
        self.map_type(inferred)
    }

    fn arguments(&self, arguments: &[Argument]) -> String {
        arguments
            .iter()
            .map(|arg| self.argument(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn argument(&self, arg: &Argument) -> String {
        let type_name = self.map_type(&arg.type_name);
        if arg.param_array {
            let suffix = if type_name.ends_with("[]") { "" } else { "[]" };
            return format!("params {}{} {}", type_name, suffix, arg.name);
        }
        let mut text = String::new();
        if arg.by_ref {
            text.push_str("ref ");
        }
        text.push_str(&type_name);
        text.push(' ');
        text.push_str(&arg.name);
        if let Some(value) = &arg.default_value {
            text.push_str(" = ");
            text.push_str(&convert_literal(value, arg.default_is_string));
        }
        text
    }

    fn map_type(&self, type_name: &str) -> String {
        if self.options.map_types {
            map_type(type_name)
        } else {
            type_name.to_string()
        }
    }

    fn indented(&self, level: usize, text: &str) -> String {
        format!("{}{}", self.options.indent.repeat(level), text)
    }
}

/// Map a VB type name to its C# keyword, keeping a `[]` suffix. Unknown names pass through.
pub fn map_type(type_name: &str) -> String {
    let (base, suffix) = match type_name.strip_suffix("[]") {
        Some(base) => (base, "[]"),
        None => (type_name, ""),
    };
    let lower = base.to_ascii_lowercase();
    let mapped = TYPE_MAP
        .iter()
        .find(|(vb, _)| *vb == lower)
        .map(|(_, cs)| *cs)
        .unwrap_or(base);
    format!("{}{}", mapped, suffix)
}

/// Render a VB literal as C#. `is_string` marks text that was already unquoted.
pub fn convert_literal(value: &str, is_string: bool) -> String {
    if is_string {
        return format!("\"{}\"", escape_string(value));
    }
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        return value.to_ascii_lowercase();
    }
    if let Some(hex) = hex_literal(value) {
        return format!("0x{}", hex);
    }
    if value.len() >= 2 && value.starts_with('#') && value.ends_with('#') {
        return format!("\"{}\"", escape_string(&value[1..value.len() - 1]));
    }
    value.to_string()
}

fn hex_literal(value: &str) -> Option<&str> {
    let prefix = value.get(..2)?;
    if !prefix.eq_ignore_ascii_case("&h") {
        return None;
    }
    let digits = value[2..].trim_end_matches('&');
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(digits)
    } else {
        None
    }
}

/// Escape text for a C# regular string literal
pub fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\0' => escaped.push_str("\\0"),
            '\u{07}' => escaped.push_str("\\a"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0C}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{0B}' => escaped.push_str("\\v"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vb6::signature::match_declaration;
    use crate::vb6::source::ModuleKind;

    fn render(code: &str) -> String {
        let emitter = CSharpEmitter::new(EmitOptions::default());
        emitter.declaration(&match_declaration(code).unwrap())
    }

    #[test]
    fn test_map_type() {
        assert_eq!(map_type("Integer"), "int");
        assert_eq!(map_type("STRING[]"), "string[]");
        assert_eq!(map_type("Date"), "DateTime");
        assert_eq!(map_type("TestClass[]"), "TestClass[]");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("a\"b\\c\td"), "a\\\"b\\\\c\\td");
        assert_eq!(escape_string("\u{07}\u{0B}"), "\\a\\v");
    }

    #[test]
    fn test_convert_literal() {
        assert_eq!(convert_literal("12\"3", true), "\"12\\\"3\"");
        assert_eq!(convert_literal("&HFF&", false), "0xFF");
        assert_eq!(convert_literal("True", false), "true");
        assert_eq!(convert_literal("#1/1/2000#", false), "\"1/1/2000\"");
        assert_eq!(convert_literal("vbCrLf", false), "vbCrLf");
    }

    #[test]
    fn test_function_line() {
        assert_eq!(
            render("Public Function Add(a As Integer, b As Integer) As Integer"),
            "public int Add(ref int a, ref int b);"
        );
        assert_eq!(
            render("Private Function Test(Optional ByVal Arg1 As String = \"x\") As TestClass()"),
            "private TestClass[] Test(string Arg1 = \"x\");"
        );
    }

    #[test]
    fn test_sub_and_static() {
        assert_eq!(render("Sub Main()"), "public void Main();");
        assert_eq!(render("Static Sub Tick()"), "public static void Tick();");
        assert_eq!(
            render("Sub Log(ParamArray items())"),
            "public void Log(params object[] items);"
        );
    }

    #[test]
    fn test_properties() {
        assert_eq!(render("Property Get Name() As String"), "public string Name { get; }");
        assert_eq!(
            render("Friend Property Let Name(ByVal v As String)"),
            "internal string Name { set; }"
        );
    }

    #[test]
    fn test_data() {
        assert_eq!(render("Dim count As Long"), "private long count;");
        assert_eq!(render("Public Items() As Variant"), "public object[] Items;");
        assert_eq!(
            render("Const Title = \"a \"\"b\"\"\""),
            "private const string Title = \"a \\\"b\\\"\";"
        );
        assert_eq!(render("Public Const Flag = True"), "public const bool Flag = true;");
        assert_eq!(render("Const Mask As Long = &H0F&"), "private const long Mask = 0x0F;");
    }

    #[test]
    fn test_no_type_map() {
        let emitter = CSharpEmitter::new(EmitOptions {
            map_types: false,
            ..EmitOptions::default()
        });
        let decl = match_declaration("Function F(a As Integer) As Long").unwrap();
        assert_eq!(emitter.declaration(&decl), "public Long F(ref Integer a);");
    }

    #[test]
    fn test_interface_members_drop_access() {
        let mut emitter = CSharpEmitter::new(EmitOptions::default());
        let header = ModuleHeader {
            kind: ModuleKind::Class,
            name: "IShape".to_string(),
            doc_lines: vec![],
            is_interface: true,
            implements: None,
        };
        let lines = emitter.emit(Event::ModuleStart(header));
        assert_eq!(lines, vec!["namespace Class {", "    public interface IShape {"]);
        let decl = match_declaration("Public Function Area() As Double").unwrap();
        assert_eq!(emitter.declaration(&decl), "double Area();");
    }

    #[test]
    fn test_doc_block_and_separator() {
        let mut emitter = CSharpEmitter::new(EmitOptions::default());
        let first = emitter.emit(Event::Declaration {
            doc: vec![" Adds".to_string(), "tight".to_string(), String::new()],
            decl: match_declaration("Sub A()").unwrap(),
        });
        assert_eq!(
            first,
            vec![
                "        /**",
                "         * Adds",
                "         * tight",
                "         *",
                "         */",
                "        public void A();",
            ]
        );
        let second = emitter.emit(Event::Declaration {
            doc: vec![],
            decl: match_declaration("Sub B()").unwrap(),
        });
        assert_eq!(second, vec!["", "        public void B();"]);
    }

    #[test]
    fn test_doc_text_cannot_close_the_block() {
        let mut emitter = CSharpEmitter::new(EmitOptions::default());
        let lines = emitter.emit(Event::Declaration {
            doc: vec![" matches a*/b".to_string(), "*/ Public Sub Injected()".to_string()],
            decl: match_declaration("Sub A()").unwrap(),
        });
        assert_eq!(
            lines,
            vec![
                "        /**",
                "         * matches a*&#47;b",
                "         * *&#47; Public Sub Injected()",
                "         */",
                "        public void A();",
            ]
        );
    }

    #[test]
    fn test_members() {
        let emitter = CSharpEmitter::new(EmitOptions::default());
        let member = Member {
            name: "Red".to_string(),
            value: Some("&H1".to_string()),
            type_name: None,
        };
        assert_eq!(emitter.member(&member), "Red = &H1,");
        let field = Member {
            name: "X".to_string(),
            value: None,
            type_name: Some("Long".to_string()),
        };
        assert_eq!(emitter.member(&field), "public long X;");
    }
}
