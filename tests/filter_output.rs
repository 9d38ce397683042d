//! End-to-end filter output for whole modules

use doxyvb::vb6::{filter_source, EmitOptions, Filter, ModuleKind, SourceUnit};
use rstest::rstest;

fn filter(source: &str, kind: ModuleKind) -> String {
    let unit = SourceUnit::from_string(source, kind);
    filter_source(&unit, &EmitOptions::default()).join("\n")
}

/// The declaration line of a module holding a single declaration
fn single_declaration(line: &str) -> String {
    let unit = SourceUnit::from_string(line, ModuleKind::Standard);
    let lines = filter_source(&unit, &EmitOptions::default());
    assert_eq!(lines.len(), 5, "unexpected output: {:#?}", lines);
    lines[2].trim().to_string()
}

#[test]
fn test_standard_module() {
    let source = r#"Attribute VB_Name = "Calc"
'! Arithmetic helpers
Option Explicit

'* Adds two numbers
Public Function Add(a As Integer, b As Integer) As Integer
    Add = a + b
End Function

Public Sub Reset()
    ' nothing to do
End Sub
"#;
    insta::assert_snapshot!(filter(source, ModuleKind::Standard), @r"
namespace Standard {
    /**
     * Arithmetic helpers
     */
    public class Calc {
        /**
         * Adds two numbers
         */
        public int Add(ref int a, ref int b);

        public void Reset();
    }
}
");
}

#[test]
fn test_interface_module() {
    let source = r#"Attribute VB_Name = "IShape"
'# Interface
'* Area of the shape
Public Function Area() As Double
End Function
Public Property Get Name() As String
End Property
"#;
    let output = filter(source, ModuleKind::Class);
    assert!(!output.contains("# Interface"));
    insta::assert_snapshot!(output, @r"
namespace Class {
    public interface IShape {
        /**
         * Area of the shape
         */
        double Area();

        string Name { get; }
    }
}
");
}

#[test]
fn test_interface_marker_needs_a_class_module() {
    let source = "'# Interface\nImplements IShape\nPublic Function Area() As Double\nEnd Function\n";
    insta::assert_snapshot!(filter(source, ModuleKind::Standard), @r"
namespace Standard {
    public class DummyName {
        public double Area();
    }
}
");
}

#[test]
fn test_class_with_blocks_and_constants() {
    let source = r#"Attribute VB_Name = "Circle"
Implements IShape
Private Const PI As Double = 3.14159
Public Const NAME_PREFIX = "circle: ""round"""
'* Line styles
Public Enum LineStyle
    '* Solid line
    Solid = 0
    Dashed = &H2
End Enum
Private Type Point
    X As Single
    Y As Single
End Type
Private mRadius As Double
"#;
    insta::assert_snapshot!(filter(source, ModuleKind::Class), @r#"
namespace Class {
    public class Circle : IShape {
        private const double PI = 3.14159;

        public const string NAME_PREFIX = "circle: \"round\"";

        /**
         * Line styles
         */
        public enum LineStyle {
            /**
             * Solid line
             */
            Solid = 0,
            Dashed = &H2,
        }

        private struct Point {
            public float X;
            public float Y;
        }

        private double mRadius;
    }
}
"#);
}

#[test]
fn test_property_accessors_are_separate_members() {
    let source = "\
'* The caption
Public Property Get Caption() As String
End Property
'* Sets the caption
Public Property Let Caption(ByVal value As String)
End Property
";
    insta::assert_snapshot!(filter(source, ModuleKind::Form), @r"
namespace Form {
    public class DummyName {
        /**
         * The caption
         */
        public string Caption { get; }

        /**
         * Sets the caption
         */
        public string Caption { set; }
    }
}
");
}

#[test]
fn test_body_doc_lines_do_not_leak() {
    let source = "\
Public Sub First()
    '* belongs to nobody
End Sub
Public Sub Second()
End Sub
'* trailing
";
    let output = filter(source, ModuleKind::Standard);
    assert!(!output.contains("belongs to nobody"));
    assert!(!output.contains("trailing"));
    assert!(!output.contains("/**"));
}

#[test]
fn test_bodies_skipped_after_complex_headers() {
    let source = "\
Public Function Pad(Optional ByVal c As String = Chr(9)) As String
    Dim tmp As Long
    '* inside
    Const Limit = 3
End Function
Public Sub Send(ByVal data As String = Mid$(x, (1)))
    Dim buffer As String
    '* also inside
End Sub
Public Sub Flush()
End Sub
";
    let output = filter(source, ModuleKind::Standard);
    assert!(output.contains("public string Pad(string c = Chr(9));"));
    assert!(output.contains("public void Flush();"));
    for hidden in ["tmp", "inside", "Limit", "Send", "buffer"] {
        assert!(!output.contains(hidden), "{} leaked into {}", hidden, output);
    }
}

#[test]
fn test_blank_input_gives_no_output() {
    assert_eq!(filter("", ModuleKind::Standard), "");
    assert_eq!(filter("\r\n  \r\n", ModuleKind::Class), "");
}

#[test]
fn test_without_member_separator() {
    let unit = SourceUnit::from_string("Dim a\nDim b\n", ModuleKind::Standard);
    let options = EmitOptions {
        indent: "\t".to_string(),
        blank_line_between_members: false,
        ..EmitOptions::default()
    };
    let lines: Vec<String> = Filter::new(&unit, options).collect();
    assert_eq!(
        lines,
        vec![
            "namespace Standard {",
            "\tpublic class DummyName {",
            "\t\tprivate object a;",
            "\t\tprivate object b;",
            "\t}",
            "}",
        ]
    );
}

#[rstest]
#[case("Public Function Add(a As Integer, b As Integer) As Integer", "public int Add(ref int a, ref int b);")]
#[case("Function Add(ByVal a As Integer, ByVal b As Integer) As Integer", "public int Add(int a, int b);")]
#[case("Private Sub Log(ByVal msg As String, ParamArray args() As Variant)", "private void Log(string msg, params object[] args);")]
#[case("Friend Function Make() As Shape", "internal Shape Make();")]
#[case("Static Function Counter() As Long", "public static long Counter();")]
#[case("Public Function Items() As Collection()", "public Collection[] Items();")]
#[case("Sub Pad(Optional ByVal width As Integer = 10, Optional ByVal fill As String = \"-\")", "public void Pad(int width = 10, string fill = \"-\");")]
#[case("Sub Tab(Optional ByVal c As String = vbTab)", "public void Tab(string c = vbTab);")]
#[case("Public Function Pad(Optional ByVal c As String = Chr(9)) As String", "public string Pad(string c = Chr(9));")]
#[case("Function Trim2$(ByVal s$)", "public string Trim2(string s);")]
#[case("Private Function Count&(items() As Variant)", "private long Count(ref object[] items);")]
#[case("Public Property Set Owner(ByVal value As Form)", "public Form Owner { set; }")]
#[case("Global Const MAX_ITEMS As Integer = 100", "public const int MAX_ITEMS = 100;")]
#[case("Const FLAGS As Long = &HFF00&", "private const long FLAGS = 0xFF00;")]
#[case("Const ENABLED = False", "private const bool ENABLED = false;")]
#[case("Const START = #1/1/2000#", "private const object START = \"1/1/2000\";")]
#[case("Public Const TAB_TEXT As String = \"a\\b\"", "public const string TAB_TEXT = \"a\\\\b\";")]
#[case("Dim buffer(1 To 10) As Byte", "private byte[] buffer;")]
#[case("Public Total As Currency", "public decimal Total;")]
#[case("Private started As Date ' when", "private DateTime started;")]
fn test_declaration_lines(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(single_declaration(input), expected);
}

#[rstest]
#[case("Public Function Join(ByVal a As String, _\n    ByVal b As String) As String\nEnd Function", "public string Join(string a, string b);")]
#[case("Public Sub Configure( _\n    ByVal name As String, _\n    Optional ByVal retries As Long = 3 _\n)\nEnd Sub", "public void Configure(string name, long retries = 3);")]
fn test_continued_declarations(#[case] input: &str, #[case] expected: &str) {
    let unit = SourceUnit::from_string(input, ModuleKind::Standard);
    let lines = filter_source(&unit, &EmitOptions::default());
    assert_eq!(lines[2].trim(), expected);
}

#[rstest]
#[case("Option Explicit")]
#[case("x = Add(1, 2)")]
#[case("If x > 1 Then")]
#[case("End If")]
#[case("Rem Public Sub Hidden()")]
#[case("' Public Sub Hidden()")]
#[case("Declare Function GetTickCount Lib \"kernel32\" () As Long")]
fn test_lines_without_declarations(#[case] input: &str) {
    let unit = SourceUnit::from_string(input, ModuleKind::Standard);
    let lines = filter_source(&unit, &EmitOptions::default());
    assert_eq!(lines.len(), 4, "unexpected output: {:#?}", lines);
}
