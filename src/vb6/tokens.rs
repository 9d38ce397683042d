//! Token definitions for VB6 source lines
//!
//! The filter never needs a full VB lexer. It only has to know where a trailing `'` comment
//! starts, which means telling apostrophes inside string literals apart from real comment
//! markers. The tokens are defined using the logos derive macro.
use logos::Logos;

/// Coarse tokens of a VB6 line
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Token {
    // VB escapes quotes by doubling them; `"a""b"` lexes as two adjacent literals, which is
    // fine for our purposes. An unterminated literal runs to the end of the line.
    #[regex(r#""[^"\n]*"?"#)]
    StringLiteral,

    // Comment to the end of the line
    #[regex(r"'[^\n]*")]
    Comment,

    // Everything else
    #[regex(r#"[^"'\n]+"#)]
    Code,
}

/// Returns the code part of a line, without any trailing `'` comment.
///
/// Apostrophes inside string literals are kept.
pub fn strip_comment(line: &str) -> &str {
    let mut lexer = Token::lexer(line);
    while let Some(token) = lexer.next() {
        if matches!(token, Ok(Token::Comment)) {
            return &line[..lexer.span().start];
        }
    }
    line
}

/// Check if a physical line is continued on the next one (` _` at the end of the code).
///
/// A line carrying a comment never continues.
pub fn continues_on_next_line(line: &str) -> bool {
    let code = strip_comment(line);
    if code.len() != line.len() {
        return false;
    }
    code.trim_end()
        .strip_suffix('_')
        .is_some_and(|rest| rest.is_empty() || rest.ends_with(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_sequence() {
        let mut lexer = Token::lexer("x = \"it's\" ' note");
        assert_eq!(lexer.next(), Some(Ok(Token::Code)));
        assert_eq!(lexer.next(), Some(Ok(Token::StringLiteral)));
        assert_eq!(lexer.slice(), "\"it's\"");
        assert_eq!(lexer.next(), Some(Ok(Token::Code)));
        assert_eq!(lexer.next(), Some(Ok(Token::Comment)));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("Dim x As Long ' counter"), "Dim x As Long ");
        assert_eq!(strip_comment("' whole line"), "");
        assert_eq!(strip_comment("Dim x As Long"), "Dim x As Long");
    }

    #[test]
    fn test_strip_comment_keeps_apostrophes_in_strings() {
        let line = r#"Const A = "don't ""stop"" me" ' real comment"#;
        assert_eq!(strip_comment(line), r#"Const A = "don't ""stop"" me" "#);
    }

    #[test]
    fn test_strip_comment_unterminated_string() {
        assert_eq!(strip_comment("x = \"abc ' def"), "x = \"abc ' def");
    }

    #[test]
    fn test_continuation() {
        assert!(continues_on_next_line("Function Foo(a As Long, _"));
        assert!(continues_on_next_line("Function Foo( _   "));
        assert!(!continues_on_next_line("Dim my_"));
        assert!(!continues_on_next_line("Foo ' comment _"));
        assert!(!continues_on_next_line("x = \"a _\""));
    }
}
