//! Tally Lexer - tokenizer for the Tally expression language.
//!
//! A logos-derived raw token enum does the matching; [`lex`] converts
//! its output into spanned [`Token`]s borrowing their slice from the
//! source. Whitespace (including newlines, so expressions may span
//! lines) is skipped. Unrecognized input becomes a [`TokenKind::Error`]
//! token rather than a failure; the parser turns it into a positioned
//! syntax error.

use logos::Logos;

/// Raw token from logos, before error mapping.
#[derive(Logos, Copy, Clone, Eq, PartialEq, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexNumber,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Str,

    #[regex(r"[A-Za-z_][A-Za-z0-9_.]*")]
    Ident,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("=")]
    Assign,

    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
}

/// Token kinds.
///
/// Note that `true`/`false` are deliberately NOT keywords: they lex as
/// identifiers and resolve as ordinary (read-only) variables, which is
/// what makes `true = 2` an assignment-rejection error rather than a
/// syntax error.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TokenKind {
    /// Decimal number literal: `200`, `2.25`.
    Number,
    /// Hexadecimal number literal: `0xFF`.
    HexNumber,
    /// String literal in single or double quotes, no escape sequences.
    Str,
    /// Identifier. Dots are legal interior characters, so `C_mpl.x` is
    /// one variable name.
    Ident,

    LParen,
    RParen,
    Comma,
    Question,

    EqEq,
    NotEq,
    LtEq,
    Lt,
    GtEq,
    Gt,
    Assign,

    AndAnd,
    OrOr,
    Bang,

    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    /// Unrecognized input.
    Error,
}

const fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Number => TokenKind::Number,
        RawToken::HexNumber => TokenKind::HexNumber,
        RawToken::Str => TokenKind::Str,
        RawToken::Ident => TokenKind::Ident,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Question => TokenKind::Question,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Assign => TokenKind::Assign,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Caret => TokenKind::Caret,
    }
}

/// A token with its source slice and byte offset.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
}

/// Lex source text into a token list.
///
/// Never fails: unrecognized characters become [`TokenKind::Error`]
/// tokens carrying their slice and position.
pub fn lex(source: &str) -> Vec<Token<'_>> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(raw) => convert(raw),
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token {
            kind,
            text: lexer.slice(),
            start: span.start,
        });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn numbers_and_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("200+2*roll(2,4)"),
            vec![Number, Plus, Number, Star, Ident, LParen, Number, Comma, Number, RParen]
        );
    }

    #[test]
    fn decimal_point_belongs_to_the_number() {
        let tokens = lex("1.25 + x.y");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "1.25");
        // Dots are identifier characters too.
        assert_eq!(tokens[2].kind, TokenKind::Ident);
        assert_eq!(tokens[2].text, "x.y");
    }

    #[test]
    fn hex_wins_over_decimal_prefix() {
        let tokens = lex("0xFF");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::HexNumber);
    }

    #[test]
    fn both_quote_styles() {
        let tokens = lex(r#"'foo' + "bar""#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].text, "'foo'");
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].text, "\"bar\"");
    }

    #[test]
    fn compound_operators_lex_greedily() {
        use TokenKind::*;
        assert_eq!(kinds("a==b!=c<=d>=e&&f||!g"), vec![
            Ident, EqEq, Ident, NotEq, Ident, LtEq, Ident, GtEq, Ident, AndAnd, Ident, OrOr,
            Bang, Ident
        ]);
    }

    #[test]
    fn newlines_are_whitespace() {
        use TokenKind::*;
        assert_eq!(kinds("10 + \n17 + \r\n3"), vec![Number, Plus, Number, Plus, Number]);
    }

    #[test]
    fn unrecognized_input_becomes_error_token() {
        let tokens = lex("1 + #");
        assert_eq!(tokens[2].kind, TokenKind::Error);
        assert_eq!(tokens[2].start, 4);
    }

    #[test]
    fn prompt_variable_tokens() {
        use TokenKind::*;
        assert_eq!(kinds("?foo + 2"), vec![Question, Ident, Plus, Number]);
    }
}
