//! The parser proper.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use tally_ast::{BinaryOp, Expr, UnaryOp};
use tally_lexer::{lex, Token, TokenKind};

use crate::error::ParseError;

/// Parse source text into an expression tree.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(source);
    let expr = parser.expression()?;
    parser.expect_end()?;
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    source_len: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser {
            tokens: lex(source),
            pos: 0,
            source_len: source.len(),
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    /// Position for error reporting: the current token's start, or the
    /// end of input.
    fn position(&self) -> usize {
        self.peek().map_or(self.source_len, |t| t.start)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.position())
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token<'a>, ParseError> {
        match self.peek().copied() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(self.error(format!("expected {what}, found '{}'", token.text))),
            None => Err(self.error(format!("expected {what}, found end of input"))),
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(self.error(format!("unexpected trailing input '{}'", token.text))),
        }
    }

    /// expression := IDENT '=' or_expr | or_expr
    fn expression(&mut self) -> Result<Expr, ParseError> {
        if self.peek_kind() == Some(TokenKind::Ident)
            && self.peek_kind_at(1) == Some(TokenKind::Assign)
        {
            let target = self
                .advance()
                .map(|t| t.text.to_owned())
                .unwrap_or_default();
            self.advance(); // '='
            let rhs = self.or_expr()?;
            return Ok(Expr::Assignment {
                target,
                rhs: Box::new(rhs),
            });
        }
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.and_expr()?;
        while self.peek_kind() == Some(TokenKind::OrOr) {
            self.advance();
            let rhs = self.and_expr()?;
            lhs = binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.eq_expr()?;
        while self.peek_kind() == Some(TokenKind::AndAnd) {
            self.advance();
            let rhs = self.eq_expr()?;
            lhs = binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn eq_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.rel_expr()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::EqEq) => BinaryOp::Eq,
                Some(TokenKind::NotEq) => BinaryOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.rel_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn rel_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.add_expr()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Lt) => BinaryOp::Lt,
                Some(TokenKind::LtEq) => BinaryOp::Le,
                Some(TokenKind::Gt) => BinaryOp::Gt,
                Some(TokenKind::GtEq) => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.add_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn add_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.mul_expr()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.mul_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn mul_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.pow_expr()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.pow_expr()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// Right-associative: `2^3^2` is `2^(3^2)`.
    fn pow_expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.unary()?;
        if self.peek_kind() == Some(TokenKind::Caret) {
            self.advance();
            let rhs = self.pow_expr()?;
            return Ok(binary(BinaryOp::Pow, lhs, rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Plus) => Some(UnaryOp::Plus),
            Some(TokenKind::Minus) => Some(UnaryOp::Minus),
            Some(TokenKind::Bang) => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek().copied() else {
            return Err(self.error("expected expression, found end of input"));
        };

        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = BigDecimal::from_str(token.text)
                    .map_err(|e| ParseError::new(format!("invalid number: {e}"), token.start))?;
                Ok(Expr::Number { value })
            }
            TokenKind::HexNumber => {
                self.advance();
                let digits = &token.text[2..];
                let value = BigInt::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| {
                    ParseError::new(
                        format!("invalid hexadecimal number '{}'", token.text),
                        token.start,
                    )
                })?;
                Ok(Expr::Number {
                    value: BigDecimal::from(value),
                })
            }
            TokenKind::Str => {
                self.advance();
                // First and last character are the delimiters.
                let quote = token.text.chars().next().unwrap_or('"');
                let value = token.text[1..token.text.len() - 1].to_owned();
                Ok(Expr::Str { value, quote })
            }
            TokenKind::Question => {
                self.advance();
                let id = self.expect(TokenKind::Ident, "variable name after '?'")?;
                Ok(Expr::PromptVariable {
                    name: id.text.to_owned(),
                })
            }
            TokenKind::Ident => {
                self.advance();
                if self.peek_kind() == Some(TokenKind::LParen) {
                    self.advance();
                    let args = self.call_args()?;
                    return Ok(Expr::Call {
                        name: token.text.to_owned(),
                        args,
                    });
                }
                Ok(Expr::Variable {
                    name: token.text.to_owned(),
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Error => Err(ParseError::new(
                format!("unrecognized character '{}'", token.text),
                token.start,
            )),
            _ => Err(self.error(format!("unexpected token '{}'", token.text))),
        }
    }

    /// Arguments after the opening parenthesis of a call, including the
    /// closing parenthesis.
    fn call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.peek_kind() == Some(TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            match self.peek_kind() {
                Some(TokenKind::Comma) => {
                    self.advance();
                }
                Some(TokenKind::RParen) => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(self.error("expected ',' or ')' in argument list")),
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
