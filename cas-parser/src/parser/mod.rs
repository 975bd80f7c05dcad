pub mod ast;
pub mod error;
pub mod token;

use cas_error::ErrorKind;
use error::{kind, Error};
use super::tokenizer::{tokenize_complete, Token, TokenKind, UnknownChar};
use std::ops::Range;

/// A high-level parser for algebraic expressions. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The character that stopped the tokenizer early, if any.
    unknown: Option<UnknownChar>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        let (tokens, unknown) = match tokenize_complete(source) {
            Ok(tokens) => (tokens, None),
            Err(unknown) => (Box::default(), Some(unknown)),
        };
        Self { tokens, unknown, cursor: 0 }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn skip_whitespace(&mut self) {
        while self.current_token().is_some_and(Token::is_whitespace) {
            self.cursor += 1;
        }
    }

    /// Returns the kind of the next non-whitespace token without consuming anything.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.skip_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(kind::UnexpectedEof)),
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    pub fn try_parse<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        match T::parse(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses multiple values (at least one) from the given stream of tokens, each
    /// delimited by a certain token.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// values are returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_delimited<T: Parse<'source>>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let start = self.cursor;
        let mut values = Vec::new();

        loop {
            match T::parse(self) {
                Ok(value) => values.push(value),
                Err(err) => {
                    self.cursor = start;
                    return Err(err);
                },
            }

            if self.peek_kind() == Some(delimiter) {
                self.skip_whitespace();
                self.cursor += 1;
            } else {
                return Ok(values);
            }
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse<'source>>(&mut self) -> Result<T, Error> {
        if let Some(unknown) = &self.unknown {
            return Err(Error::new(
                vec![unknown.span.clone()],
                kind::UnknownCharacter { character: unknown.character },
            ));
        }

        let value = T::parse(self)?;
        self.skip_whitespace();

        match self.current_token() {
            None => Ok(value),
            Some(token) if token.kind.is_comparator() => Err(self.error(kind::UnexpectedComparator)),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error(kind::UnclosedParenthesis { opening: false }))
            },
            Some(_) => Err(self.error(kind::ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse<'source>: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), and implicit multiplication, which
    /// separate factors.
    Factor,

    /// Precedence of unary negation (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        expr::Expr,
        literal::{Literal, LitNum, LitSym},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn parse(input: &str) -> Expr {
        Parser::new(input).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16"), Expr::Literal(Literal::Number(LitNum {
            value: 16.0,
            span: 0..2,
        })));
    }

    #[test]
    fn literal_float() {
        assert_eq!(parse("3.25"), Expr::Literal(Literal::Number(LitNum {
            value: 3.25,
            span: 0..4,
        })));
    }

    #[test]
    fn implicit_coefficient() {
        assert_eq!(parse("2x"), Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Number(LitNum { value: 2.0, span: 0..1 }))),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(Expr::Literal(Literal::Symbol(LitSym { name: "x".to_string(), span: 1..2 }))),
            span: 0..2,
        }));
    }

    #[test]
    fn negated_power() {
        assert_eq!(parse("-x^2"), Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(Expr::Literal(Literal::Symbol(LitSym { name: "x".to_string(), span: 1..2 }))),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: Box::new(Expr::Literal(Literal::Number(LitNum { value: 2.0, span: 3..4 }))),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn call_with_two_args() {
        assert_eq!(parse("nthRoot(8, 3)"), Expr::Call(Call {
            name: LitSym { name: "nthRoot".to_string(), span: 0..7 },
            args: vec![
                Expr::Literal(Literal::Number(LitNum { value: 8.0, span: 8..9 })),
                Expr::Literal(Literal::Number(LitNum { value: 3.0, span: 11..12 })),
            ],
            span: 0..13,
        }));
    }

    #[test]
    fn parenthesized() {
        assert_eq!(parse("(1)"), Expr::Paren(Paren {
            expr: Box::new(Expr::Literal(Literal::Number(LitNum { value: 1.0, span: 1..2 }))),
            span: 0..3,
        }));
    }

    #[test]
    fn precedence() {
        assert_eq!(parse("1 + 2 * 3 ^ 2").to_string(), "1 + 2 * 3^2");
        assert_eq!(parse("2 ^ 3 ^ 2").to_string(), "2^3^2");
        assert_eq!(parse("(2 ^ 3) ^ 2").to_string(), "(2^3)^2");
    }

    #[test]
    fn implicit_multiplication_is_left_associative() {
        // `x/2x` is `(x / 2) * x`, not `x / (2x)`
        let expr = parse("x/2x");
        let Expr::Binary(Binary { lhs, op, .. }) = expr else {
            panic!("expected a binary expression");
        };
        assert!(op.implicit);
        assert_eq!(lhs.to_string(), "x / 2");
    }

    #[test]
    fn single_letter_before_paren_is_multiplication() {
        let expr = parse("x(x + 1)");
        assert!(matches!(expr, Expr::Binary(Binary { op: BinOp { implicit: true, .. }, .. })));

        let expr = parse("abs(x + 1)");
        assert!(matches!(expr, Expr::Call(_)));
    }

    #[test]
    fn unary_chain() {
        assert_eq!(parse("--x").to_string(), "--x");
        assert_eq!(parse("2^-3").to_string(), "2^-3");
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = Parser::new("(x + 1").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn unexpected_close_paren() {
        let err = Parser::new("x + 1)").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn unknown_character() {
        let err = Parser::new("2 # 3").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn comparator_rejected() {
        let err = Parser::new("x = 2").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn dangling_operator() {
        let err = Parser::new("x +").try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![3..3]);
    }
}
