use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym},
        error::{kind, Error},
        token::{CloseParen, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `abs(-3)` or `nthRoot(8, 3)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function being called.
    pub name: LitSym,

    /// The arguments passed to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns true if the upcoming tokens begin a function call.
    ///
    /// A name is a function only when it is longer than one character and is directly followed by
    /// an opening parenthesis. Single-letter names are always symbols, so `x(x + 1)` is implicit
    /// multiplication.
    pub fn is_next(input: &Parser) -> bool {
        let mut ahead = input.clone();
        match ahead.next_token() {
            Ok(token) if token.kind == TokenKind::Name && token.lexeme.chars().count() > 1 => {
                ahead.peek_kind() == Some(TokenKind::OpenParen)
            },
            _ => false,
        }
    }
}

impl<'source> Parse<'source> for Call {
    fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open = input.try_parse::<OpenParen>()?;

        let args = if input.peek_kind() == Some(TokenKind::CloseParen) {
            Vec::new()
        } else {
            input.try_parse_delimited::<Expr>(TokenKind::Comma)?
        };

        let close = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new(vec![open.span.clone()], kind::UnclosedParenthesis { opening: true }))?;

        Ok(Self {
            span: name.span.start..close.span.end,
            name,
            args,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
