//! Punctuation and operator tokens, parsed as standalone values.

pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Generates a struct for a punctuation token that parses exactly one token of the given kind.
macro_rules! punctuation {
    ($($(#[$attr:meta])* $name:ident => $kind:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $name {
                /// The region of the source code that this token was parsed from.
                pub span: Range<usize>,
            }

            impl<'source> Parse<'source> for $name {
                fn parse(input: &mut Parser<'source>) -> Result<Self, Error> {
                    let token = input.next_token()?;
                    if token.kind == TokenKind::$kind {
                        Ok(Self { span: token.span })
                    } else {
                        Err(Error::new(vec![token.span], kind::UnexpectedToken {
                            expected: &[TokenKind::$kind],
                            found: token.kind,
                        }))
                    }
                }
            }
        )*
    };
}

punctuation! {
    /// An opening parenthesis, `(`.
    OpenParen => OpenParen,

    /// A closing parenthesis, `)`.
    CloseParen => CloseParen,

    /// A comma, `,`, separating function arguments.
    Comma => Comma,
}
