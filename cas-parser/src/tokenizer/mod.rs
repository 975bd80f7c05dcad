pub mod token;

use logos::{Lexer, Logos};
use std::ops::Range;
pub use token::{Token, TokenKind};

/// A character the tokenizer could not recognize, and where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownChar {
    /// The region of the source code containing the character.
    pub span: Range<usize>,

    /// The offending character.
    pub character: char,
}

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows the
/// parser to backtrack.
///
/// Tokenizing stops at the first character that does not begin any token; that character is
/// returned as an [`UnknownChar`] instead.
pub fn tokenize_complete(input: &str) -> Result<Box<[Token]>, UnknownChar> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                span: lexer.span(),
                kind,
                lexeme: lexer.slice(),
            }),
            Err(()) => {
                let span = lexer.span();
                let character = input[span.start..].chars().next().unwrap_or('\u{fffd}');
                return Err(UnknownChar {
                    span: span.start..span.start + character.len_utf8(),
                    character,
                });
            },
        }
    }

    Ok(tokens.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication() {
        compare_tokens(
            "2x^2 - .5y",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Number, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, ".5"),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn comparators() {
        compare_tokens(
            "x<=3>=y<z>w=1",
            [
                (TokenKind::Name, "x"),
                (TokenKind::LessEq, "<="),
                (TokenKind::Number, "3"),
                (TokenKind::GreaterEq, ">="),
                (TokenKind::Name, "y"),
                (TokenKind::Less, "<"),
                (TokenKind::Name, "z"),
                (TokenKind::Greater, ">"),
                (TokenKind::Name, "w"),
                (TokenKind::Eq, "="),
                (TokenKind::Number, "1"),
            ],
        );
    }

    #[test]
    fn function_call() {
        compare_tokens(
            "nthRoot(8, 3)",
            [
                (TokenKind::Name, "nthRoot"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Number, "8"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "3"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn unknown_character() {
        let err = tokenize_complete("2 + $x").unwrap_err();
        assert_eq!(err, UnknownChar { span: 4..5, character: '$' });
    }
}
