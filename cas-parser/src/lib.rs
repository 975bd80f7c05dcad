//! Tokenizer and parser for the algebraic expressions understood by the stepper.
//!
//! The accepted language is small: numbers, symbols, the binary operators `+`, `-`, `*`, `/` and
//! `^`, unary `-` and `+`, function calls such as `nthRoot(8, 3)`, and implicit multiplication
//! by juxtaposition (`2x`, `3(x + 1)`). Implicit multiplication has the same precedence as `*`
//! and `/`, and all three are left-associative, so `x/2x` parses as `(x / 2) * x`.
//!
//! ```
//! use cas_parser::parser::{ast::Expr, Parser};
//!
//! let expr = Parser::new("2x^2 + 3").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2x^2 + 3");
//! ```

pub mod parser;
pub mod tokenizer;
