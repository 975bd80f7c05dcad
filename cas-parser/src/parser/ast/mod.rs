//! Abstract syntax tree for algebraic expressions.
//!
//! Every node records the span of source code it was parsed from, so that later stages can point
//! back into the input when reporting errors.

pub mod binary;
pub mod call;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use expr::Expr;
pub use literal::{Literal, LitNum, LitSym};
pub use paren::Paren;
pub use unary::Unary;
