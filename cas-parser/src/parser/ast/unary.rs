use crate::parser::{
    ast::{binary::Binary, expr::Expr},
    error::Error,
    token::op::UnaryOp,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`.
///
/// Negation binds more loosely than exponentiation, so `-x^2` is `-(x^2)`, but more tightly than
/// multiplication, so `-2x` is `(-2) * x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions (an atom raised to a power).
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        if let Ok(op) = input.try_parse::<UnaryOp>() {
            let operand = Self::parse_or_lower(input)?;
            let (operand, _) = Binary::parse_expr(input, operand, Precedence::Exp)?;
            let span = op.span.start..operand.span().end;
            return Ok(Expr::Unary(Self {
                operand: Box::new(operand),
                op,
                span,
            }));
        }

        Expr::parse_atom(input)
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.operand)
    }
}
