use crate::parser::{
    ast::{expr::Expr, literal::Literal, unary::Unary},
    error::Error,
    token::op::{BinOp, BinOpKind},
    Associativity,
    Parser,
    Precedence,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns true if the next token could begin the right operand of implicit multiplication.
    fn implicit_follows(input: &Parser) -> bool {
        input.peek_kind().is_some_and(|kind| kind.starts_implicit_operand())
    }

    /// After parsing the left-hand side, the operator, and the right-hand side of a potential
    /// binary expression, parse ahead to see if the right-hand side is incomplete.
    ///
    /// In `1 + 2 * 3`, the first right-hand side is `2`, but `*` binds more tightly than `+`, so
    /// the expression starting at `2` is parsed first and `2 * 3` becomes the right-hand side.
    ///
    /// Implicit multiplication is handled the same way: in `1 + 2x`, there is no operator after
    /// `2`, but a name follows it, so `2x` is parsed as a product before building `1 + 2x`. The
    /// `changed` flag returned by [`Self::parse_expr`] tells us when nothing more was consumed,
    /// which would otherwise loop forever.
    fn complete_rhs(
        input: &mut Parser,
        lhs: Expr,
        op: BinOp,
        mut rhs: Expr,
    ) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            if let Ok(next_op) = input_ahead.try_parse::<BinOp>() {
                let binds_tighter = next_op.precedence() > precedence
                    || (next_op.precedence() == precedence && next_op.associativity() == Associativity::Right);
                if !binds_tighter {
                    // `1 * 2 + 3` or `1 * 2 * 3`: let `lhs` become `1 * 2`, the outer loop picks
                    // up the next operator
                    break;
                }
                rhs = Self::parse_expr(input, rhs, next_op.precedence())?.0;
            } else if Self::implicit_follows(input) && Precedence::Factor > precedence {
                let (expr, changed) = Self::parse_expr(input, rhs, Precedence::Factor)?;
                rhs = expr;
                if !changed {
                    break;
                }
            } else {
                break;
            }
        }

        let span = lhs.span().start..rhs.span().end;
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        }))
    }

    /// After parsing the left-hand side of a potential binary expression, parse ahead to see if
    /// there is a binary operator (or implicit multiplication) and a right-hand side.
    ///
    /// Only operators with a precedence of at least `precedence` are consumed. The returned
    /// boolean is true if anything was consumed.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<(Expr, bool), Error> {
        let mut changed = false;
        loop {
            let mut input_ahead = input.clone();
            match input_ahead.try_parse::<BinOp>() {
                Ok(op) if op.precedence() >= precedence => {
                    *input = input_ahead;
                    let rhs = Unary::parse_or_lower(input)?;
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                    changed = true;
                },
                Ok(_) => break,
                Err(_) if Precedence::Factor >= precedence && Self::implicit_follows(input) => {
                    let rhs = Expr::parse_atom(input)?;
                    let op = BinOp {
                        kind: BinOpKind::Mul,
                        implicit: true,
                        span: lhs.span().end..rhs.span().start,
                    };
                    lhs = Self::complete_rhs(input, lhs, op, rhs)?;
                    changed = true;
                },
                Err(_) => break,
            }
        }

        Ok((lhs, changed))
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.op.kind, self.op.implicit) {
            (BinOpKind::Mul, true) => match *self.lhs {
                Expr::Literal(Literal::Number(_)) => write!(f, "{}{}", self.lhs, self.rhs),
                _ => write!(f, "{} {}", self.lhs, self.rhs),
            },
            (BinOpKind::Exp, _) => write!(f, "{}^{}", self.lhs, self.rhs),
            _ => write!(f, "{} {} {}", self.lhs, self.op, self.rhs),
        }
    }
}
