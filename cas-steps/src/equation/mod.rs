//! Equations and inequalities, and the solver that isolates their symbol.
//!
//! ```
//! use cas_steps::equation::{solve, Equation};
//!
//! let equation = Equation::parse("2x + 3 = 7").unwrap();
//! let steps = solve::step_through(&equation);
//! assert_eq!(steps.last().unwrap().new_equation.to_string(), "x = 2");
//! ```

pub mod scope;
pub mod solve;
pub mod status;

pub use scope::Scope;
pub use status::{EquationGroups, EquationStatus};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{error::Error, node::Node};

/// The relation between the two sides of an [`Equation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Comparator {
    /// `=`
    Eq,

    /// `<`
    Lt,

    /// `>`
    Gt,

    /// `<=`
    Le,

    /// `>=`
    Ge,
}

impl Comparator {
    /// The order in which comparators are looked for when splitting an equation. Two-character
    /// comparators come first so that `<=` is not split at `=`.
    pub const SPLIT_ORDER: [Comparator; 5] = [
        Comparator::Le,
        Comparator::Ge,
        Comparator::Eq,
        Comparator::Lt,
        Comparator::Gt,
    ];

    /// Returns the source form of the comparator.
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Lt => "<",
            Comparator::Gt => ">",
            Comparator::Le => "<=",
            Comparator::Ge => ">=",
        }
    }

    /// Returns the comparator that keeps the relation true when the sides are swapped, or when
    /// both sides are multiplied or divided by a negative number.
    pub fn flip(self) -> Self {
        match self {
            Comparator::Eq => Comparator::Eq,
            Comparator::Lt => Comparator::Gt,
            Comparator::Gt => Comparator::Lt,
            Comparator::Le => Comparator::Ge,
            Comparator::Ge => Comparator::Le,
        }
    }

    /// Returns true if the relation holds between the two values.
    pub fn holds(self, left: f64, right: f64) -> bool {
        // values come from rounded arithmetic, so equality allows for representation error
        let equal = (left - right).abs() < 1e-10;
        match self {
            Comparator::Eq => equal,
            Comparator::Lt => left < right && !equal,
            Comparator::Gt => left > right && !equal,
            Comparator::Le => left < right || equal,
            Comparator::Ge => left > right || equal,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// An equation or inequality, `left comparator right`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub left: Node,
    pub right: Node,
    pub comparator: Comparator,
}

impl Equation {
    /// Creates a new equation.
    pub fn new(left: Node, right: Node, comparator: Comparator) -> Self {
        Self { left, right, comparator }
    }

    /// Parses an equation, splitting it at the first comparator found in
    /// [`Comparator::SPLIT_ORDER`] that splits the text into exactly two sides.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let (left, comparator, right) = split(text)?;
        let left = Node::parse(left).map_err(|err| Error::parse(left, err))?;
        let right = Node::parse(right).map_err(|err| Error::parse(right, err))?;
        Ok(Self::new(left, right, comparator))
    }

    /// Returns the given side.
    pub fn side(&self, side: Side) -> &Node {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Returns a copy of the equation with the given side replaced.
    pub fn with_side(&self, side: Side, node: Node) -> Self {
        match side {
            Side::Left => Self { left: node, ..self.clone() },
            Side::Right => Self { right: node, ..self.clone() },
        }
    }

    /// Applies `f` to both sides.
    pub fn map_sides(&self, f: impl Fn(&Node) -> Node) -> Self {
        Self::new(f(&self.left), f(&self.right), self.comparator)
    }

    /// Returns the symbol to solve for: the first symbol on the left side, else on the right.
    pub fn symbol(&self) -> Option<&str> {
        self.left.first_symbol().or_else(|| self.right.first_symbol())
    }

    /// Returns true if neither side contains a symbol.
    pub fn is_constant(&self) -> bool {
        !self.left.has_symbol() && !self.right.has_symbol()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.comparator, self.right)
    }
}

/// Splits the text into its two sides and comparator, without parsing the sides.
pub fn split(text: &str) -> Result<(&str, Comparator, &str), Error> {
    let (left, comparator, right) = Comparator::SPLIT_ORDER
        .into_iter()
        .find_map(|comparator| {
            let mut parts = text.split(comparator.as_str());
            match (parts.next(), parts.next(), parts.next()) {
                (Some(left), Some(right), None) => Some((left, comparator, right)),
                _ => None,
            }
        })
        .ok_or(Error::MissingComparator)?;

    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return Err(Error::EmptySide);
    }
    Ok((left, comparator, right))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn split_prefers_two_character_comparators() {
        assert_eq!(split("x <= 3").unwrap(), ("x", Comparator::Le, "3"));
        assert_eq!(split("2x >= y + 1").unwrap(), ("2x", Comparator::Ge, "y + 1"));
        assert_eq!(split("x = 3").unwrap(), ("x", Comparator::Eq, "3"));
        assert_eq!(split("x<3").unwrap(), ("x", Comparator::Lt, "3"));
    }

    #[test]
    fn split_failures() {
        assert!(matches!(split("x + 3"), Err(Error::MissingComparator)));
        assert!(matches!(split("x = 3 = y"), Err(Error::MissingComparator)));
        assert!(matches!(split(" = 3"), Err(Error::EmptySide)));
    }

    #[test]
    fn parse_and_print() {
        let equation = Equation::parse("2x+3=7").unwrap();
        assert_eq!(equation.comparator, Comparator::Eq);
        assert_eq!(equation.to_string(), "2x + 3 = 7");
        assert_eq!(equation.symbol(), Some("x"));
    }

    #[test]
    fn parse_error_names_the_side() {
        match Equation::parse("x = 3 +") {
            Err(Error::Parse { input, .. }) => assert_eq!(input, "3 +"),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn comparisons() {
        assert!(Comparator::Eq.holds(2.0, 2.0));
        assert!(!Comparator::Eq.holds(2.0, 3.0));
        assert!(Comparator::Le.holds(2.0, 2.0));
        assert!(!Comparator::Lt.holds(2.0, 2.0));
        assert!(Comparator::Gt.holds(3.0, 2.0));
        assert_eq!(Comparator::Lt.flip(), Comparator::Gt);
        assert_eq!(Comparator::Ge.flip(), Comparator::Le);
    }
}
