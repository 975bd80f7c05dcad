//! The expression tree that every rewrite operates on.
//!
//! A [`Node`] is a plain value: rewrites never mutate a node in place, they build a new one that
//! shares nothing with the old tree except clones of the untouched siblings. Equality is
//! structural, so two nodes compare equal exactly when they print the same and have the same
//! shape.
//!
//! Unlike the [`cas_parser`] AST, nodes carry no spans. Operators are n-ary: the pipeline
//! flattens `(a + b) + c` into one sum with three arguments before every pass, which keeps like
//! terms at the same level of the tree.
//!
//! ```
//! use cas_steps::node::Node;
//!
//! let node = Node::parse("2x + 3").unwrap();
//! assert_eq!(node.to_string(), "2x + 3");
//! assert!(node.contains_symbol("x"));
//! ```

pub mod negative;
pub mod predicates;
pub mod print;
pub mod term;

use cas_parser::parser::{
    ast::{Binary, Call, Expr, Literal, Unary},
    token::op::{BinOpKind, UnaryOpKind},
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A path from the root of a tree to one of its descendants, as a list of child indices.
///
/// Parenthesis nodes are transparent: they do not contribute an index, so stripping redundant
/// parentheses never invalidates a path.
pub type NodePath = Vec<usize>;

/// An arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    /// Returns the symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
        }
    }
}

/// A node in an expression tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A numeric literal, such as `2` or `-0.5`.
    Number(f64),

    /// A symbol, such as `x`.
    Symbol(String),

    /// Negation of the operand, `-a`.
    UnaryMinus(Box<Node>),

    /// An operator applied to its arguments. Addition and multiplication can have any number of
    /// arguments; the other operators have exactly two.
    Operator {
        op: Op,
        args: Vec<Node>,

        /// Whether the operator is implicit multiplication by juxtaposition, as in `2x`.
        implicit: bool,
    },

    /// A function call, such as `abs(x)` or `nthRoot(8, 3)`.
    Function {
        name: String,
        args: Vec<Node>,
    },

    /// An explicitly parenthesized expression.
    Parens(Box<Node>),
}

/// Constructors.
impl Node {
    /// Creates a number node.
    pub fn number(value: f64) -> Self {
        Node::Number(value)
    }

    /// Creates a symbol node.
    pub fn symbol(name: impl Into<String>) -> Self {
        Node::Symbol(name.into())
    }

    /// Creates the negation of the given node.
    pub fn unary_minus(operand: Node) -> Self {
        Node::UnaryMinus(Box::new(operand))
    }

    /// Wraps the given node in parentheses.
    pub fn parens(content: Node) -> Self {
        Node::Parens(Box::new(content))
    }

    /// Creates an explicit operator node.
    pub fn operator(op: Op, args: Vec<Node>) -> Self {
        Node::Operator { op, args, implicit: false }
    }

    /// Creates an operator node, choosing whether it is implicit.
    pub fn operator_with(op: Op, args: Vec<Node>, implicit: bool) -> Self {
        Node::Operator { op, args, implicit }
    }

    /// Creates a sum. A single argument is returned unchanged.
    pub fn add(mut args: Vec<Node>) -> Self {
        if args.len() == 1 {
            return args.remove(0);
        }
        Node::operator(Op::Add, args)
    }

    /// Creates an explicit product. A single argument is returned unchanged.
    pub fn mul(mut args: Vec<Node>) -> Self {
        if args.len() == 1 {
            return args.remove(0);
        }
        Node::operator(Op::Mul, args)
    }

    /// Creates an implicit product, such as `2x`. A single argument is returned unchanged.
    pub fn implicit_mul(mut args: Vec<Node>) -> Self {
        if args.len() == 1 {
            return args.remove(0);
        }
        Node::operator_with(Op::Mul, args, true)
    }

    /// Creates the division `numerator / denominator`.
    pub fn div(numerator: Node, denominator: Node) -> Self {
        Node::operator(Op::Div, vec![numerator, denominator])
    }

    /// Creates the power `base ^ exponent`.
    pub fn pow(base: Node, exponent: Node) -> Self {
        Node::operator(Op::Pow, vec![base, exponent])
    }

    /// Creates a function call.
    pub fn function(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Function { name: name.into(), args }
    }

    /// Creates `nthRoot(radicand, root)`.
    pub fn nth_root(radicand: Node, root: Node) -> Self {
        Node::function("nthRoot", vec![radicand, root])
    }

    /// Builds a polynomial term from its parts: `coeff * symbol ^ exponent`.
    ///
    /// A coefficient of 1 is omitted and a coefficient of -1 becomes a unary minus, unless
    /// `explicit_coeff` is set, in which case the coefficient is always written out.
    pub fn polynomial_term(
        base: Node,
        exponent: Option<Node>,
        coeff: Option<Node>,
        explicit_coeff: bool,
    ) -> Self {
        let mut term = match exponent {
            Some(exponent) => Node::pow(base, exponent),
            None => base,
        };

        if let Some(coeff) = coeff {
            match coeff.as_number() {
                Some(v) if v == 1.0 && !explicit_coeff => {},
                Some(v) if v == -1.0 && !explicit_coeff => term = Node::unary_minus(term),
                _ => term = Node::implicit_mul(vec![coeff, term]),
            }
        }

        term
    }
}

/// Accessors.
impl Node {
    /// Returns the value of a number node.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Node::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the name of a symbol node.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the operator of an operator node.
    pub fn op(&self) -> Option<Op> {
        match self {
            Node::Operator { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Returns true if this is an operator node with the given operator.
    pub fn is_op(&self, target: Op) -> bool {
        self.op() == Some(target)
    }

    /// Returns true if this is an implicit operator node.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Node::Operator { implicit: true, .. })
    }

    /// Returns true if this is a call to the function with the given name.
    pub fn is_function(&self, target: &str) -> bool {
        matches!(self, Node::Function { name, .. } if name == target)
    }

    /// Returns the arguments of an operator or function node, or an empty slice otherwise.
    pub fn args(&self) -> &[Node] {
        match self {
            Node::Operator { args, .. } | Node::Function { args, .. } => args,
            _ => &[],
        }
    }

    /// Returns the content of a parenthesis node, or the node itself.
    pub fn unparenthesized(&self) -> &Node {
        let mut node = self;
        while let Node::Parens(content) = node {
            node = content;
        }
        node
    }

    /// Returns the direct children of the node.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Number(_) | Node::Symbol(_) => Vec::new(),
            Node::UnaryMinus(operand) | Node::Parens(operand) => vec![operand],
            Node::Operator { args, .. } | Node::Function { args, .. } => args.iter().collect(),
        }
    }

    /// Returns the child at the given index.
    pub fn child(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Number(_) | Node::Symbol(_) => None,
            Node::UnaryMinus(operand) | Node::Parens(operand) => (index == 0).then_some(&**operand),
            Node::Operator { args, .. } | Node::Function { args, .. } => args.get(index),
        }
    }

    /// Returns a copy of the node with the child at the given index replaced.
    ///
    /// Leaves and out-of-range indices return an unchanged copy.
    pub fn with_child(&self, index: usize, child: Node) -> Node {
        let mut node = self.clone();
        match &mut node {
            Node::Number(_) | Node::Symbol(_) => {},
            Node::UnaryMinus(operand) | Node::Parens(operand) => {
                if index == 0 {
                    **operand = child;
                }
            },
            Node::Operator { args, .. } | Node::Function { args, .. } => {
                if let Some(slot) = args.get_mut(index) {
                    *slot = child;
                }
            },
        }
        node
    }

    /// Returns the descendant at the given path, looking through parentheses.
    pub fn at_path(&self, path: &[usize]) -> Option<&Node> {
        let mut node = self.unparenthesized();
        for &index in path {
            node = node.child(index)?.unparenthesized();
        }
        Some(node)
    }

    /// Returns the number of nodes in the tree.
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Node::size).sum::<usize>()
    }
}

/// Symbols.
impl Node {
    /// Returns true if the symbol with the given name appears anywhere in the tree.
    pub fn contains_symbol(&self, target: &str) -> bool {
        match self {
            Node::Symbol(name) => name == target,
            _ => self.children().into_iter().any(|child| child.contains_symbol(target)),
        }
    }

    /// Returns true if any symbol appears in the tree.
    pub fn has_symbol(&self) -> bool {
        self.first_symbol().is_some()
    }

    /// Returns the first symbol in the tree, searching depth-first, left to right.
    pub fn first_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol(name) => Some(name),
            _ => self.children().into_iter().find_map(Node::first_symbol),
        }
    }
}

/// Parsing.
impl Node {
    /// Parses a node from the given source text.
    pub fn parse(source: &str) -> Result<Node, cas_error::Error> {
        let expr = Parser::new(source).try_parse_full::<Expr>()?;
        Ok(Node::from(&expr))
    }
}

impl From<&Expr> for Node {
    fn from(expr: &Expr) -> Self {
        match expr {
            Expr::Literal(Literal::Number(num)) => Node::Number(num.value),
            Expr::Literal(Literal::Symbol(sym)) => Node::Symbol(sym.name.clone()),
            Expr::Paren(paren) => Node::parens(Node::from(&*paren.expr)),
            Expr::Call(call) => Node::from(call),
            Expr::Unary(Unary { operand, op, .. }) => match op.kind {
                UnaryOpKind::Neg => Node::unary_minus(Node::from(&**operand)),
                UnaryOpKind::Pos => Node::from(&**operand),
            },
            Expr::Binary(Binary { lhs, op, rhs, .. }) => {
                let op_kind = match op.kind {
                    BinOpKind::Add => Op::Add,
                    BinOpKind::Sub => Op::Sub,
                    BinOpKind::Mul => Op::Mul,
                    BinOpKind::Div => Op::Div,
                    BinOpKind::Exp => Op::Pow,
                };
                Node::operator_with(op_kind, vec![Node::from(&**lhs), Node::from(&**rhs)], op.implicit)
            },
        }
    }
}

impl From<&Call> for Node {
    fn from(call: &Call) -> Self {
        let mut args = call.args.iter().map(Node::from).collect::<Vec<_>>();
        match call.name.name.as_str() {
            "sqrt" if args.len() == 1 => Node::nth_root(args.remove(0), Node::Number(2.0)),
            "cbrt" if args.len() == 1 => Node::nth_root(args.remove(0), Node::Number(3.0)),
            name => Node::function(name, args),
        }
    }
}
