//! The record of a single rewrite: what changed, what it looked like before and after, and which
//! smaller steps explain it.

use std::collections::BTreeMap;
use crate::{change_type::ChangeType, node::{Node, NodePath}};

/// Correlates the parts of an old node with the parts of the new node they became.
///
/// Each group id maps to the paths of the participating subtrees in the old and the new node. A
/// renderer can use the table to highlight "this part became that part". The table is kept
/// beside the nodes instead of inside them, so node equality is unaffected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeGroups {
    /// Group id to paths into the old node.
    pub old: BTreeMap<u32, Vec<NodePath>>,

    /// Group id to paths into the new node.
    pub new: BTreeMap<u32, Vec<NodePath>>,
}

impl ChangeGroups {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with group 1 covering the whole old and new node.
    pub fn root() -> Self {
        let mut groups = Self::new();
        groups.mark_old(1, Vec::new());
        groups.mark_new(1, Vec::new());
        groups
    }

    /// Adds a path into the old node to the given group.
    pub fn mark_old(&mut self, id: u32, path: NodePath) {
        self.old.entry(id).or_default().push(path);
    }

    /// Adds a path into the new node to the given group.
    pub fn mark_new(&mut self, id: u32, path: NodePath) {
        self.new.entry(id).or_default().push(path);
    }

    /// Returns true if no group has been assigned.
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }

    /// Returns the table with `index` prepended to every path, as if the nodes became the
    /// `index`-th child of a parent.
    fn prefixed(self, index: usize) -> Self {
        let prefix = |table: BTreeMap<u32, Vec<NodePath>>| {
            table.into_iter()
                .map(|(id, paths)| {
                    let paths = paths.into_iter()
                        .map(|path| std::iter::once(index).chain(path).collect())
                        .collect();
                    (id, paths)
                })
                .collect()
        };

        Self {
            old: prefix(self.old),
            new: prefix(self.new),
        }
    }
}

/// The result of one rewrite attempt on an expression.
///
/// `old_node` is present exactly when something changed, that is, when `change_type` is not
/// [`ChangeType::NoChange`].
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    /// The rule that was applied.
    pub change_type: ChangeType,

    /// The node before the rewrite.
    pub old_node: Option<Node>,

    /// The node after the rewrite. If nothing changed, this is the input node.
    pub new_node: Node,

    /// The smaller steps that explain this step, in order.
    pub substeps: Vec<Status>,

    /// Correlation between parts of the old and new node.
    pub groups: ChangeGroups,
}

impl Status {
    /// Creates a status recording that nothing changed.
    pub fn no_change(node: Node) -> Self {
        Self {
            change_type: ChangeType::NoChange,
            old_node: None,
            new_node: node,
            substeps: Vec::new(),
            groups: ChangeGroups::new(),
        }
    }

    /// Creates a status recording that `old_node` became `new_node`, with group 1 covering both.
    ///
    /// # Panics
    ///
    /// Panics if `change_type` is [`ChangeType::NoChange`]. Use [`Status::no_change`] instead.
    pub fn node_changed(change_type: ChangeType, old_node: Node, new_node: Node) -> Self {
        Self::with_groups(change_type, old_node, new_node, ChangeGroups::root())
    }

    /// Like [`Status::node_changed`], with the given substeps.
    pub fn with_substeps(
        change_type: ChangeType,
        old_node: Node,
        new_node: Node,
        substeps: Vec<Status>,
    ) -> Self {
        Self {
            substeps,
            ..Self::node_changed(change_type, old_node, new_node)
        }
    }

    /// Like [`Status::node_changed`], with a custom group table instead of group 1 on the root.
    pub fn with_groups(
        change_type: ChangeType,
        old_node: Node,
        new_node: Node,
        groups: ChangeGroups,
    ) -> Self {
        assert!(
            !change_type.is_no_change(),
            "a changed node must be tagged with a rule other than {}",
            ChangeType::NoChange,
        );

        Self {
            change_type,
            old_node: Some(old_node),
            new_node,
            substeps: Vec::new(),
            groups,
        }
    }

    /// Returns true if the rewrite changed the node.
    pub fn has_changed(&self) -> bool {
        !self.change_type.is_no_change()
    }

    /// Returns the status if it changed the node, for chaining rules with [`Option::or_else`].
    pub fn changed(self) -> Option<Self> {
        self.has_changed().then_some(self)
    }

    /// Lifts a status that changed the `index`-th child of `parent` into a status on `parent`.
    ///
    /// The child's old and new nodes are spliced into copies of the parent, every group path is
    /// prefixed with `index` (unless the parent is a parenthesis, which paths look through), and
    /// every substep is lifted the same way, so that each one can be shown at the parent's scope.
    pub fn child_changed(parent: &Node, child: Status, index: usize) -> Self {
        if !child.has_changed() {
            return Self::no_change(parent.clone());
        }

        let old_node = child.old_node.map(|old| parent.with_child(index, old));
        let new_node = parent.with_child(index, child.new_node);
        let substeps = child.substeps
            .into_iter()
            .map(|substep| Self::child_changed(parent, substep, index))
            .collect();
        let groups = match parent {
            Node::Parens(_) => child.groups,
            _ => child.groups.prefixed(index),
        };

        Self {
            change_type: child.change_type,
            old_node,
            new_node,
            substeps,
            groups,
        }
    }

    /// Drops all change groups, recursively through the substeps.
    pub fn reset_change_groups(mut self) -> Self {
        self.groups = ChangeGroups::new();
        self.substeps = self.substeps.into_iter().map(Self::reset_change_groups).collect();
        self
    }

    /// Applies `f` to the old and new node of this status and of every substep.
    pub fn map_nodes(self, f: &impl Fn(&Node) -> Node) -> Self {
        Self {
            change_type: self.change_type,
            old_node: self.old_node.as_ref().map(f),
            new_node: f(&self.new_node),
            substeps: self.substeps.into_iter().map(|substep| substep.map_nodes(f)).collect(),
            groups: self.groups,
        }
    }
}
