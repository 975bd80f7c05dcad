use crate::{change_type::ChangeType, node::Node, status::Status};

/// `abs(-3) = 3`
/// `abs(-1/2) = 1/2`
pub fn absolute_value(node: &Node) -> Option<Status> {
    let Node::Function { name, args } = node else {
        return None;
    };
    if name != "abs" {
        return None;
    }

    let new_node = match args.as_slice() {
        [Node::Number(value)] => Node::Number(value.abs()),
        [fraction] => {
            let (numerator, denominator) = fraction.as_fraction()?;
            Node::div(Node::Number(numerator.abs()), Node::Number(denominator.abs()))
        },
        _ => return None,
    };
    Some(Status::node_changed(ChangeType::AbsoluteValue, node.clone(), new_node))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    #[test]
    fn constants() {
        let status = absolute_value(&normalize(&parse_node("abs(-3)"))).unwrap();
        assert_eq!(status.new_node, Node::Number(3.0));

        let status = absolute_value(&normalize(&parse_node("abs(-1/2)"))).unwrap();
        assert_eq!(status.new_node.to_string(), "1/2");
    }

    #[test]
    fn unevaluated_argument() {
        assert!(absolute_value(&normalize(&parse_node("abs(2 - 5)"))).is_none());
    }
}
