//! Pattern syntax tree and its normalization pass.

/// A node of the pattern tree. Every variant denotes a finite language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A fixed string; exactly one word.
    Literal(String),
    /// One character drawn from the payload, in payload order. Duplicates
    /// are kept and enumerate as distinct positions.
    List(String),
    /// One character drawn from an inclusive code-point range.
    Range(char, char),
    /// Concatenation of the children, in order.
    Scope(Vec<Node>),
    /// Alternation over the children, in order.
    Or(Vec<Node>),
    /// The child repeated between `min` and `max` times inclusive.
    Repeat {
        min: u32,
        max: u32,
        child: Box<Node>,
    },
}

#[derive(Clone, Copy)]
enum Parent {
    Root,
    Scope,
    Or,
    Repeat,
}

/// Rewrite a tree into its canonical shape. Idempotent.
///
/// Inside a scope, maximal runs of adjacent literals fuse into one; a
/// scope left with a single child is inlined into a scope or or parent;
/// an or nested directly under an or is spliced flat.
pub fn compact(node: Node) -> Node {
    compact_under(node, Parent::Root)
}

fn compact_under(node: Node, parent: Parent) -> Node {
    match node {
        Node::Scope(children) => {
            let mut fused: Vec<Node> = Vec::with_capacity(children.len());
            for child in children {
                match compact_under(child, Parent::Scope) {
                    Node::Literal(tail) => match fused.last_mut() {
                        Some(Node::Literal(run)) => run.push_str(&tail),
                        _ => fused.push(Node::Literal(tail)),
                    },
                    other => fused.push(other),
                }
            }
            if matches!(parent, Parent::Scope | Parent::Or) && fused.len() == 1 {
                if let Some(only) = fused.pop() {
                    return only;
                }
            }
            Node::Scope(fused)
        }
        Node::Or(children) => {
            let mut flat: Vec<Node> = Vec::with_capacity(children.len());
            for child in children {
                match compact_under(child, Parent::Or) {
                    Node::Or(inner) => flat.extend(inner),
                    other => flat.push(other),
                }
            }
            Node::Or(flat)
        }
        Node::Repeat { min, max, child } => Node::Repeat {
            min,
            max,
            child: Box::new(compact_under(*child, Parent::Repeat)),
        },
        leaf => leaf,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Node {
        Node::Literal(s.to_string())
    }

    #[test]
    fn test_fuse_adjacent_literals() {
        let tree = Node::Scope(vec![lit("a"), lit("b"), Node::List("xy".to_string()), lit("c")]);
        assert_eq!(
            compact(tree),
            Node::Scope(vec![lit("ab"), Node::List("xy".to_string()), lit("c")])
        );
    }

    #[test]
    fn test_elision_enables_fusion() {
        // Inlining a single-child scope leaves its literal adjacent to the
        // neighbors, and the same pass fuses the run.
        let tree = Node::Scope(vec![lit("a"), Node::Scope(vec![lit("b")]), lit("c")]);
        assert_eq!(compact(tree), Node::Scope(vec![lit("abc")]));
    }

    #[test]
    fn test_root_scope_is_kept() {
        let tree = Node::Scope(vec![lit("a")]);
        assert_eq!(compact(tree), Node::Scope(vec![lit("a")]));
    }

    #[test]
    fn test_or_splices_nested_or() {
        let tree = Node::Or(vec![
            lit("a"),
            Node::Or(vec![lit("b"), Node::Or(vec![lit("c"), lit("d")])]),
        ]);
        assert_eq!(
            compact(tree),
            Node::Or(vec![lit("a"), lit("b"), lit("c"), lit("d")])
        );
    }

    #[test]
    fn test_scope_elision_under_or() {
        let tree = Node::Or(vec![
            Node::Scope(vec![lit("a")]),
            Node::Scope(vec![lit("b")]),
        ]);
        assert_eq!(compact(tree), Node::Or(vec![lit("a"), lit("b")]));
    }

    #[test]
    fn test_elided_scope_exposes_or_for_splicing() {
        // (x|y) as the sole child of an alternative: the scope elides to
        // its or, which then splices into the parent or.
        let tree = Node::Or(vec![
            lit("a"),
            Node::Scope(vec![Node::Or(vec![
                Node::Scope(vec![lit("x")]),
                Node::Scope(vec![lit("y")]),
            ])]),
        ]);
        assert_eq!(compact(tree), Node::Or(vec![lit("a"), lit("x"), lit("y")]));
    }

    #[test]
    fn test_repeat_interior_is_normalized() {
        let tree = Node::Repeat {
            min: 1,
            max: 2,
            child: Box::new(Node::Scope(vec![
                lit("a"),
                Node::Scope(vec![lit("b")]),
                lit("c"),
            ])),
        };
        assert_eq!(
            compact(tree),
            Node::Repeat {
                min: 1,
                max: 2,
                child: Box::new(Node::Scope(vec![lit("abc")])),
            }
        );
    }

    #[test]
    fn test_leaves_unchanged() {
        assert_eq!(compact(lit("abc")), lit("abc"));
        assert_eq!(
            compact(Node::Range('a', 'f')),
            Node::Range('a', 'f')
        );
        assert_eq!(
            compact(Node::List("aa".to_string())),
            Node::List("aa".to_string())
        );
    }

    #[test]
    fn test_compact_is_idempotent() {
        let trees = vec![
            Node::Scope(vec![lit("a"), Node::Scope(vec![lit("b")]), lit("c")]),
            Node::Or(vec![lit("a"), Node::Or(vec![lit("b"), lit("c")])]),
            Node::Scope(vec![Node::Or(vec![
                Node::Scope(vec![lit("a")]),
                Node::Scope(vec![Node::List("xy".to_string())]),
            ])]),
            Node::Repeat {
                min: 0,
                max: 3,
                child: Box::new(Node::Scope(vec![lit("a"), lit("b")])),
            },
        ];
        for tree in trees {
            let once = compact(tree);
            assert_eq!(compact(once.clone()), once);
        }
    }
}
