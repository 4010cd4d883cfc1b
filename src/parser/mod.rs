//! Table-driven pattern parsing.
//!
//! Parsing is split into three layers:
//! - `table`: the grammar as pure data, states with ordered dispatch edges
//! - `driver`: streams characters through the table, one event per step
//! - `builder`: interprets the event stream into a syntax tree
//!
//! [`parse`] wires the layers together and normalizes the result. The
//! layers are public so collaborators (debug dumps, alternative grammars)
//! can assemble their own pipelines from the same parts.

pub mod builder;
pub mod driver;
pub mod table;

use std::sync::OnceLock;

use crate::ast::{self, Node};
use crate::RegenumError;

use builder::Builder;
use driver::drive;
use table::Table;

/// The built-in grammar, built once and shared.
pub fn grammar() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(Table::core)
}

/// Parse a pattern into its canonical syntax tree.
pub fn parse(pattern: &str) -> Result<Node, RegenumError> {
    let mut builder = Builder::new();
    drive(pattern, grammar(), |ev| builder.step(ev))?;
    Ok(ast::compact(builder.finish()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::builder::CLASS_DIGIT;

    #[test]
    fn test_parse_literal() {
        assert_eq!(
            parse("abc").unwrap(),
            Node::Scope(vec![Node::Literal("abc".to_string())])
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("").unwrap(), Node::Scope(Vec::new()));
    }

    #[test]
    fn test_parse_group_fuses_away() {
        // The group scope is elided and its literal fuses with the
        // neighbors, so grouping without operators leaves no trace.
        assert_eq!(
            parse("a(bc)d").unwrap(),
            Node::Scope(vec![Node::Literal("abcd".to_string())])
        );
    }

    #[test]
    fn test_parse_group_alternation_keeps_or() {
        assert_eq!(
            parse("(a|b|c)").unwrap(),
            Node::Scope(vec![Node::Or(vec![
                Node::Literal("a".to_string()),
                Node::Literal("b".to_string()),
                Node::Literal("c".to_string()),
            ])])
        );
    }

    #[test]
    fn test_parse_top_level_alternation() {
        assert_eq!(
            parse("a|b|c").unwrap(),
            Node::Or(vec![
                Node::Literal("a".to_string()),
                Node::Literal("b".to_string()),
                Node::Literal("c".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(
            parse("ab?c").unwrap(),
            Node::Scope(vec![
                Node::Literal("a".to_string()),
                Node::Repeat {
                    min: 0,
                    max: 1,
                    child: Box::new(Node::Literal("b".to_string())),
                },
                Node::Literal("c".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_bounded_repeat() {
        assert_eq!(
            parse("a{2,5}").unwrap(),
            Node::Scope(vec![Node::Repeat {
                min: 2,
                max: 5,
                child: Box::new(Node::Literal("a".to_string())),
            }])
        );
    }

    #[test]
    fn test_parse_repeat_binds_to_group() {
        assert_eq!(
            parse("(ab){2}").unwrap(),
            Node::Scope(vec![Node::Repeat {
                min: 2,
                max: 2,
                child: Box::new(Node::Scope(vec![Node::Literal("ab".to_string())])),
            }])
        );
    }

    #[test]
    fn test_parse_list_and_range() {
        assert_eq!(
            parse("[ax-z]").unwrap(),
            Node::Scope(vec![Node::List("axyz".to_string())])
        );
    }

    #[test]
    fn test_parse_digit_class() {
        assert_eq!(
            parse(r"\d").unwrap(),
            Node::Scope(vec![Node::List(CLASS_DIGIT.to_string())])
        );
    }

    #[test]
    fn test_parse_escapes_are_literal() {
        assert_eq!(
            parse(r"\(\[\*\+\?\{\\").unwrap(),
            Node::Scope(vec![Node::Literal(r"([*+?{\".to_string())])
        );
    }

    #[test]
    fn test_parse_mixed_alternation_and_concat() {
        assert_eq!(
            parse("a(b|c)d").unwrap(),
            Node::Scope(vec![
                Node::Literal("a".to_string()),
                Node::Or(vec![
                    Node::Literal("b".to_string()),
                    Node::Literal("c".to_string()),
                ]),
                Node::Literal("d".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_nested_alternation_flattens() {
        assert_eq!(
            parse("a|(b|c)").unwrap(),
            Node::Or(vec![
                Node::Literal("a".to_string()),
                Node::Literal("b".to_string()),
                Node::Literal("c".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("(a"), Err(RegenumError::UnclosedScope(1)));
        assert_eq!(parse("a)"), Err(RegenumError::ScopeUnderflow));
        assert!(matches!(parse("a*"), Err(RegenumError::Syntax(_))));
        assert!(matches!(parse("a{"), Err(RegenumError::Syntax(_))));
        assert!(matches!(parse("a{2,"), Err(RegenumError::Syntax(_))));
        assert!(matches!(parse(r"a\"), Err(RegenumError::Syntax(_))));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let a = parse(r"([\l\d]{2}|x?)y").unwrap();
        let b = parse(r"([\l\d]{2}|x?)y").unwrap();
        assert_eq!(a, b);
    }
}
