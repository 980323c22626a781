//! Boolean structure of a rule.
//!
//! ```text
//! or_expr   := and_expr ( "or" and_expr )*
//! and_expr  := annotated ( "and" annotated )*
//! annotated := primary ( "friendly" IDENT LITERAL )*
//! primary   := "(" or_expr ")" | "silent" primary | "text" LITERAL | LITERAL | leaf
//! ```

use super::super::{core::*, prelude::*};
use super::common::*;
use super::leaf::parse_leaf;
use crate::ast::RuleNode;
use crate::tokenizer::{keyword::Keyword, token::Token};

pub fn parse_expression() -> impl Parser<Token, RuleNode> {
    with_context(lazy(parse_or_expression), "rule")
}

fn parse_or_expression() -> impl Parser<Token, RuleNode> {
    map(
        tuple2(
            parse_and_expression(),
            many(preceded(parse_keyword(Keyword::Or), parse_and_expression())),
        ),
        |(first, rest): (RuleNode, Vec<RuleNode>)| {
            rest.into_iter()
                .fold(first, |left, right| RuleNode::or(left, right))
        },
    )
}

fn parse_and_expression() -> impl Parser<Token, RuleNode> {
    map(
        tuple2(
            parse_annotated(),
            many(preceded(parse_keyword(Keyword::And), parse_annotated())),
        ),
        |(first, rest): (RuleNode, Vec<RuleNode>)| {
            rest.into_iter()
                .fold(first, |left, right| RuleNode::and(left, right))
        },
    )
}

fn parse_annotated() -> impl Parser<Token, RuleNode> {
    map(
        tuple2(
            parse_primary(),
            many(preceded(
                parse_keyword(Keyword::Friendly),
                with_context(tuple2(parse_identifier(), parse_text()), "friendly"),
            )),
        ),
        |(node, overrides): (RuleNode, Vec<(String, String)>)| {
            overrides
                .into_iter()
                .fold(node, |node, (category, text)| node.friendly(category, text))
        },
    )
}

fn parse_primary() -> impl Parser<Token, RuleNode> {
    choice(vec![
        Box::new(delimited(
            parse_open_paren(),
            lazy(parse_or_expression),
            parse_close_paren(),
        )),
        Box::new(parse_silent()),
        Box::new(map(parse_keyword_text(Keyword::Text), |text: String| {
            RuleNode::text(text)
        })),
        Box::new(map(parse_text(), |text: String| RuleNode::text(text))),
        Box::new(map(parse_leaf(), RuleNode::Leaf)),
    ])
}

fn parse_silent() -> impl Parser<Token, RuleNode> {
    map(
        preceded(parse_keyword(Keyword::Silent), lazy(parse_primary)),
        RuleNode::silent,
    )
}
