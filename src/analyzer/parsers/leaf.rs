use super::super::{core::*, prelude::*};
use super::common::*;
use super::exception::parse_exception_spec;
use crate::ast::{ExceptionSpec, Leaf};
use crate::tokenizer::{keyword::Keyword, token::Token};

enum Clause {
    Parameter(String),
    From(ExceptionSpec),
    Except(ExceptionSpec),
    Condition(String),
    Label(String),
    Details(String),
}

/// `CODE clause*`. Repeated clauses replace earlier ones, except `condition`
/// which accumulates.
pub fn parse_leaf() -> impl Parser<Token, Leaf> {
    with_context(
        map(
            tuple2(parse_identifier(), many(parse_clause())),
            |(code, clauses): (String, Vec<Clause>)| {
                clauses
                    .into_iter()
                    .fold(Leaf::new(code), |mut leaf, clause| {
                        match clause {
                            Clause::Parameter(value) => leaf.parameter = Some(value),
                            Clause::From(spec) => leaf.from = Some(spec),
                            Clause::Except(spec) => leaf.except = Some(spec),
                            Clause::Condition(text) => leaf.conditions.push(text),
                            Clause::Label(text) => leaf.label = Some(text),
                            Clause::Details(text) => leaf.details = Some(text),
                        }
                        leaf
                    })
            },
        ),
        "code",
    )
}

fn parse_clause() -> impl Parser<Token, Clause> {
    choice(vec![
        Box::new(map(parse_keyword_text(Keyword::Parameter), Clause::Parameter)),
        Box::new(map(
            preceded(parse_keyword(Keyword::From), parse_exception_spec()),
            Clause::From,
        )),
        Box::new(map(
            preceded(parse_keyword(Keyword::Except), parse_exception_spec()),
            Clause::Except,
        )),
        Box::new(map(parse_keyword_text(Keyword::Condition), Clause::Condition)),
        Box::new(map(parse_keyword_text(Keyword::Label), Clause::Label)),
        Box::new(map(parse_keyword_text(Keyword::Details), Clause::Details)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Token {
        Token::Identifier(s.to_string())
    }

    fn lit(s: &str) -> Token {
        Token::Literal(s.to_string())
    }

    #[test]
    fn test_leaf_clauses() {
        let tokens = vec![
            id("A2"),
            Token::Keyword(Keyword::Parameter),
            lit("40%"),
            Token::Keyword(Keyword::From),
            id("03"),
            Token::Keyword(Keyword::Except),
            id("01"),
            Token::Keyword(Keyword::Condition),
            lit("first"),
            Token::Keyword(Keyword::Condition),
            lit("second"),
            Token::Keyword(Keyword::Label),
            lit("old"),
            Token::Keyword(Keyword::Label),
            lit("new"),
        ];
        let (pos, leaf) = parse_leaf().parse(&tokens, 0).unwrap();
        assert_eq!(pos, tokens.len());
        assert_eq!(leaf.code, "A2");
        assert_eq!(leaf.parameter.as_deref(), Some("40%"));
        assert_eq!(leaf.from, Some(ExceptionSpec::single("03")));
        assert_eq!(leaf.except, Some(ExceptionSpec::single("01")));
        assert_eq!(leaf.conditions, vec!["first".to_string(), "second".to_string()]);
        assert_eq!(leaf.label.as_deref(), Some("new"));
        assert_eq!(leaf.details, None);
    }

    #[test]
    fn test_leaf_stops_before_operator() {
        let tokens = vec![id("A1"), Token::Keyword(Keyword::Or), id("B1")];
        let (pos, leaf) = parse_leaf().parse(&tokens, 0).unwrap();
        assert_eq!(pos, 1);
        assert_eq!(leaf, Leaf::new("A1"));
    }
}
