//! Exception specifications: `01`, `0304 material 'fish'`, `02-0303`, `01,02,03`.

use super::super::{core::*, prelude::*};
use super::common::*;
use crate::ast::ExceptionSpec;
use crate::tokenizer::{keyword::Keyword, token::Token};

enum Attribute {
    Material(String),
    Extra(String),
}

pub fn parse_exception_spec() -> impl Parser<Token, ExceptionSpec> {
    with_context(
        map(
            tuple2(parse_range(), many(preceded(parse_comma(), parse_range()))),
            |(first, rest): (ExceptionSpec, Vec<ExceptionSpec>)| {
                if rest.is_empty() {
                    first
                } else {
                    let mut items = vec![first];
                    items.extend(rest);
                    ExceptionSpec::List(items)
                }
            },
        ),
        "exception list",
    )
}

fn parse_range() -> impl Parser<Token, ExceptionSpec> {
    map(
        tuple2(parse_single(), optional(preceded(parse_dash(), parse_single()))),
        |(from, to): (ExceptionSpec, Option<ExceptionSpec>)| match to {
            Some(to) => ExceptionSpec::range(from, to),
            None => from,
        },
    )
}

fn parse_single() -> impl Parser<Token, ExceptionSpec> {
    with_context(
        map(
            tuple2(parse_identifier(), many(parse_attribute())),
            |(code, attributes): (String, Vec<Attribute>)| {
                attributes
                    .into_iter()
                    .fold(ExceptionSpec::single(code), |spec, attribute| match attribute {
                        Attribute::Material(material) => spec.with_material(material),
                        Attribute::Extra(extra) => spec.with_extra(extra),
                    })
            },
        ),
        "exception code",
    )
}

fn parse_attribute() -> impl Parser<Token, Attribute> {
    choice(vec![
        Box::new(map(parse_keyword_text(Keyword::Material), Attribute::Material)),
        Box::new(map(parse_keyword_text(Keyword::Extra), Attribute::Extra)),
    ])
}
