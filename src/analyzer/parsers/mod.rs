pub mod common;
pub use common::*;

pub mod exception;
pub mod expression;
pub mod leaf;

pub use exception::parse_exception_spec;
pub use expression::parse_expression;
pub use leaf::parse_leaf;
