//! # Rule Text Rendering
//!
//! Renderers walking a [`RuleNode`](crate::ast::RuleNode):
//!
//! * [`official`]: canonical legal phrasing of the whole rule
//! * [`friendly`]: per-category paraphrase used in questionnaire details
//! * [`dump`]: the rule re-encoded in rule syntax, for debugging and golden tests
//!
//! [`exception`] and [`hscode`] render the pieces they share.

pub mod dump;
pub mod exception;
pub mod friendly;
pub mod hscode;
pub mod official;

pub use dump::dump;
pub use friendly::FriendlyRenderer;
pub use official::render_official;

/// Quotes text for rule syntax, preferring single quotes.
pub(crate) fn quote(text: &str) -> String {
    if text.contains('\'') {
        format!("\"{}\"", text)
    } else {
        format!("'{}'", text)
    }
}

/// Collapses runs of spaces into one and trims spaces at both ends.
pub(crate) fn collapse_spaces(text: &str) -> String {
    text.split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("  A1(x)   except  from \n 01 "), "A1(x) except from \n 01");
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("fish"), "'fish'");
        assert_eq!(quote("it's"), "\"it's\"");
    }
}
