//! # Authored Questionnaire Data
//!
//! The authored list ("roo") is an ordered JSON array of category, question and
//! outcome records:
//!
//! ```json
//! [
//!   { "type": "category", "itemIf": "A", "label": "Category A" },
//!   { "type": "question", "itemIf": "A1", "parentCategory": "A", "label": "Is it A1?" },
//!   { "type": "outcome", "itemIf": "applicable", "label": "The rule is met" }
//! ]
//! ```
//!
//! Order matters: a category must come before its questions, and questions are
//! asked in the order they are listed.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{eval::Outcome, PsrResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RooConfig {
    pub items: Vec<AuthoredItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthoredItem {
    Category(AuthoredCategory),
    Question(AuthoredQuestion),
    Outcome(AuthoredOutcome),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredCategory {
    /// Category key.
    pub item_if: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub details: String,
    #[serde(default = "default_rule_formatting", rename = "ruleFormattingStr")]
    pub rule_formatting: String,
    #[serde(
        default = "default_conditions_extra_details",
        rename = "conditionsExtraDetailsStr"
    )]
    pub conditions_extra_details: String,
    #[serde(default)]
    pub hide_item_code: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredQuestion {
    /// Comma-separated codes the question covers.
    pub item_if: String,
    #[serde(default)]
    pub parent_category: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub details: String,
    /// Replaces the code in friendly text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_if_text: Option<String>,
    /// Replaces the whole leaf in friendly text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredOutcome {
    pub item_if: Outcome,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub details: String,
}

impl AuthoredQuestion {
    /// Codes listed in `itemIf`, trimmed, empty entries skipped.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.item_if
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

impl RooConfig {
    pub fn new(items: Vec<AuthoredItem>) -> Self {
        Self { items }
    }

    pub fn from_json_str(s: &str) -> PsrResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        debug!("loaded {} authored items", config.items.len());
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> PsrResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)?;
        debug!("loaded {} authored items", config.items.len());
        Ok(config)
    }
}

pub fn default_rule_formatting() -> String {
    "For {{hscode}}, the rule is {{friendlyRules}}.".to_string()
}

pub fn default_conditions_extra_details() -> String {
    "The addition of \"provided that\" or \"except from\" in the rule creates additional \
     parameters that must be followed for the product to qualify under this rule. Please \
     follow closely the wording of the rule in selecting \"yes\" or \"no\" for this question."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_applied() {
        let config = RooConfig::from_json_str(
            r#"[
                {"type": "category", "itemIf": "A", "label": "Category A"},
                {"type": "question", "itemIf": "A1, A2", "parentCategory": "A", "label": "Q?"},
                {"type": "outcome", "itemIf": "inapplicable", "label": "Nope"}
            ]"#,
        )
        .unwrap();
        assert_eq!(config.items.len(), 3);
        let AuthoredItem::Category(category) = &config.items[0] else {
            panic!("expected category");
        };
        assert_eq!(category.rule_formatting, default_rule_formatting());
        assert!(category.conditions_extra_details.starts_with("The addition of \"provided that\""));
        assert!(!category.hide_item_code);

        let AuthoredItem::Question(question) = &config.items[1] else {
            panic!("expected question");
        };
        assert_eq!(question.codes().collect::<Vec<_>>(), vec!["A1", "A2"]);

        let AuthoredItem::Outcome(outcome) = &config.items[2] else {
            panic!("expected outcome");
        };
        assert_eq!(outcome.item_if, Outcome::Inapplicable);
    }

    #[test]
    fn test_unknown_type_is_authoring_error() {
        let err = RooConfig::from_json_str(r#"[{"type": "section", "itemIf": "A"}]"#).unwrap_err();
        assert!(matches!(err, crate::PsrError::Authoring(_)));
    }

    #[test]
    fn test_default_conditions_text() {
        assert_eq!(
            default_conditions_extra_details(),
            "The addition of \"provided that\" or \"except from\" in the rule creates additional parameters that must be followed for the product to qualify under this rule. Please follow closely the wording of the rule in selecting \"yes\" or \"no\" for this question."
        );
    }
}
