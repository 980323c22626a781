//! # Questionnaire
//!
//! A questionnaire binds a parsed rule to authored categories, questions and
//! outcomes:
//!
//! ```text
//! rule text ─► RuleNode ─┐
//!                        ├─► Questionnaire ─► iterate(answers) ─► Iteration
//! RooConfig + vars ──────┘
//! ```
//!
//! Building resolves every label, detail text and per-category friendly rule
//! once; the questionnaire is immutable afterwards. [`Questionnaire::iterate`]
//! evaluates a set of answers and reports the outcome together with which
//! questions and categories are currently visible.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use tariff_psr::{config::RooConfig, eval::Outcome, template::TemplateVars, Questionnaire};
//!
//! let roo = RooConfig::from_json_str(r#"[
//!     {"type": "category", "itemIf": "A", "label": "Category A"},
//!     {"type": "question", "itemIf": "X", "parentCategory": "A", "label": "X?"},
//!     {"type": "question", "itemIf": "Y", "parentCategory": "A", "label": "Y?"}
//! ]"#).unwrap();
//! let psr = Questionnaire::build("X and Y", &roo, &TemplateVars::with_hscode("0304")).unwrap();
//!
//! let answers = BTreeMap::from([("X".to_string(), false)]);
//! let iteration = psr.iterate(&answers);
//! assert_eq!(iteration.outcome(), Outcome::Inapplicable);
//! assert!(!iteration.is_question_visible("Y"));
//! ```

mod builder;
mod session;

pub use session::Iteration;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    analyzer::parse_rule,
    ast::RuleNode,
    config::RooConfig,
    eval::Outcome,
    formatter::{dump, render_official},
    template::{TemplateVars, TemplateWarning},
    PsrResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDef {
    pub key: String,
    pub label: String,
    /// Templated details, followed by the rule formatting text when the category
    /// has friendly rules.
    pub details: String,
    pub rule_formatting: String,
    pub conditions_extra_details: String,
    pub hide_item_code: bool,
    /// Indices into [`Questionnaire::questions`], in asking order.
    pub question_indices: Vec<usize>,
    pub friendly_rules: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDef {
    /// First code of `itemIf` that occurs in the rule.
    pub code: String,
    /// Every code of `itemIf` that occurs in the rule; all receive the answer.
    pub codes: Vec<String>,
    pub category: String,
    pub label: String,
    pub details: String,
    pub conditions: Vec<String>,
    pub friendly_text: Option<String>,
    pub expanded_text: Option<String>,
    /// Position in [`Questionnaire::questions`].
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeDef {
    pub outcome: Outcome,
    pub label: String,
    pub details: String,
}

#[derive(Debug, Clone)]
pub struct Questionnaire {
    tree: RuleNode,
    official: String,
    categories: Vec<CategoryDef>,
    questions: Vec<QuestionDef>,
    outcomes: BTreeMap<Outcome, OutcomeDef>,
    warnings: Vec<TemplateWarning>,
}

impl Questionnaire {
    /// Parses `text` and builds a questionnaire from it.
    #[tracing::instrument(level = "debug", skip(roo, vars))]
    pub fn build(text: &str, roo: &RooConfig, vars: &TemplateVars) -> PsrResult<Self> {
        let tree = parse_rule(text)?;
        Self::from_tree(tree, roo, vars)
    }

    /// Builds a questionnaire from an already parsed rule.
    ///
    /// Fails with [`PsrError::MissingQuestion`](crate::PsrError::MissingQuestion) when
    /// a code of the rule has no authored question, and with
    /// [`PsrError::MissingCategory`](crate::PsrError::MissingCategory) when a question
    /// names a category that was not declared before it.
    pub fn from_tree(tree: RuleNode, roo: &RooConfig, vars: &TemplateVars) -> PsrResult<Self> {
        let built = builder::Builder::new(&tree, vars).build(roo)?;
        Ok(Self {
            official: render_official(&tree),
            tree,
            categories: built.categories,
            questions: built.questions,
            outcomes: built.outcomes,
            warnings: built.warnings,
        })
    }

    pub fn tree(&self) -> &RuleNode {
        &self.tree
    }

    /// Official text of the rule.
    pub fn official(&self) -> &str {
        &self.official
    }

    /// The rule re-encoded in rule syntax.
    pub fn dump(&self) -> String {
        dump(&self.tree)
    }

    pub fn categories(&self) -> &[CategoryDef] {
        &self.categories
    }

    pub fn questions(&self) -> &[QuestionDef] {
        &self.questions
    }

    pub fn outcomes(&self) -> &BTreeMap<Outcome, OutcomeDef> {
        &self.outcomes
    }

    /// Template placeholders that could not be resolved while building.
    pub fn warnings(&self) -> &[TemplateWarning] {
        &self.warnings
    }

    pub fn category(&self, key: &str) -> Option<&CategoryDef> {
        self.categories.iter().find(|category| category.key == key)
    }

    /// The question covering `code`.
    pub fn question(&self, code: &str) -> Option<&QuestionDef> {
        self.questions
            .iter()
            .find(|question| question.codes.iter().any(|c| c == code))
    }

    pub fn questions_in<'a>(
        &'a self,
        category: &'a CategoryDef,
    ) -> impl Iterator<Item = &'a QuestionDef> + 'a {
        category
            .question_indices
            .iter()
            .filter_map(move |index| self.questions.get(*index))
    }
}
