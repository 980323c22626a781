//! # Friendly Rendering
//!
//! Category-scoped paraphrase of a rule. Each category of a questionnaire gets
//! its own rendering of the shared tree:
//!
//! 1. a node with a friendly override for the category renders as that override
//! 2. silent nodes render as nothing
//! 3. `or`/`and` join their non-empty operands with `" or "`/`" and "`
//! 4. a leaf whose question belongs to another category renders as nothing
//! 5. text leaves and questions with `friendlyText` render their templated text
//! 6. any other leaf is assembled from its code, parameter, provisions and
//!    conditions, with the question's `itemIfText` standing in for the code
//!
//! Leaf text is templated with `{{parameter}}` bound to that leaf's parameter.

use std::collections::HashMap;

use super::exception::to_prose;
use crate::ast::{Leaf, RuleNode};
use crate::questionnaire::QuestionDef;
use crate::template::{render, TemplateVars, TemplateWarning};

pub struct FriendlyRenderer<'a> {
    category: &'a str,
    hide_item_code: bool,
    questions: &'a HashMap<&'a str, &'a QuestionDef>,
    vars: &'a TemplateVars,
    warnings: Vec<TemplateWarning>,
}

impl<'a> FriendlyRenderer<'a> {
    /// `questions` maps every code of the tree to the question covering it.
    pub fn new(
        category: &'a str,
        hide_item_code: bool,
        questions: &'a HashMap<&'a str, &'a QuestionDef>,
        vars: &'a TemplateVars,
    ) -> Self {
        Self {
            category,
            hide_item_code,
            questions,
            vars,
            warnings: Vec::new(),
        }
    }

    pub fn render(&mut self, node: &RuleNode) -> String {
        let presentation = node.presentation();
        if let Some(text) = presentation.friendly.get(self.category) {
            return text.clone();
        }
        if presentation.silent {
            return String::new();
        }
        match node {
            RuleNode::Or(branch) => self.join(&branch.left, &branch.right, " or "),
            RuleNode::And(branch) => self.join(&branch.left, &branch.right, " and "),
            RuleNode::Text(text) => self.template(&text.text, None),
            RuleNode::Leaf(leaf) => self.render_leaf(leaf),
        }
    }

    pub fn into_warnings(self) -> Vec<TemplateWarning> {
        self.warnings
    }

    fn join(&mut self, left: &RuleNode, right: &RuleNode, separator: &str) -> String {
        [self.render(left), self.render(right)]
            .into_iter()
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn render_leaf(&mut self, leaf: &Leaf) -> String {
        let questions = self.questions;
        let question = questions.get(leaf.code.as_str()).copied();
        if let Some(question) = question {
            if question.category != self.category {
                return String::new();
            }
            if let Some(friendly_text) = &question.friendly_text {
                return self.template(friendly_text, leaf.parameter.as_deref());
            }
        }

        let mut output = leaf.code.clone();
        if let Some(parameter) = &leaf.parameter {
            output.push_str(&format!("({})", parameter));
        }
        if let Some(from) = &leaf.from {
            output.push_str(" from ");
            output.push_str(&to_prose(from));
        }
        if let Some(expanded) = question.and_then(|q| q.expanded_text.as_ref()) {
            output = if self.hide_item_code {
                expanded.clone()
            } else if leaf.parameter.is_some() {
                format!("{} - {}", expanded, output)
            } else {
                format!("{} ({})", expanded, output)
            };
        }
        if let Some(except) = &leaf.except {
            output.push_str(" except from ");
            output.push_str(&to_prose(except));
        }
        if !leaf.conditions.is_empty() {
            output.push(' ');
            output.push_str(&leaf.conditions.join(" "));
        }
        self.template(&output, leaf.parameter.as_deref())
    }

    fn template(&mut self, text: &str, parameter: Option<&str>) -> String {
        let vars = self.vars.scoped("parameter", parameter);
        let rendered = render(text, &vars);
        self.warnings.extend(rendered.warnings);
        rendered.text
    }
}

/// Trims whitespace and dangling `or`/`and` words from both ends of rendered rules.
///
/// ```
/// use tariff_psr::formatter::friendly::trim_connectives;
/// assert_eq!(trim_connectives("  or and CTH or "), "CTH");
/// ```
pub fn trim_connectives(text: &str) -> String {
    let mut text = text.trim();
    loop {
        let stripped = ["or ", "and ", " "]
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix));
        match stripped {
            Some(rest) => text = rest,
            None => break,
        }
    }
    loop {
        let stripped = [" or", " and", " "]
            .iter()
            .find_map(|suffix| text.strip_suffix(suffix));
        match stripped {
            Some(rest) => text = rest,
            None => break,
        }
    }
    text.to_string()
}
