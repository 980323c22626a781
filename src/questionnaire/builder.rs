use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::{CategoryDef, OutcomeDef, QuestionDef};
use crate::{
    ast::RuleNode,
    config::{
        default_conditions_extra_details, default_rule_formatting, AuthoredCategory,
        AuthoredItem, AuthoredOutcome, AuthoredQuestion, RooConfig,
    },
    eval::Outcome,
    formatter::{
        exception::{to_conditions, to_prose},
        friendly::{trim_connectives, FriendlyRenderer},
    },
    template::{render, TemplateVars, TemplateWarning},
    PsrError, PsrResult,
};

const CONDITIONS_LABEL_SUFFIX: &str = " in accordance with the following rules?";

/// What the rule says about one code, merged over every leaf carrying it.
#[derive(Debug, Default)]
struct CodeInfo {
    label: Option<String>,
    parameter: Option<String>,
    details: Vec<String>,
    conditions: Vec<String>,
}

pub(super) struct Built {
    pub categories: Vec<CategoryDef>,
    pub questions: Vec<QuestionDef>,
    pub outcomes: BTreeMap<Outcome, OutcomeDef>,
    pub warnings: Vec<TemplateWarning>,
}

pub(super) struct Builder<'a> {
    tree: &'a RuleNode,
    vars: &'a TemplateVars,
    codes: Vec<&'a str>,
    info: HashMap<&'a str, CodeInfo>,
    categories: Vec<CategoryDef>,
    questions: Vec<QuestionDef>,
    outcomes: BTreeMap<Outcome, OutcomeDef>,
    warnings: Vec<TemplateWarning>,
}

impl<'a> Builder<'a> {
    pub fn new(tree: &'a RuleNode, vars: &'a TemplateVars) -> Self {
        let mut info: HashMap<&'a str, CodeInfo> = HashMap::new();
        for leaf in tree.leaves() {
            let entry = info.entry(leaf.code.as_str()).or_default();
            if let Some(label) = &leaf.label {
                entry.label = Some(label.clone());
            }
            if let Some(parameter) = &leaf.parameter {
                entry.parameter = Some(parameter.clone());
            }
            if let Some(details) = &leaf.details {
                entry.details.push(details.clone());
            }
            if let Some(from) = &leaf.from {
                entry
                    .conditions
                    .push(format!("provided that it is a change from {}", to_prose(from)));
            }
            if let Some(except) = &leaf.except {
                entry.conditions.extend(to_conditions(except));
            }
            entry.conditions.extend(leaf.conditions.iter().cloned());
        }

        Self {
            tree,
            vars,
            codes: tree.codes(),
            info,
            categories: Vec::new(),
            questions: Vec::new(),
            outcomes: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn build(mut self, roo: &RooConfig) -> PsrResult<Built> {
        for item in &roo.items {
            match item {
                AuthoredItem::Category(category) => self.add_category(category),
                AuthoredItem::Question(question) => self.add_question(question)?,
                AuthoredItem::Outcome(outcome) => self.add_outcome(outcome),
            }
        }

        if let Some(code) = self
            .codes
            .iter()
            .find(|code| !self.questions.iter().any(|q| q.codes.iter().any(|c| c == *code)))
        {
            return Err(PsrError::MissingQuestion {
                code: code.to_string(),
            });
        }

        self.resolve_friendly_rules();
        debug!(
            categories = self.categories.len(),
            questions = self.questions.len(),
            "questionnaire built"
        );

        Ok(Built {
            categories: self.categories,
            questions: self.questions,
            outcomes: self.outcomes,
            warnings: self.warnings,
        })
    }

    fn add_category(&mut self, category: &AuthoredCategory) {
        let or_default = |value: &str, default: fn() -> String| {
            if value.is_empty() {
                default()
            } else {
                value.to_string()
            }
        };
        self.categories.push(CategoryDef {
            key: category.item_if.clone(),
            label: category.label.clone(),
            details: category.details.clone(),
            rule_formatting: or_default(&category.rule_formatting, default_rule_formatting),
            conditions_extra_details: or_default(
                &category.conditions_extra_details,
                default_conditions_extra_details,
            ),
            hide_item_code: category.hide_item_code,
            question_indices: Vec::new(),
            friendly_rules: None,
        });
    }

    fn add_question(&mut self, authored: &AuthoredQuestion) -> PsrResult<()> {
        let codes: Vec<String> = authored
            .codes()
            .filter(|code| self.info.contains_key(*code))
            .map(str::to_string)
            .collect();
        let Some(code) = codes.first().cloned() else {
            debug!(item_if = %authored.item_if, "question not used by the rule");
            return Ok(());
        };

        let category_index = self
            .categories
            .iter()
            .position(|category| category.key == authored.parent_category)
            .ok_or_else(|| PsrError::MissingCategory {
                code: authored.item_if.clone(),
                category: authored.parent_category.clone(),
            })?;

        let mut label = authored.label.clone();
        let mut parameter = None;
        let mut fragments = Vec::new();
        let mut conditions = Vec::new();
        for info in codes.iter().filter_map(|c| self.info.get(c.as_str())) {
            if let Some(code_label) = &info.label {
                label = code_label.clone();
            }
            if parameter.is_none() {
                parameter = info.parameter.clone();
            }
            fragments.extend(info.details.iter().cloned());
            conditions.extend(info.conditions.iter().cloned());
        }

        let mut details = Vec::new();
        if !authored.details.is_empty() {
            details.push(authored.details.clone());
        }
        if !conditions.is_empty() {
            label = format!("{}{}", label.strip_suffix('?').unwrap_or(&label), CONDITIONS_LABEL_SUFFIX);
            details.push(self.categories[category_index].conditions_extra_details.clone());
        }
        details.extend(fragments);

        let vars = self.vars.scoped("parameter", parameter.as_deref());
        let label = self.template(&label, &vars);
        let details = self.template(details.join("\n\n").trim(), &vars);

        let index = self.questions.len();
        self.categories[category_index].question_indices.push(index);
        self.questions.push(QuestionDef {
            code,
            codes,
            category: authored.parent_category.clone(),
            label,
            details,
            conditions,
            friendly_text: authored.friendly_text.clone(),
            expanded_text: authored.item_if_text.clone(),
            index,
        });
        Ok(())
    }

    fn add_outcome(&mut self, authored: &AuthoredOutcome) {
        self.outcomes.insert(
            authored.item_if,
            OutcomeDef {
                outcome: authored.item_if,
                label: authored.label.clone(),
                details: authored.details.clone(),
            },
        );
    }

    fn resolve_friendly_rules(&mut self) {
        let mut by_code: HashMap<&str, &QuestionDef> = HashMap::new();
        for question in &self.questions {
            for code in &question.codes {
                by_code.entry(code.as_str()).or_insert(question);
            }
        }

        let mut resolved = Vec::with_capacity(self.categories.len());
        let mut warnings = Vec::new();
        for category in &self.categories {
            let mut renderer =
                FriendlyRenderer::new(&category.key, category.hide_item_code, &by_code, self.vars);
            let rules = trim_connectives(&renderer.render(self.tree));
            warnings.extend(renderer.into_warnings());

            let mut vars = self.vars.clone();
            let mut details = category.details.clone();
            let friendly_rules = if rules.is_empty() {
                None
            } else {
                let rendered = render(&rules, &vars);
                warnings.extend(rendered.warnings);
                vars.set("friendlyRules", rendered.text.clone());
                if !details.is_empty() {
                    details.push_str("\n\n");
                }
                details.push_str(&category.rule_formatting);
                Some(rendered.text)
            };
            let rendered = render(&details, &vars);
            warnings.extend(rendered.warnings);
            resolved.push((rendered.text, friendly_rules));
        }

        for (category, (details, friendly_rules)) in self.categories.iter_mut().zip(resolved) {
            category.details = details;
            category.friendly_rules = friendly_rules;
        }
        for warning in warnings {
            self.push_warning(warning);
        }
    }

    fn template(&mut self, text: &str, vars: &TemplateVars) -> String {
        let rendered = render(text, vars);
        for warning in rendered.warnings {
            self.push_warning(warning);
        }
        rendered.text
    }

    fn push_warning(&mut self, warning: TemplateWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parse_rule;
    use pretty_assertions::assert_eq;

    fn roo() -> RooConfig {
        RooConfig::from_json_str(
            r#"[
                {"type": "category", "itemIf": "A", "label": "Category A"},
                {"type": "category", "itemIf": "B", "label": "Category B", "details": "About {{chapter}}."},
                {"type": "question", "itemIf": "A1", "parentCategory": "A", "label": "Category A Question 1?"},
                {"type": "question", "itemIf": "A2", "parentCategory": "A", "label": "Category A Question 2?"},
                {"type": "question", "itemIf": "B1", "parentCategory": "B", "label": "Category B Question 1?"},
                {"type": "question", "itemIf": "B2", "parentCategory": "B", "label": "Category B Question 2?"}
            ]"#,
        )
        .unwrap()
    }

    fn build(text: &str) -> PsrResult<Built> {
        let tree = parse_rule(text).unwrap();
        let vars = TemplateVars::with_hscode("12345678");
        Builder::new(&tree, &vars).build(&roo())
    }

    #[test]
    fn test_unused_questions_are_dropped() {
        let built = build("A1 or B1").unwrap();
        let codes: Vec<&str> = built.questions.iter().map(|q| q.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "B1"]);
        assert_eq!(built.categories[0].question_indices, vec![0]);
        assert_eq!(built.categories[1].question_indices, vec![1]);
    }

    #[test]
    fn test_conditions_extend_label_and_details() {
        let built = build("A2 from 03 except 01,02 condition 'it must be funky'").unwrap();
        let question = &built.questions[0];
        assert_eq!(question.label, "Category A Question 2 in accordance with the following rules?");
        assert_eq!(
            question.conditions,
            vec![
                "provided that it is a change from materials of chapter 03".to_string(),
                "provided that it is not a change from materials of chapter 01".to_string(),
                "provided that it is not a change from materials of chapter 02".to_string(),
                "it must be funky".to_string(),
            ]
        );
        assert_eq!(question.details, default_conditions_extra_details());
    }

    #[test]
    fn test_leaf_label_and_details_win() {
        let built = build("A1 label 'Is it {{heading}}?' details 'Look at {{parameter}}.' parameter 'x'").unwrap();
        let question = &built.questions[0];
        assert_eq!(question.label, "Is it heading 1234?");
        assert_eq!(question.details, "Look at x.");
    }

    #[test]
    fn test_repeated_code_merges_in_tree_order() {
        let built = build(
            "A1 parameter 'p1' details 'd1' condition 'c1' or B1 \
             or A1 parameter 'p2' details 'd2 {{parameter}}' except 01 label 'L2?'",
        )
        .unwrap();
        let codes: Vec<&str> = built.questions.iter().map(|q| q.code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "B1"]);

        let question = &built.questions[0];
        assert_eq!(question.label, "L2 in accordance with the following rules?");
        assert_eq!(
            question.conditions,
            vec![
                "c1".to_string(),
                "provided that it is not a change from materials of chapter 01".to_string(),
            ]
        );
        assert_eq!(
            question.details,
            format!("{}\n\nd1\n\nd2 p2", default_conditions_extra_details())
        );
    }

    #[test]
    fn test_category_details_get_friendly_rules() {
        let built = build("A1 or B1 and B2").unwrap();
        assert_eq!(built.categories[0].friendly_rules.as_deref(), Some("A1"));
        assert_eq!(
            built.categories[0].details,
            "For HS1234.56.78, the rule is A1."
        );
        assert_eq!(built.categories[1].friendly_rules.as_deref(), Some("B1 and B2"));
        assert_eq!(
            built.categories[1].details,
            "About chapter 12.\n\nFor HS1234.56.78, the rule is B1 and B2."
        );
    }

    #[test]
    fn test_category_without_rules_keeps_details() {
        let built = build("A1").unwrap();
        assert_eq!(built.categories[1].friendly_rules, None);
        assert_eq!(built.categories[1].details, "About chapter 12.");
    }

    #[test]
    fn test_missing_question() {
        let err = build("A1 or C9").err().unwrap();
        assert!(matches!(err, PsrError::MissingQuestion { ref code } if code == "C9"));
    }

    #[test]
    fn test_missing_category() {
        let tree = parse_rule("A1").unwrap();
        let vars = TemplateVars::new();
        let roo = RooConfig::from_json_str(
            r#"[{"type": "question", "itemIf": "A1", "parentCategory": "A", "label": "Q?"}]"#,
        )
        .unwrap();
        let err = Builder::new(&tree, &vars).build(&roo).err().unwrap();
        assert!(matches!(err, PsrError::MissingCategory { ref category, .. } if category == "A"));
    }
}
