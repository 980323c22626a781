use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::{CategoryDef, OutcomeDef, QuestionDef, Questionnaire};
use crate::eval::{EvaluationContext, Evaluator, Outcome};

/// Result of one [`Questionnaire::iterate`] call.
///
/// Visibility lives here rather than on the definitions, so a questionnaire can
/// be iterated from several places at once.
#[derive(Debug, Clone)]
pub struct Iteration<'a> {
    questionnaire: &'a Questionnaire,
    outcome: Outcome,
    visible: BTreeSet<usize>,
    pending: Option<usize>,
    context: EvaluationContext,
}

impl Questionnaire {
    /// Asks the questions in order against `answers`.
    ///
    /// Questions whose codes were all pruned are skipped. The walk stops at the
    /// first question without an answer, or as soon as the outcome is decided.
    pub fn iterate(&self, answers: &BTreeMap<String, bool>) -> Iteration<'_> {
        let evaluator = Evaluator::new();
        let mut context = EvaluationContext::new();
        let mut outcome = Outcome::Unclear;
        let mut visible = BTreeSet::new();
        let mut pending = None;

        for question in &self.questions {
            if question.codes.iter().all(|code| context.is_blacklisted(code)) {
                debug!(code = %question.code, "question pruned");
                continue;
            }
            visible.insert(question.index);

            let answer = answers.get(&question.code).copied().or_else(|| {
                question
                    .codes
                    .iter()
                    .find_map(|code| answers.get(code).copied())
            });
            let Some(answer) = answer else {
                pending = Some(question.index);
                break;
            };
            for code in &question.codes {
                context.record(code.clone(), answer);
            }
            outcome = evaluator.evaluate(&self.tree, &mut context);
            if outcome.is_resolved() {
                break;
            }
        }

        debug!(%outcome, visible = visible.len(), "iteration finished");
        Iteration {
            questionnaire: self,
            outcome,
            visible,
            pending,
            context,
        }
    }
}

impl<'a> Iteration<'a> {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The authored definition of the outcome, if one was given.
    pub fn definition(&self) -> Option<&'a OutcomeDef> {
        self.questionnaire.outcomes.get(&self.outcome)
    }

    /// The question waiting for an answer.
    pub fn pending(&self) -> Option<&'a QuestionDef> {
        self.pending
            .and_then(|index| self.questionnaire.questions.get(index))
    }

    pub fn is_question_visible(&self, code: &str) -> bool {
        self.questionnaire
            .question(code)
            .is_some_and(|question| self.visible.contains(&question.index))
    }

    pub fn visible_questions(&self) -> impl Iterator<Item = &'a QuestionDef> + '_ {
        self.visible
            .iter()
            .filter_map(|index| self.questionnaire.questions.get(*index))
    }

    pub fn is_category_visible(&self, key: &str) -> bool {
        self.questionnaire
            .category(key)
            .is_some_and(|category| self.category_visible(category))
    }

    pub fn visible_categories(&self) -> impl Iterator<Item = &'a CategoryDef> + '_ {
        self.questionnaire
            .categories
            .iter()
            .filter(|category| self.category_visible(category))
    }

    /// Answers and pruning state left behind by the evaluation.
    pub fn context(&self) -> &EvaluationContext {
        &self.context
    }

    fn category_visible(&self, category: &CategoryDef) -> bool {
        category
            .question_indices
            .iter()
            .any(|index| self.visible.contains(index))
    }
}
