//! Property-based tests over randomly shaped rules.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tariff_psr::{
    analyzer::parse_rule,
    ast::{Leaf, RuleNode},
    config::RooConfig,
    eval::{EvaluationContext, Evaluator, Outcome},
    formatter::dump,
    template::TemplateVars,
    Questionnaire,
};

const CODES: [&str; 5] = ["C0", "C1", "C2", "C3", "C4"];

/// Generate arbitrary and/or trees over a small set of codes
fn rule_strategy() -> impl Strategy<Value = RuleNode> {
    let leaf = (
        prop::sample::select(CODES.to_vec()),
        proptest::option::of("[1-9][0-9]%"),
    )
        .prop_map(|(code, parameter)| {
            RuleNode::Leaf(Leaf {
                parameter,
                ..Leaf::new(code)
            })
        });
    leaf.prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(left, right)| RuleNode::or(left, right)),
            (inner.clone(), inner).prop_map(|(left, right)| RuleNode::and(left, right)),
        ]
    })
}

fn answers_strategy() -> impl Strategy<Value = BTreeMap<String, bool>> {
    prop::collection::btree_map(
        prop::sample::select(CODES.to_vec()).prop_map(str::to_string),
        any::<bool>(),
        0..=3,
    )
}

fn roo() -> RooConfig {
    let mut items = vec![r#"{"type": "category", "itemIf": "C", "label": "Checks"}"#.to_string()];
    for code in CODES {
        items.push(format!(
            r#"{{"type": "question", "itemIf": "{}", "parentCategory": "C", "label": "{}?"}}"#,
            code, code
        ));
    }
    RooConfig::from_json_str(&format!("[{}]", items.join(","))).unwrap()
}

fn evaluate_all(tree: &RuleNode, answers: &BTreeMap<String, bool>) -> Outcome {
    let mut context = EvaluationContext::new();
    for (code, value) in answers {
        context.record(code.clone(), *value);
    }
    Evaluator::new().evaluate(tree, &mut context)
}

proptest! {
    #[test]
    fn test_dump_parses_back(tree in rule_strategy()) {
        let dumped = dump(&tree);
        let parsed = parse_rule(&dumped);
        prop_assert!(parsed.is_ok(), "{}", dumped);
        prop_assert_eq!(parsed.unwrap(), tree);
    }

    #[test]
    fn test_empty_answers_show_one_question(tree in rule_strategy()) {
        let psr = Questionnaire::from_tree(tree, &roo(), &TemplateVars::new()).unwrap();
        let iteration = psr.iterate(&BTreeMap::new());
        prop_assert_eq!(iteration.outcome(), Outcome::Unclear);
        prop_assert_eq!(iteration.visible_questions().count(), 1);
        prop_assert!(iteration.pending().is_some());
    }

    #[test]
    fn test_resolved_outcome_agrees_with_full_evaluation(
        tree in rule_strategy(),
        answers in answers_strategy(),
    ) {
        let psr = Questionnaire::from_tree(tree.clone(), &roo(), &TemplateVars::new()).unwrap();
        let outcome = psr.iterate(&answers).outcome();
        if outcome.is_resolved() {
            prop_assert_eq!(outcome, evaluate_all(&tree, &answers));
        }
    }
}
