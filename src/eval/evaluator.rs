use tracing::trace;

use super::{context::EvaluationContext, Outcome};
use crate::ast::{Branch, RuleNode};

#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `node` against the answers recorded in `context`.
    ///
    /// Both operands of `and`/`or` are always evaluated. When an `and` is decided
    /// `inapplicable` by one operand, the codes of the other operand are pruned
    /// (unless whitelisted); when neither operand is `inapplicable`, every code
    /// under the `and` is whitelisted.
    pub fn evaluate(&self, node: &RuleNode, context: &mut EvaluationContext) -> Outcome {
        match node {
            RuleNode::Or(branch) => {
                let left = self.evaluate(&branch.left, context);
                let right = self.evaluate(&branch.right, context);
                if left == Outcome::Applicable || right == Outcome::Applicable {
                    Outcome::Applicable
                } else if left == Outcome::Unclear || right == Outcome::Unclear {
                    Outcome::Unclear
                } else {
                    Outcome::Inapplicable
                }
            }
            RuleNode::And(branch) => self.evaluate_and(node, branch, context),
            RuleNode::Leaf(leaf) => match context.value(&leaf.code) {
                None => Outcome::Unclear,
                Some(true) => Outcome::Applicable,
                Some(false) => Outcome::Inapplicable,
            },
            RuleNode::Text(_) => Outcome::Unclear,
        }
    }

    fn evaluate_and(
        &self,
        node: &RuleNode,
        branch: &Branch,
        context: &mut EvaluationContext,
    ) -> Outcome {
        let left = self.evaluate(&branch.left, context);
        let right = self.evaluate(&branch.right, context);

        if left == Outcome::Applicable && right == Outcome::Applicable {
            return Outcome::Applicable;
        }
        if left == Outcome::Inapplicable {
            for code in branch.right.codes() {
                context.prune(code);
            }
            trace!(?left, ?right, "pruned right operand of and");
            return Outcome::Inapplicable;
        }
        if right == Outcome::Inapplicable {
            for code in branch.left.codes() {
                context.prune(code);
            }
            trace!(?left, ?right, "pruned left operand of and");
            return Outcome::Inapplicable;
        }
        for code in node.codes() {
            context.keep(code);
        }
        Outcome::Unclear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(node: &RuleNode, answers: &[(&str, bool)]) -> (Outcome, EvaluationContext) {
        let mut context = EvaluationContext::new();
        for (code, value) in answers {
            context.record(*code, *value);
        }
        let outcome = Evaluator::new().evaluate(node, &mut context);
        (outcome, context)
    }

    #[test]
    fn test_or_truth_table() {
        let tree = RuleNode::or(RuleNode::leaf("X"), RuleNode::leaf("Y"));
        let cases = [
            (vec![], Outcome::Unclear),
            (vec![("X", false)], Outcome::Unclear),
            (vec![("X", false), ("Y", true)], Outcome::Applicable),
            (vec![("Y", true)], Outcome::Applicable),
            (vec![("X", false), ("Y", false)], Outcome::Inapplicable),
        ];
        for (answers, expected) in cases {
            assert_eq!(evaluate(&tree, &answers).0, expected, "{:?}", answers);
        }
    }

    #[test]
    fn test_and_prunes_other_operand() {
        let tree = RuleNode::and(
            RuleNode::leaf("X"),
            RuleNode::or(RuleNode::leaf("Y"), RuleNode::leaf("Z")),
        );
        let (outcome, context) = evaluate(&tree, &[("X", false)]);
        assert_eq!(outcome, Outcome::Inapplicable);
        assert!(context.is_blacklisted("Y"));
        assert!(context.is_blacklisted("Z"));
        assert!(!context.is_blacklisted("X"));

        let (outcome, context) = evaluate(&tree, &[("Y", false), ("Z", false)]);
        assert_eq!(outcome, Outcome::Inapplicable);
        assert!(context.is_blacklisted("X"));
    }

    #[test]
    fn test_undecided_and_whitelists_its_codes() {
        let tree = RuleNode::and(RuleNode::leaf("X"), RuleNode::leaf("Y"));
        let (outcome, context) = evaluate(&tree, &[("X", true)]);
        assert_eq!(outcome, Outcome::Unclear);
        assert!(context.is_whitelisted("X"));
        assert!(context.is_whitelisted("Y"));
    }

    #[test]
    fn test_whitelist_from_other_branch_blocks_pruning() {
        // (X and Y) or (W and Y): W=false would prune Y, but the first branch
        // is still undecided and keeps Y.
        let tree = RuleNode::or(
            RuleNode::and(RuleNode::leaf("X"), RuleNode::leaf("Y")),
            RuleNode::and(RuleNode::leaf("W"), RuleNode::leaf("Y")),
        );
        let (outcome, context) = evaluate(&tree, &[("X", true), ("W", false)]);
        assert_eq!(outcome, Outcome::Unclear);
        assert!(!context.is_blacklisted("Y"));
    }

    #[test]
    fn test_text_leaf_is_unclear() {
        let tree = RuleNode::and(RuleNode::leaf("X"), RuleNode::text("wholly obtained"));
        assert_eq!(evaluate(&tree, &[("X", true)]).0, Outcome::Unclear);
        let tree = RuleNode::or(RuleNode::leaf("X"), RuleNode::text("wholly obtained"));
        assert_eq!(evaluate(&tree, &[("X", true)]).0, Outcome::Applicable);
    }
}
