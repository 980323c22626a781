use super::{collapse_spaces, exception::to_prose};
use crate::ast::{Leaf, RuleNode};

/// Official text of a rule.
///
/// `and` and `or` both join with `" or "`: official wording lists the
/// alternatives and leaves the conjunction to the legal text around it.
/// Silent nodes and nodes rendering to nothing are left out of the join.
///
/// ```
/// use tariff_psr::{analyzer::parse_rule, formatter::render_official};
///
/// let tree = parse_rule("CTH_1 parameter '40%' except 01 and silent B1").unwrap();
/// assert_eq!(render_official(&tree), "CTH1(40%) except from materials of chapter 01");
/// ```
pub fn render_official(node: &RuleNode) -> String {
    if node.presentation().silent {
        return String::new();
    }
    match node {
        RuleNode::Or(branch) | RuleNode::And(branch) => [&branch.left, &branch.right]
            .into_iter()
            .map(|child| render_official(child))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" or "),
        RuleNode::Text(text) => text.text.clone(),
        RuleNode::Leaf(leaf) => render_leaf(leaf),
    }
}

fn render_leaf(leaf: &Leaf) -> String {
    let mut output = leaf.code.replace('_', "");
    if let Some(parameter) = &leaf.parameter {
        output.push_str(&format!("({})", parameter));
    }
    if let Some(except) = &leaf.except {
        output.push_str(" except from ");
        output.push_str(&to_prose(except));
    }
    if !leaf.conditions.is_empty() {
        output.push(' ');
        output.push_str(&leaf.conditions.join(" "));
    }
    collapse_spaces(&output)
}
