//! # Rule Dump
//!
//! Re-encodes a tree in rule syntax. Every field of every node is written out, and
//! parentheses are added where operator precedence or left associativity would
//! otherwise regroup the operands, so parsing a dump yields the same tree.
//!
//! Rule syntax has no escapes, so text holding both `'` and `"` cannot be quoted
//! and its dump does not parse back. The parser never produces such text; only
//! hand-built trees can carry it.
//!
//! ```text
//! A2 from 03 except 01 material 'fish' condition 'c' label 'L'
//! silent (A1) and (B1) friendly B 'CCF1' or B2
//! A1 and (B1 or B2)
//! ```

use super::{exception::to_encoded, quote};
use crate::ast::{Leaf, RuleNode};

pub fn dump(node: &RuleNode) -> String {
    let mut output = match node {
        RuleNode::Or(branch) => format!(
            "{} or {}",
            operand(&branch.left, node, false),
            operand(&branch.right, node, true)
        ),
        RuleNode::And(branch) => format!(
            "{} and {}",
            operand(&branch.left, node, false),
            operand(&branch.right, node, true)
        ),
        RuleNode::Leaf(leaf) => dump_leaf(leaf),
        RuleNode::Text(text) => format!("text {}", quote(&text.text)),
    };

    let presentation = node.presentation();
    if presentation.silent {
        output = format!("silent ({})", output);
    }
    for (category, text) in &presentation.friendly {
        output = format!("({}) friendly {} {}", output, category, quote(text));
    }
    output
}

fn operand(child: &RuleNode, parent: &RuleNode, is_right: bool) -> String {
    let text = dump(child);
    let presentation = child.presentation();
    if presentation.silent || !presentation.friendly.is_empty() {
        return text;
    }
    let regroups = match (parent, child) {
        (RuleNode::And(_), RuleNode::Or(_)) => true,
        (RuleNode::And(_), RuleNode::And(_)) | (RuleNode::Or(_), RuleNode::Or(_)) => is_right,
        _ => false,
    };
    if regroups {
        format!("({})", text)
    } else {
        text
    }
}

fn dump_leaf(leaf: &Leaf) -> String {
    let mut output = leaf.code.clone();
    if let Some(parameter) = &leaf.parameter {
        output.push_str(&format!(" parameter {}", quote(parameter)));
    }
    if let Some(from) = &leaf.from {
        output.push_str(&format!(" from {}", to_encoded(from)));
    }
    if let Some(except) = &leaf.except {
        output.push_str(&format!(" except {}", to_encoded(except)));
    }
    for condition in &leaf.conditions {
        output.push_str(&format!(" condition {}", quote(condition)));
    }
    if let Some(label) = &leaf.label {
        output.push_str(&format!(" label {}", quote(label)));
    }
    if let Some(details) = &leaf.details {
        output.push_str(&format!(" details {}", quote(details)));
    }
    output
}
