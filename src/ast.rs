//! # Rule Tree
//!
//! The tree produced by parsing rule text. It is read-only once built: the
//! evaluator, the renderers and the questionnaire builder only walk it.
//!
//! ```text
//! A2 from 03 except 01 or B1 and 'wholly obtained'
//!
//! Or
//! ├── Leaf A2 (from: chapter 03, except: chapter 01)
//! └── And
//!     ├── Leaf B1
//!     └── Text "wholly obtained"
//! ```
//!
//! Every node carries a [`Presentation`]: the `silent` flag hides the node from
//! official and friendly text, and `friendly` maps a category key to text that
//! replaces the node in that category's friendly rendering.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub silent: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub friendly: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleNode {
    Or(Branch),
    And(Branch),
    Leaf(Leaf),
    Text(TextLeaf),
}

/// Both operands of an `and`/`or` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub left: Box<RuleNode>,
    pub right: Box<RuleNode>,
    #[serde(default)]
    pub presentation: Presentation,
}

/// A code together with the provisions attached to it.
///
/// `from` is the change-from provision and `except` the except-from provision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ExceptionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except: Option<ExceptionSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default)]
    pub presentation: Presentation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLeaf {
    pub text: String,
    #[serde(default)]
    pub presentation: Presentation,
}

/// Codes or materials named by a `from`/`except` provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionSpec {
    Single {
        code: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extra: Option<String>,
    },
    List(Vec<ExceptionSpec>),
    Range(Box<ExceptionSpec>, Box<ExceptionSpec>),
}

impl ExceptionSpec {
    pub fn single(code: impl Into<String>) -> Self {
        ExceptionSpec::Single {
            code: code.into(),
            material: None,
            extra: None,
        }
    }

    pub fn range(from: ExceptionSpec, to: ExceptionSpec) -> Self {
        ExceptionSpec::Range(Box::new(from), Box::new(to))
    }

    /// Sets the material of a `Single`; other shapes are returned unchanged.
    pub fn with_material(mut self, value: impl Into<String>) -> Self {
        if let ExceptionSpec::Single { material, .. } = &mut self {
            *material = Some(value.into());
        }
        self
    }

    /// Sets the extra text of a `Single`; other shapes are returned unchanged.
    pub fn with_extra(mut self, value: impl Into<String>) -> Self {
        if let ExceptionSpec::Single { extra, .. } = &mut self {
            *extra = Some(value.into());
        }
        self
    }

    pub fn material(&self) -> Option<&str> {
        match self {
            ExceptionSpec::Single { material, .. } => material.as_deref(),
            _ => None,
        }
    }
}

impl Leaf {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }
}

impl TextLeaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            presentation: Presentation::default(),
        }
    }
}

impl From<Leaf> for RuleNode {
    fn from(leaf: Leaf) -> Self {
        RuleNode::Leaf(leaf)
    }
}

impl From<TextLeaf> for RuleNode {
    fn from(text: TextLeaf) -> Self {
        RuleNode::Text(text)
    }
}

impl RuleNode {
    pub fn or(left: impl Into<RuleNode>, right: impl Into<RuleNode>) -> Self {
        RuleNode::Or(Branch::new(left.into(), right.into()))
    }

    pub fn and(left: impl Into<RuleNode>, right: impl Into<RuleNode>) -> Self {
        RuleNode::And(Branch::new(left.into(), right.into()))
    }

    pub fn leaf(code: impl Into<String>) -> Self {
        RuleNode::Leaf(Leaf::new(code))
    }

    pub fn text(text: impl Into<String>) -> Self {
        RuleNode::Text(TextLeaf::new(text))
    }

    pub fn presentation(&self) -> &Presentation {
        match self {
            RuleNode::Or(branch) | RuleNode::And(branch) => &branch.presentation,
            RuleNode::Leaf(leaf) => &leaf.presentation,
            RuleNode::Text(text) => &text.presentation,
        }
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        match self {
            RuleNode::Or(branch) | RuleNode::And(branch) => &mut branch.presentation,
            RuleNode::Leaf(leaf) => &mut leaf.presentation,
            RuleNode::Text(text) => &mut text.presentation,
        }
    }

    /// Marks the node silent.
    pub fn silent(mut self) -> Self {
        self.presentation_mut().silent = true;
        self
    }

    /// Adds a friendly override for `category`.
    pub fn friendly(mut self, category: impl Into<String>, text: impl Into<String>) -> Self {
        self.presentation_mut()
            .friendly
            .insert(category.into(), text.into());
        self
    }

    /// All leaves in tree order, left operand first.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Leaf>) {
        match self {
            RuleNode::Or(branch) | RuleNode::And(branch) => {
                branch.left.collect_leaves(leaves);
                branch.right.collect_leaves(leaves);
            }
            RuleNode::Leaf(leaf) => leaves.push(leaf),
            RuleNode::Text(_) => {}
        }
    }

    /// Distinct codes in order of first appearance. Text leaves carry no code.
    pub fn codes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.leaves()
            .into_iter()
            .map(|leaf| leaf.code.as_str())
            .filter(|code| seen.insert(*code))
            .collect()
    }
}

impl Branch {
    pub fn new(left: RuleNode, right: RuleNode) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
            presentation: Presentation::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_ordered() {
        let tree = RuleNode::or(
            RuleNode::and(RuleNode::leaf("B1"), RuleNode::text("wholly obtained")),
            RuleNode::or(RuleNode::leaf("A1"), RuleNode::leaf("B1")),
        );
        assert_eq!(tree.codes(), vec!["B1", "A1"]);
        assert_eq!(tree.leaves().len(), 3);
    }

    #[test]
    fn test_presentation_applies_to_any_node() {
        let tree = RuleNode::and(RuleNode::leaf("A1"), RuleNode::leaf("B1"))
            .silent()
            .friendly("B", "CCF1");
        assert!(tree.presentation().silent);
        assert_eq!(tree.presentation().friendly.get("B").map(String::as_str), Some("CCF1"));
    }

    #[test]
    fn test_with_material_ignores_lists() {
        let list = ExceptionSpec::List(vec![ExceptionSpec::single("01")]).with_material("fish");
        assert_eq!(list.material(), None);
        let single = ExceptionSpec::single("0304").with_material("fish");
        assert_eq!(single.material(), Some("fish"));
    }
}
