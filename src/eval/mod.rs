//! # Rule Evaluation
//!
//! Three-valued evaluation of a rule tree against the answers given so far.
//!
//! # Core Components
//!
//! ## Evaluator
//! Walks the tree and combines leaf answers into an [`Outcome`]. While doing so it
//! records which codes can no longer influence the outcome (the blacklist) and
//! which codes were shown to matter again (the whitelist).
//!
//! ## Evaluation Context
//! The answers recorded so far together with the blacklist and whitelist. One
//! context lives for the duration of a single questionnaire iteration.

pub mod context;
pub mod evaluator;

pub use context::EvaluationContext;
pub use evaluator::Evaluator;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Result of evaluating a rule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    Applicable,
    Inapplicable,
    #[default]
    Unclear,
}

impl Outcome {
    pub fn is_resolved(self) -> bool {
        self != Outcome::Unclear
    }
}
