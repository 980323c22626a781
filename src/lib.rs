//! # tariff-psr: Product-Specific Rule Questionnaires
//!
//! Turns a product-specific rule of origin into an interactive yes/no
//! questionnaire. A rule is a boolean expression over codes, each code standing
//! for one question ("Is it a change of tariff heading?"). Answers are folded
//! into a three-valued outcome, and questions that can no longer change it are
//! skipped.
//!
//! ## Processing Pipeline
//!
//! ```text
//! rule text → Tokenizer → Preprocessor → Parser → RuleNode ─┐
//!                                                           ├→ Questionnaire → iterate → Iteration
//!                              RooConfig + TemplateVars ────┘
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] module splits rule text into keywords, codes, quoted
//! literals and delimiters, keeping byte spans for error reporting.
//!
//! ### Stage 2: Preprocessing
//!
//! The [`preprocessor`] drops whitespace tokens.
//!
//! ### Stage 3: Parsing
//!
//! The [`analyzer`] module builds the [`ast::RuleNode`] tree with parser
//! combinators.
//!
//! ### Stage 4: Building
//!
//! [`Questionnaire::build`] binds the tree to the authored categories, questions
//! and outcomes of a [`config::RooConfig`], resolving every text through the
//! [`template`] engine and the renderers of [`formatter`].
//!
//! ### Stage 5: Evaluation
//!
//! [`Questionnaire::iterate`] walks the questions in order, evaluating the tree
//! with the [`eval`] module after every answer.

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod error;
pub mod eval;
pub mod formatter;
pub mod preprocessor;
pub mod questionnaire;
pub mod template;
pub mod tokenizer;

// Re-exports
pub use error::*;
pub use questionnaire::{Iteration, Questionnaire};
