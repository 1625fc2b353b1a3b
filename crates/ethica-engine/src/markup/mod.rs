//! # Inline Markup
//!
//! Converts the inline markup of a term's text into a [`MarkupNode`] tree.
//!
//! ## Modules
//!
//! - **`types`**: `MarkupNode` presentation tree
//! - **`kinds`**: span kinds, their patterns and the comment delimiters
//! - **`cursor`**: byte `Cursor` for the bracket-balanced comment scan
//! - **`processor`**: `MarkupProcessor` with leftmost-span selection
//!
//! ## Syntax
//!
//! | Source            | Node                   |
//! |-------------------|------------------------|
//! | `_text_`          | `Emphasis`             |
//! | `[text](address)` | `Link`                 |
//! | `![caption](path)`| `Caption`              |
//! | `^[aside]`        | `Citation`             |
//!
//! Failures never escape [`MarkupProcessor::run`]: the result is then the
//! fixed [`MarkupNode::ParseError`].

pub mod cursor;
pub mod error;
pub mod kinds;
pub mod processor;
pub mod types;

pub use error::MarkupError;
pub use kinds::SpanKind;
pub use processor::{DEFAULT_MAX_DEPTH, MarkupProcessor, Span, next_span};
pub use types::MarkupNode;
