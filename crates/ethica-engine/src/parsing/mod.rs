//! # Parsing Pipeline
//!
//! Edition JSON to document tree, in three stages:
//!
//! 1. **`input`**: the JSON value classified by shape into [`InputNode`]s.
//! 2. **`scanner`**: depth-first linearization into a flat [`Token`] stream
//!    ending in `EOF`.
//! 3. **`parser`**: recursive descent over the tokens, producing the
//!    [`Source`](crate::ast::Source) tree and the [`IndexCollection`] of
//!    every labelled element.
//!
//! ```text
//! serde_json::Value ──▶ InputNode ──▶ Scanner ──▶ [Token] ──▶ Parser ──▶ ParseResult
//! ```

pub mod index;
pub mod input;
pub mod parser;
pub mod scanner;
pub mod token;

pub use index::{IndexCollection, IndexEntry, extract_refs};
pub use input::{InputNode, Shape};
pub use parser::classify::{
    ExpressionKind, SubexpressionKind, classify_expression, classify_subexpression, serial_index,
};
pub use parser::{ParseError, ParseResult, Parser};
pub use scanner::{Scanner, scan};
pub use token::{Literal, Token, TokenType};

/// Scans and parses `root` in one go.
pub fn parse_input(root: InputNode) -> Option<ParseResult> {
    let tokens = scan(root);
    parser::parse(&tokens)
}
