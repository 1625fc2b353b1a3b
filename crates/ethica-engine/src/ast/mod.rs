//! # Document Tree
//!
//! Typed tree produced by the parser.
//!
//! - **`stmt`**: `Source` (root) and `Book`
//! - **`expr`**: `Section`, `Label` and the ten element kinds of the text
//!   (preface, definition, axiom, postulate, proposition, lemma,
//!   demonstration, scholium, corollary, explanation)
//! - **`visitor`**: `Visitor` trait with exhaustive `accept` dispatch

pub mod expr;
pub mod stmt;
pub mod visitor;

pub use expr::{
    Axiom, Corollary, Definition, Demonstration, Explanation, Expr, Label, Lemma, Postulate,
    Preface, Proposition, Scholium, Section,
};
pub use stmt::{Book, Part, Source, Stmt};
pub use visitor::Visitor;
