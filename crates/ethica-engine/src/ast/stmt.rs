use serde::Serialize;

use super::expr::Expr;
use crate::parsing::Token;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    Source(Source),
    Book(Book),
}

/// The document root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    pub title: Token,
    /// Title sections and books, in document order.
    pub parts: Vec<Part>,
}

/// One of the five books: its title token and its elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub title: Token,
    pub contents: Vec<Expr>,
}

/// A top-level part of a [`Source`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Stmt(Stmt),
    Expr(Expr),
}

impl Source {
    /// The books of this source, skipping title sections.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.parts.iter().filter_map(|part| match part {
            Part::Stmt(Stmt::Book(book)) => Some(book),
            _ => None,
        })
    }
}
