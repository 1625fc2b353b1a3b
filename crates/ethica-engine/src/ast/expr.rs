use serde::Serialize;

use crate::parsing::Token;

/// An element of a book.
///
/// Every variant owns its children; the tree is built bottom-up by the
/// parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Section(Section),
    Label(Label),
    Preface(Preface),
    Definition(Definition),
    Axiom(Axiom),
    Postulate(Postulate),
    Proposition(Proposition),
    Lemma(Lemma),
    Demonstration(Demonstration),
    Scholium(Scholium),
    Corollary(Corollary),
    Explanation(Explanation),
}

/// A heading: a source title or an in-book section title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub term: Token,
}

/// Pairs a synthesized heading (`"Prop. 7: "`) with the element it names.
///
/// The label token's index is the wrapped element's index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub label: Token,
    pub term: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preface {
    pub term: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub term: Token,
    pub parts: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axiom {
    pub term: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Postulate {
    pub term: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposition {
    pub term: Token,
    pub parts: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lemma {
    pub term: Token,
    pub parts: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demonstration {
    pub term: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scholium {
    pub term: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corollary {
    pub term: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub term: Token,
}

impl Expr {
    /// The token that anchors this node's text and index. For a label
    /// that is the synthesized label token.
    pub fn anchor(&self) -> &Token {
        match self {
            Expr::Section(e) => &e.term,
            Expr::Label(e) => &e.label,
            Expr::Preface(e) => &e.term,
            Expr::Definition(e) => &e.term,
            Expr::Axiom(e) => &e.term,
            Expr::Postulate(e) => &e.term,
            Expr::Proposition(e) => &e.term,
            Expr::Lemma(e) => &e.term,
            Expr::Demonstration(e) => &e.term,
            Expr::Scholium(e) => &e.term,
            Expr::Corollary(e) => &e.term,
            Expr::Explanation(e) => &e.term,
        }
    }

    /// Nested labelled parts (definitions, propositions and lemmas only).
    pub fn parts(&self) -> &[Expr] {
        match self {
            Expr::Definition(e) => &e.parts,
            Expr::Proposition(e) => &e.parts,
            Expr::Lemma(e) => &e.parts,
            _ => &[],
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Section(_) => "Section",
            Expr::Label(_) => "Label",
            Expr::Preface(_) => "Preface",
            Expr::Definition(_) => "Definition",
            Expr::Axiom(_) => "Axiom",
            Expr::Postulate(_) => "Postulate",
            Expr::Proposition(_) => "Proposition",
            Expr::Lemma(_) => "Lemma",
            Expr::Demonstration(_) => "Demonstration",
            Expr::Scholium(_) => "Scholium",
            Expr::Corollary(_) => "Corollary",
            Expr::Explanation(_) => "Explanation",
        }
    }
}
