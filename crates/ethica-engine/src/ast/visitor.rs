use super::expr::{
    Axiom, Corollary, Definition, Demonstration, Explanation, Expr, Label, Lemma, Postulate,
    Preface, Proposition, Scholium, Section,
};
use super::stmt::{Book, Part, Source, Stmt};

/// One method per node type. Dispatch is an exhaustive `match` in the
/// `accept` methods, so adding a node kind breaks every visitor until it
/// handles the new kind.
pub trait Visitor {
    type Output;

    fn visit_source(&mut self, source: &Source) -> Self::Output;
    fn visit_book(&mut self, book: &Book) -> Self::Output;

    fn visit_section(&mut self, section: &Section) -> Self::Output;
    fn visit_label(&mut self, label: &Label) -> Self::Output;
    fn visit_preface(&mut self, preface: &Preface) -> Self::Output;
    fn visit_definition(&mut self, definition: &Definition) -> Self::Output;
    fn visit_axiom(&mut self, axiom: &Axiom) -> Self::Output;
    fn visit_postulate(&mut self, postulate: &Postulate) -> Self::Output;
    fn visit_proposition(&mut self, proposition: &Proposition) -> Self::Output;
    fn visit_lemma(&mut self, lemma: &Lemma) -> Self::Output;
    fn visit_demonstration(&mut self, demonstration: &Demonstration) -> Self::Output;
    fn visit_scholium(&mut self, scholium: &Scholium) -> Self::Output;
    fn visit_corollary(&mut self, corollary: &Corollary) -> Self::Output;
    fn visit_explanation(&mut self, explanation: &Explanation) -> Self::Output;
}

impl Stmt {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::Source(source) => visitor.visit_source(source),
            Stmt::Book(book) => visitor.visit_book(book),
        }
    }
}

impl Expr {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Section(e) => visitor.visit_section(e),
            Expr::Label(e) => visitor.visit_label(e),
            Expr::Preface(e) => visitor.visit_preface(e),
            Expr::Definition(e) => visitor.visit_definition(e),
            Expr::Axiom(e) => visitor.visit_axiom(e),
            Expr::Postulate(e) => visitor.visit_postulate(e),
            Expr::Proposition(e) => visitor.visit_proposition(e),
            Expr::Lemma(e) => visitor.visit_lemma(e),
            Expr::Demonstration(e) => visitor.visit_demonstration(e),
            Expr::Scholium(e) => visitor.visit_scholium(e),
            Expr::Corollary(e) => visitor.visit_corollary(e),
            Expr::Explanation(e) => visitor.visit_explanation(e),
        }
    }
}

impl Part {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Part::Stmt(stmt) => stmt.accept(visitor),
            Part::Expr(expr) => expr.accept(visitor),
        }
    }
}
