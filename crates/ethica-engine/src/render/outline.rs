use crate::ast::{
    Axiom, Book, Corollary, Definition, Demonstration, Explanation, Expr, Label, Lemma, Postulate,
    Preface, Proposition, Scholium, Section, Source, Visitor,
};
use crate::parsing::Token;

/// Prints the tree as an indented outline, one node per line:
/// `Kind index "text"`, two spaces per level.
#[derive(Default)]
pub struct OutlinePrinter {
    out: String,
    depth: usize,
}

impl OutlinePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(mut self, source: &Source) -> String {
        self.visit_source(source);
        self.out
    }

    fn line(&mut self, kind: &str, token: &Token, text: Option<&str>) {
        let indent = "  ".repeat(self.depth);
        let index = token.index().unwrap_or("-");
        let line = match text {
            Some(text) => format!("{indent}{kind} {index} {text:?}\n"),
            None => format!("{indent}{kind} {index}\n"),
        };
        self.out.push_str(&line);
    }

    fn nested(&mut self, parts: &[Expr]) {
        self.depth += 1;
        for part in parts {
            part.accept(self);
        }
        self.depth -= 1;
    }
}

impl Visitor for OutlinePrinter {
    type Output = ();

    fn visit_source(&mut self, source: &Source) {
        self.line("Source", &source.title, None);
        self.depth += 1;
        for part in &source.parts {
            part.accept(self);
        }
        self.depth -= 1;
    }

    fn visit_book(&mut self, book: &Book) {
        self.line("Book", &book.title, Some(book.title.lexeme()));
        self.nested(&book.contents);
    }

    fn visit_section(&mut self, section: &Section) {
        self.line("Section", &section.term, Some(section.term.lexeme()));
    }

    fn visit_label(&mut self, label: &Label) {
        self.line("Label", &label.label, Some(label.label.lexeme()));
        self.depth += 1;
        label.term.accept(self);
        self.depth -= 1;
    }

    fn visit_preface(&mut self, preface: &Preface) {
        self.line("Preface", &preface.term, None);
    }

    fn visit_definition(&mut self, definition: &Definition) {
        self.line("Definition", &definition.term, None);
        self.nested(&definition.parts);
    }

    fn visit_axiom(&mut self, axiom: &Axiom) {
        self.line("Axiom", &axiom.term, None);
    }

    fn visit_postulate(&mut self, postulate: &Postulate) {
        self.line("Postulate", &postulate.term, None);
    }

    fn visit_proposition(&mut self, proposition: &Proposition) {
        self.line("Proposition", &proposition.term, None);
        self.nested(&proposition.parts);
    }

    fn visit_lemma(&mut self, lemma: &Lemma) {
        self.line("Lemma", &lemma.term, None);
        self.nested(&lemma.parts);
    }

    fn visit_demonstration(&mut self, demonstration: &Demonstration) {
        self.line("Demonstration", &demonstration.term, None);
    }

    fn visit_scholium(&mut self, scholium: &Scholium) {
        self.line("Scholium", &scholium.term, None);
    }

    fn visit_corollary(&mut self, corollary: &Corollary) {
        self.line("Corollary", &corollary.term, None);
    }

    fn visit_explanation(&mut self, explanation: &Explanation) {
        self.line("Explanation", &explanation.term, None);
    }
}

/// Outline of a whole source.
pub fn outline(source: &Source) -> String {
    OutlinePrinter::new().print(source)
}
