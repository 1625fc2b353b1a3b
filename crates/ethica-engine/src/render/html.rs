use std::borrow::Cow;
use std::sync::OnceLock;

use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;

use crate::ast::{
    Axiom, Book, Corollary, Definition, Demonstration, Explanation, Expr, Label, Lemma, Postulate,
    Preface, Proposition, Scholium, Section, Source, Visitor,
};
use crate::markup::{MarkupNode, MarkupProcessor};
use crate::parsing::Token;

/// CSS class names put on the generated elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterStyles {
    pub source_class: String,
    pub book_class: String,
    pub section_class: String,
    pub axiom_class: String,
    pub definition_class: String,
    /// Also used for prefaces, postulates and lemmas.
    pub proposition_class: String,
    pub demonstration_class: String,
    pub scholium_class: String,
    pub corollary_class: String,
    pub explanation_class: String,
}

impl Default for InterpreterStyles {
    fn default() -> Self {
        Self {
            source_class: "source".to_string(),
            book_class: "book".to_string(),
            section_class: "section".to_string(),
            axiom_class: "axiom".to_string(),
            definition_class: "definition".to_string(),
            proposition_class: "proposition".to_string(),
            demonstration_class: "demonstration".to_string(),
            scholium_class: "scholium".to_string(),
            corollary_class: "corollary".to_string(),
            explanation_class: "explanation".to_string(),
        }
    }
}

/// Renders the document tree as semantic HTML.
///
/// Books become `<h1>`, sections `<h3>`, labels a `<dl>` pairing the label
/// with its element, and every term a classed `<p>`. Term text goes through
/// [`trim_before_punctuation`] and then the markup processor.
pub struct HtmlInterpreter<'a> {
    styles: InterpreterStyles,
    markup: MarkupProcessor<'a>,
}

impl<'a> HtmlInterpreter<'a> {
    pub fn new(styles: InterpreterStyles, link_builder: &'a dyn Fn(&str) -> String) -> Self {
        Self {
            styles,
            markup: MarkupProcessor::new(link_builder),
        }
    }

    pub fn render_source(&mut self, source: &Source) -> String {
        self.visit_source(source)
    }

    pub fn render_book(&mut self, book: &Book) -> String {
        self.visit_book(book)
    }

    fn render_text(&self, input: &str) -> String {
        markup_to_html(&self.markup.run(&trim_before_punctuation(input)))
    }

    fn paragraph(&self, class: &str, term: &Token) -> String {
        format!(
            "<p class=\"{}\">{}</p>\n",
            encode_double_quoted_attribute(class),
            self.render_text(term.lexeme())
        )
    }

    fn with_parts(&mut self, class: &str, term: &Token, parts: &[Expr]) -> String {
        let mut out = self.paragraph(class, term);
        for part in parts {
            out.push_str(&part.accept(self));
        }
        out
    }
}

impl Visitor for HtmlInterpreter<'_> {
    type Output = String;

    fn visit_source(&mut self, source: &Source) -> String {
        let mut out = format!(
            "<article class=\"{}\">\n",
            encode_double_quoted_attribute(&self.styles.source_class)
        );
        for part in &source.parts {
            out.push_str(&part.accept(self));
        }
        out.push_str("</article>\n");
        out
    }

    fn visit_book(&mut self, book: &Book) -> String {
        let mut out = format!(
            "<h1{} class=\"{}\">{}</h1>\n",
            id_attr(&book.title),
            encode_double_quoted_attribute(&self.styles.book_class),
            self.render_text(book.title.lexeme())
        );
        for expr in &book.contents {
            out.push_str(&expr.accept(self));
        }
        out
    }

    fn visit_section(&mut self, section: &Section) -> String {
        format!(
            "<h3{} class=\"{}\">{}</h3>\n",
            id_attr(&section.term),
            encode_double_quoted_attribute(&self.styles.section_class),
            self.render_text(section.term.lexeme())
        )
    }

    fn visit_label(&mut self, label: &Label) -> String {
        format!(
            "<dl{}>\n<dt>{}</dt>\n<dd>\n{}</dd>\n</dl>\n",
            id_attr(&label.label),
            encode_text(label.label.lexeme()),
            label.term.accept(self)
        )
    }

    fn visit_preface(&mut self, preface: &Preface) -> String {
        self.paragraph(&self.styles.proposition_class, &preface.term)
    }

    fn visit_definition(&mut self, definition: &Definition) -> String {
        let class = self.styles.definition_class.clone();
        self.with_parts(&class, &definition.term, &definition.parts)
    }

    fn visit_axiom(&mut self, axiom: &Axiom) -> String {
        self.paragraph(&self.styles.axiom_class, &axiom.term)
    }

    fn visit_postulate(&mut self, postulate: &Postulate) -> String {
        self.paragraph(&self.styles.proposition_class, &postulate.term)
    }

    fn visit_proposition(&mut self, proposition: &Proposition) -> String {
        let class = self.styles.proposition_class.clone();
        self.with_parts(&class, &proposition.term, &proposition.parts)
    }

    fn visit_lemma(&mut self, lemma: &Lemma) -> String {
        let class = self.styles.proposition_class.clone();
        self.with_parts(&class, &lemma.term, &lemma.parts)
    }

    fn visit_demonstration(&mut self, demonstration: &Demonstration) -> String {
        self.paragraph(&self.styles.demonstration_class, &demonstration.term)
    }

    fn visit_scholium(&mut self, scholium: &Scholium) -> String {
        self.paragraph(&self.styles.scholium_class, &scholium.term)
    }

    fn visit_corollary(&mut self, corollary: &Corollary) -> String {
        self.paragraph(&self.styles.corollary_class, &corollary.term)
    }

    fn visit_explanation(&mut self, explanation: &Explanation) -> String {
        self.paragraph(&self.styles.explanation_class, &explanation.term)
    }
}

fn id_attr(token: &Token) -> String {
    token
        .index()
        .map(|index| format!(" id=\"{}\"", encode_double_quoted_attribute(index)))
        .unwrap_or_default()
}

/// Removes the space the source text puts before `,` `;` and `:`.
pub fn trim_before_punctuation(input: &str) -> Cow<'_, str> {
    static PUNCT_RX: OnceLock<Regex> = OnceLock::new();
    let rx = PUNCT_RX.get_or_init(|| Regex::new(r" ([,;:])").expect("Invalid punctuation regex"));
    rx.replace_all(input, "$1")
}

/// Serializes a markup tree as escaped inline HTML.
pub fn markup_to_html(node: &MarkupNode) -> String {
    let mut out = String::new();
    push_markup(node, &mut out);
    out
}

fn push_markup(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Empty => {}
        MarkupNode::Text(text) => out.push_str(&encode_text(text)),
        MarkupNode::Fragment(nodes) => {
            for node in nodes {
                push_markup(node, out);
            }
        }
        MarkupNode::Emphasis(inner) => {
            out.push_str("<i>");
            push_markup(inner, out);
            out.push_str("</i>");
        }
        MarkupNode::Link { target, content } => {
            out.push_str("<a href=\"");
            out.push_str(&encode_double_quoted_attribute(target));
            out.push_str("\">");
            push_markup(content, out);
            out.push_str("</a>");
        }
        MarkupNode::Caption(caption) => {
            out.push_str("<label>");
            out.push_str(&encode_text(caption));
            out.push_str("</label>");
        }
        MarkupNode::Citation(inner) => {
            out.push_str("<cite>");
            push_markup(inner, out);
            out.push_str("</cite>");
        }
        MarkupNode::ParseError => out.push_str("<span class=\"parse-error\">Parse Error</span>"),
    }
}
