//! # Parser
//!
//! Recursive descent over the scanner's token stream, one token of
//! lookahead, no backtracking:
//!
//! ```text
//! source      := SOURCE (section | book)*
//! book        := BOOK (section | label)*
//! section     := TITLE | SECTION
//! label       := EXPRESSION classify-expression
//!              | SUBEXPRESSION classify-subexpression
//! definition  := EXPRESSION (SUBEXPRESSION label)*
//! proposition := EXPRESSION (SUBEXPRESSION label)*
//! lemma       := EXPRESSION (SUBEXPRESSION label)*
//! ```
//!
//! Token types only say "expression" or "subexpression"; what kind of
//! element a token is comes from its index string (see [`classify`]).
//!
//! ## Failure
//!
//! A failed rule returns a [`ParseError`] that propagates to the root, and
//! the whole document is rejected: [`Parser::parse`] yields `None` and
//! [`Parser::try_parse`] the error. The only local recovery is at source
//! level, where a token that cannot start a section or book is skipped by
//! [`synchronizing`](Parser::synchronize) to the next `BOOK`/`SECTION`.
//! `NULL` tokens never reach the grammar: the cursor steps over them.

pub mod classify;
pub mod error;

use serde::Serialize;

use crate::ast::{
    Axiom, Book, Corollary, Definition, Demonstration, Explanation, Expr, Label, Lemma, Part,
    Postulate, Preface, Proposition, Scholium, Section, Source, Stmt,
};

use super::index::{IndexCollection, IndexEntry, extract_refs};
use super::token::{END_OF_INPUT, Literal, Token, TokenType};
use classify::{
    ExpressionKind, SubexpressionKind, classify_expression, classify_subexpression, serial_index,
};
pub use error::ParseError;

type ParseOutcome<T> = Result<T, ParseError>;

/// A successfully parsed document and its index map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub source: Source,
    pub index: IndexCollection,
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    current: usize,
    index: IndexCollection,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        let mut parser = Self {
            tokens,
            current: 0,
            index: IndexCollection::new(),
        };
        parser.skip_ignored();
        parser
    }

    /// Parses the whole stream; `None` if any rule failed.
    pub fn parse(self) -> Option<ParseResult> {
        match self.try_parse() {
            Ok(result) => Some(result),
            Err(e) => {
                log::error!("Error happened while parsing: {e}");
                None
            }
        }
    }

    pub fn try_parse(mut self) -> Result<ParseResult, ParseError> {
        match self.source() {
            Ok(source) => {
                log::debug!("parsed source with {} labels", self.index.len());
                Ok(ParseResult {
                    source,
                    index: self.index,
                })
            }
            Err(e) => {
                self.synchronize();
                Err(e)
            }
        }
    }

    fn source(&mut self) -> ParseOutcome<Source> {
        let title = self.consume(TokenType::Source, "Expect source name")?;
        let mut parts = Vec::new();
        while !self.is_at_end() {
            if self.check(TokenType::Title) || self.check(TokenType::Section) {
                parts.push(Part::Expr(Expr::Section(self.section()?)));
            } else if self.check(TokenType::Book) {
                parts.push(Part::Stmt(Stmt::Book(self.book()?)));
            } else {
                log::warn!(
                    "skipping unexpected token after {} parts: {}",
                    parts.len(),
                    self.peek()
                );
                self.synchronize();
            }
        }
        Ok(Source { title, parts })
    }

    fn book(&mut self) -> ParseOutcome<Book> {
        let title = self.consume(TokenType::Book, "Expect book name")?;
        let mut contents = Vec::new();
        loop {
            if self.check(TokenType::Section) {
                contents.push(Expr::Section(self.section()?));
            } else if self.check(TokenType::Expression) {
                contents.push(Expr::Label(self.label(None)?));
            } else {
                break;
            }
        }
        Ok(Book { title, contents })
    }

    fn section(&mut self) -> ParseOutcome<Section> {
        let term = if self.check(TokenType::Title) {
            self.consume(TokenType::Title, "Expect title")?
        } else if self.check(TokenType::Section) {
            self.consume(TokenType::Section, "Expect section declaration")?
        } else {
            return Err(self.error(self.peek(), "parse failed: unknown token"));
        };
        Ok(Section { term })
    }

    /// Classifies the next (sub)expression, records it in the index map and
    /// wraps it in a [`Label`].
    ///
    /// `parent_serial` is the serial of the enclosing element; a
    /// subexpression without digits of its own (`1p7d`) borrows it.
    fn label(&mut self, parent_serial: Option<&str>) -> ParseOutcome<Label> {
        let term = self.peek();
        let Some(term_index) = term.index() else {
            return Err(self.missing_index(term, "Expect term index to exist"));
        };
        let serial = serial_index(term_index);

        let (expr, label) = match term.kind() {
            TokenType::Expression => {
                let kind = classify_expression(term_index);
                let label = kind.label(&serial);
                self.record(term, label.clone());
                (self.expression(kind, &serial)?, label)
            }
            TokenType::Subexpression => {
                let Some(kind) = classify_subexpression(term_index) else {
                    log::error!("Subexpression matching failed: unknown token {term}");
                    return Err(ParseError::UnknownSubexpression {
                        token: term.to_string(),
                        index: term_index.to_string(),
                    });
                };
                let serial = match parent_serial {
                    Some(parent) if serial.is_empty() => parent.to_string(),
                    _ => serial,
                };
                let label = kind.label(&serial);
                self.record(term, label.clone());
                (self.subexpression(kind)?, label)
            }
            _ => {
                return Err(self.error(
                    term,
                    "Expect label() to be called on an expression or subexpression",
                ));
            }
        };

        // The scanner never emits labels; the token is made here and takes
        // the wrapped element's index.
        let anchor = expr.anchor();
        let Some(index) = anchor.index() else {
            return Err(self.missing_index(anchor, "Expect index to exist on a label"));
        };
        let token = Token::new(
            TokenType::Label,
            label,
            Literal::None,
            Some(index.to_string()),
        );
        Ok(Label {
            label: token,
            term: Box::new(expr),
        })
    }

    fn expression(&mut self, kind: ExpressionKind, serial: &str) -> ParseOutcome<Expr> {
        Ok(match kind {
            ExpressionKind::Definition => Expr::Definition(self.definition(serial)?),
            ExpressionKind::Axiom => Expr::Axiom(Axiom {
                term: self.consume(TokenType::Expression, "Expect axiom")?,
            }),
            ExpressionKind::Postulate => Expr::Postulate(Postulate {
                term: self.consume(TokenType::Expression, "Expect postulate")?,
            }),
            ExpressionKind::Preface => Expr::Preface(Preface {
                term: self.consume(TokenType::Expression, "Expect preface")?,
            }),
            ExpressionKind::Lemma => Expr::Lemma(self.lemma(serial)?),
            ExpressionKind::Proposition => Expr::Proposition(self.proposition(serial)?),
        })
    }

    fn subexpression(&mut self, kind: SubexpressionKind) -> ParseOutcome<Expr> {
        Ok(match kind {
            SubexpressionKind::Demonstration => Expr::Demonstration(Demonstration {
                term: self.consume(TokenType::Subexpression, "Expect demonstration")?,
            }),
            SubexpressionKind::Scholium => Expr::Scholium(Scholium {
                term: self.consume(TokenType::Subexpression, "Expect scholium")?,
            }),
            SubexpressionKind::Corollary => Expr::Corollary(Corollary {
                term: self.consume(TokenType::Subexpression, "Expect corollary")?,
            }),
            SubexpressionKind::Explanation => Expr::Explanation(Explanation {
                term: self.consume(TokenType::Subexpression, "Expect explanation")?,
            }),
        })
    }

    fn definition(&mut self, serial: &str) -> ParseOutcome<Definition> {
        let term = self.consume(TokenType::Expression, "Expect definition")?;
        let parts = self.labelled_parts(serial)?;
        Ok(Definition { term, parts })
    }

    fn proposition(&mut self, serial: &str) -> ParseOutcome<Proposition> {
        let term = self.consume(TokenType::Expression, "Expect proposition")?;
        let parts = self.labelled_parts(serial)?;
        Ok(Proposition { term, parts })
    }

    fn lemma(&mut self, serial: &str) -> ParseOutcome<Lemma> {
        let term = self.consume(TokenType::Expression, "Expect lemma")?;
        let parts = self.labelled_parts(serial)?;
        Ok(Lemma { term, parts })
    }

    fn labelled_parts(&mut self, serial: &str) -> ParseOutcome<Vec<Expr>> {
        let mut parts = Vec::new();
        while self.check(TokenType::Subexpression) {
            parts.push(Expr::Label(self.label(Some(serial))?));
        }
        Ok(parts)
    }

    fn record(&mut self, term: &Token, label: String) {
        if let Some(key) = term.index() {
            let entry = IndexEntry {
                label,
                refs: extract_refs(term.lexeme()),
            };
            self.index.record(key, entry);
        }
    }

    /// Discards tokens up to the next `BOOK` or `SECTION` (or the end).
    /// Always advances at least once.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if matches!(self.peek().kind(), TokenType::Book | TokenType::Section) {
                return;
            }
            self.advance();
        }
    }

    fn consume(&mut self, kind: TokenType, message: &str) -> ParseOutcome<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(self.error(self.peek(), message))
    }

    fn check(&self, kind: TokenType) -> bool {
        !self.is_at_end() && self.peek().kind() == kind
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
            self.skip_ignored();
        }
        token
    }

    fn skip_ignored(&mut self) {
        while self
            .tokens
            .get(self.current)
            .is_some_and(|t| t.kind() == TokenType::Null)
        {
            self.current += 1;
        }
    }

    fn peek(&self) -> &'t Token {
        self.tokens.get(self.current).unwrap_or(&END_OF_INPUT)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind() == TokenType::Eof
    }

    fn error(&self, token: &Token, message: &str) -> ParseError {
        log::error!("Parse error at: {token} {message}");
        ParseError::Unexpected {
            token: token.to_string(),
            message: message.to_string(),
        }
    }

    fn missing_index(&self, token: &Token, message: &str) -> ParseError {
        log::error!("Parse error at: {token} {message}");
        ParseError::MissingIndex {
            token: token.to_string(),
            message: message.to_string(),
        }
    }
}

/// Parses a token stream; `None` when the document does not parse.
pub fn parse(tokens: &[Token]) -> Option<ParseResult> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests;
