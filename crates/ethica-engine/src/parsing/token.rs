use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::input::InputNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    Source,
    Title,
    Book,
    Section,
    Expression,
    Subexpression,
    /// Synthesized by the parser; never emitted by the scanner.
    Label,
    Eof,
    /// An input node of unknown shape. The parser skips these.
    Null,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Source => "SOURCE",
            TokenType::Title => "TITLE",
            TokenType::Book => "BOOK",
            TokenType::Section => "SECTION",
            TokenType::Expression => "EXPRESSION",
            TokenType::Subexpression => "SUBEXPRESSION",
            TokenType::Label => "LABEL",
            TokenType::Eof => "EOF",
            TokenType::Null => "NULL",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The input node a token was derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Literal {
    #[default]
    None,
    Node(Arc<InputNode>),
}

impl Literal {
    pub fn node(&self) -> Option<&InputNode> {
        match self {
            Literal::None => None,
            Literal::Node(node) => Some(node),
        }
    }
}

/// A scanned (or synthesized) token.
///
/// Tokens are immutable once built: `index` is the serialized numbering
/// code of the originating node (e.g. `"1p7sc2"`) that the parser
/// classifies on; `lexeme` is its display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    kind: TokenType,
    lexeme: String,
    #[serde(skip)]
    literal: Literal,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<String>,
}

/// Returned by the parser's cursor once it runs past the token slice.
pub(crate) static END_OF_INPUT: Token = Token {
    kind: TokenType::Eof,
    lexeme: String::new(),
    literal: Literal::None,
    index: None,
};

impl Token {
    pub fn new(
        kind: TokenType,
        lexeme: impl Into<String>,
        literal: Literal,
        index: Option<String>,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            index,
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenType::Eof, "", Literal::None, None)
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.kind,
            self.lexeme,
            self.index.as_deref().unwrap_or("-")
        )
    }
}
