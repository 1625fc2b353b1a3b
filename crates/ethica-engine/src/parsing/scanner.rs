use std::sync::Arc;

use super::input::InputNode;
use super::token::{Literal, Token, TokenType};

/// Linearizes an input tree into a flat token stream.
///
/// Traversal is depth-first pre-order over an explicit work stack: each
/// popped node emits one token and pushes its children in reverse so they
/// pop left to right. The stream always ends with a single `EOF` token.
///
/// [`Scanner::run`] is idempotent: the first call scans, later calls return
/// the same cached slice.
pub struct Scanner {
    stack: Vec<Arc<InputNode>>,
    tokens: Vec<Token>,
    done: bool,
}

impl Scanner {
    pub fn new(root: impl Into<Arc<InputNode>>) -> Self {
        Self {
            stack: vec![root.into()],
            tokens: Vec::new(),
            done: false,
        }
    }

    pub fn run(&mut self) -> &[Token] {
        if !self.done {
            while let Some(node) = self.stack.pop() {
                self.scan_node(node);
            }
            self.tokens.push(Token::eof());
            self.done = true;
            log::debug!("scanned {} tokens", self.tokens.len());
        }
        &self.tokens
    }

    /// Runs the scanner (if it has not run yet) and hands over the tokens.
    pub fn into_tokens(mut self) -> Vec<Token> {
        self.run();
        self.tokens
    }

    fn scan_node(&mut self, node: Arc<InputNode>) {
        match node.as_ref() {
            InputNode::Source(parts) => {
                self.push_children(parts);
                self.add_token(TokenType::Source, "", &node, None);
            }
            InputNode::Title(title) => {
                self.add_token(TokenType::Title, &title.text, &node, title.index.clone());
            }
            InputNode::Book(book) => {
                self.push_children(&book.enonces);
                self.add_token(TokenType::Book, &book.title, &node, book.id.clone());
            }
            InputNode::Section(section) => {
                self.add_token(TokenType::Section, &section.title, &node, None);
            }
            InputNode::Expression(expr) => {
                self.push_children(&expr.childs);
                self.add_token(
                    TokenType::Expression,
                    &expr.text,
                    &node,
                    Some(expr.id.clone()),
                );
            }
            InputNode::Subexpression(sub) => {
                self.add_token(
                    TokenType::Subexpression,
                    &sub.text,
                    &node,
                    Some(sub.id.clone()),
                );
            }
            InputNode::Unmatched(value) => {
                log::trace!("ignoring unmatched input node: {value}");
                self.add_token(TokenType::Null, "", &node, None);
            }
        }
    }

    fn push_children(&mut self, children: &[Arc<InputNode>]) {
        self.stack.extend(children.iter().rev().cloned());
    }

    fn add_token(
        &mut self,
        kind: TokenType,
        lexeme: &str,
        node: &Arc<InputNode>,
        index: Option<String>,
    ) {
        let token = Token::new(kind, lexeme, Literal::Node(Arc::clone(node)), index);
        log::trace!("token: {token}");
        self.tokens.push(token);
    }
}

/// Scans `root` and returns its token stream.
pub fn scan(root: InputNode) -> Vec<Token> {
    Scanner::new(root).into_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn kinds(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(Token::kind).collect()
    }

    fn indices(tokens: &[Token]) -> Vec<Option<&str>> {
        tokens.iter().map(Token::index).collect()
    }

    fn sample() -> InputNode {
        InputNode::from_value(json!([
            {"index": "0", "id": "t", "text": "ETHICA"},
            {"index": "1", "id": "1", "title": "PART I", "enonces": [
                {"title": "DEFINITIONS", "type": "section"},
                {"id": "1d1", "title": "Def. I", "text": "first", "childs": []},
                {"id": "1p1", "title": "Prop. I", "text": "second", "childs": [
                    {"id": "1p1d", "type": "dem", "text": "third"}
                ]},
                {"id": "1p2", "title": "Prop. II", "text": "fourth", "childs": []}
            ]}
        ]))
    }

    #[test]
    fn emits_tokens_in_document_order() {
        let tokens = scan(sample());

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenType::Source,
                TokenType::Title,
                TokenType::Book,
                TokenType::Section,
                TokenType::Expression,
                TokenType::Expression,
                TokenType::Subexpression,
                TokenType::Expression,
                TokenType::Eof,
            ]
        );
        assert_eq!(
            indices(&tokens),
            vec![
                None,
                Some("0"),
                Some("1"),
                None,
                Some("1d1"),
                Some("1p1"),
                Some("1p1d"),
                Some("1p2"),
                None,
            ]
        );
    }

    #[test]
    fn lexemes_come_from_display_fields() {
        let tokens = scan(sample());
        let lexemes: Vec<&str> = tokens.iter().map(Token::lexeme).collect();
        assert_eq!(
            lexemes,
            vec!["", "ETHICA", "PART I", "DEFINITIONS", "first", "second", "third", "fourth", ""]
        );
    }

    #[test]
    fn run_is_idempotent() {
        let mut scanner = Scanner::new(sample());
        let first = scanner.run().as_ptr();
        let first_len = scanner.run().len();
        let second = scanner.run();

        assert!(std::ptr::eq(first, second.as_ptr()));
        assert_eq!(first_len, second.len());
        assert_eq!(
            second.iter().filter(|t| t.kind() == TokenType::Eof).count(),
            1
        );
    }

    #[test]
    fn unmatched_nodes_become_null_tokens() {
        let tokens = scan(InputNode::from_value(json!([
            {"index": "1", "id": "1", "title": "PART I", "enonces": [
                {"unexpected": true},
                {"id": "1a1", "title": "Ax. I", "text": "axiom", "childs": []}
            ]}
        ])));

        assert_eq!(
            kinds(&tokens),
            vec![
                TokenType::Source,
                TokenType::Book,
                TokenType::Null,
                TokenType::Expression,
                TokenType::Eof,
            ]
        );
        let null = &tokens[2];
        assert_eq!(null.lexeme(), "");
        assert_eq!(null.index(), None);
    }

    #[test]
    fn tokens_keep_their_originating_node() {
        let tokens = scan(sample());
        let literal = tokens[6].literal().node().unwrap();
        match literal {
            InputNode::Subexpression(sub) => assert_eq!(sub.kind, "dem"),
            other => panic!("expected subexpression, got {other:?}"),
        }
        assert_eq!(tokens.last().unwrap().literal(), &Literal::None);
    }

    #[test]
    fn non_array_root_still_terminates() {
        let tokens = scan(InputNode::from_value(json!("just a string")));
        assert_eq!(kinds(&tokens), vec![TokenType::Null, TokenType::Eof]);
    }
}
