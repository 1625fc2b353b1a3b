use super::*;
use crate::parsing::input::InputNode;
use crate::parsing::scanner::scan;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn tokens_for(value: Value) -> Vec<Token> {
    scan(InputNode::from_value(value))
}

fn parse_json(value: Value) -> Option<ParseResult> {
    parse(&tokens_for(value))
}

fn book_with(enonces: Value) -> Value {
    json!([
        {"index": "1", "id": "1", "title": "Pars Prima", "enonces": enonces}
    ])
}

fn token(kind: TokenType, index: Option<&str>) -> Token {
    Token::new(kind, "", Literal::None, index.map(str::to_string))
}

/// `(label lexeme, wrapped kind)` for each labelled element of the first
/// book, nested parts flattened in document order.
fn labels(result: &ParseResult) -> Vec<(String, &'static str)> {
    fn walk(expr: &Expr, out: &mut Vec<(String, &'static str)>) {
        if let Expr::Label(label) = expr {
            out.push((label.label.lexeme().to_string(), label.term.kind_name()));
            for part in label.term.parts() {
                walk(part, out);
            }
        }
    }

    let mut out = Vec::new();
    let book = result.source.books().next().expect("a book");
    for expr in &book.contents {
        walk(expr, &mut out);
    }
    out
}

fn owned(pairs: &[(&str, &'static str)]) -> Vec<(String, &'static str)> {
    pairs.iter().map(|(l, k)| (l.to_string(), *k)).collect()
}

#[test]
fn proposition_with_demonstration() {
    let result = parse_json(json!([
        {"index": "0", "text": "ETHICA"},
        {"index": "1", "id": "1", "title": "Pars Prima", "enonces": [
            {"title": "Definitiones", "type": "section"},
            {"id": "1p7", "title": "Prop. VII", "text": "Ad naturam substantiae pertinet existere.", "childs": [
                {"id": "1p7d", "type": "demonstratio", "text": "Substantia non potest produci."}
            ]}
        ]}
    ]))
    .expect("document parses");

    assert_eq!(result.source.title.kind(), TokenType::Source);
    assert_eq!(result.source.parts.len(), 2);
    assert!(matches!(
        &result.source.parts[0],
        Part::Expr(Expr::Section(section)) if section.term.lexeme() == "ETHICA"
    ));

    let book = result.source.books().next().unwrap();
    assert_eq!(book.title.lexeme(), "Pars Prima");
    assert!(matches!(&book.contents[0], Expr::Section(s) if s.term.lexeme() == "Definitiones"));

    let Expr::Label(prop) = &book.contents[1] else {
        panic!("expected a label, got {:?}", book.contents[1]);
    };
    assert_eq!(prop.label.kind(), TokenType::Label);
    assert_eq!(prop.label.lexeme(), "Prop. 7: ");
    assert_eq!(prop.label.index(), Some("1p7"));
    assert_eq!(prop.label.literal(), &Literal::None);

    let Expr::Proposition(inner) = prop.term.as_ref() else {
        panic!("expected a proposition");
    };
    assert_eq!(
        inner.term.lexeme(),
        "Ad naturam substantiae pertinet existere."
    );
    let Expr::Label(dem) = &inner.parts[0] else {
        panic!("expected a labelled demonstration");
    };
    assert_eq!(dem.label.lexeme(), "Dem. 7: ");
    assert_eq!(dem.label.index(), Some("1p7d"));
    assert_eq!(dem.term.kind_name(), "Demonstration");
}

#[test]
fn classifies_every_family() {
    let result = parse_json(book_with(json!([
        {"id": "1d2", "title": "Def", "text": "", "childs": [
            {"id": "1d2e", "type": "explicatio", "text": ""}
        ]},
        {"id": "1a3", "title": "Ax", "text": "", "childs": []},
        {"id": "2p13p1", "title": "Post", "text": "", "childs": []},
        {"id": "3pr", "title": "Praefatio", "text": "", "childs": []},
        {"id": "2p13l1", "title": "Lemma", "text": "", "childs": [
            {"id": "2p13l1d", "type": "demonstratio", "text": ""}
        ]},
        {"id": "1p8", "title": "Prop", "text": "", "childs": [
            {"id": "1p8c1", "type": "corollarium", "text": ""},
            {"id": "1p8sc2", "type": "scholium", "text": ""}
        ]}
    ])))
    .unwrap();

    assert_eq!(
        labels(&result),
        owned(&[
            ("D2: ", "Definition"),
            ("Expl. 2: ", "Explanation"),
            ("A3: ", "Axiom"),
            ("Postulate 1: ", "Postulate"),
            ("Preface: ", "Preface"),
            ("Lemma 1: ", "Lemma"),
            ("Dem. 1: ", "Demonstration"),
            ("Prop. 8: ", "Proposition"),
            ("Coroll. 1: ", "Corollary"),
            ("Schol. 2: ", "Scholium"),
        ])
    );
}

#[test]
fn index_follows_document_order_and_collects_refs() {
    let result = parse_json(book_with(json!([
        {"id": "1d1", "title": "D1", "text": "Per causam sui intelligo", "childs": []},
        {"id": "1p1", "title": "P1", "text": "Substantia prior est.", "childs": [
            {"id": "1p1d", "type": "demonstratio", "text": "Patet ex [Def. 3](1d3) et [Def. 5](1d5)."}
        ]},
        {"id": "1p2", "title": "P2", "text": "See [Prop. 1](1p1).", "childs": []}
    ])))
    .unwrap();

    let index = &result.index;
    assert_eq!(
        index.keys().collect::<Vec<_>>(),
        vec!["1d1", "1p1", "1p1d", "1p2"]
    );
    assert_eq!(index.get("1p1d").unwrap().label, "Dem. 1: ");
    assert_eq!(index.get("1p1d").unwrap().refs, vec!["1d3", "1d5"]);
    assert_eq!(index.get("1p2").unwrap().refs, vec!["1p1"]);
    assert!(index.get("1d1").unwrap().refs.is_empty());
    assert_eq!(index.position_of("1p2"), Some(3));
}

#[test]
fn unknown_subexpression_rejects_the_document() {
    let tokens = tokens_for(book_with(json!([
        {"id": "1p7", "title": "P7", "text": "", "childs": [
            {"id": "1p7x", "type": "mystery", "text": ""}
        ]}
    ])));

    assert_eq!(parse(&tokens), None);
    assert!(matches!(
        Parser::new(&tokens).try_parse(),
        Err(ParseError::UnknownSubexpression { index, .. }) if index == "1p7x"
    ));
}

#[test]
fn expression_without_index_rejects_the_document() {
    let tokens = vec![
        token(TokenType::Source, None),
        token(TokenType::Book, Some("1")),
        token(TokenType::Expression, None),
        Token::eof(),
    ];

    assert!(matches!(
        Parser::new(&tokens).try_parse(),
        Err(ParseError::MissingIndex { .. })
    ));
}

#[rstest]
#[case::empty(vec![])]
#[case::eof_only(vec![Token::eof()])]
#[case::book_first(vec![token(TokenType::Book, Some("1")), Token::eof()])]
fn missing_source_token_is_an_error(#[case] tokens: Vec<Token>) {
    assert!(matches!(
        Parser::new(&tokens).try_parse(),
        Err(ParseError::Unexpected { message, .. }) if message == "Expect source name"
    ));
}

#[test]
fn non_array_root_does_not_parse() {
    assert_eq!(parse_json(json!({"unexpected": true})), None);
}

#[test]
fn unmatched_nodes_are_skipped() {
    let result = parse_json(book_with(json!([
        42,
        {"id": "1a1", "title": "A1", "text": "", "childs": []},
        {"what": "ever"},
        {"id": "1a2", "title": "A2", "text": "", "childs": []}
    ])))
    .unwrap();

    assert_eq!(
        labels(&result),
        owned(&[("A1: ", "Axiom"), ("A2: ", "Axiom")])
    );
}

#[test]
fn stray_expression_before_a_book_is_skipped() {
    let tokens = vec![
        token(TokenType::Source, None),
        token(TokenType::Expression, Some("1p1")),
        token(TokenType::Subexpression, Some("1p1d")),
        token(TokenType::Book, Some("1")),
        token(TokenType::Expression, Some("1p2")),
        Token::eof(),
    ];

    let result = parse(&tokens).unwrap();

    assert_eq!(result.source.parts.len(), 1);
    assert_eq!(result.index.keys().collect::<Vec<_>>(), vec!["1p2"]);
}

#[test]
fn subexpression_after_a_leaf_ends_the_book() {
    let tokens = vec![
        token(TokenType::Source, None),
        token(TokenType::Book, Some("1")),
        token(TokenType::Expression, Some("1a1")),
        token(TokenType::Subexpression, Some("1a1e")),
        token(TokenType::Expression, Some("1a2")),
        token(TokenType::Book, Some("2")),
        token(TokenType::Expression, Some("2a1")),
        Token::eof(),
    ];

    let result = parse(&tokens).unwrap();
    let books: Vec<_> = result.source.books().collect();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].contents.len(), 1);
    assert_eq!(books[1].contents.len(), 1);
    assert_eq!(result.index.keys().collect::<Vec<_>>(), vec!["1a1", "2a1"]);
}

#[test]
fn titles_between_books_become_sections() {
    let result = parse_json(json!([
        {"index": "0", "text": "ETHICA"},
        {"index": "1", "id": "1", "title": "Pars Prima", "enonces": []},
        {"index": "2", "text": "ORDINE GEOMETRICO"},
        {"index": "2", "id": "2", "title": "Pars Secunda", "enonces": []}
    ]))
    .unwrap();

    let kinds: Vec<_> = result
        .source
        .parts
        .iter()
        .map(|part| match part {
            Part::Stmt(Stmt::Book(book)) => format!("book {}", book.title.lexeme()),
            Part::Expr(expr) => format!("{} {}", expr.kind_name(), expr.anchor().lexeme()),
            Part::Stmt(Stmt::Source(_)) => "source".to_string(),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "Section ETHICA",
            "book Pars Prima",
            "Section ORDINE GEOMETRICO",
            "book Pars Secunda",
        ]
    );
}

#[test]
fn duplicate_index_keeps_first_position() {
    let result = parse_json(book_with(json!([
        {"id": "1p1", "title": "P1", "text": "first", "childs": []},
        {"id": "1p2", "title": "P2", "text": "", "childs": []},
        {"id": "1p1", "title": "P1", "text": "again", "childs": []}
    ])))
    .unwrap();

    assert_eq!(result.index.len(), 2);
    assert_eq!(result.index.key_at(0), Some("1p1"));
    assert_eq!(labels(&result).len(), 3);
}
