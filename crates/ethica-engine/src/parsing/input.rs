use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One node of an edition's structured input, classified by shape.
///
/// The edition JSON carries no explicit tags: which variant a value belongs
/// to is decided by the fields it has. Classification happens once, when
/// the JSON is converted (see [`InputNode::from_value`]), so the scanner
/// only ever matches on variants.
///
/// Children are reference-counted so tokens can point back at the node they
/// were derived from without copying the subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum InputNode {
    /// The root: an ordered list of titles and books.
    Source(Vec<Arc<InputNode>>),
    Title(Title),
    Book(Book),
    Section(Section),
    Expression(Expression),
    Subexpression(Subexpression),
    /// Any value matching none of the known shapes. Skipped by the parser.
    Unmatched(Value),
}

/// `{index, id, text}`
#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    pub index: Option<String>,
    pub id: Option<String>,
    pub text: String,
}

/// `{index, id, title, enonces[]}`
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub index: Option<String>,
    pub id: Option<String>,
    pub title: String,
    pub enonces: Vec<Arc<InputNode>>,
}

/// `{title, type}`
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub kind: Option<String>,
}

/// `{id, title, text, type?, childs[]}`
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub id: String,
    pub title: String,
    pub text: String,
    pub kind: Option<String>,
    pub childs: Vec<Arc<InputNode>>,
}

/// `{id, title?, type, text}`
#[derive(Debug, Clone, PartialEq)]
pub struct Subexpression {
    pub id: String,
    pub title: Option<String>,
    pub kind: String,
    pub text: String,
}

/// The shape an object was recognised as.
///
/// Checks run in declaration order and the first one that holds wins; the
/// order matters because the shapes overlap (a subexpression carrying a
/// `title` also satisfies the section check).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Title,
    Book,
    Section,
    Expression,
    Subexpression,
    Unmatched,
}

impl Shape {
    pub fn of(map: &Map<String, Value>) -> Shape {
        let absent = |key: &str| !map.contains_key(key);
        let is_string = |key: &str| map.get(key).is_some_and(Value::is_string);
        let is_array = |key: &str| map.get(key).is_some_and(Value::is_array);

        if absent("enonces") && is_string("text") && absent("childs") && absent("type") {
            Shape::Title
        } else if is_array("enonces") && absent("text") {
            Shape::Book
        } else if is_string("title") && absent("childs") {
            Shape::Section
        } else if is_string("title") && is_string("id") && is_array("childs") {
            Shape::Expression
        } else if is_string("type") && is_string("id") && is_string("text") {
            Shape::Subexpression
        } else {
            Shape::Unmatched
        }
    }
}

impl InputNode {
    /// Classifies a JSON value (and, recursively, its children).
    pub fn from_value(value: Value) -> InputNode {
        match value {
            Value::Array(items) => InputNode::Source(nodes_from(items)),
            Value::Object(map) => Self::from_object(map),
            other => InputNode::Unmatched(other),
        }
    }

    fn from_object(mut map: Map<String, Value>) -> InputNode {
        match Shape::of(&map) {
            Shape::Title => InputNode::Title(Title {
                index: string_field(&map, "index"),
                id: string_field(&map, "id"),
                text: string_field(&map, "text").unwrap_or_default(),
            }),
            Shape::Book => InputNode::Book(Book {
                enonces: take_children(&mut map, "enonces"),
                index: string_field(&map, "index"),
                id: string_field(&map, "id"),
                title: string_field(&map, "title").unwrap_or_default(),
            }),
            Shape::Section => InputNode::Section(Section {
                title: string_field(&map, "title").unwrap_or_default(),
                kind: string_field(&map, "type"),
            }),
            Shape::Expression => InputNode::Expression(Expression {
                childs: take_children(&mut map, "childs"),
                id: string_field(&map, "id").unwrap_or_default(),
                title: string_field(&map, "title").unwrap_or_default(),
                text: string_field(&map, "text").unwrap_or_default(),
                kind: string_field(&map, "type"),
            }),
            Shape::Subexpression => InputNode::Subexpression(Subexpression {
                id: string_field(&map, "id").unwrap_or_default(),
                title: string_field(&map, "title"),
                kind: string_field(&map, "type").unwrap_or_default(),
                text: string_field(&map, "text").unwrap_or_default(),
            }),
            Shape::Unmatched => InputNode::Unmatched(Value::Object(map)),
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            InputNode::Source(_) => "source",
            InputNode::Title(_) => "title",
            InputNode::Book(_) => "book",
            InputNode::Section(_) => "section",
            InputNode::Expression(_) => "expression",
            InputNode::Subexpression(_) => "subexpression",
            InputNode::Unmatched(_) => "unmatched",
        }
    }
}

impl From<Value> for InputNode {
    fn from(value: Value) -> Self {
        InputNode::from_value(value)
    }
}

impl<'de> Deserialize<'de> for InputNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(InputNode::from_value)
    }
}

fn nodes_from(items: Vec<Value>) -> Vec<Arc<InputNode>> {
    items
        .into_iter()
        .map(|item| Arc::new(InputNode::from_value(item)))
        .collect()
}

fn take_children(map: &mut Map<String, Value>, key: &str) -> Vec<Arc<InputNode>> {
    match map.remove(key) {
        Some(Value::Array(items)) => nodes_from(items),
        _ => Vec::new(),
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}
