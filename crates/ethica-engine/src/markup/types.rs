use serde::Serialize;

/// Presentation tree produced by the markup processor.
///
/// Owned data only; renderers walk it (see `render::html`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MarkupNode {
    Empty,
    Text(String),
    Fragment(Vec<MarkupNode>),
    Emphasis(Box<MarkupNode>),
    /// A cross reference. `target` is the address after the caller's
    /// transform, not the raw index.
    Link {
        target: String,
        content: Box<MarkupNode>,
    },
    /// Image placeholder: the caption only, no embedding.
    Caption(String),
    /// An aside, `^[...]` in the source.
    Citation(Box<MarkupNode>),
    /// The fixed fallback when processing fails.
    ParseError,
}

impl MarkupNode {
    pub fn text(s: impl Into<String>) -> Self {
        MarkupNode::Text(s.into())
    }

    /// Collapses a node list: none is `Empty`, one is itself.
    pub fn from_nodes(mut nodes: Vec<MarkupNode>) -> Self {
        match nodes.len() {
            0 => MarkupNode::Empty,
            1 => nodes.remove(0),
            _ => MarkupNode::Fragment(nodes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_nodes_collapses() {
        assert_eq!(MarkupNode::from_nodes(vec![]), MarkupNode::Empty);
        assert_eq!(
            MarkupNode::from_nodes(vec![MarkupNode::text("a")]),
            MarkupNode::text("a")
        );
        assert_eq!(
            MarkupNode::from_nodes(vec![MarkupNode::text("a"), MarkupNode::Empty]),
            MarkupNode::Fragment(vec![MarkupNode::text("a"), MarkupNode::Empty])
        );
    }

    #[test]
    fn serializes_with_type_tags() {
        let node = MarkupNode::Link {
            target: "#1d3".to_string(),
            content: Box::new(MarkupNode::text("D3")),
        };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            serde_json::json!({
                "type": "link",
                "value": {"target": "#1d3", "content": {"type": "text", "value": "D3"}}
            })
        );
    }
}
