use std::sync::OnceLock;

use regex::Regex;

/// The four inline span kinds, in tie-break order.
///
/// When two spans start at the same byte the earlier kind in
/// [`SpanKind::ALL`] wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// `_text_`, not nesting: the first closing `_` ends it.
    Emphasis,
    /// `![caption](path)`
    Image,
    /// `[text](address)`
    Link,
    /// `^[aside]`, with balanced `[...]` allowed inside.
    Comment,
}

impl SpanKind {
    pub const ALL: [SpanKind; 4] = [
        SpanKind::Emphasis,
        SpanKind::Image,
        SpanKind::Link,
        SpanKind::Comment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpanKind::Emphasis => "emphasis",
            SpanKind::Image => "image",
            SpanKind::Link => "link",
            SpanKind::Comment => "comment",
        }
    }

    /// Pattern for the regex-matched kinds; comments are delimiter-scanned.
    pub fn pattern(self) -> Option<&'static Regex> {
        static EMPHASIS: OnceLock<Regex> = OnceLock::new();
        static IMAGE: OnceLock<Regex> = OnceLock::new();
        static LINK: OnceLock<Regex> = OnceLock::new();

        match self {
            SpanKind::Emphasis => Some(
                EMPHASIS.get_or_init(|| Regex::new(r"_([^_]*)_").expect("Invalid emphasis regex")),
            ),
            SpanKind::Image => Some(IMAGE.get_or_init(|| {
                Regex::new(r"!\[([^\[\]]+)\]\(([^\)]+)\)").expect("Invalid image regex")
            })),
            // ASCII word class: addresses are index strings such as `1p7d`
            SpanKind::Link => Some(LINK.get_or_init(|| {
                Regex::new(r"\[([^\]]+)\]\(([0-9A-Za-z_\s]+)\)").expect("Invalid link regex")
            })),
            SpanKind::Comment => None,
        }
    }
}

pub struct Comment;

impl Comment {
    pub const OPEN: &'static [u8; 2] = b"^[";
    pub const NEST: u8 = b'[';
    pub const CLOSE: u8 = b']';
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SpanKind::Emphasis, "a _b_ c", Some("_b_"))]
    #[case(SpanKind::Emphasis, "_outer_inner_outer_", Some("_outer_"))]
    #[case(SpanKind::Image, "x![Graph 1](/assets/img/graph-01.png)", Some("![Graph 1](/assets/img/graph-01.png)"))]
    #[case(SpanKind::Link, "see [Prop. 7](1p7)", Some("[Prop. 7](1p7)"))]
    #[case(SpanKind::Link, "[img](/assets/a.png)", None)]
    fn patterns_match(#[case] kind: SpanKind, #[case] text: &str, #[case] expected: Option<&str>) {
        let found = kind
            .pattern()
            .and_then(|rx| rx.find(text))
            .map(|m| m.as_str());
        assert_eq!(found, expected);
    }

    #[test]
    fn comments_have_no_pattern() {
        assert!(SpanKind::Comment.pattern().is_none());
    }
}
