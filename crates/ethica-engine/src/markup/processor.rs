use super::cursor::Cursor;
use super::error::MarkupError;
use super::kinds::{Comment, SpanKind};
use super::types::MarkupNode;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// One matched span inside a segment. Offsets are byte offsets into the
/// segment the span was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'s> {
    pub kind: SpanKind,
    pub start: usize,
    pub end: usize,
    /// Text between the delimiters.
    pub content: &'s str,
    /// Link or image address, when the kind has one.
    pub address: Option<&'s str>,
}

/// Turns inline markup into a [`MarkupNode`] tree.
///
/// Holds no per-call state, so one processor can serve any number of
/// strings. `link_builder` maps a raw link address (an index string) to the
/// navigable target stored on [`MarkupNode::Link`].
pub struct MarkupProcessor<'a> {
    link_builder: &'a dyn Fn(&str) -> String,
    max_depth: usize,
}

impl<'a> MarkupProcessor<'a> {
    pub fn new(link_builder: &'a dyn Fn(&str) -> String) -> Self {
        Self {
            link_builder,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Caps how deeply span contents may nest. Unbounded nesting is not
    /// supported: text nested past the limit (64 levels by default) fails
    /// with [`MarkupError::TooDeep`] even when it is well formed, and [`run`]
    /// then yields [`MarkupNode::ParseError`].
    ///
    /// [`run`]: MarkupProcessor::run
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Processes `text`, falling back to [`MarkupNode::ParseError`] on any
    /// failure.
    pub fn run(&self, text: &str) -> MarkupNode {
        match self.process(text) {
            Ok(node) => node,
            Err(e) => {
                log::warn!("markup processing failed: {e}");
                MarkupNode::ParseError
            }
        }
    }

    pub fn process(&self, text: &str) -> Result<MarkupNode, MarkupError> {
        self.segment(text, 0)
    }

    /// Emits text up to the leftmost span, the span itself, and repeats on
    /// the tail. Span contents recurse one level deeper.
    fn segment(&self, text: &str, depth: usize) -> Result<MarkupNode, MarkupError> {
        if depth > self.max_depth {
            return Err(MarkupError::TooDeep {
                limit: self.max_depth,
            });
        }

        let mut nodes = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            let Some(span) = next_span(rest)? else {
                nodes.push(MarkupNode::text(rest));
                break;
            };
            if span.start > 0 {
                nodes.push(MarkupNode::text(&rest[..span.start]));
            }
            nodes.push(self.visit(&span, depth + 1)?);
            rest = &rest[span.end..];
        }
        Ok(MarkupNode::from_nodes(nodes))
    }

    fn visit(&self, span: &Span<'_>, depth: usize) -> Result<MarkupNode, MarkupError> {
        Ok(match span.kind {
            SpanKind::Emphasis => MarkupNode::Emphasis(Box::new(self.segment(span.content, depth)?)),
            SpanKind::Link => {
                let address = span.address.ok_or(MarkupError::MissingCapture {
                    kind: span.kind.name(),
                    group: 2,
                })?;
                MarkupNode::Link {
                    target: (self.link_builder)(address),
                    content: Box::new(self.segment(span.content, depth)?),
                }
            }
            SpanKind::Image => MarkupNode::Caption(span.content.to_string()),
            SpanKind::Comment => MarkupNode::Citation(Box::new(self.segment(span.content, depth)?)),
        })
    }
}

/// Finds the leftmost span in `text`. On equal starts the kind listed first
/// in [`SpanKind::ALL`] wins.
pub fn next_span(text: &str) -> Result<Option<Span<'_>>, MarkupError> {
    let mut best: Option<Span<'_>> = None;
    for kind in SpanKind::ALL {
        let found = match kind.pattern() {
            Some(_) => pattern_span(kind, text)?,
            None => comment_span(text),
        };
        let Some(span) = found else { continue };
        if best.as_ref().is_none_or(|b| span.start < b.start) {
            best = Some(span);
        }
    }
    Ok(best)
}

fn pattern_span(kind: SpanKind, text: &str) -> Result<Option<Span<'_>>, MarkupError> {
    let Some(caps) = kind.pattern().and_then(|rx| rx.captures(text)) else {
        return Ok(None);
    };
    let group = |n: usize| {
        caps.get(n)
            .map(|m| m.as_str())
            .ok_or(MarkupError::MissingCapture {
                kind: kind.name(),
                group: n,
            })
    };
    let whole = caps.get(0).ok_or(MarkupError::MissingCapture {
        kind: kind.name(),
        group: 0,
    })?;
    let content = group(1)?;
    let address = match kind {
        SpanKind::Link | SpanKind::Image => Some(group(2)?),
        SpanKind::Emphasis | SpanKind::Comment => None,
    };
    Ok(Some(Span {
        kind,
        start: whole.start(),
        end: whole.end(),
        content,
        address,
    }))
}

/// Finds the first `^[` and its balancing `]`. Without one the comment
/// runs to the end of `text`.
fn comment_span(text: &str) -> Option<Span<'_>> {
    let mut cur = Cursor::new(text);
    while !cur.starts_with(Comment::OPEN) {
        cur.bump()?;
    }
    let start = cur.pos();
    cur.bump_n(Comment::OPEN.len());
    let body = cur.pos();

    let mut depth = 0usize;
    while let Some(byte) = cur.peek() {
        match byte {
            Comment::NEST => depth += 1,
            Comment::CLOSE if depth == 0 => {
                return Some(Span {
                    kind: SpanKind::Comment,
                    start,
                    end: cur.pos() + 1,
                    content: &text[body..cur.pos()],
                    address: None,
                });
            }
            Comment::CLOSE => depth -= 1,
            _ => {}
        }
        cur.bump();
    }

    Some(Span {
        kind: SpanKind::Comment,
        start,
        end: text.len(),
        content: &text[body..],
        address: None,
    })
}
