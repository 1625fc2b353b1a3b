//! Index-string classification.
//!
//! The parser never sees an explicit "this is an axiom" marker. It decides
//! what a token is from the numbering code in its index (`1d3`, `1a2`,
//! `2p13l1`, `1p7sc`, ...). The patterns overlap, so each family is tested
//! in a fixed priority order and the first hit wins.

use std::sync::OnceLock;

use regex::Regex;

/// What an `EXPRESSION` token turns out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    Definition,
    Axiom,
    Postulate,
    Preface,
    Lemma,
    Proposition,
}

/// What a `SUBEXPRESSION` token turns out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubexpressionKind {
    Demonstration,
    Scholium,
    Corollary,
    Explanation,
}

struct IndexPatterns {
    definition: Regex,
    axiom: Regex,
    postulate: Regex,
    preface: Regex,
    lemma: Regex,
    demonstration: Regex,
    scholium: Regex,
    corollary: Regex,
    explanation: Regex,
    explanation_of_axiom: Regex,
    serial: Regex,
}

fn patterns() -> &'static IndexPatterns {
    static PATTERNS: OnceLock<IndexPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let rx = |pattern: &str| Regex::new(pattern).expect("Invalid index pattern");
        IndexPatterns {
            // Bk. III definitions of the affects end in "adNN"
            definition: rx(r"d[0-9]{0,2}$"),
            axiom: rx(r"a[1-9]?$"),
            // a postulate trails a numbered element ("2p13p1"); a bare
            // "1p7" is proposition 7
            postulate: rx(r"[a-z][0-9]*p[1-9]$"),
            preface: rx(r"pr$"),
            lemma: rx(r"l[1-9]$"),
            demonstration: rx(r"d[1-9]?$"),
            scholium: rx(r"sc[1-9]?$"),
            corollary: rx(r"c[0-9]{0,2}$"),
            explanation: rx(r"e$"),
            explanation_of_axiom: rx(r"a[0-9]?$"),
            serial: rx(r"[0-9]{0,2}$"),
        }
    })
}

/// Classifies an expression index. Anything unrecognised is a proposition.
pub fn classify_expression(index: &str) -> ExpressionKind {
    let p = patterns();
    if p.definition.is_match(index) {
        ExpressionKind::Definition
    } else if p.axiom.is_match(index) {
        ExpressionKind::Axiom
    } else if p.postulate.is_match(index) {
        ExpressionKind::Postulate
    } else if p.preface.is_match(index) {
        ExpressionKind::Preface
    } else if p.lemma.is_match(index) {
        ExpressionKind::Lemma
    } else {
        ExpressionKind::Proposition
    }
}

/// Classifies a subexpression index; `None` when no family matches.
///
/// Scholium is tested before corollary: `c[0-9]{0,2}$` also matches the
/// tail of `sc`, `sc1`, ...
pub fn classify_subexpression(index: &str) -> Option<SubexpressionKind> {
    let p = patterns();
    if p.demonstration.is_match(index) {
        Some(SubexpressionKind::Demonstration)
    } else if p.scholium.is_match(index) {
        Some(SubexpressionKind::Scholium)
    } else if p.corollary.is_match(index) {
        Some(SubexpressionKind::Corollary)
    } else if p.explanation.is_match(index) || p.explanation_of_axiom.is_match(index) {
        Some(SubexpressionKind::Explanation)
    } else {
        None
    }
}

/// Trailing ordinal of an index (last two digits at most).
///
/// Returns an empty string when there are no trailing digits or they
/// parse to zero.
pub fn serial_index(index: &str) -> String {
    patterns()
        .serial
        .find(index)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

impl ExpressionKind {
    /// Display label, e.g. `"Prop. 7: "`.
    pub fn label(self, serial: &str) -> String {
        match self {
            ExpressionKind::Definition => format!("D{serial}: "),
            ExpressionKind::Axiom => format!("A{serial}: "),
            ExpressionKind::Postulate => format!("Postulate {serial}: "),
            ExpressionKind::Preface => "Preface: ".to_string(),
            ExpressionKind::Lemma => format!("Lemma {serial}: "),
            ExpressionKind::Proposition => format!("Prop. {serial}: "),
        }
    }
}

impl SubexpressionKind {
    pub fn label(self, serial: &str) -> String {
        match self {
            SubexpressionKind::Demonstration => format!("Dem. {serial}: "),
            SubexpressionKind::Scholium => format!("Schol. {serial}: "),
            SubexpressionKind::Corollary => format!("Coroll. {serial}: "),
            SubexpressionKind::Explanation => format!("Expl. {serial}: "),
        }
    }
}
