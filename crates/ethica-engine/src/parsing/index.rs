use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use linked_hash_map::LinkedHashMap;
use regex::Regex;
use serde::Serialize;

/// What the index map knows about one labelled element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Synthesized display label, e.g. `"Prop. 7: "`.
    pub label: String,
    /// Link addresses cited in the element's own text, in order.
    pub refs: Vec<String>,
}

/// Link-target lookup built while parsing.
///
/// Keys are index strings. Iteration order is document order, which is
/// what gives every label a position (`key_at` / `position_of`). Both
/// directions of that mapping are kept alongside the entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndexCollection {
    entries: LinkedHashMap<String, IndexEntry>,
    #[serde(skip)]
    order: Vec<String>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl IndexCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry. A replaced key keeps its position.
    pub fn record(&mut self, key: impl Into<String>, entry: IndexEntry) {
        let key = key.into();
        if let Some(existing) = self.entries.get_mut(&key) {
            log::warn!("duplicate index key `{key}`; keeping its first position");
            *existing = entry;
        } else {
            self.positions.insert(key.clone(), self.order.len());
            self.order.push(key.clone());
            self.entries.insert(key, entry);
        }
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Key of the label at `position` in document order.
    pub fn key_at(&self, position: usize) -> Option<&str> {
        self.order.get(position).map(String::as_str)
    }

    /// Document position of `key`.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }
}

/// One `position key label` line per entry, in document order.
impl fmt::Display for IndexCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, (key, entry)) in self.iter().enumerate() {
            writeln!(f, "{position} {key} {:?}", entry.label)?;
        }
        Ok(())
    }
}

/// Collects the addresses of `[text](address)` links in `text`.
pub fn extract_refs(text: &str) -> Vec<String> {
    static REF_RX: OnceLock<Regex> = OnceLock::new();
    let rx = REF_RX.get_or_init(|| {
        Regex::new(r"\[[^\]]+\]\(([0-9A-Za-z_\s]+)\)").expect("Invalid reference regex")
    });

    rx.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
