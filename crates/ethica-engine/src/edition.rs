use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::ast::{Book, Source};
use crate::parsing::{IndexCollection, InputNode, ParseError, Parser, scan};

/// Books an edition route can address; anything else falls back to the first.
pub const BOOK_COUNT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum EditionError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid edition JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Edition `{name}` could not be parsed: {source}")]
    ParseFailed {
        name: String,
        #[source]
        source: ParseError,
    },
}

/// A parsed edition of the text: its tree and index map, built once.
///
/// Immutable after construction and `Send + Sync`, so editions can be
/// loaded on separate threads and shared freely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edition {
    name: String,
    source: Source,
    index: IndexCollection,
}

impl Edition {
    pub fn from_value(name: impl Into<String>, value: Value) -> Result<Self, EditionError> {
        let name = name.into();
        let tokens = scan(InputNode::from_value(value));
        let result = Parser::new(&tokens)
            .try_parse()
            .map_err(|source| EditionError::ParseFailed {
                name: name.clone(),
                source,
            })?;
        log::info!(
            "loaded edition `{name}`: {} books, {} labels",
            result.source.books().count(),
            result.index.len()
        );
        Ok(Self {
            name,
            source: result.source,
            index: result.index,
        })
    }

    pub fn from_json_str(name: impl Into<String>, json: &str) -> Result<Self, EditionError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(name, value)
    }

    /// Loads an edition file, named after its file stem.
    pub fn load(path: &Path) -> Result<Self, EditionError> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::load_named(name, path)
    }

    pub fn load_named(name: impl Into<String>, path: &Path) -> Result<Self, EditionError> {
        if !path.exists() {
            return Err(EditionError::NotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path).map_err(|source| EditionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(name, &json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn index(&self) -> &IndexCollection {
        &self.index
    }

    /// Book `number` (1-based). Numbers outside `1..=5` select book 1.
    pub fn book(&self, number: usize) -> Option<&Book> {
        let number = if (1..=BOOK_COUNT).contains(&number) {
            number
        } else {
            1
        };
        self.source.books().nth(number - 1)
    }
}
