use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("markup nested deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("{kind} span matched without capture group {group}")]
    MissingCapture { kind: &'static str, group: usize },
}
