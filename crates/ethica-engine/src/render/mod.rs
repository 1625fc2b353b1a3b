//! Visitors that turn a parsed document into output.
//!
//! - **`html`**: `HtmlInterpreter`, semantic HTML with inline markup
//! - **`outline`**: `OutlinePrinter`, an indented text outline

pub mod html;
pub mod outline;

pub use html::{HtmlInterpreter, InterpreterStyles, markup_to_html, trim_before_punctuation};
pub use outline::{OutlinePrinter, outline};
