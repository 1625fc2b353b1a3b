pub mod ast;
pub mod edition;
pub mod markup;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use ast::{Book, Expr, Part, Source, Stmt, Visitor};
pub use edition::{Edition, EditionError};
pub use markup::{MarkupError, MarkupNode, MarkupProcessor};
pub use parsing::{
    IndexCollection, IndexEntry, InputNode, ParseError, ParseResult, Parser, Scanner, Token,
    TokenType, parse_input, scan,
};
pub use render::{HtmlInterpreter, InterpreterStyles, OutlinePrinter, outline};
