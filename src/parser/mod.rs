//! Parser for wiki template directives

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse;
pub use lexer::nesting_depth;
