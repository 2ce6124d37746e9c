//! Parser for embed markup

pub mod ast;
pub mod command;
pub mod engine;
pub mod lexer;
pub mod line;

pub use ast::*;
pub use engine::{Mode, Parsed};
