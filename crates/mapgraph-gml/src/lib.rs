mod ast;
mod graph;
mod lexer;
mod parser;
mod writer;

pub use ast::{Document, Entry, Value, first_of, values_of};
pub use graph::{GmlEdge, GmlGraph, GmlNode, parse_graph};
pub use parser::parse_document;
pub use writer::{format_real, write_document, write_graph};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at byte {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: String, offset: usize) -> Self {
        Self { message, offset }
    }
}
