pub mod token;
pub mod lexer;
pub mod stream;
pub mod parser;
pub mod ast;
pub mod diagnostics;
pub mod visitor;

use crate::ast::Program;
use crate::diagnostics::Diagnostic;
use crate::lexer::tokenize;
use crate::parser::parse;

/// Tokenizes and parses a single rule.
pub fn lex_and_parse(src: &str) -> Result<Program, Diagnostic> {
    let tokens = tokenize(src)?;
    parse(tokens)
}
