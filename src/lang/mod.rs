/*!
# Language Module

Lexical analysis and parsing of VB6 conditional-compilation directives
and their constant expressions.

*/

#[macro_use]
mod error;
mod lex;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use parse::directive;
pub use parse::expression;
pub use token::{Literal, Operator, Token, Word};

pub mod ast;

pub type LineNumber = Option<usize>;
pub type Column = std::ops::Range<usize>;
