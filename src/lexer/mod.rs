pub mod catalog;
pub mod lexer;
pub mod token;

pub use catalog::Catalog;
pub use lexer::{tokenize, Lexer, MatchPolicy};
pub use token::{Token, TokenKind};
