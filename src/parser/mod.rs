pub mod parser;
mod symbols;

pub use parser::parse;
