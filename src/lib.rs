pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod sink;
pub mod span;

// 对外公开的核心类型/函数（给 CLI、测试、以及其它 Rust 项目使用）。
pub use ast::{Node, PrimitiveType, Program};
pub use codegen::generate;
pub use error::{Error, LexError, ParseError, SinkError};
pub use lexer::{tokenize, Lexer, MatchPolicy, Token, TokenKind};
pub use parser::parse;
pub use sink::{CompilationSink, JavaSourceSink, MemorySink};
pub use span::Span;

/// 词法 + 语法分析：源码 -> AST。
pub fn parse_program(src: &str) -> Result<Program, Error> {
    let tokens = tokenize(src)?;
    Ok(parse(&tokens)?)
}

/// 编译入口：源码 -> 目标语言的方法体文本。
///
/// lex -> parse -> generate 依次执行，任一阶段失败立即返回该阶段的错误。
pub fn compile(src: &str) -> Result<String, Error> {
    compile_with(src, &Lexer::default())
}

/// 与 `compile` 相同，但使用调用方给定的 Lexer（例如 first-match 策略）。
pub fn compile_with(src: &str, lexer: &Lexer) -> Result<String, Error> {
    let tokens = lexer.tokenize(src)?;
    let program = parse(&tokens)?;
    Ok(generate(&program))
}

/// 编译并把结果交给外部后端（只调用一次）。前面的阶段失败时后端不会被调用。
pub fn compile_into<S: CompilationSink + ?Sized>(
    src: &str,
    lexer: &Lexer,
    sink: &mut S,
) -> Result<(), Error> {
    let body = compile_with(src, lexer)?;
    sink.replace_entry_body(&body)?;
    Ok(())
}
