use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::lexer::TokenKind;
use crate::span::Span;

/// 词法分析错误。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    /// 光标处没有任何规则能匹配。
    ///
    /// `context` 是出错的那一行源码，下一行用 `^` 指向出错列。
    #[error("unable to recognize token on line {} at column {}\n{context}", .span.line, .span.col)]
    UnrecognizedToken { span: Span, context: String },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnrecognizedToken { span, .. } => *span,
        }
    }
}

/// 语法分析错误。第一个错误即终止解析，不做错误恢复。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(
        "expected {}, found `{text}` on line {} at column {}",
        KindSet(.expected),
        .span.line,
        .span.col
    )]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        actual: TokenKind,
        text: String,
        span: Span,
    },

    #[error("undeclared identifier `{name}` on line {} at column {}", .span.line, .span.col)]
    UndeclaredIdentifier { name: String, span: Span },

    #[error("expected {}, but all tokens have already been processed", KindSet(.expected))]
    TokensExhausted { expected: Vec<TokenKind> },
}

/// 把一组候选 token 种类格式化成 `a, b or c`。
struct KindSet<'a>(&'a [TokenKind]);

impl fmt::Display for KindSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.len();
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(if i + 1 == n { " or " } else { ", " })?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// 编译后端（把生成的代码交给外部）失败。
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// 整条流水线的统一错误类型，`?` 会自动把各阶段错误转换过来。
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl Error {
    /// 出错的阶段名，CLI 用它拼出 `Lexer error!` 这类前缀。
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Lex(_) => "Lexer",
            Error::Parse(_) => "Parser",
            Error::Sink(_) => "Backend",
        }
    }
}
