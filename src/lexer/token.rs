use std::fmt;

use crate::span::Span;

/// 一个 Token = 词法分析后的最小“语法积木”。
///
/// 例子：`int32 a = 1;`
/// 会被切成：Int32, Identifier("a"), Assign, IntNumber("1"), Semicolon
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token 的类别
    pub kind: TokenKind,
    /// 源码中被匹配到的原文（例如 `1.5`、`"hi"`、`print`）
    pub text: String,
    /// Token 在源代码中的位置
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Token 的种类枚举。
///
/// 与 Token 的原文分开存放：Parser 需要按“种类集合”做匹配，
/// 所以这里只放无负载的变体，原文放在 `Token::text` 里。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ---------- 字面量 ----------
    IntNumber,
    FloatNumber,
    /// 字符字面量：`'a'`
    CharValue,
    /// 字符串字面量：`"hello"`
    StringValue,
    /// 标识符：例如 `abc`、`x1`、`_tmp`
    Identifier,

    // ---------- 关键字 ----------
    Int32,
    Float32,
    Char,
    Void,
    Print,

    // ---------- 运算符 ----------
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,

    // ---------- 分隔符 ----------
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,

    /// 空白（词法分析后丢弃）
    Space,
}

impl TokenKind {
    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::IntNumber | TokenKind::FloatNumber)
    }

    /// 该 token 是否可以作为一个操作数的结尾。
    ///
    /// Lexer 用它判断 `-1` 里的符号属于字面量还是二元减号：
    /// `a-1` 中 `a` 结束了一个操作数，所以 `-` 只能是运算符。
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::IntNumber
                | TokenKind::FloatNumber
                | TokenKind::CharValue
                | TokenKind::StringValue
                | TokenKind::Identifier
                | TokenKind::RParen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::IntNumber => "integer literal",
            TokenKind::FloatNumber => "float literal",
            TokenKind::CharValue => "char literal",
            TokenKind::StringValue => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Int32 => "`int32`",
            TokenKind::Float32 => "`float32`",
            TokenKind::Char => "`char`",
            TokenKind::Void => "`void`",
            TokenKind::Print => "`print`",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Multiply => "`*`",
            TokenKind::Divide => "`/`",
            TokenKind::Modulus => "`%`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Space => "whitespace",
        };
        f.write_str(s)
    }
}
