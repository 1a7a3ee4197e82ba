use regex::Regex;

use crate::lexer::token::TokenKind;

/// 所有可识别 token 的固定表。
///
/// 顺序即优先级（越靠前越优先）：
/// - 关键字排在标识符之前，长度相同时 `print` 不会被识别成标识符；
/// - 浮点数排在整数之前，first-match 策略下 `1.5` 不会被切成 `1` 和 `.5`。
///
/// 关键字末尾带 `\b`，保证 `printer` 在任何策略下都只是一个标识符。
const RULES: &[(TokenKind, &str)] = &[
    (TokenKind::Space, r"[ \t\r\n]+"),
    (TokenKind::Int32, r"int32\b"),
    (TokenKind::Float32, r"float32\b"),
    (TokenKind::Char, r"char\b"),
    (TokenKind::Void, r"void\b"),
    (TokenKind::Print, r"print\b"),
    (TokenKind::FloatNumber, r"[-+]?((0\.[0-9]+)|([1-9][0-9]*\.[0-9]+))"),
    (TokenKind::IntNumber, r"[-+]?(0|[1-9][0-9]*)"),
    (TokenKind::CharValue, r"'.'"),
    (TokenKind::StringValue, r#""[^"\n]*""#),
    (TokenKind::Identifier, r"[_a-zA-Z][_a-zA-Z0-9]*"),
    (TokenKind::Assign, r"="),
    (TokenKind::Plus, r"\+"),
    (TokenKind::Minus, r"-"),
    (TokenKind::Multiply, r"\*"),
    (TokenKind::Divide, r"/"),
    (TokenKind::Modulus, r"%"),
    (TokenKind::LParen, r"\("),
    (TokenKind::RParen, r"\)"),
    (TokenKind::LBrace, r"\{"),
    (TokenKind::RBrace, r"\}"),
    (TokenKind::Semicolon, r";"),
];

/// 一条匹配规则：种类 + 锚定在光标处的正则 + 优先级。
#[derive(Clone, Debug)]
pub struct Rule {
    pub kind: TokenKind,
    /// 数值越小越优先（即在表中的下标）
    pub priority: usize,
    regex: Regex,
}

impl Rule {
    /// 只在 `rest` 的开头尝试匹配（不会向后搜索），返回匹配长度（字节）。
    pub fn match_len(&self, rest: &str) -> Option<usize> {
        self.regex.find(rest).map(|m| m.end())
    }
}

/// Token 目录：按优先级排好序的规则列表。
///
/// 每次编译单独构造一份，不存在进程级的可变注册表。
#[derive(Clone, Debug)]
pub struct Catalog {
    rules: Vec<Rule>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::with_rules(RULES)
    }

    /// 用给定的表构造目录，表的顺序即优先级。
    pub(crate) fn with_rules(table: &[(TokenKind, &str)]) -> Self {
        let rules = table
            .iter()
            .enumerate()
            .map(|(priority, &(kind, pattern))| Rule {
                kind,
                priority,
                // 模式都是编译期常量，测试覆盖了每一条，不会失败
                regex: Regex::new(&format!("^(?:{pattern})")).expect("invalid token pattern"),
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 查询某个种类对应的原始模式（不含锚点）。
    pub fn pattern(kind: TokenKind) -> Option<&'static str> {
        RULES.iter().find(|(k, _)| *k == kind).map(|(_, p)| *p)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
