use log::{debug, trace};

use crate::error::LexError;
use crate::lexer::catalog::{Catalog, Rule};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// 词法分析入口：用默认目录和 longest-match 策略把源代码切成一串 Token。
///
/// 空白在这里就被过滤掉，返回值里不会出现 `TokenKind::Space`。
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(MatchPolicy::LongestMatch).tokenize(src)
}

/// 光标处有多条规则都能匹配时，选哪一条。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// 取匹配最长的规则；长度相同取目录中靠前的。
    #[default]
    LongestMatch,
    /// 取目录中第一条能匹配的规则（旧行为，完全依赖目录顺序）。
    FirstMatch,
}

/// 词法分析器：目录 + 匹配策略，本身不保存扫描状态，可重复使用。
pub struct Lexer {
    catalog: Catalog,
    policy: MatchPolicy,
}

impl Lexer {
    pub fn new(policy: MatchPolicy) -> Self {
        Self::with_catalog(Catalog::new(), policy)
    }

    fn with_catalog(catalog: Catalog, policy: MatchPolicy) -> Self {
        Self { catalog, policy }
    }

    /// 扫描整个输入，直到 EOF；遇到无法识别的字符立即失败（全有或全无）。
    pub fn tokenize(&self, src: &str) -> Result<Vec<Token>, LexError> {
        let mut cursor = Cursor::new(src);
        let mut tokens: Vec<Token> = Vec::new();

        while !cursor.is_eof() {
            let prev = tokens.last().map(|t| t.kind);
            let (kind, len) = self
                .select(cursor.rest(), prev)
                .ok_or_else(|| cursor.unrecognized())?;

            let start = cursor.mark();
            let text = cursor.bump(len);
            let span = Span::new(start.offset, start.offset + len, start.line, start.col);

            if kind == TokenKind::Space {
                continue;
            }
            trace!("token {:?} {:?} at {}:{}", kind, text, span.line, span.col);
            tokens.push(Token::new(kind, text, span));
        }

        debug!("lexed {} tokens ({:?})", tokens.len(), self.policy);
        Ok(tokens)
    }

    /// 在光标处挑出一条规则，返回 (种类, 匹配长度)。
    fn select(&self, rest: &str, prev: Option<TokenKind>) -> Option<(TokenKind, usize)> {
        let mut candidates = self
            .catalog
            .rules()
            .iter()
            .filter_map(|rule| {
                let len = rule.match_len(rest)?;
                (len > 0 && sign_allowed(rule, &rest[..len], prev)).then_some((rule, len))
            });

        let chosen = match self.policy {
            MatchPolicy::FirstMatch => candidates.next(),
            // max_by 在相等时取最后一个，所以优先级要反过来比
            MatchPolicy::LongestMatch => candidates.max_by(|(ra, la), (rb, lb)| {
                la.cmp(lb).then(rb.priority.cmp(&ra.priority))
            }),
        };
        chosen.map(|(rule, len)| (rule.kind, len))
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}

/// 带符号的数字字面量只能出现在“操作数开头”的位置。
///
/// `a-1` 里前一个 token 已经结束了一个操作数，此时 `-1` 不能整体作为字面量，
/// 否则 Parser 会看到两个相邻的操作数。
fn sign_allowed(rule: &Rule, text: &str, prev: Option<TokenKind>) -> bool {
    if !rule.kind.is_number() || !text.starts_with(['+', '-']) {
        return true;
    }
    !prev.is_some_and(TokenKind::ends_operand)
}

/// 扫描指针：byte offset + 行列号。
struct Cursor<'a> {
    src: &'a str,
    byte_pos: usize,
    line: usize,
    col: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            byte_pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn is_eof(&self) -> bool {
        self.byte_pos >= self.src.len()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.byte_pos..]
    }

    /// 消费 `len` 个字节，并同步更新 line/col。返回被消费的原文。
    fn bump(&mut self, len: usize) -> &'a str {
        let text = &self.src[self.byte_pos..self.byte_pos + len];
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.byte_pos += len;
        text
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.byte_pos,
            line: self.line,
            col: self.col,
        }
    }

    /// 构造“无法识别”的错误：带上出错行的原文，并在下一行用 `^` 指出列。
    fn unrecognized(&self) -> LexError {
        let line_start = self.src[..self.byte_pos].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.src[self.byte_pos..]
            .find('\n')
            .map_or(self.src.len(), |i| self.byte_pos + i);
        let line_text = self.src[line_start..line_end].trim_end_matches('\r');

        LexError::UnrecognizedToken {
            span: Span::point(self.byte_pos, self.line, self.col),
            context: format!("{line_text}\n{}^", " ".repeat(self.col - 1)),
        }
    }
}

/// 记录扫描指针的位置（内部使用）。
#[derive(Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    col: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexer(rules: &[(TokenKind, &str)], policy: MatchPolicy) -> Lexer {
        Lexer::with_catalog(Catalog::with_rules(rules), policy)
    }

    #[test]
    fn longest_match_beats_earlier_shorter_rule() {
        let rules = [(TokenKind::Identifier, "[a-z]"), (TokenKind::Print, "[a-z]+")];

        let longest = lexer(&rules, MatchPolicy::LongestMatch);
        assert_eq!(longest.select("print(", None), Some((TokenKind::Print, 5)));

        let first = lexer(&rules, MatchPolicy::FirstMatch);
        assert_eq!(first.select("print(", None), Some((TokenKind::Identifier, 1)));
    }

    #[test]
    fn equal_length_falls_back_to_catalog_order() {
        let keyword_first = lexer(
            &[(TokenKind::Print, "print"), (TokenKind::Identifier, "[a-z]+")],
            MatchPolicy::LongestMatch,
        );
        assert_eq!(keyword_first.select("print(", None), Some((TokenKind::Print, 5)));

        let ident_first = lexer(
            &[(TokenKind::Identifier, "[a-z]+"), (TokenKind::Print, "print")],
            MatchPolicy::LongestMatch,
        );
        assert_eq!(
            ident_first.select("print(", None),
            Some((TokenKind::Identifier, 5))
        );
    }

    #[test]
    fn signed_literal_only_at_operand_start() {
        let lx = Lexer::default();
        assert_eq!(
            lx.select("-1", Some(TokenKind::Identifier)),
            Some((TokenKind::Minus, 1))
        );
        assert_eq!(
            lx.select("-1", Some(TokenKind::Assign)),
            Some((TokenKind::IntNumber, 2))
        );
        assert_eq!(lx.select("-1", None), Some((TokenKind::IntNumber, 2)));
    }

    #[test]
    fn no_rule_matches() {
        assert_eq!(Lexer::default().select("@", None), None);
    }
}
