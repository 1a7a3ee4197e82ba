use log::debug;

use crate::ast::{
    BinaryOp, BinaryOperation, Node, NumberLiteral, PrimitiveType, Program, StringLiteral,
    UnaryOp, UnaryOperation, VariableDeclaration,
};
use crate::error::ParseError;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::symbols::SymbolTable;

/// 语句可以用哪些 token 开头。`void` 不能声明变量，所以不在其中。
const STATEMENT_START: &[TokenKind] = &[
    TokenKind::Int32,
    TokenKind::Float32,
    TokenKind::Char,
    TokenKind::Identifier,
    TokenKind::Print,
];

const PRIMARY_START: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::IntNumber,
    TokenKind::FloatNumber,
    TokenKind::CharValue,
    TokenKind::LParen,
];

const UNARY_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

const ARITH_OPS: &[TokenKind] = &[
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Multiply,
    TokenKind::Divide,
    TokenKind::Modulus,
];

/// 解析器入口：将 Token 列表解析为 Program AST。
///
/// 遇到第一个语法错误就停止，只报告这一个错误。
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// 递归下降解析器。
///
/// - `i` 是 token 列表上的光标；
/// - `probe` 只偷看、不移动光标；`require` 吃掉一个 token，不符合就报错；
/// - `symbols` 是边解析边建立的符号表，每个标识符在使用处立即查表。
struct Parser<'a> {
    tokens: &'a [Token],
    i: usize,
    symbols: SymbolTable,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            i: 0,
            symbols: SymbolTable::new(),
        }
    }

    /// Program = { Stmt ";" }，一直解析到 token 用完。
    fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.is_eof() {
            stmts.push(self.parse_stmt()?);
            self.require(&[TokenKind::Semicolon])?;
        }
        debug!(
            "parsed {} statements, {} variables declared",
            stmts.len(),
            self.symbols.len()
        );
        Ok(Program { stmts })
    }

    /// 解析单条语句（不含结尾的分号）：
    /// - `TYPE Ident ( "=" Formula )?` -> 声明
    /// - `Ident "=" Formula` -> 赋值
    /// - `"print" "(" ( Formula | String ) ")"` -> 输出
    fn parse_stmt(&mut self) -> Result<Node, ParseError> {
        let first = self.require(STATEMENT_START)?;
        match first.kind {
            TokenKind::Identifier => self.parse_assignment(first),
            TokenKind::Print => self.parse_print(),
            TokenKind::Int32 => self.parse_declaration(PrimitiveType::Int32),
            TokenKind::Float32 => self.parse_declaration(PrimitiveType::Float32),
            TokenKind::Char => self.parse_declaration(PrimitiveType::Char),
            _ => unreachable!("require() only returns statement-start tokens"),
        }
    }

    /// 声明：类型关键字已经被吃掉。
    ///
    /// 初始化表达式先解析、后登记名字，所以 `int32 a = a;` 会报未声明。
    fn parse_declaration(&mut self, ty: PrimitiveType) -> Result<Node, ParseError> {
        let name = self.require(&[TokenKind::Identifier])?.text.clone();
        let decl = VariableDeclaration { ty, name };

        let init = match self.probe(&[TokenKind::Assign]) {
            Some(_) => {
                self.i += 1;
                Some(self.parse_formula()?)
            }
            None => None,
        };
        self.symbols.declare(&decl);

        let target = Node::VariableDeclaration(decl);
        Ok(match init {
            Some(value) => assign(target, value),
            None => target,
        })
    }

    /// 赋值：标识符已经被吃掉。
    fn parse_assignment(&mut self, ident: &Token) -> Result<Node, ParseError> {
        let target = self.resolve(ident)?;
        self.require(&[TokenKind::Assign])?;
        let value = self.parse_formula()?;
        Ok(assign(target, value))
    }

    /// 输出：`print` 已经被吃掉。字符串只能出现在这里。
    fn parse_print(&mut self) -> Result<Node, ParseError> {
        self.require(&[TokenKind::LParen])?;
        let operand = match self.probe(&[TokenKind::StringValue]) {
            Some(tok) => {
                self.i += 1;
                Node::StringLiteral(StringLiteral {
                    is_char: false,
                    text: tok.text.clone(),
                })
            }
            None => self.parse_formula()?,
        };
        self.require(&[TokenKind::RParen])?;
        Ok(Node::UnaryOperation(UnaryOperation {
            op: UnaryOp::Print,
            operand: Box::new(operand),
        }))
    }

    /// Formula = [ "+" | "-" ] Primary { ArithOp Primary }
    ///
    /// 只有一个优先级：所有运算符都是左结合，`a + b * c` 解析为 `(a + b) * c`。
    /// 需要别的结合方式只能显式加括号。
    fn parse_formula(&mut self) -> Result<Node, ParseError> {
        let mut lhs = match self.probe(UNARY_OPS) {
            Some(tok) => {
                self.i += 1;
                let op = if tok.kind == TokenKind::Minus {
                    UnaryOp::Minus
                } else {
                    UnaryOp::Plus
                };
                let operand = self.parse_primary()?;
                Node::UnaryOperation(UnaryOperation {
                    op,
                    operand: Box::new(operand),
                })
            }
            None => self.parse_primary()?,
        };

        while let Some(tok) = self.probe(ARITH_OPS) {
            self.i += 1;
            let op = arith_op(tok.kind);
            let rhs = self.parse_primary()?;
            lhs = Node::BinaryOperation(BinaryOperation {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            });
        }

        Ok(lhs)
    }

    /// Primary = Ident | Number | Char | "(" Formula ")"
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let tok = self.require(PRIMARY_START)?;
        match tok.kind {
            TokenKind::Identifier => self.resolve(tok),
            TokenKind::IntNumber | TokenKind::FloatNumber => {
                Ok(Node::NumberLiteral(NumberLiteral {
                    is_float: tok.kind == TokenKind::FloatNumber,
                    text: tok.text.clone(),
                }))
            }
            TokenKind::CharValue => Ok(Node::StringLiteral(StringLiteral {
                is_char: true,
                text: tok.text.clone(),
            })),
            TokenKind::LParen => {
                let inner = self.parse_formula()?;
                self.require(&[TokenKind::RParen])?;
                Ok(inner)
            }
            _ => unreachable!("require() only returns primary-start tokens"),
        }
    }

    /// 查符号表，把标识符换成其声明节点的拷贝；不支持先用后声明。
    fn resolve(&self, ident: &Token) -> Result<Node, ParseError> {
        self.symbols
            .lookup(&ident.text)
            .map(|decl| Node::VariableDeclaration(decl.clone()))
            .ok_or_else(|| ParseError::UndeclaredIdentifier {
                name: ident.text.clone(),
                span: ident.span,
            })
    }

    /// 当前 token 属于 `kinds` 时返回它，否则返回 None。不移动光标，EOF 时也返回 None。
    fn probe(&self, kinds: &[TokenKind]) -> Option<&'a Token> {
        self.tokens.get(self.i).filter(|t| kinds.contains(&t.kind))
    }

    /// 期望当前 token 属于 `kinds`：是就吃掉并返回，否则报错。
    fn require(&mut self, kinds: &[TokenKind]) -> Result<&'a Token, ParseError> {
        let tok = self
            .tokens
            .get(self.i)
            .ok_or_else(|| ParseError::TokensExhausted {
                expected: kinds.to_vec(),
            })?;
        if !kinds.contains(&tok.kind) {
            return Err(ParseError::UnexpectedToken {
                expected: kinds.to_vec(),
                actual: tok.kind,
                text: tok.text.clone(),
                span: tok.span,
            });
        }
        self.i += 1;
        Ok(tok)
    }

    fn is_eof(&self) -> bool {
        self.i >= self.tokens.len()
    }
}

fn assign(target: Node, value: Node) -> Node {
    Node::BinaryOperation(BinaryOperation {
        op: BinaryOp::Assign,
        left: Box::new(target),
        right: Box::new(value),
    })
}

fn arith_op(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Multiply => BinaryOp::Mul,
        TokenKind::Divide => BinaryOp::Div,
        _ => BinaryOp::Mod,
    }
}
