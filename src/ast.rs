use std::fmt;

/// 整个程序（Program）的 AST 根节点：一个隐式顶层块中的语句序列。
///
/// 语句顺序 = 执行顺序。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub stmts: Vec<Node>,
}

/// AST 节点。
///
/// 每个子节点都由父节点独占（`Box`），没有共享和回指，树天然无环。
/// 对变量的引用也是声明节点的一份拷贝，而不是指向声明的指针。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// 变量声明 / 变量引用：`int32 a`、赋值号左侧或表达式中的 `a`
    VariableDeclaration(VariableDeclaration),
    /// 数字字面量：`1`、`-2`、`2.5`
    NumberLiteral(NumberLiteral),
    /// 字符串或字符字面量：`"hi"`、`'c'`
    StringLiteral(StringLiteral),
    /// 二元运算（包括赋值 `=`）
    BinaryOperation(BinaryOperation),
    /// 一元运算：`print(...)`、前缀 `+` / `-`
    UnaryOperation(UnaryOperation),
}

/// 把一个标识符绑定到一个基础类型。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub ty: PrimitiveType,
    pub name: String,
}

/// 变量可以使用的基础类型。
///
/// `void` 只是关键字，不能用来声明变量，所以不在这里。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int32,
    Float32,
    Char,
}

impl PrimitiveType {
    /// 源语言里的关键字写法。
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Char => "char",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 数字字面量保存原文，代码生成时原样输出。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberLiteral {
    pub is_float: bool,
    pub text: String,
}

/// 字符串 / 字符字面量，`text` 含两侧引号。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringLiteral {
    pub is_char: bool,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryOperation {
    pub op: BinaryOp,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Assign => "=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryOperation {
    pub op: UnaryOp,
    pub operand: Box<Node>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Print,
    Plus,
    Minus,
}
