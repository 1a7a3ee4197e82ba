use std::collections::HashSet;

use log::debug;

use crate::ast::{
    BinaryOp, BinaryOperation, Node, PrimitiveType, Program, UnaryOp, UnaryOperation,
    VariableDeclaration,
};

/// CodeGen 的对外入口：把 AST 生成目标语言（Java）的方法体文本。
///
/// 输出是一个 `{ ... }` 块，用来替换入口方法 `main` 的方法体；
/// 之后交给谁编译是 `sink` 模块的事，这里只产出字符串。
///
/// 输出格式（固定）：
/// ```text
/// {
/// <stmt1>;
/// <stmt2>;
/// <每个变量两行的收尾输出>
/// }
/// ```
pub fn generate(program: &Program) -> String {
    let mut gen = Generator::default();
    gen.gen_program(program);
    debug!(
        "generated {} bytes for {} variables",
        gen.out.len(),
        gen.declared.len()
    );
    gen.out
}

/// 一次代码生成的全部状态，只属于这一次调用。
///
/// `seen` 和 Parser 的符号表无关：它记录“哪些变量已经输出过”，
/// 第一次输出变量时要在前面补上类型关键字。
#[derive(Default)]
struct Generator {
    out: String,
    seen: HashSet<String>,
    /// 首次输出顺序（= 声明顺序），用于收尾输出
    declared: Vec<VariableDeclaration>,
}

impl Generator {
    fn gen_program(&mut self, program: &Program) {
        self.out.push_str("{\n");
        for stmt in &program.stmts {
            self.gen_node(stmt);
            self.out.push_str(";\n");
        }
        self.gen_epilogue();
        self.out.push('}');
    }

    fn gen_node(&mut self, node: &Node) {
        match node {
            Node::NumberLiteral(n) => self.out.push_str(&n.text),
            Node::StringLiteral(s) => self.out.push_str(&s.text),
            Node::VariableDeclaration(v) => self.gen_variable(v),
            Node::BinaryOperation(b) => self.gen_binary(b),
            Node::UnaryOperation(u) => self.gen_unary(u),
        }
    }

    /// 变量第一次出现时输出 `int a`，之后只输出 `a`。
    fn gen_variable(&mut self, v: &VariableDeclaration) {
        if self.seen.insert(v.name.clone()) {
            self.out.push_str(java_type(v.ty));
            self.out.push(' ');
            self.declared.push(v.clone());
        }
        self.out.push_str(&v.name);
    }

    /// 中缀输出：`left op right`。
    ///
    /// AST 的形状已经决定了结合方式；只有当 Java 的优先级会把它读成另一棵树时才加括号，
    /// 例如 `(a + b) * c`、`a - (b - c)`。
    fn gen_binary(&mut self, b: &BinaryOperation) {
        let wrap_left = needs_parens(&b.left, b.op, false);
        self.gen_wrapped(&b.left, wrap_left);
        self.out.push(' ');
        self.out.push_str(b.op.as_str());
        self.out.push(' ');
        let wrap_right = needs_parens(&b.right, b.op, true);
        self.gen_wrapped(&b.right, wrap_right);
    }

    fn gen_unary(&mut self, u: &UnaryOperation) {
        match u.op {
            UnaryOp::Print => {
                self.out.push_str("System.out.print(");
                self.gen_node(&u.operand);
                self.out.push_str(");");
            }
            UnaryOp::Plus | UnaryOp::Minus => {
                self.out.push(if u.op == UnaryOp::Minus { '-' } else { '+' });
                let wrap = !is_unsigned_atom(&u.operand);
                self.gen_wrapped(&u.operand, wrap);
            }
        }
    }

    fn gen_wrapped(&mut self, node: &Node, wrap: bool) {
        if wrap {
            self.out.push('(');
            self.gen_node(node);
            self.out.push(')');
        } else {
            self.gen_node(node);
        }
    }

    /// 程序末尾：按声明顺序把每个变量的名字、类型和当前值打印出来。
    fn gen_epilogue(&mut self) {
        for v in &self.declared {
            self.out.push_str(&format!(
                "System.out.print(\"The variable {} has type {} and value \");\nSystem.out.println({});\n",
                v.name, v.ty, v.name
            ));
        }
    }
}

/// 源语言类型 -> Java 类型关键字。
fn java_type(ty: PrimitiveType) -> &'static str {
    match ty {
        PrimitiveType::Int32 => "int",
        PrimitiveType::Float32 => "float",
        PrimitiveType::Char => "char",
    }
}

/// Java 中乘除模比加减绑定得更紧。
fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Assign => 0,
        BinaryOp::Add | BinaryOp::Sub => 1,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 2,
    }
}

fn needs_parens(child: &Node, parent: BinaryOp, is_right: bool) -> bool {
    let Node::BinaryOperation(c) = child else {
        return false;
    };
    if parent == BinaryOp::Assign {
        return false;
    }
    let (child_prec, parent_prec) = (precedence(c.op), precedence(parent));
    if is_right {
        child_prec <= parent_prec
    } else {
        child_prec < parent_prec
    }
}

/// 前缀符号后面可以直接拼接的操作数：变量、无符号数字、字符。
fn is_unsigned_atom(node: &Node) -> bool {
    match node {
        Node::VariableDeclaration(_) | Node::StringLiteral(_) => true,
        Node::NumberLiteral(n) => !n.text.starts_with(['+', '-']),
        Node::BinaryOperation(_) | Node::UnaryOperation(_) => false,
    }
}
