use std::collections::HashMap;

use log::warn;

use crate::ast::VariableDeclaration;

/// 解析期使用的符号表：标识符 -> 声明它的节点。
///
/// 只活在一次 `parse` 调用里，解析结束就丢弃，不属于 AST。
#[derive(Debug, Default)]
pub struct SymbolTable {
    vars: HashMap<String, VariableDeclaration>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个声明。重复声明时保留第一次的（first-write-wins），返回 false。
    pub fn declare(&mut self, decl: &VariableDeclaration) -> bool {
        if let Some(existing) = self.vars.get(&decl.name) {
            warn!(
                "`{}` redeclared as {}, keeping the earlier {} declaration",
                decl.name, decl.ty, existing.ty
            );
            return false;
        }
        self.vars.insert(decl.name.clone(), decl.clone());
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&VariableDeclaration> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }
}
