/// 源码中的一个“区间位置”。
///
/// - `start/end`：byte offset（按 UTF-8 字节计数），用于切片。
/// - `line/col`：起始位置的行列号（从 1 开始），用于报错。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// 起始 byte offset（包含）
    pub start: usize,
    /// 结束 byte offset（不包含）
    pub end: usize,
    /// 起始行号（从 1 开始）
    pub line: usize,
    /// 起始列号（从 1 开始，按字符计数）
    pub col: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, col: usize) -> Self {
        Self {
            start,
            end,
            line,
            col,
        }
    }

    /// 零宽度的 span，只标记一个点（错误定位用）。
    pub fn point(offset: usize, line: usize, col: usize) -> Self {
        Self::new(offset, offset, line, col)
    }
}
