use std::fs;
use std::path::PathBuf;

use log::info;
use regex::{Captures, Regex};

use crate::error::SinkError;

/// 接收生成代码的外部编译后端。
///
/// 生成器只负责产出入口方法的方法体；后端负责把它放进一个可编译的单元并产出最终产物。
/// 每次编译只调用一次，失败不重试。
pub trait CompilationSink {
    /// 用 `body`（一个完整的 `{ ... }` 块）替换零参数入口方法的方法体。
    fn replace_entry_body(&mut self, body: &str) -> Result<(), SinkError>;
}

/// 把方法体包进 `public class Main` 并写成 `.java` 源文件，交给 `javac` 编译。
#[derive(Clone, Debug)]
pub struct JavaSourceSink {
    path: PathBuf,
}

impl JavaSourceSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 完整的 Java 源文件文本。
    ///
    /// Java 的小数字面量默认是 `double`，不能直接赋给 `float`，
    /// 所以这里给方法体里的每个小数字面量补上 `f` 后缀。
    pub fn render(body: &str) -> String {
        let body = java_float_literals(body);
        format!("public class Main {{\n    public static void main(String[] args) {body}\n}}\n")
    }
}

/// `2.5` -> `2.5f`；字符串和字符字面量里的内容原样保留。
fn java_float_literals(body: &str) -> String {
    // 先匹配字符串/字符字面量把它们整体跳过，只有第 1 组才是真正的小数
    let re = Regex::new(r#""[^"\n]*"|'.'|([0-9]+\.[0-9]+)"#).expect("invalid float pattern");
    re.replace_all(body, |caps: &Captures| match caps.get(1) {
        Some(num) => format!("{}f", num.as_str()),
        None => caps[0].to_string(),
    })
    .into_owned()
}

impl CompilationSink for JavaSourceSink {
    fn replace_entry_body(&mut self, body: &str) -> Result<(), SinkError> {
        fs::write(&self.path, Self::render(body)).map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("wrote {}", self.path.display());
        Ok(())
    }
}

/// 只把方法体留在内存里，CLI 的 `--print` 和测试会用到。
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub body: Option<String>,
}

impl CompilationSink for MemorySink {
    fn replace_entry_body(&mut self, body: &str) -> Result<(), SinkError> {
        self.body = Some(body.to_string());
        Ok(())
    }
}
