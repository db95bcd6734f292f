//! 编译前端
//!
//! 目前只有词法阶段：扫描整段源代码，记录所有 token，并把错误 token
//! 汇总为 [`CompileError`]。语法分析与代码生成尚未实现。

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};

use thiserror::Error;
use tracing::{debug, trace};

/// 单条词法诊断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 出错行号，1-based
    pub line: usize,
    /// 出错位置的字节偏移
    pub offset: usize,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

/// 编译错误：至少包含一条诊断
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.diagnostics))]
pub struct CompileError {
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileError {
    /// 第一条诊断的行号
    pub fn line(&self) -> Option<usize> {
        self.diagnostics.first().map(|d| d.line)
    }
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// 扫描源代码直到输入结束
///
/// 成功时返回完整 token 序列（以 `Eof` 结尾）；遇到任何错误 token
/// 时返回全部诊断。
pub fn compile(source: &str) -> Result<Vec<Token<'_>>, CompileError> {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    for token in Scanner::new(source) {
        trace!(target: "clox::scanner", "{token}");
        if token.is_error() {
            diagnostics.push(Diagnostic {
                line: token.line,
                offset: token.start,
                message: token.lexeme.to_string(),
            });
        }
        tokens.push(token);
    }

    debug!(
        target: "clox::compiler",
        "scanned {} tokens, {} errors",
        tokens.len(),
        diagnostics.len()
    );

    if diagnostics.is_empty() {
        Ok(tokens)
    } else {
        Err(CompileError { diagnostics })
    }
}
