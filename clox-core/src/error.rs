//! 错误类型
//!
//! 字节码构建错误和运行时错误。编译（词法）错误见 `compiler` 模块。

use crate::kit::CapacityError;
use crate::opcode::OpCode;
use thiserror::Error;

/// 单个 Chunk 的常量池上限（由 u8 操作数宽度决定）
pub const MAX_CONSTANTS: usize = 256;

/// 构建 Chunk 时的错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChunkError {
    /// 常量池已满
    #[error("too many constants in one chunk (limit {})", MAX_CONSTANTS)]
    TooManyConstants,

    /// 缓冲区扩容失败
    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

/// 运行时错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow (limit {0} values)")]
    StackOverflow(usize),

    #[error("unknown opcode {0}")]
    UnknownOpcode(u8),

    #[error("missing operand for {0}")]
    MissingOperand(OpCode),

    #[error("constant index {index} out of range (pool size {size})")]
    ConstantOutOfRange { index: u8, size: usize },

    #[error("instruction stream ended without {}", OpCode::Return)]
    UnexpectedEnd,

    #[error("out of memory: {0}")]
    OutOfMemory(#[from] CapacityError),
}

/// 运行时错误，附带出错指令的源代码行号
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: Option<usize>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind) -> Self {
        Self { kind, line: None }
    }

    /// 设置行号（已有行号时保持不变）
    pub fn at_line(mut self, line: Option<usize>) -> Self {
        if self.line.is_none() {
            self.line = line;
        }
        self
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<CapacityError> for RuntimeError {
    fn from(e: CapacityError) -> Self {
        Self::new(RuntimeErrorKind::OutOfMemory(e))
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "[line {line}] {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
