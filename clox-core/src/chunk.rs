//! 字节码块
//!
//! Chunk = 指令字节流 + 常量池 + 行号表。
//! 行号表是对指令流的游程编码：每条记录保存一个源代码行号以及
//! 连续归属于该行的指令字节数，所有记录的 count 之和始终等于指令字节数。

use crate::error::{ChunkError, MAX_CONSTANTS};
use crate::kit::DynArray;
use crate::opcode::OpCode;
use crate::value::Value;

/// 行号表中的一条游程记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord {
    /// 源代码行号
    pub line: usize,
    /// 连续属于该行的指令字节数
    pub count: usize,
}

/// 回滚点
#[derive(Debug, Clone, Copy)]
struct Mark {
    code: usize,
    constants: usize,
    lines: usize,
    last_count: Option<usize>,
}

/// 字节码块
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    /// 指令字节码
    code: DynArray<u8>,
    /// 常量池
    constants: DynArray<Value>,
    /// 行号信息（游程编码）
    lines: DynArray<LineRecord>,
}

impl Chunk {
    /// 创建新的字节码块
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个字节，并记录其源代码行号
    ///
    /// 与上一个字节同行时合并到最后一条记录。失败时不改变 Chunk。
    pub fn write(&mut self, byte: u8, line: usize) -> Result<(), ChunkError> {
        self.code.push(byte)?;

        match self.lines.last_mut() {
            Some(last) if last.line == line => last.count += 1,
            _ => {
                if let Err(e) = self.lines.push(LineRecord { line, count: 1 }) {
                    self.code.pop();
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// 写入操作码
    pub fn write_op(&mut self, op: OpCode, line: usize) -> Result<(), ChunkError> {
        self.write(op.into(), line)
    }

    /// 添加常量，返回索引
    pub fn add_constant(&mut self, value: Value) -> Result<u8, ChunkError> {
        let idx = self.constants.len();
        if idx >= MAX_CONSTANTS {
            return Err(ChunkError::TooManyConstants);
        }
        self.constants.push(value)?;
        Ok(idx as u8)
    }

    /// 添加常量并写入 `CONSTANT idx`
    ///
    /// 任一步失败时常量池、指令流和行号表都恢复原状。
    pub fn write_constant(&mut self, value: Value, line: usize) -> Result<u8, ChunkError> {
        let mark = self.mark();
        self.append_constant(value, line).inspect_err(|_| self.restore(mark))
    }

    fn append_constant(&mut self, value: Value, line: usize) -> Result<u8, ChunkError> {
        let idx = self.add_constant(value)?;
        self.write_op(OpCode::Constant, line)?;
        self.write(idx, line)?;
        Ok(idx)
    }

    /// 记录当前各缓冲区长度
    fn mark(&self) -> Mark {
        Mark {
            code: self.code.len(),
            constants: self.constants.len(),
            lines: self.lines.len(),
            last_count: self.lines.last().map(|r| r.count),
        }
    }

    /// 回滚到 `mark` 时的状态
    fn restore(&mut self, mark: Mark) {
        self.code.truncate(mark.code);
        self.constants.truncate(mark.constants);
        self.lines.truncate(mark.lines);
        if let (Some(last), Some(count)) = (self.lines.last_mut(), mark.last_count) {
            last.count = count;
        }
    }

    /// 查找指令偏移对应的源代码行号，越界时返回 None
    pub fn line_for_offset(&self, offset: usize) -> Option<usize> {
        let mut end = 0;
        for record in &self.lines {
            end += record.count;
            if offset < end {
                return Some(record.line);
            }
        }
        None
    }

    #[inline]
    pub fn code(&self) -> &[u8] {
        self.code.as_slice()
    }

    #[inline]
    pub fn constants(&self) -> &[Value] {
        self.constants.as_slice()
    }

    /// 按索引读取常量
    #[inline]
    pub fn constant(&self, index: u8) -> Option<Value> {
        self.constants.get(index as usize).copied()
    }

    /// 行号游程表
    #[inline]
    pub fn line_records(&self) -> &[LineRecord] {
        self.lines.as_slice()
    }

    /// 指令字节数
    #[inline]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// 反汇编整个 Chunk（调试用），同时写入 debug 日志
    pub fn disassemble(&self, name: &str) -> String {
        let listing = crate::debug::disassemble_chunk(self, name);
        for line in listing.lines() {
            tracing::debug!(target: "clox::chunk", "{line}");
        }
        listing
    }
}
