//! 反汇编器（调试用）
//!
//! 只产生文本，不影响解释执行结果。

use crate::chunk::Chunk;
use crate::opcode::OpCode;
use crate::value::format_value;
use std::fmt::Write;

/// 反汇编整个 Chunk
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut out = format!("== {name} ==\n");
    let _ = writeln!(
        out,
        "{:<4} {:<4} {:<16} {:<4} {}",
        "Code", "Line", "OpCode", "Slot", "Value"
    );

    let mut offset = 0;
    while offset < chunk.len() {
        let (next, text) = disassemble_instruction(chunk, offset);
        out.push_str(&text);
        out.push('\n');
        offset = next;
    }
    out
}

/// 反汇编单条指令，返回下一条指令的偏移和文本
///
/// `offset` 越界时返回 `(offset, 空串)`。
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (usize, String) {
    let Some(&byte) = chunk.code().get(offset) else {
        return (offset, String::new());
    };
    let line = chunk.line_for_offset(offset).unwrap_or(0);
    let prefix = format!("{offset:04} {line:04} ");

    match OpCode::try_from(byte) {
        Ok(op @ OpCode::Constant) => constant_instruction(chunk, op, offset, prefix),
        Ok(op) => (offset + 1, format!("{prefix}{}", op.name())),
        Err(_) => (
            offset + 1,
            format!(
                "{prefix}{:<16} {:>4} opcode\n     (raw byte = {byte})",
                "UNKNOWN", "-"
            ),
        ),
    }
}

fn constant_instruction(chunk: &Chunk, op: OpCode, offset: usize, prefix: String) -> (usize, String) {
    let Some(&index) = chunk.code().get(offset + 1) else {
        return (
            offset + 1,
            format!("{prefix}{:<16} <missing operand>", op.name()),
        );
    };

    let value = match chunk.constant(index) {
        Some(v) => format!("'{}'", format_value(v)),
        None => "<out of range>".to_string(),
    };
    (
        offset + 1 + op.operand_size(),
        format!("{prefix}{:<16} {index:>4} {value}", op.name()),
    )
}
