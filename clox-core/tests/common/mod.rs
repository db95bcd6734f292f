//! 测试辅助工具
//!
//! 提供手工组装字节码和扫描源代码的辅助函数

#![allow(dead_code)]

use clox_core::{Chunk, InterpretResult, OpCode, RuntimeError, Scanner, TokenKind, Value, Vm};

/// 组装单元
#[derive(Debug, Clone, Copy)]
pub enum Asm {
    /// `OP_CONSTANT` 加上新常量的索引
    Const(Value),
    Op(OpCode),
    /// 原始字节
    Byte(u8),
}

/// 按 (行号, 组装单元) 列表构建 Chunk
pub fn assemble(program: &[(usize, Asm)]) -> Chunk {
    let mut chunk = Chunk::new();
    for &(line, item) in program {
        match item {
            Asm::Const(value) => {
                chunk.write_constant(value, line).unwrap();
            }
            Asm::Op(op) => chunk.write_op(op, line).unwrap(),
            Asm::Byte(byte) => chunk.write(byte, line).unwrap(),
        }
    }
    chunk
}

/// 执行结果
#[derive(Debug)]
pub struct ExecResult {
    /// `OP_RETURN` 弹出的值
    pub return_value: Option<Value>,
    /// 执行结束后的栈
    pub stack: Vec<Value>,
}

/// 在新虚拟机上执行 Chunk
pub fn run_chunk(chunk: &Chunk) -> Result<ExecResult, RuntimeError> {
    let mut vm = Vm::new();
    match vm.interpret_chunk(chunk) {
        InterpretResult::Ok => Ok(ExecResult {
            return_value: vm.returned(),
            stack: vm.stack().to_vec(),
        }),
        InterpretResult::RuntimeError(e) => Err(e),
        InterpretResult::CompileError(e) => panic!("unexpected compile error: {e}"),
    }
}

/// 扫描源代码，返回全部 token 种类（含 Eof）
pub fn kinds(source: &str) -> Vec<TokenKind> {
    Scanner::new(source).map(|t| t.kind).collect()
}

/// 扫描源代码，返回 (种类, lexeme, 行号)
pub fn tokens(source: &str) -> Vec<(TokenKind, String, usize)> {
    Scanner::new(source)
        .map(|t| (t.kind, t.lexeme.to_string(), t.line))
        .collect()
}
