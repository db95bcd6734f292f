//! run() 主执行循环

use super::{stack, Vm};
use crate::chunk::Chunk;
use crate::debug::disassemble_instruction;
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::opcode::OpCode;
use crate::value::{format_value, Value};
use tracing::{error, trace};

/// 单条指令执行后的控制流
enum Flow {
    Continue,
    Return,
}

/// 执行字节码的主循环
///
/// 从偏移 0 开始执行，直到 `OP_RETURN` 或出错。错误附带出错指令的行号。
pub fn run(vm: &mut Vm, chunk: &Chunk) -> Result<(), RuntimeError> {
    let mut ip = 0;

    loop {
        let offset = ip;

        let Some(&byte) = chunk.code().get(ip) else {
            let last = chunk.len().checked_sub(1);
            let err = RuntimeError::new(RuntimeErrorKind::UnexpectedEnd)
                .at_line(last.and_then(|o| chunk.line_for_offset(o)));
            error!(target: "clox::vm", "{err}");
            return Err(err);
        };

        if vm.config.trace_execution {
            trace_instruction(vm, chunk, offset);
        }
        ip += 1;

        match step(vm, chunk, byte, &mut ip) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Return) => return Ok(()),
            Err(err) => {
                let err = err.at_line(chunk.line_for_offset(offset));
                error!(target: "clox::vm", "{err}");
                return Err(err);
            }
        }
    }
}

/// 执行一条指令，`ip` 已越过操作码字节
fn step(vm: &mut Vm, chunk: &Chunk, byte: u8, ip: &mut usize) -> Result<Flow, RuntimeError> {
    let op = OpCode::try_from(byte).map_err(|e| RuntimeErrorKind::UnknownOpcode(e.0))?;

    match op {
        OpCode::Constant => {
            let index = read_byte(chunk, ip).ok_or(RuntimeErrorKind::MissingOperand(op))?;
            let value = chunk
                .constant(index)
                .ok_or(RuntimeErrorKind::ConstantOutOfRange {
                    index,
                    size: chunk.constants().len(),
                })?;
            stack::push(vm, value)?;
        }

        // ===== 算术运算 =====
        OpCode::Add => binary_op(vm, |a, b| a + b)?,
        OpCode::Subtract => binary_op(vm, |a, b| a - b)?,
        OpCode::Multiply => binary_op(vm, |a, b| a * b)?,
        // IEEE-754：除以零得到 inf 或 nan
        OpCode::Divide => binary_op(vm, |a, b| a / b)?,

        OpCode::Negate => {
            let value = stack::pop(vm)?;
            stack::push(vm, -value)?;
        }

        OpCode::Return => {
            let value = stack::pop(vm)?;
            trace!(target: "clox::vm", "return {}", format_value(value));
            vm.returned = Some(value);
            return Ok(Flow::Return);
        }
    }

    Ok(Flow::Continue)
}

#[inline]
fn read_byte(chunk: &Chunk, ip: &mut usize) -> Option<u8> {
    let byte = chunk.code().get(*ip).copied()?;
    *ip += 1;
    Some(byte)
}

/// 弹出右、左操作数，压入 `f(左, 右)`
#[inline]
fn binary_op(vm: &mut Vm, f: impl FnOnce(Value, Value) -> Value) -> Result<(), RuntimeError> {
    let (a, b) = stack::pop_two(vm)?;
    stack::push(vm, f(a, b))
}

/// 调试: 打印当前栈状态和指令
fn trace_instruction(vm: &Vm, chunk: &Chunk, offset: usize) {
    let slots: String = vm
        .stack()
        .iter()
        .map(|v| format!("[ {} ]", format_value(*v)))
        .collect();
    trace!(target: "clox::vm", "          {slots}");

    let (_, text) = disassemble_instruction(chunk, offset);
    trace!(target: "clox::vm", "{text}");
}
