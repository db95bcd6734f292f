//! 虚拟机实现
//!
//! - stack: 栈操作
//! - execution: 主执行循环

pub mod execution;
pub mod stack;

use crate::chunk::Chunk;
use crate::compiler::{self, CompileError};
use crate::error::RuntimeError;
use crate::kit::DynArray;
use crate::value::Value;
use clox_config::VmConfig;
use tracing::{debug, warn};

/// 解释执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum InterpretResult {
    Ok,
    CompileError(CompileError),
    RuntimeError(RuntimeError),
}

impl InterpretResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, InterpretResult::Ok)
    }

    pub fn is_compile_error(&self) -> bool {
        matches!(self, InterpretResult::CompileError(_))
    }

    pub fn is_runtime_error(&self) -> bool {
        matches!(self, InterpretResult::RuntimeError(_))
    }
}

impl From<Result<(), RuntimeError>> for InterpretResult {
    fn from(result: Result<(), RuntimeError>) -> Self {
        match result {
            Ok(()) => InterpretResult::Ok,
            Err(e) => InterpretResult::RuntimeError(e),
        }
    }
}

/// 虚拟机
pub struct Vm {
    /// 操作数栈
    stack: DynArray<Value>,
    /// 最近一次 `OP_RETURN` 弹出的值
    returned: Option<Value>,
    config: VmConfig,
}

impl Vm {
    /// 创建使用默认配置的虚拟机
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    /// 创建虚拟机（带配置）
    ///
    /// 预留栈空间失败时退化为空栈，之后按需扩容。
    pub fn with_config(config: VmConfig) -> Self {
        let stack = match DynArray::with_capacity(config.initial_stack_capacity) {
            Ok(stack) => stack,
            Err(e) => {
                warn!(target: "clox::vm", "cannot reserve operand stack: {e}");
                DynArray::new()
            }
        };
        Self {
            stack,
            returned: None,
            config,
        }
    }

    /// 当前栈内容，栈底在前
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    /// 最近一次执行 `OP_RETURN` 时的返回值
    pub fn returned(&self) -> Option<Value> {
        self.returned
    }

    /// 清空栈
    pub fn reset_stack(&mut self) {
        self.stack.clear();
    }

    pub fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
        stack::push(self, value)
    }

    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        stack::pop(self)
    }

    /// 查看栈中元素 (distance=0 是栈顶)
    pub fn peek(&self, distance: usize) -> Result<Value, RuntimeError> {
        stack::peek(self, distance)
    }

    /// 解释执行源代码
    ///
    /// 目前只完成词法阶段：没有词法错误即返回 `Ok`。
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        match compiler::compile(source) {
            Ok(tokens) => {
                debug!(target: "clox::vm", "compiled {} tokens", tokens.len());
                InterpretResult::Ok
            }
            Err(e) => InterpretResult::CompileError(e),
        }
    }

    /// 在空栈上执行一个 Chunk
    pub fn interpret_chunk(&mut self, chunk: &Chunk) -> InterpretResult {
        self.reset_stack();
        self.run(chunk)
    }

    /// 在当前栈上执行一个 Chunk
    pub fn run(&mut self, chunk: &Chunk) -> InterpretResult {
        debug!(
            target: "clox::vm",
            "run: {} bytes, {} constants",
            chunk.len(),
            chunk.constants().len()
        );
        self.returned = None;
        execution::run(self, chunk).into()
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Vm {
    fn drop(&mut self) {
        debug!(target: "clox::vm", "dispose vm ({} values on stack)", self.stack.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeErrorKind;
    use crate::opcode::OpCode;

    #[test]
    fn test_new_vm_has_empty_stack() {
        let vm = Vm::new();
        assert!(vm.stack().is_empty());
        assert!(vm.returned().is_none());
    }

    #[test]
    fn test_reset_stack() {
        let mut vm = Vm::new();
        vm.push(1.0).unwrap();
        vm.push(2.0).unwrap();
        vm.reset_stack();
        assert!(vm.stack().is_empty());
    }

    #[test]
    fn test_interpret_chunk_resets_stack() {
        let mut vm = Vm::new();
        vm.push(99.0).unwrap();

        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Return, 1).unwrap();

        // 栈被清空，RETURN 无值可弹
        match vm.interpret_chunk(&chunk) {
            InterpretResult::RuntimeError(e) => assert_eq!(e.kind, RuntimeErrorKind::StackUnderflow),
            other => panic!("expected runtime error, got {other:?}"),
        }
    }

    #[test]
    fn test_run_uses_current_stack() {
        let mut vm = Vm::new();
        vm.push(5.0).unwrap();

        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Negate, 1).unwrap();
        chunk.write_op(OpCode::Return, 1).unwrap();

        assert!(vm.run(&chunk).is_ok());
        assert_eq!(vm.returned(), Some(-5.0));
    }

    #[test]
    fn test_interpret_source() {
        let mut vm = Vm::new();
        assert!(vm.interpret("print 1 + 2;").is_ok());
        assert!(vm.interpret("").is_ok());
        assert!(vm.interpret("var s = \"open").is_compile_error());
    }
}
