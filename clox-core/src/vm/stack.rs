//! 栈操作
//!
//! 所有弹栈操作都先检查深度，空栈时返回 `StackUnderflow` 而不是越界读取。

use super::Vm;
use crate::error::{RuntimeError, RuntimeErrorKind};
use crate::value::Value;

/// 压栈
#[inline]
pub fn push(vm: &mut Vm, value: Value) -> Result<(), RuntimeError> {
    let limit = vm.config.max_stack_size;
    if vm.stack.len() >= limit {
        return Err(RuntimeErrorKind::StackOverflow(limit).into());
    }
    vm.stack.push(value)?;
    Ok(())
}

/// 弹栈
#[inline]
pub fn pop(vm: &mut Vm) -> Result<Value, RuntimeError> {
    vm.stack
        .pop()
        .ok_or_else(|| RuntimeErrorKind::StackUnderflow.into())
}

/// 弹出两个值 (先弹出的是右操作数)，返回 (左, 右)
///
/// 栈中不足两个值时不修改栈。
#[inline]
pub fn pop_two(vm: &mut Vm) -> Result<(Value, Value), RuntimeError> {
    if vm.stack.len() < 2 {
        return Err(RuntimeErrorKind::StackUnderflow.into());
    }
    let b = pop(vm)?;
    let a = pop(vm)?;
    Ok((a, b))
}

/// 查看栈中元素 (distance=0 是栈顶)
#[inline]
pub fn peek(vm: &Vm, distance: usize) -> Result<Value, RuntimeError> {
    let len = vm.stack.len();
    if distance >= len {
        return Err(RuntimeErrorKind::StackUnderflow.into());
    }
    Ok(vm.stack[len - 1 - distance])
}
