//! VM 执行测试
//!
//! 端到端测试：手工组装字节码并执行

mod common;
use clox_core::{InterpretResult, OpCode, RuntimeErrorKind, Vm, VmConfig};
use common::{assemble, run_chunk, Asm};

// ===== 基础运算测试 =====

#[test]
fn test_basic_arithmetic() {
    // 加法
    let chunk = assemble(&[
        (1, Asm::Const(3.0)),
        (1, Asm::Const(4.0)),
        (1, Asm::Op(OpCode::Add)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert_eq!(run_chunk(&chunk).unwrap().return_value, Some(7.0));

    // 减法：左减右
    let chunk = assemble(&[
        (1, Asm::Const(10.0)),
        (1, Asm::Const(4.0)),
        (1, Asm::Op(OpCode::Subtract)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert_eq!(run_chunk(&chunk).unwrap().return_value, Some(6.0));

    // 乘法
    let chunk = assemble(&[
        (1, Asm::Const(4.0)),
        (1, Asm::Const(5.0)),
        (1, Asm::Op(OpCode::Multiply)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert_eq!(run_chunk(&chunk).unwrap().return_value, Some(20.0));

    // 除法
    let chunk = assemble(&[
        (1, Asm::Const(20.0)),
        (1, Asm::Const(8.0)),
        (1, Asm::Op(OpCode::Divide)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert_eq!(run_chunk(&chunk).unwrap().return_value, Some(2.5));
}

#[test]
fn test_negate() {
    let mut vm = Vm::new();
    vm.push(5.0).unwrap();

    let chunk = assemble(&[(1, Asm::Op(OpCode::Negate))]);
    // 没有 RETURN，执行到末尾报错，但 NEGATE 已经生效
    let result = vm.run(&chunk);
    assert!(result.is_runtime_error());
    assert_eq!(vm.stack(), &[-5.0]);
}

#[test]
fn test_nested_expression() {
    // -((1.2 + 3.4) / 5.6)
    let chunk = assemble(&[
        (123, Asm::Const(1.2)),
        (123, Asm::Const(3.4)),
        (123, Asm::Op(OpCode::Add)),
        (123, Asm::Const(5.6)),
        (123, Asm::Op(OpCode::Divide)),
        (123, Asm::Op(OpCode::Negate)),
        (123, Asm::Op(OpCode::Return)),
    ]);
    let value = run_chunk(&chunk).unwrap().return_value.unwrap();
    assert!((value - (-(1.2 + 3.4) / 5.6)).abs() < 1e-12);
}

#[test]
fn test_divide_by_zero_follows_ieee() {
    let chunk = assemble(&[
        (1, Asm::Const(1.0)),
        (1, Asm::Const(0.0)),
        (1, Asm::Op(OpCode::Divide)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert_eq!(run_chunk(&chunk).unwrap().return_value, Some(f64::INFINITY));

    let chunk = assemble(&[
        (1, Asm::Const(0.0)),
        (1, Asm::Const(0.0)),
        (1, Asm::Op(OpCode::Divide)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert!(run_chunk(&chunk).unwrap().return_value.unwrap().is_nan());
}

// ===== 端到端 =====

#[test]
fn test_return_leaves_stack_empty() {
    let chunk = assemble(&[
        (1, Asm::Const(1.0)),
        (1, Asm::Const(2.0)),
        (1, Asm::Op(OpCode::Add)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert_eq!(chunk.constants(), &[1.0, 2.0]);
    assert_eq!(chunk.code()[..4], [OpCode::Constant as u8, 0, OpCode::Constant as u8, 1]);

    let result = run_chunk(&chunk).unwrap();
    assert!(result.stack.is_empty());
    assert_eq!(result.return_value, Some(3.0));
}

#[test]
fn test_lone_return_underflows() {
    let chunk = assemble(&[(1, Asm::Op(OpCode::Return))]);
    let err = run_chunk(&chunk).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::StackUnderflow);
    assert_eq!(err.line, Some(1));
}

// ===== 错误处理 =====

#[test]
fn test_unknown_opcode() {
    let chunk = assemble(&[(7, Asm::Byte(0xFF))]);
    let err = run_chunk(&chunk).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::UnknownOpcode(0xFF));
    assert_eq!(err.to_string(), "[line 7] unknown opcode 255");
}

#[test]
fn test_unknown_opcode_stops_execution() {
    // 未知字节之后的指令不会执行
    let chunk = assemble(&[
        (1, Asm::Const(1.0)),
        (2, Asm::Byte(200)),
        (3, Asm::Op(OpCode::Return)),
    ]);
    let mut vm = Vm::new();
    let result = vm.interpret_chunk(&chunk);
    assert!(result.is_runtime_error());
    assert_eq!(vm.stack(), &[1.0]);
    assert!(vm.returned().is_none());
}

#[test]
fn test_missing_operand() {
    let chunk = assemble(&[(4, Asm::Op(OpCode::Constant))]);
    let err = run_chunk(&chunk).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::MissingOperand(OpCode::Constant));
    assert_eq!(err.line, Some(4));
}

#[test]
fn test_constant_out_of_range() {
    let chunk = assemble(&[(1, Asm::Op(OpCode::Constant)), (1, Asm::Byte(3))]);
    let err = run_chunk(&chunk).unwrap_err();
    assert_eq!(
        err.kind,
        RuntimeErrorKind::ConstantOutOfRange { index: 3, size: 0 }
    );
}

#[test]
fn test_running_off_the_end() {
    let chunk = assemble(&[(1, Asm::Const(1.0)), (2, Asm::Const(2.0))]);
    let err = run_chunk(&chunk).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::UnexpectedEnd);
    assert_eq!(err.line, Some(2));

    let empty = assemble(&[]);
    let err = run_chunk(&empty).unwrap_err();
    assert_eq!(err.kind, RuntimeErrorKind::UnexpectedEnd);
    assert_eq!(err.line, None);
}

#[test]
fn test_stack_overflow() {
    let mut vm = Vm::with_config(VmConfig {
        max_stack_size: 2,
        ..VmConfig::default()
    });
    let chunk = assemble(&[
        (1, Asm::Const(1.0)),
        (1, Asm::Const(2.0)),
        (5, Asm::Const(3.0)),
        (5, Asm::Op(OpCode::Return)),
    ]);
    match vm.interpret_chunk(&chunk) {
        InterpretResult::RuntimeError(e) => {
            assert_eq!(e.kind, RuntimeErrorKind::StackOverflow(2));
            assert_eq!(e.line, Some(5));
        }
        other => panic!("expected stack overflow, got {other:?}"),
    }
}

// ===== 虚拟机复用 =====

#[test]
fn test_vm_reuse_after_error() {
    let mut vm = Vm::new();

    let bad = assemble(&[(1, Asm::Const(1.0)), (1, Asm::Op(OpCode::Add))]);
    assert!(vm.interpret_chunk(&bad).is_runtime_error());

    let good = assemble(&[
        (1, Asm::Const(2.0)),
        (1, Asm::Op(OpCode::Negate)),
        (1, Asm::Op(OpCode::Return)),
    ]);
    assert!(vm.interpret_chunk(&good).is_ok());
    assert_eq!(vm.returned(), Some(-2.0));
    assert!(vm.stack().is_empty());
}

#[test]
fn test_interpret_source() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("var x = 10;"), InterpretResult::Ok);

    match vm.interpret("print \"abc") {
        InterpretResult::CompileError(e) => {
            assert_eq!(e.diagnostics.len(), 1);
            assert_eq!(e.line(), Some(1));
        }
        other => panic!("expected compile error, got {other:?}"),
    }
}
