//! 操作码定义

use std::fmt;

/// 操作码
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// 压入常量 (+ u8 常量池索引)
    Constant = 0x00,
    Add,
    Subtract,
    Multiply,
    Divide,
    /// 一元取负
    Negate,
    /// 弹出栈顶并结束执行
    Return,
}

/// 非法操作码字节
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOpCode(pub u8);

impl OpCode {
    /// 获取操作码名称
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::Constant => "OP_CONSTANT",
            OpCode::Add => "OP_ADD",
            OpCode::Subtract => "OP_SUBTRACT",
            OpCode::Multiply => "OP_MULTIPLY",
            OpCode::Divide => "OP_DIVIDE",
            OpCode::Negate => "OP_NEGATE",
            OpCode::Return => "OP_RETURN",
        }
    }

    /// 操作数字节数
    pub fn operand_size(&self) -> usize {
        match self {
            OpCode::Constant => 1,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = InvalidOpCode;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x00 => Ok(OpCode::Constant),
            0x01 => Ok(OpCode::Add),
            0x02 => Ok(OpCode::Subtract),
            0x03 => Ok(OpCode::Multiply),
            0x04 => Ok(OpCode::Divide),
            0x05 => Ok(OpCode::Negate),
            0x06 => Ok(OpCode::Return),
            other => Err(InvalidOpCode(other)),
        }
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
