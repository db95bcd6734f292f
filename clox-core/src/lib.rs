//! clox Core - Scanner, bytecode chunk, and stack VM (pure logic, no IO)
//!
//! Only operates on in-memory data structures, no file IO or terminal output.
//! Diagnostics go through `tracing` under the `clox::*` targets.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod chunk;
pub mod compiler;
pub mod debug;
pub mod error;
pub mod kit;
pub mod opcode;
pub mod value;
pub mod vm;

// Re-export common types
pub use chunk::{Chunk, LineRecord};
pub use compiler::{compile, CompileError, Diagnostic, Scanner, Token, TokenKind};
pub use error::{ChunkError, RuntimeError, RuntimeErrorKind};
pub use opcode::OpCode;
pub use value::{format_value, Value};
pub use vm::{InterpretResult, Vm};

// Re-export config types from clox-config
pub use clox_config::{Phase, VmConfig};
