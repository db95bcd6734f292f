//! 通用工具

pub mod dynarr;

pub use dynarr::{CapacityError, DynArray};
