//! 动态数组
//!
//! 基于 `Vec<T>` 的可增长序列，容量按几何级数增长（0 → 8 → 16 → …）。
//! 扩容使用 `try_reserve_exact`，分配失败时返回 [`CapacityError`]，
//! 原有内容保持不变。

use std::collections::TryReserveError;
use std::ops::Index;
use thiserror::Error;

/// 最小初始容量
pub const MIN_CAPACITY: usize = 8;

/// 扩容失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot grow buffer from {current} to {requested} elements")]
pub struct CapacityError {
    pub current: usize,
    pub requested: usize,
}

/// 计算下一次扩容后的容量
#[inline]
pub fn grow_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY {
        MIN_CAPACITY
    } else {
        capacity.saturating_mul(2)
    }
}

/// 泛型动态数组
#[derive(Debug, Clone, PartialEq)]
pub struct DynArray<T> {
    items: Vec<T>,
}

impl<T> DynArray<T> {
    /// 创建空数组（不分配内存）
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 预分配指定容量
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|e| capacity_error(0, capacity, e))?;
        Ok(Self { items })
    }

    /// 追加元素，容量不足时按几何级数扩容
    pub fn push(&mut self, value: T) -> Result<(), CapacityError> {
        if self.items.len() == self.items.capacity() {
            let current = self.items.capacity();
            let requested = grow_capacity(current);
            self.items
                .try_reserve_exact(requested - self.items.len())
                .map_err(|e| capacity_error(current, requested, e))?;
        }
        self.items.push(value);
        Ok(())
    }

    /// 弹出末尾元素
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 当前已分配容量
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// 清空内容，保留已分配内存
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn capacity_error(current: usize, requested: usize, cause: TryReserveError) -> CapacityError {
    tracing::error!(target: "clox::chunk", "allocation failed: {cause}");
    CapacityError { current, requested }
}
