//! # Easing 模块
//!
//! 缓动函数注册表，用于把时间进度 `[0, 1]` 重新映射。
//!
//! 注册表作为显式依赖传入 [`TweenAction`](crate::TweenAction) 的构造函数，
//! 引擎内部不读取任何全局缓动表。

mod functions;
mod legacy;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub use functions::{BuiltinEasing, EasingFamily, EasingMode};
pub use legacy::adapt_easing_name;

/// 缓动函数 `t -> eased_t`
pub type EasingFn = Rc<dyn Fn(f32) -> f32>;

/// 缓动描述：按名称查表，或直接给出函数
#[derive(Clone)]
pub enum EasingSpec {
    /// 注册表中的名称
    Named(String),
    /// 自定义函数
    Function(EasingFn),
}

impl EasingSpec {
    /// 由闭包创建
    pub fn function(f: impl Fn(f32) -> f32 + 'static) -> Self {
        Self::Function(Rc::new(f))
    }
}

impl fmt::Debug for EasingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for EasingSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for EasingSpec {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<BuiltinEasing> for EasingSpec {
    fn from(easing: BuiltinEasing) -> Self {
        Self::function(move |t| easing.apply(t))
    }
}

/// 缓动函数注册表（名称 → 函数）
#[derive(Clone, Default)]
pub struct EasingRegistry {
    functions: HashMap<String, EasingFn>,
}

impl fmt::Debug for EasingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EasingRegistry")
            .field("functions", &self.functions.len())
            .finish()
    }
}

impl EasingRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建包含全部内置缓动函数的注册表
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for easing in BuiltinEasing::all() {
            registry.register(easing.name(), move |t| easing.apply(t));
        }
        registry
    }

    /// 注册（或覆盖）缓动函数
    pub fn register(&mut self, name: impl Into<String>, f: impl Fn(f32) -> f32 + 'static) {
        self.functions.insert(name.into(), Rc::new(f));
    }

    /// 按规范名查找
    pub fn get(&self, name: &str) -> Option<EasingFn> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// 已注册名称（排序后）
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }
}
