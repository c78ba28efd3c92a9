//! # Target 模块
//!
//! 补间目标接口定义。
//!
//! ## 核心概念
//!
//! - `Animatable`: 可被补间的目标对象接口（按名称读写属性）
//! - `PropertyBag`: 纯数据目标，直接以 名称 → 值 的映射存储属性
//!
//! 目标通过 `Rc` 在调度器、动作与回调之间共享，因此读写都经由 `&self`，
//! 由实现方自行使用 `RefCell` 等内部可变性。

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::value::{CompoundValue, PropertyValue};

/// 可补间对象接口
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct Sprite {
///     opacity: Cell<f32>,
///     position: RefCell<SharedCompound>,
/// }
///
/// impl Animatable for Sprite {
///     fn get_property(&self, name: &str) -> Option<PropertyValue> {
///         match name {
///             "opacity" => Some(PropertyValue::Number(self.opacity.get())),
///             "position" => Some(PropertyValue::Compound(self.position.borrow().clone())),
///             _ => None,
///         }
///     }
///
///     fn set_property(&self, name: &str, value: PropertyValue) -> bool {
///         match (name, value) {
///             ("opacity", PropertyValue::Number(v)) => { self.opacity.set(v); true }
///             ("position", PropertyValue::Compound(c)) => { *self.position.borrow_mut() = c; true }
///             _ => false,
///         }
///     }
/// }
/// ```
pub trait Animatable: 'static {
    /// 获取属性的当前值
    ///
    /// # 返回
    /// - `Some(value)`: 属性存在
    /// - `None`: 属性不存在（该属性在整个动作生命周期内不会被补间）
    fn get_property(&self, name: &str) -> Option<PropertyValue>;

    /// 设置属性的新值
    ///
    /// 复合属性每一帧都会传入**同一个**共享引用（原地修改后写回），
    /// 实现方需要容忍这种别名关系，不能假设每次拿到的是新对象。
    ///
    /// # 返回
    /// - `true`: 设置成功
    /// - `false`: 属性不存在或类型不匹配
    fn set_property(&self, name: &str, value: PropertyValue) -> bool;
}

/// 纯数据目标
///
/// 以有序映射保存任意属性，写入时直接替换（复合值保持别名）。
#[derive(Debug, Default)]
pub struct PropertyBag {
    values: RefCell<BTreeMap<String, PropertyValue>>,
}

impl PropertyBag {
    /// 创建空的属性包
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加标量属性（构建器风格）
    pub fn with_number(self, name: impl Into<String>, value: f32) -> Self {
        self.values
            .borrow_mut()
            .insert(name.into(), PropertyValue::Number(value));
        self
    }

    /// 添加复合属性（构建器风格）
    pub fn with_compound(self, name: impl Into<String>, value: CompoundValue) -> Self {
        self.values
            .borrow_mut()
            .insert(name.into(), PropertyValue::compound(value));
        self
    }

    /// 读取标量属性
    pub fn number(&self, name: &str) -> Option<f32> {
        self.values.borrow().get(name).and_then(PropertyValue::as_number)
    }

    /// 读取复合属性的快照
    pub fn compound(&self, name: &str) -> Option<CompoundValue> {
        self.values
            .borrow()
            .get(name)
            .and_then(|v| v.as_compound().map(|c| c.borrow().clone()))
    }

    /// 是否存在属性
    pub fn contains(&self, name: &str) -> bool {
        self.values.borrow().contains_key(name)
    }

    /// 属性名称列表
    pub fn names(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }
}

impl Animatable for PropertyBag {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        self.values.borrow().get(name).cloned()
    }

    fn set_property(&self, name: &str, value: PropertyValue) -> bool {
        self.values.borrow_mut().insert(name.to_string(), value);
        true
    }
}
