//! # Value 模块
//!
//! 可被补间的属性值：标量（f32）或复合值（若干命名的 f32 子字段）。

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// 复合值
///
/// 由若干命名数值子字段组成，例如 `{x, y, z}`。
///
/// 子字段按名称有序存储。可以通过 [`with_modifiable_keys`](Self::with_modifiable_keys)
/// 显式声明哪些子字段允许被补间；未声明时默认为全部子字段。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundValue {
    fields: BTreeMap<String, f32>,
    modifiable: Option<Vec<String>>,
}

/// 共享的复合值
///
/// 目标对象与动作共享同一个实例：每一帧都会原地修改并写回同一个引用。
pub type SharedCompound = Rc<RefCell<CompoundValue>>;

impl CompoundValue {
    /// 创建空的复合值
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `(key, value)` 列表创建
    pub fn from_fields<K: Into<String>>(fields: impl IntoIterator<Item = (K, f32)>) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            modifiable: None,
        }
    }

    /// 添加子字段（构建器风格）
    pub fn with(mut self, key: impl Into<String>, value: f32) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// 显式声明可补间的子字段
    pub fn with_modifiable_keys<K: Into<String>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.modifiable = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// 可补间的子字段列表
    ///
    /// 优先返回显式声明的列表，否则返回自身的全部子字段。
    pub fn modifiable_keys(&self) -> Vec<String> {
        match &self.modifiable {
            Some(keys) => keys.clone(),
            None => self.fields.keys().cloned().collect(),
        }
    }

    /// 读取子字段
    pub fn get(&self, key: &str) -> Option<f32> {
        self.fields.get(key).copied()
    }

    /// 写入子字段
    pub fn set(&mut self, key: impl Into<String>, value: f32) {
        self.fields.insert(key.into(), value);
    }

    /// 是否包含子字段
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// 遍历全部子字段
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 包装为共享引用
    pub fn into_shared(self) -> SharedCompound {
        Rc::new(RefCell::new(self))
    }
}

/// 目标对象上的属性值
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// 标量
    Number(f32),
    /// 复合值（共享引用）
    Compound(SharedCompound),
}

impl PropertyValue {
    /// 创建复合属性值
    pub fn compound(value: CompoundValue) -> Self {
        Self::Compound(value.into_shared())
    }

    /// 作为标量读取
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Compound(_) => None,
        }
    }

    /// 作为复合值读取
    pub fn as_compound(&self) -> Option<&SharedCompound> {
        match self {
            Self::Number(_) => None,
            Self::Compound(c) => Some(c),
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<CompoundValue> for PropertyValue {
    fn from(value: CompoundValue) -> Self {
        Self::compound(value)
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Compound(a), Self::Compound(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiable_keys_default_to_own_fields() {
        let v = CompoundValue::new().with("y", 2.0).with("x", 1.0);
        assert_eq!(v.modifiable_keys(), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_explicit_modifiable_keys() {
        let v = CompoundValue::new()
            .with("x", 1.0)
            .with("y", 2.0)
            .with("w", 0.0)
            .with_modifiable_keys(["x", "y"]);
        assert_eq!(v.modifiable_keys(), vec!["x".to_string(), "y".to_string()]);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_shared_compound_aliasing() {
        let shared = CompoundValue::new().with("x", 1.0).into_shared();
        let a = PropertyValue::Compound(shared.clone());
        shared.borrow_mut().set("x", 5.0);
        assert_eq!(a.as_compound().unwrap().borrow().get("x"), Some(5.0));
    }

    #[test]
    fn test_property_value_accessors() {
        assert_eq!(PropertyValue::Number(3.0).as_number(), Some(3.0));
        assert!(PropertyValue::Number(3.0).as_compound().is_none());
        assert!(PropertyValue::from(CompoundValue::new()).as_number().is_none());
    }
}
