//! # Property 模块
//!
//! 原始属性表 → 不可变属性描述列表。
//!
//! 原始属性表的每一项可以是：
//! - 字面值（标量 / 复合值）
//! - 无参提供函数（每次解析时调用一次）
//! - 包装器 `{value, easing?, progress?}`，为单个属性指定缓动或进度函数
//!
//! 空值与字符串会在解析时被过滤掉。

use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::easing::{EasingFn, EasingRegistry, EasingSpec};
use crate::error::TweenWarning;
use crate::interpolate::ProgressFn;
use crate::value::CompoundValue;

/// 原始字面值
#[derive(Debug, Clone)]
pub enum RawValue {
    /// 空值（解析时丢弃）
    Null,
    /// 字符串（解析时丢弃）
    Text(String),
    /// 标量
    Number(f32),
    /// 复合值
    Compound(CompoundValue),
    /// 带单属性缓动/进度函数的包装器
    Wrapped(Box<PropertyWrapper>),
}

/// 单属性包装器
#[derive(Clone)]
pub struct PropertyWrapper {
    pub value: RawValue,
    pub easing: Option<EasingSpec>,
    pub progress: Option<ProgressFn>,
}

impl fmt::Debug for PropertyWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyWrapper")
            .field("value", &self.value)
            .field("easing", &self.easing)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl PropertyWrapper {
    pub fn new(value: impl Into<RawValue>) -> Self {
        Self {
            value: value.into(),
            easing: None,
            progress: None,
        }
    }

    pub fn with_easing(mut self, easing: impl Into<EasingSpec>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    pub fn with_progress(mut self, progress: impl Fn(f32, f32, f32, f32) -> f32 + 'static) -> Self {
        self.progress = Some(Rc::new(progress));
        self
    }
}

impl From<f32> for RawValue {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value as f32)
    }
}

impl From<CompoundValue> for RawValue {
    fn from(value: CompoundValue) -> Self {
        Self::Compound(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<PropertyWrapper> for RawValue {
    fn from(value: PropertyWrapper) -> Self {
        Self::Wrapped(Box::new(value))
    }
}

/// 原始属性项
#[derive(Clone)]
pub enum RawProperty {
    /// 字面值
    Value(RawValue),
    /// 惰性提供函数
    Lazy(Rc<dyn Fn() -> RawValue>),
}

impl RawProperty {
    /// 由提供函数创建
    pub fn lazy(f: impl Fn() -> RawValue + 'static) -> Self {
        Self::Lazy(Rc::new(f))
    }

    /// 求出字面值
    fn evaluate(&self) -> RawValue {
        match self {
            Self::Value(v) => v.clone(),
            Self::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for RawProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<RawValue> for RawProperty {
    fn from(value: RawValue) -> Self {
        Self::Value(value)
    }
}

impl From<f32> for RawProperty {
    fn from(value: f32) -> Self {
        Self::Value(RawValue::Number(value))
    }
}

impl From<f64> for RawProperty {
    fn from(value: f64) -> Self {
        Self::Value(RawValue::from(value))
    }
}

impl From<CompoundValue> for RawProperty {
    fn from(value: CompoundValue) -> Self {
        Self::Value(RawValue::Compound(value))
    }
}

impl From<&str> for RawProperty {
    fn from(value: &str) -> Self {
        Self::Value(RawValue::from(value))
    }
}

impl From<PropertyWrapper> for RawProperty {
    fn from(value: PropertyWrapper) -> Self {
        Self::Value(RawValue::from(value))
    }
}

/// 原始属性表（保持插入顺序，同名覆盖）
#[derive(Debug, Clone, Default)]
pub struct RawProperties {
    entries: Vec<(String, RawProperty)>,
}

impl RawProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入属性（构建器风格）
    pub fn with(mut self, name: impl Into<String>, property: impl Into<RawProperty>) -> Self {
        self.insert(name, property);
        self
    }

    /// 插入属性，同名时覆盖原值并保持原位置
    pub fn insert(&mut self, name: impl Into<String>, property: impl Into<RawProperty>) {
        let name = name.into();
        let property = property.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = property,
            None => self.entries.push((name, property)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawProperty)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }
}

/// 已解析的目标值
#[derive(Debug, Clone, PartialEq)]
pub enum TweenValue {
    Scalar(f32),
    Compound(CompoundValue),
}

/// 已解析的属性描述（构造后不可变）
#[derive(Clone)]
pub struct PropertySpec {
    pub name: String,
    pub value: TweenValue,
    pub easing: Option<EasingFn>,
    pub progress: Option<ProgressFn>,
}

impl fmt::Debug for PropertySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySpec")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("easing", &self.easing.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// 字面值 → 目标值；空值与字符串返回 `None`
fn literal_value(value: RawValue) -> Option<TweenValue> {
    match value {
        RawValue::Number(n) => Some(TweenValue::Scalar(n)),
        RawValue::Compound(c) => Some(TweenValue::Compound(c)),
        RawValue::Null | RawValue::Text(_) | RawValue::Wrapped(_) => None,
    }
}

fn resolve_easing(
    spec: Option<EasingSpec>,
    registry: &EasingRegistry,
    warnings: &mut Vec<TweenWarning>,
) -> Option<EasingFn> {
    match spec? {
        EasingSpec::Function(f) => Some(f),
        EasingSpec::Named(name) => {
            let found = registry.get(&name);
            if found.is_none() {
                warn!(easing = %name, "未找到属性缓动函数，使用全局时间");
                warnings.push(TweenWarning::UnknownEasing { name });
            }
            found
        }
    }
}

/// 解析原始属性表
///
/// 按插入顺序处理每一项，返回属性描述列表与解析过程中产生的警告。
pub fn resolve_properties(
    raw: &RawProperties,
    registry: &EasingRegistry,
) -> (Vec<PropertySpec>, Vec<TweenWarning>) {
    let mut specs = Vec::with_capacity(raw.len());
    let mut warnings = Vec::new();

    for (name, property) in raw.iter() {
        let (value, easing, progress) = match property.evaluate() {
            RawValue::Wrapped(wrapper) => {
                let PropertyWrapper {
                    value,
                    easing,
                    progress,
                } = *wrapper;

                if easing.is_none() && progress.is_none() {
                    // 没有单属性设置的包装器只是普通对象：`{value: n}`
                    match value {
                        RawValue::Number(n) => (
                            Some(TweenValue::Compound(
                                CompoundValue::new().with("value", n),
                            )),
                            None,
                            None,
                        ),
                        _ => (None, None, None),
                    }
                } else {
                    let easing = resolve_easing(easing, registry, &mut warnings);
                    (literal_value(value), easing, progress)
                }
            }
            literal => (literal_value(literal), None, None),
        };

        let Some(value) = value else {
            continue;
        };

        specs.push(PropertySpec {
            name: name.to_string(),
            value,
            easing,
            progress,
        });
    }

    (specs, warnings)
}
