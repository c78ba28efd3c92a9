//! # Tween Core
//!
//! 属性补间（Tween）插值引擎。
//!
//! ## 架构概述
//!
//! `tween-core` 只负责插值，不负责计时。外部调度器决定何时、以何种频率驱动动作：
//!
//! ```text
//! Scheduler                        TweenAction
//!   │                                  │
//!   │──── new(duration, props, opts) ─►│ 检查废弃选项 / 适配缓动名 / 解析属性表
//!   │──── start(target) ──────────────►│ 记录每个属性的起点与终点
//!   │──── step(t) ... step(1.0) ──────►│ 插值并写回目标，触发回调
//!   │                                  │
//! ```
//!
//! ## 核心类型
//!
//! - [`TweenAction`]：补间动作与状态机
//! - [`TweenOptions`]：相对模式、缓动、进度函数与回调
//! - [`RawProperties`]：原始属性表（字面值 / 提供函数 / 包装器）
//! - [`Animatable`]：目标对象接口，[`PropertyBag`] 为纯数据实现
//! - [`EasingRegistry`]：缓动函数注册表
//! - [`TweenDefinition`]：JSON 补间定义
//!
//! ## 使用示例
//!
//! ```ignore
//! use std::rc::Rc;
//! use tween_core::{EasingRegistry, PropertyBag, RawProperties, TweenAction, TweenOptions};
//!
//! let registry = Rc::new(EasingRegistry::with_builtins());
//! let target = Rc::new(PropertyBag::new().with_number("opacity", 1.0));
//!
//! let mut fade = TweenAction::new(
//!     0.3,
//!     RawProperties::new().with("opacity", 0.0),
//!     TweenOptions::new().with_easing("quadOut"),
//!     registry,
//! );
//!
//! fade.start(Some(target.clone()));
//! for t in [0.25, 0.5, 0.75, 1.0] {
//!     fade.step(t);
//! }
//! assert_eq!(target.number("opacity"), Some(0.0));
//! ```
//!
//! ## 模块结构
//!
//! - [`action`]：补间动作
//! - [`config`]：JSON 补间定义
//! - [`easing`]：缓动函数与旧版名称适配
//! - [`error`]：警告与错误类型
//! - [`interpolate`]：进度函数
//! - [`options`]：补间选项
//! - [`property`]：属性表解析
//! - [`target`]：目标对象接口
//! - [`value`]：属性值

pub mod action;
pub mod config;
pub mod easing;
pub mod error;
pub mod interpolate;
pub mod options;
pub mod property;
pub mod target;
pub mod value;

// 重导出核心类型
pub use action::{
    ActionDecoration, ActionId, IntervalAction, PropertyState, TweenAction, TweenState,
};
pub use config::{OptionsConfig, TweenDefinition};
pub use easing::{
    BuiltinEasing, EasingFamily, EasingFn, EasingMode, EasingRegistry, EasingSpec,
    adapt_easing_name,
};
pub use error::{ConfigError, ConfigResult, TweenWarning, VERSION};
pub use interpolate::{ProgressFn, linear_progress, progress_fn};
pub use options::{TargetCallback, TweenOptions, UpdateCallback, check_deprecated_options};
pub use property::{
    PropertySpec, PropertyWrapper, RawProperties, RawProperty, RawValue, TweenValue,
    resolve_properties,
};
pub use target::{Animatable, PropertyBag};
pub use value::{CompoundValue, PropertyValue, SharedCompound};
