//! # Options 模块
//!
//! 补间选项：相对/绝对模式、全局缓动与进度函数、生命周期回调。
//!
//! 旧版的 `delay`、`repeat`、`repeat_delay`、`interpolation`、`on_stop`
//! 仍然可以传入以保持源码兼容，但不会产生任何效果，只会给出警告。
//! 延迟与重复由外部调度器负责。

use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::easing::{EasingFn, EasingRegistry, EasingSpec, adapt_easing_name};
use crate::error::TweenWarning;
use crate::interpolate::ProgressFn;

/// 接收目标对象的回调
pub type TargetCallback<T> = Rc<dyn Fn(&T)>;

/// 每帧更新回调 `(target, t)`
pub type UpdateCallback<T> = Rc<dyn Fn(&T, f32)>;

/// 补间选项
pub struct TweenOptions<T> {
    /// 是否为相对补间（终值 = 起始值 ± 给定值）
    pub relative: bool,
    /// 全局缓动
    pub easing: Option<EasingSpec>,
    /// 全局进度函数
    pub progress: Option<ProgressFn>,
    /// 开始回调
    pub on_start: Option<TargetCallback<T>>,
    /// 每帧回调
    pub on_update: Option<UpdateCallback<T>>,
    /// 完成回调（仅在 `t == 1` 的那一帧）
    pub on_complete: Option<TargetCallback<T>>,

    /// 已废弃：延迟
    pub delay: Option<f32>,
    /// 已废弃：重复次数
    pub repeat: Option<u32>,
    /// 已废弃：重复间隔
    pub repeat_delay: Option<f32>,
    /// 已废弃：插值方式
    pub interpolation: Option<String>,
    /// 已废弃：停止回调
    pub on_stop: Option<TargetCallback<T>>,
}

impl<T> Default for TweenOptions<T> {
    fn default() -> Self {
        Self {
            relative: false,
            easing: None,
            progress: None,
            on_start: None,
            on_update: None,
            on_complete: None,
            delay: None,
            repeat: None,
            repeat_delay: None,
            interpolation: None,
            on_stop: None,
        }
    }
}

impl<T> Clone for TweenOptions<T> {
    fn clone(&self) -> Self {
        Self {
            relative: self.relative,
            easing: self.easing.clone(),
            progress: self.progress.clone(),
            on_start: self.on_start.clone(),
            on_update: self.on_update.clone(),
            on_complete: self.on_complete.clone(),
            delay: self.delay,
            repeat: self.repeat,
            repeat_delay: self.repeat_delay,
            interpolation: self.interpolation.clone(),
            on_stop: self.on_stop.clone(),
        }
    }
}

impl<T> fmt::Debug for TweenOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenOptions")
            .field("relative", &self.relative)
            .field("easing", &self.easing)
            .field("progress", &self.progress.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> TweenOptions<T> {
    /// 创建默认选项（绝对模式，无缓动）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置相对模式
    pub fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    /// 设置全局缓动
    pub fn with_easing(mut self, easing: impl Into<EasingSpec>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// 设置全局进度函数
    pub fn with_progress(mut self, progress: impl Fn(f32, f32, f32, f32) -> f32 + 'static) -> Self {
        self.progress = Some(Rc::new(progress));
        self
    }

    /// 设置开始回调
    pub fn on_start(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.on_start = Some(Rc::new(f));
        self
    }

    /// 设置每帧回调
    pub fn on_update(mut self, f: impl Fn(&T, f32) + 'static) -> Self {
        self.on_update = Some(Rc::new(f));
        self
    }

    /// 设置完成回调
    pub fn on_complete(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    /// 已解析的全局缓动函数
    ///
    /// 名称形式的缓动在动作构造时已经查表替换，这里只返回函数形式。
    pub fn easing_fn(&self) -> Option<&EasingFn> {
        match &self.easing {
            Some(EasingSpec::Function(f)) => Some(f),
            _ => None,
        }
    }

    /// 将名称形式的全局缓动解析为函数
    ///
    /// 先做旧版名称适配，再查注册表；查不到时清空缓动并返回警告。
    pub(crate) fn resolve_easing(&mut self, registry: &EasingRegistry) -> Option<TweenWarning> {
        let Some(EasingSpec::Named(name)) = &self.easing else {
            return None;
        };

        let adapted = adapt_easing_name(name);
        match registry.get(&adapted) {
            Some(f) => {
                self.easing = Some(EasingSpec::Function(f));
                None
            }
            None => {
                warn!(easing = %adapted, "未找到缓动函数，使用线性时间");
                self.easing = None;
                Some(TweenWarning::UnknownEasing { name: adapted })
            }
        }
    }
}

/// 检查已废弃的旧版选项
///
/// 每个“有值”的字段产生一条警告（数值 0 与空字符串视为未设置）。
/// 不修改选项，也不会失败。
pub fn check_deprecated_options<T>(options: &TweenOptions<T>) -> Vec<TweenWarning> {
    let truthy = |v: Option<f32>| v.is_some_and(|v| v != 0.0 && !v.is_nan());

    let present = [
        ("delay", truthy(options.delay)),
        ("repeat", options.repeat.is_some_and(|r| r != 0)),
        ("repeatDelay", truthy(options.repeat_delay)),
        (
            "interpolation",
            options.interpolation.as_deref().is_some_and(|s| !s.is_empty()),
        ),
        ("onStop", options.on_stop.is_some()),
    ];

    present
        .into_iter()
        .filter(|(_, set)| *set)
        .map(|(option, _)| {
            let warning = TweenWarning::deprecated(option);
            warn!(option = option, "{}", warning);
            warning
        })
        .collect()
}
