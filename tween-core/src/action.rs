//! # Action 模块
//!
//! 补间动作：在 `start` 时记录每个属性的起点/终点，
//! 之后每次 `step(t)` 计算插值并写回目标对象。
//!
//! ## 状态机
//!
//! ```text
//! Unstarted ──start──► Started ──step(t<1)──► Running ──step(1)──► Complete
//!                         ▲                                            │
//!                         └──────────────── start（重新记录）───────────┘
//! ```
//!
//! 动作不负责计时：时长累计、延迟、重复都由外部调度器处理，
//! 这里只消费已经归一化的 `t`。

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::easing::EasingRegistry;
use crate::error::TweenWarning;
use crate::interpolate::linear_progress;
use crate::options::{TweenOptions, check_deprecated_options};
use crate::property::{PropertySpec, RawProperties, TweenValue, resolve_properties};
use crate::target::Animatable;
use crate::value::{CompoundValue, PropertyValue, SharedCompound};

/// 动作 ID（由调度器分配，克隆时保留）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u64);

impl ActionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// 动作状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenState {
    /// 尚未开始
    #[default]
    Unstarted,
    /// 已记录起点，尚未更新
    Started,
    /// 至少更新过一次且未完成
    Running,
    /// 收到 `t == 1` 的更新
    Complete,
}

impl TweenState {
    /// 是否已经开始（包括已完成）
    pub fn is_started(&self) -> bool {
        !matches!(self, Self::Unstarted)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// 单个属性的运行时状态
///
/// 在 `start` 时创建，`end` 在整个运行期间保持不变，只有 `current` 会被更新。
#[derive(Debug, Clone)]
pub enum PropertyState {
    Scalar {
        start: f32,
        current: f32,
        end: f32,
    },
    Compound {
        start: BTreeMap<String, f32>,
        /// 与目标对象共享：每帧原地修改后写回
        current: SharedCompound,
        end: BTreeMap<String, f32>,
    },
}

impl PropertyState {
    /// 标量终值
    pub fn scalar_end(&self) -> Option<f32> {
        match self {
            Self::Scalar { end, .. } => Some(*end),
            Self::Compound { .. } => None,
        }
    }

    /// 复合值子字段的终值
    pub fn compound_end(&self, key: &str) -> Option<f32> {
        match self {
            Self::Scalar { .. } => None,
            Self::Compound { end, .. } => end.get(key).copied(),
        }
    }

    /// 复合值中被记录的子字段
    pub fn captured_keys(&self) -> Vec<String> {
        match self {
            Self::Scalar { .. } => Vec::new(),
            Self::Compound { start, .. } => start.keys().cloned().collect(),
        }
    }
}

/// 基础区间动作接口（调度器侧）
pub trait IntervalAction<T> {
    /// 时长（秒）
    fn duration(&self) -> f32;

    /// 绑定目标并开始
    fn start_with_target(&mut self, target: Option<Rc<T>>);

    /// 以归一化时间 `t` 更新
    fn update(&mut self, t: f32);
}

/// 克隆装饰钩子
///
/// 调度器在 `clone` / `reverse` 时借此把自己维护的元数据（速度、重复次数、标签等）
/// 复制到新动作上。
pub trait ActionDecoration<T: Animatable> {
    fn decorate(&self, source: &TweenAction<T>, clone: &mut TweenAction<T>);
}

impl<T, F> ActionDecoration<T> for F
where
    T: Animatable,
    F: Fn(&TweenAction<T>, &mut TweenAction<T>),
{
    fn decorate(&self, source: &TweenAction<T>, clone: &mut TweenAction<T>) {
        self(source, clone)
    }
}

/// 补间动作
pub struct TweenAction<T: Animatable> {
    duration: f32,
    /// 未解析的原始属性表（克隆间共享）
    raw: Rc<RawProperties>,
    /// 选项（克隆间共享）
    options: Rc<TweenOptions<T>>,
    registry: Rc<EasingRegistry>,
    specs: Vec<PropertySpec>,
    states: HashMap<String, PropertyState>,
    reversed: bool,
    target: Option<Rc<T>>,
    /// 实际写入的目标（优先于 `target`）
    mutation_target: Option<Rc<T>>,
    id: Option<ActionId>,
    tag: Option<String>,
    decoration: Option<Rc<dyn ActionDecoration<T>>>,
    state: TweenState,
    warnings: Vec<TweenWarning>,
}

impl<T: Animatable> fmt::Debug for TweenAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenAction")
            .field("duration", &self.duration)
            .field("relative", &self.options.relative)
            .field("reversed", &self.reversed)
            .field("specs", &self.specs.len())
            .field("states", &self.states.len())
            .field("state", &self.state)
            .field("id", &self.id)
            .finish()
    }
}

impl<T: Animatable> TweenAction<T> {
    /// 创建补间动作
    ///
    /// 构造时依次完成：检查废弃选项、解析全局缓动（含旧版名称适配）、解析属性表。
    pub fn new(
        duration: f32,
        props: RawProperties,
        options: TweenOptions<T>,
        registry: Rc<EasingRegistry>,
    ) -> Self {
        let mut options = options;
        let mut warnings = Vec::new();

        // 全局缓动只解析一次，之后克隆共享已解析的函数
        if let Some(warning) = options.resolve_easing(&registry) {
            warnings.push(warning);
        }

        let mut action = Self::from_shared(duration, Rc::new(props), Rc::new(options), registry);
        warnings.append(&mut action.warnings);
        action.warnings = warnings;
        action
    }

    fn from_shared(
        duration: f32,
        raw: Rc<RawProperties>,
        options: Rc<TweenOptions<T>>,
        registry: Rc<EasingRegistry>,
    ) -> Self {
        let mut warnings = check_deprecated_options(&options);
        let (specs, mut spec_warnings) = resolve_properties(&raw, &registry);
        warnings.append(&mut spec_warnings);

        Self {
            duration,
            raw,
            options,
            registry,
            specs,
            states: HashMap::new(),
            reversed: false,
            target: None,
            mutation_target: None,
            id: None,
            tag: None,
            decoration: None,
            state: TweenState::Unstarted,
            warnings,
        }
    }

    /// 时长（秒）
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// 是否为相对补间
    pub fn relative(&self) -> bool {
        self.options.relative
    }

    /// 是否处于反向状态
    pub fn reversed(&self) -> bool {
        self.reversed
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn options(&self) -> &TweenOptions<T> {
        &self.options
    }

    /// 已解析的属性描述
    pub fn specs(&self) -> &[PropertySpec] {
        &self.specs
    }

    /// 属性的运行时状态（目标上不存在的属性返回 `None`）
    pub fn property_state(&self, name: &str) -> Option<&PropertyState> {
        self.states.get(name)
    }

    /// 构造与运行过程中产生的警告
    pub fn warnings(&self) -> &[TweenWarning] {
        &self.warnings
    }

    pub fn id(&self) -> Option<ActionId> {
        self.id
    }

    pub fn set_id(&mut self, id: ActionId) {
        self.id = Some(id);
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    /// 最近一次 `start` 传入的目标
    pub fn target(&self) -> Option<&Rc<T>> {
        self.target.as_ref()
    }

    pub fn mutation_target(&self) -> Option<&Rc<T>> {
        self.mutation_target.as_ref()
    }

    /// 指定实际写入的目标，覆盖 `start` 传入的目标
    pub fn set_mutation_target(&mut self, target: Option<Rc<T>>) {
        self.mutation_target = target;
    }

    /// 设置克隆装饰钩子
    pub fn set_decoration(&mut self, decoration: impl ActionDecoration<T> + 'static) {
        self.decoration = Some(Rc::new(decoration));
    }

    /// 实际写入的目标：覆盖目标优先，否则为 `start` 传入的目标
    fn worker_target(&self) -> Option<Rc<T>> {
        self.mutation_target.clone().or_else(|| self.target.clone())
    }

    fn end_value(&self, current: f32, value: f32) -> f32 {
        match (self.options.relative, self.reversed) {
            (true, false) => current + value,
            (true, true) => current - value,
            (false, _) => value,
        }
    }

    fn capture(&self, spec: &PropertySpec, reading: PropertyValue) -> Option<PropertyState> {
        match (&spec.value, reading) {
            (TweenValue::Scalar(value), PropertyValue::Number(current)) => Some(PropertyState::Scalar {
                start: current,
                current,
                end: self.end_value(current, *value),
            }),
            (TweenValue::Compound(value), PropertyValue::Compound(reading)) => {
                let reading = reading.borrow();
                let mut start = BTreeMap::new();
                let mut end = BTreeMap::new();

                for key in value.modifiable_keys() {
                    let Some(current) = reading.get(&key).filter(|v| !v.is_nan()) else {
                        continue;
                    };
                    let Some(target) = value.get(&key) else {
                        continue;
                    };
                    start.insert(key.clone(), current);
                    end.insert(key, self.end_value(current, target));
                }

                let current = CompoundValue::from_fields(start.clone()).into_shared();
                Some(PropertyState::Compound {
                    start,
                    current,
                    end,
                })
            }
            _ => {
                debug!(property = %spec.name, "属性类型与目标值不匹配，跳过");
                None
            }
        }
    }

    /// 绑定目标并记录每个属性的起点与终点
    ///
    /// 没有可写入的目标时直接返回，不记录状态、不触发回调。
    /// 再次调用会重新记录全部状态。
    pub fn start(&mut self, target: Option<Rc<T>>) {
        self.target = target;
        let Some(worker) = self.worker_target() else {
            return;
        };

        let mut states = HashMap::with_capacity(self.specs.len());
        for spec in &self.specs {
            let Some(reading) = worker.get_property(&spec.name) else {
                continue;
            };
            if let Some(state) = self.capture(spec, reading) {
                states.insert(spec.name.clone(), state);
            }
        }
        self.states = states;
        self.state = TweenState::Started;

        debug!(
            properties = self.states.len(),
            relative = self.options.relative,
            reversed = self.reversed,
            "补间开始"
        );

        if let Some(on_start) = &self.options.on_start {
            on_start(&worker);
        }
    }

    /// 以归一化时间 `t` 更新（调用方保证 `t` 单调不减）
    pub fn step(&mut self, t: f32) {
        let Some(worker) = self.worker_target() else {
            return;
        };
        let options = Rc::clone(&self.options);

        let easing_time = options.easing_fn().map_or(t, |easing| easing(t));

        for spec in &self.specs {
            let Some(state) = self.states.get_mut(&spec.name) else {
                continue;
            };

            let time = spec.easing.as_ref().map_or(easing_time, |easing| easing(t));
            let progress: &dyn Fn(f32, f32, f32, f32) -> f32 =
                match spec.progress.as_ref().or(options.progress.as_ref()) {
                    Some(progress) => &**progress,
                    None => &linear_progress,
                };

            match state {
                PropertyState::Scalar {
                    start,
                    current,
                    end,
                } => {
                    *current = progress(*start, *end, *current, time);
                    if !worker.set_property(&spec.name, PropertyValue::Number(*current)) {
                        debug!(property = %spec.name, "目标拒绝写入属性");
                    }
                }
                PropertyState::Compound {
                    start,
                    current,
                    end,
                } => {
                    {
                        let mut values = current.borrow_mut();
                        for (key, &from) in start.iter() {
                            let Some(&to) = end.get(key) else {
                                continue;
                            };
                            let now = values.get(key).unwrap_or(from);
                            values.set(key.clone(), progress(from, to, now, time));
                        }
                    }
                    // 写回同一个共享引用
                    if !worker.set_property(&spec.name, PropertyValue::Compound(Rc::clone(current))) {
                        debug!(property = %spec.name, "目标拒绝写入属性");
                    }
                }
            }
        }

        if let Some(on_update) = &options.on_update {
            on_update(&worker, t);
        }

        if t == 1.0 {
            self.state = TweenState::Complete;
            debug!("补间完成");
            if let Some(on_complete) = &options.on_complete {
                on_complete(&worker);
            }
        } else {
            self.state = TweenState::Running;
        }
    }

    /// 以相同的原始输入构造兄弟动作
    fn sibling(&self, reversed: bool) -> Self {
        let mut action = Self::from_shared(
            self.duration,
            Rc::clone(&self.raw),
            Rc::clone(&self.options),
            Rc::clone(&self.registry),
        );
        action.reversed = reversed;
        action.mutation_target = self.mutation_target.clone();
        action.id = self.id;
        action.decoration = self.decoration.clone();
        if let Some(decoration) = &self.decoration {
            decoration.decorate(self, &mut action);
        }
        action
    }

    /// 反向动作
    ///
    /// 只对相对补间有意义：返回方向翻转的兄弟动作，两次反转回到原方向。
    /// 非相对补间给出警告，并返回一个时长为 0、没有任何属性的空动作；
    /// 原动作保持不变。
    pub fn reverse(&self) -> Self {
        if !self.options.relative {
            let warning = TweenWarning::NonRelativeReverse;
            warn!("{}", warning);
            let mut action = Self::new(
                0.0,
                RawProperties::new(),
                TweenOptions::new(),
                Rc::clone(&self.registry),
            );
            action.warnings.push(warning);
            return action;
        }

        self.sibling(!self.reversed)
    }
}

/// 克隆得到一个未开始的兄弟动作
///
/// 时长、原始属性表与选项共享同一份；属性描述重新解析（惰性提供函数会再次调用），
/// 运行时状态不复制。保留 `reversed`、写入目标覆盖、ID 与装饰钩子。
impl<T: Animatable> Clone for TweenAction<T> {
    fn clone(&self) -> Self {
        self.sibling(self.reversed)
    }
}

impl<T: Animatable> IntervalAction<T> for TweenAction<T> {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn start_with_target(&mut self, target: Option<Rc<T>>) {
        self.start(target);
    }

    fn update(&mut self, t: f32) {
        self.step(t);
    }
}
