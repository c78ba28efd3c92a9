//! # Interpolate 模块
//!
//! 进度函数：根据起点、终点、当前值与（缓动后的）时间计算新的当前值。

use std::rc::Rc;

/// 进度函数 `(start, end, current, t) -> new_current`
pub type ProgressFn = Rc<dyn Fn(f32, f32, f32, f32) -> f32>;

/// 默认的线性插值
///
/// `current` 参数不参与计算，仅为与自定义进度函数保持签名一致。
pub fn linear_progress(start: f32, end: f32, _current: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// 将闭包包装为 [`ProgressFn`]
pub fn progress_fn(f: impl Fn(f32, f32, f32, f32) -> f32 + 'static) -> ProgressFn {
    Rc::new(f)
}
