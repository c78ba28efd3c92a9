//! # 内置缓动函数
//!
//! 常用缓动曲线的实现，注册名遵循 `<family><Mode>` 形式，例如 `quadIn`、`expoInOut`。

use std::f32::consts::PI;

/// 缓动曲线族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EasingFamily {
    /// 二次
    Quad,
    /// 三次
    Cubic,
    /// 四次
    Quart,
    /// 五次
    Quint,
    /// 正弦
    Sine,
    /// 指数
    Expo,
    /// 圆形
    Circ,
    /// 弹性
    Elastic,
    /// 回退
    Back,
    /// 弹跳
    Bounce,
}

/// 缓动模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EasingMode {
    /// 缓入（先慢后快）
    In,
    /// 缓出（先快后慢）
    Out,
    /// 缓入缓出（两头慢中间快）
    InOut,
    /// 缓出缓入（两头快中间慢）
    OutIn,
}

/// 内置缓动函数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinEasing {
    /// 线性（匀速）
    Linear,
    /// smoothstep
    Smooth,
    /// smootherstep
    Fade,
    /// 恒为 0
    Constant,
    /// 曲线族 + 模式
    Curve(EasingFamily, EasingMode),
}

impl EasingFamily {
    pub const ALL: [EasingFamily; 10] = [
        Self::Quad,
        Self::Cubic,
        Self::Quart,
        Self::Quint,
        Self::Sine,
        Self::Expo,
        Self::Circ,
        Self::Elastic,
        Self::Back,
        Self::Bounce,
    ];

    /// 注册名前缀
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Quad => "quad",
            Self::Cubic => "cubic",
            Self::Quart => "quart",
            Self::Quint => "quint",
            Self::Sine => "sine",
            Self::Expo => "expo",
            Self::Circ => "circ",
            Self::Elastic => "elastic",
            Self::Back => "back",
            Self::Bounce => "bounce",
        }
    }

    fn ease_in(&self, k: f32) -> f32 {
        match self {
            Self::Quad => k * k,
            Self::Cubic => k * k * k,
            Self::Quart => k.powi(4),
            Self::Quint => k.powi(5),
            Self::Sine => {
                if k == 1.0 {
                    1.0
                } else {
                    1.0 - (k * PI / 2.0).cos()
                }
            }
            Self::Expo => {
                if k == 0.0 {
                    0.0
                } else {
                    1024.0_f32.powf(k - 1.0)
                }
            }
            Self::Circ => 1.0 - (1.0 - k * k).sqrt(),
            Self::Elastic => elastic_in(k),
            Self::Back => {
                let s = BACK_OVERSHOOT;
                k * k * ((s + 1.0) * k - s)
            }
            Self::Bounce => 1.0 - bounce_out(1.0 - k),
        }
    }

    fn ease_out(&self, k: f32) -> f32 {
        match self {
            Self::Quad => k * (2.0 - k),
            Self::Cubic => (k - 1.0).powi(3) + 1.0,
            Self::Quart => 1.0 - (k - 1.0).powi(4),
            Self::Quint => (k - 1.0).powi(5) + 1.0,
            Self::Sine => (k * PI / 2.0).sin(),
            Self::Expo => {
                if k == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * k)
                }
            }
            Self::Circ => (1.0 - (k - 1.0).powi(2)).sqrt(),
            Self::Elastic => elastic_out(k),
            Self::Back => {
                let s = BACK_OVERSHOOT;
                let k = k - 1.0;
                k * k * ((s + 1.0) * k + s) + 1.0
            }
            Self::Bounce => bounce_out(k),
        }
    }

    fn ease_in_out(&self, k: f32) -> f32 {
        match self {
            Self::Sine => 0.5 * (1.0 - (PI * k).cos()),
            Self::Expo => {
                if k == 0.0 || k == 1.0 {
                    return k;
                }
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * 1024.0_f32.powf(k - 1.0)
                } else {
                    0.5 * (2.0 - 2.0_f32.powf(-10.0 * (k - 1.0)))
                }
            }
            Self::Elastic => elastic_in_out(k),
            Self::Back => {
                let s = BACK_OVERSHOOT * 1.525;
                let k = k * 2.0;
                if k < 1.0 {
                    0.5 * (k * k * ((s + 1.0) * k - s))
                } else {
                    let k = k - 2.0;
                    0.5 * (k * k * ((s + 1.0) * k + s) + 2.0)
                }
            }
            // 其余曲线：前半段缓入、后半段缓出
            _ => {
                if k < 0.5 {
                    self.ease_in(k * 2.0) * 0.5
                } else {
                    self.ease_out(k * 2.0 - 1.0) * 0.5 + 0.5
                }
            }
        }
    }

    fn ease_out_in(&self, k: f32) -> f32 {
        if k < 0.5 {
            self.ease_out(k * 2.0) * 0.5
        } else {
            self.ease_in(2.0 * k - 1.0) * 0.5 + 0.5
        }
    }
}

impl EasingMode {
    pub const ALL: [EasingMode; 4] = [Self::In, Self::Out, Self::InOut, Self::OutIn];

    /// 注册名后缀
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
            Self::InOut => "InOut",
            Self::OutIn => "OutIn",
        }
    }
}

impl BuiltinEasing {
    /// 全部内置缓动函数
    pub fn all() -> Vec<BuiltinEasing> {
        let mut all = vec![Self::Linear, Self::Smooth, Self::Fade, Self::Constant];
        for family in EasingFamily::ALL {
            for mode in EasingMode::ALL {
                all.push(Self::Curve(family, mode));
            }
        }
        all
    }

    /// 注册名
    pub fn name(&self) -> String {
        match self {
            Self::Linear => "linear".to_string(),
            Self::Smooth => "smooth".to_string(),
            Self::Fade => "fade".to_string(),
            Self::Constant => "constant".to_string(),
            Self::Curve(family, mode) => format!("{}{}", family.prefix(), mode.suffix()),
        }
    }

    /// 计算缓动值
    ///
    /// # 参数
    /// - `k`: 时间进度 (0.0 - 1.0)
    ///
    /// 不做裁剪：回退、弹性等曲线会短暂超出 `[0, 1]`。
    pub fn apply(&self, k: f32) -> f32 {
        match self {
            Self::Linear => k,
            Self::Smooth => k * k * (3.0 - 2.0 * k),
            Self::Fade => k * k * k * (k * (k * 6.0 - 15.0) + 10.0),
            Self::Constant => 0.0,
            Self::Curve(family, mode) => match mode {
                EasingMode::In => family.ease_in(k),
                EasingMode::Out => family.ease_out(k),
                EasingMode::InOut => family.ease_in_out(k),
                EasingMode::OutIn => family.ease_out_in(k),
            },
        }
    }
}

const BACK_OVERSHOOT: f32 = 1.70158;
const ELASTIC_PERIOD: f32 = 0.4;

fn elastic_in(k: f32) -> f32 {
    if k == 0.0 || k == 1.0 {
        return k;
    }
    let s = ELASTIC_PERIOD / 4.0;
    let k = k - 1.0;
    -(2.0_f32.powf(10.0 * k) * ((k - s) * (2.0 * PI) / ELASTIC_PERIOD).sin())
}

fn elastic_out(k: f32) -> f32 {
    if k == 0.0 || k == 1.0 {
        return k;
    }
    let s = ELASTIC_PERIOD / 4.0;
    2.0_f32.powf(-10.0 * k) * ((k - s) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
}

fn elastic_in_out(k: f32) -> f32 {
    if k == 0.0 || k == 1.0 {
        return k;
    }
    let s = ELASTIC_PERIOD / 4.0;
    let k = k * 2.0 - 1.0;
    let wave = ((k - s) * (2.0 * PI) / ELASTIC_PERIOD).sin();
    if k < 0.0 {
        -0.5 * 2.0_f32.powf(10.0 * k) * wave
    } else {
        2.0_f32.powf(-10.0 * k) * wave * 0.5 + 1.0
    }
}

fn bounce_out(k: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if k < 1.0 / d1 {
        n1 * k * k
    } else if k < 2.0 / d1 {
        let k = k - 1.5 / d1;
        n1 * k * k + 0.75
    } else if k < 2.5 / d1 {
        let k = k - 2.25 / d1;
        n1 * k * k + 0.9375
    } else {
        let k = k - 2.625 / d1;
        n1 * k * k + 0.984375
    }
}
