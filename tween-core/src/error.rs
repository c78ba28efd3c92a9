//! # Error 模块
//!
//! 定义 tween-core 中使用的警告与错误类型。
//!
//! 插值引擎本身不会失败：所有异常情况都降级为 [`TweenWarning`]，
//! 记录到日志并挂在动作上。只有配置加载会返回 [`ConfigError`]。

use std::path::PathBuf;

use thiserror::Error;

/// 当前 crate 版本，用于弃用提示
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 非致命警告
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TweenWarning {
    /// 缓动函数名在注册表中不存在
    #[error("[Tween] 未找到缓动函数 '{name}'，将使用默认时间映射")]
    UnknownEasing { name: String },

    /// 传入了已废弃的选项
    #[error("[Tween] 选项 '{option}' 在 v{version} 中不受支持")]
    DeprecatedOption {
        option: &'static str,
        version: &'static str,
    },

    /// 对非相对动作调用 reverse
    #[error("[Tween] reverse: 无法反转非相对（relative = false）的动作")]
    NonRelativeReverse,
}

impl TweenWarning {
    /// 创建废弃选项警告（自动填充版本号）
    pub fn deprecated(option: &'static str) -> Self {
        Self::DeprecatedOption {
            option,
            version: VERSION,
        }
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("配置解析失败: {0}")]
    Json(#[from] serde_json::Error),

    /// 时长无效
    #[error("无效的动画时长 {duration}，必须是非负有限数")]
    InvalidDuration { duration: f32 },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deprecated_message_names_option_and_version() {
        let warning = TweenWarning::deprecated("repeatDelay");
        let message = warning.to_string();
        assert!(message.contains("repeatDelay"));
        assert!(message.contains(VERSION));
    }

    #[test]
    fn test_unknown_easing_message() {
        let warning = TweenWarning::UnknownEasing {
            name: "wobble".to_string(),
        };
        assert!(warning.to_string().contains("'wobble'"));
    }
}
