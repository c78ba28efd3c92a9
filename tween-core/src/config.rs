//! # Config 模块
//!
//! 以 JSON 描述补间定义，便于数据驱动地构造动作。
//!
//! ```json
//! {
//!   "duration": 0.5,
//!   "props": {
//!     "opacity": 0,
//!     "position": { "x": 100, "y": 20 },
//!     "scale": { "value": 2, "easing": "backOut" }
//!   },
//!   "options": { "relative": false, "easing": "Quadratic-In" }
//! }
//! ```
//!
//! 属性值的映射规则：
//! - 数字 → 标量
//! - 同时带 `value` 与 `easing` 的对象 → 单属性包装器
//! - 其它对象 → 复合值（只保留数字字段）；数组 → 以下标为键的复合值
//! - 字符串 / null → 原样保留，由解析阶段丢弃
//!
//! `props` 按 JSON 中的书写顺序展开。

use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::TweenAction;
use crate::easing::EasingRegistry;
use crate::error::{ConfigError, ConfigResult};
use crate::options::TweenOptions;
use crate::property::{PropertyWrapper, RawProperties, RawValue};
use crate::target::Animatable;
use crate::value::CompoundValue;

/// 补间定义
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TweenDefinition {
    /// 时长（秒）
    pub duration: f32,

    /// 属性表
    #[serde(default)]
    pub props: Map<String, Value>,

    /// 选项
    #[serde(default)]
    pub options: OptionsConfig,
}

/// 选项配置
///
/// 旧版字段仍可解析，但只会产生警告。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptionsConfig {
    /// 相对模式
    #[serde(default)]
    pub relative: bool,

    /// 全局缓动名（支持旧版名称）
    #[serde(default)]
    pub easing: Option<String>,

    /// 已废弃
    #[serde(default)]
    pub delay: Option<f32>,

    /// 已废弃
    #[serde(default)]
    pub repeat: Option<u32>,

    /// 已废弃
    #[serde(default)]
    pub repeat_delay: Option<f32>,

    /// 已废弃
    #[serde(default)]
    pub interpolation: Option<String>,
}

impl TweenDefinition {
    /// 从 JSON 字符串解析
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let definition: Self = serde_json::from_str(text)?;
        definition.validate()?;
        Ok(definition)
    }

    /// 从文件加载
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    fn validate(&self) -> ConfigResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ConfigError::InvalidDuration {
                duration: self.duration,
            });
        }
        Ok(())
    }

    /// 转换为原始属性表
    pub fn raw_properties(&self) -> RawProperties {
        self.props
            .iter()
            .fold(RawProperties::new(), |raw, (name, value)| {
                raw.with(name.as_str(), raw_value(value))
            })
    }

    /// 转换为选项（回调需另行设置）
    pub fn options<T>(&self) -> TweenOptions<T> {
        let config = &self.options;
        let mut options = TweenOptions::new().with_relative(config.relative);
        if let Some(easing) = &config.easing {
            options = options.with_easing(easing.as_str());
        }
        options.delay = config.delay;
        options.repeat = config.repeat;
        options.repeat_delay = config.repeat_delay;
        options.interpolation = config.interpolation.clone();
        options
    }

    /// 构造补间动作
    pub fn build<T: Animatable>(&self, registry: Rc<EasingRegistry>) -> TweenAction<T> {
        self.build_with(self.options(), registry)
    }

    /// 以自定义选项（例如附带回调）构造补间动作
    pub fn build_with<T: Animatable>(
        &self,
        options: TweenOptions<T>,
        registry: Rc<EasingRegistry>,
    ) -> TweenAction<T> {
        TweenAction::new(self.duration, self.raw_properties(), options, registry)
    }
}

fn compound_from<'a>(entries: impl Iterator<Item = (String, &'a Value)>) -> CompoundValue {
    entries.fold(CompoundValue::new(), |compound, (key, value)| match value.as_f64() {
        Some(n) => compound.with(key, n as f32),
        None => compound,
    })
}

fn raw_value(value: &Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Number(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => RawValue::Number(n.as_f64().unwrap_or(f64::NAN) as f32),
        Value::String(s) => RawValue::Text(s.clone()),
        Value::Array(items) => RawValue::Compound(compound_from(
            items.iter().enumerate().map(|(i, v)| (i.to_string(), v)),
        )),
        Value::Object(fields) => match fields.get("value") {
            Some(inner) if fields.contains_key("easing") => {
                let mut wrapper = PropertyWrapper::new(raw_value(inner));
                if let Some(easing) = fields.get("easing").and_then(Value::as_str) {
                    wrapper = wrapper.with_easing(easing);
                }
                RawValue::from(wrapper)
            }
            _ => RawValue::Compound(compound_from(fields.iter().map(|(k, v)| (k.clone(), v)))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TweenWarning;
    use crate::property::TweenValue;
    use crate::target::PropertyBag;

    const SAMPLE: &str = r#"{
        "duration": 0.5,
        "props": {
            "opacity": 0,
            "position": { "x": 100, "y": 20, "label": "ignored" },
            "scale": { "value": 2, "easing": "backOut" },
            "name": "hero",
            "nothing": null
        },
        "options": { "relative": true, "easing": "Quadratic-In", "repeatDelay": 0.2 }
    }"#;

    #[test]
    fn test_parse_definition() {
        let def = TweenDefinition::from_json(SAMPLE).unwrap();
        assert_eq!(def.duration, 0.5);
        assert!(def.options.relative);
        assert_eq!(def.options.easing.as_deref(), Some("Quadratic-In"));
        assert_eq!(def.options.repeat_delay, Some(0.2));
        assert_eq!(def.props.len(), 5);
    }

    #[test]
    fn test_defaults_when_options_missing() {
        let def = TweenDefinition::from_json(r#"{ "duration": 1 }"#).unwrap();
        assert_eq!(def.options, OptionsConfig::default());
        assert!(def.props.is_empty());
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let err = TweenDefinition::from_json(r#"{ "duration": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = TweenDefinition::from_json("{ duration: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = TweenDefinition::from_file("does/not/exist.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("exist.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_resolves_properties() {
        let def = TweenDefinition::from_json(SAMPLE).unwrap();
        let action: TweenAction<PropertyBag> = def.build(Rc::new(EasingRegistry::with_builtins()));

        let names: Vec<&str> = action.specs().iter().map(|s| s.name.as_str()).collect();
        // 字符串与 null 被丢弃
        assert_eq!(names, vec!["opacity", "position", "scale"]);

        let position = action.specs().iter().find(|s| s.name == "position").unwrap();
        assert_eq!(
            position.value,
            TweenValue::Compound(CompoundValue::new().with("x", 100.0).with("y", 20.0))
        );

        let scale = action.specs().iter().find(|s| s.name == "scale").unwrap();
        assert_eq!(scale.value, TweenValue::Scalar(2.0));
        assert!(scale.easing.is_some());

        assert_eq!(action.warnings(), &[TweenWarning::deprecated("repeatDelay")]);
        assert!(action.relative());
    }

    #[test]
    fn test_array_becomes_indexed_compound() {
        let value = raw_value(&serde_json::json!([1.0, 2.0]));
        match value {
            RawValue::Compound(c) => {
                assert_eq!(c.get("0"), Some(1.0));
                assert_eq!(c.get("1"), Some(2.0));
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_props_keep_document_order() {
        let def = TweenDefinition::from_json(
            r#"{ "duration": 1, "props": { "zoom": 2, "alpha": 0, "middle": 1 } }"#,
        )
        .unwrap();
        let raw = def.raw_properties();
        let names: Vec<&str> = raw.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zoom", "alpha", "middle"]);

        let action: TweenAction<PropertyBag> = def.build(Rc::new(EasingRegistry::with_builtins()));
        let names: Vec<&str> = action.specs().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zoom", "alpha", "middle"]);
    }
}
