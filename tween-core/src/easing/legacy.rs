//! # 旧版缓动名适配
//!
//! 旧版 API 使用 `Quadratic-In`、`Linear-None` 这类首字母大写、以 `-` 分隔的名称，
//! 这里把它们转换为注册表使用的规范名（`quadIn`、`linear`）。

/// 旧版曲线族名 → 规范前缀
fn map_family(family: &str) -> &str {
    match family {
        "quadratic" => "quad",
        "quartic" => "quart",
        "quintic" => "quint",
        "sinusoidal" => "sine",
        "exponential" => "expo",
        "circular" => "circ",
        other => other,
    }
}

/// 将旧版缓动名转换为规范名
///
/// - 首字母不是大写字母：视为已是规范名，原样返回
/// - 否则首字母转小写后按 `-` 拆分：
///   - 恰好两段且族名为 `linear`：返回 `"linear"`
///   - 恰好两段：族名映射后与后缀拼接
///   - 其它段数：仅返回首字母小写后的名称
pub fn adapt_easing_name(name: &str) -> String {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) if c.is_ascii_uppercase() => c,
        _ => return name.to_string(),
    };

    let lowered = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
    let parts: Vec<&str> = lowered.split('-').collect();

    match parts.as_slice() {
        ["linear", _] => "linear".to_string(),
        [family, suffix] => format!("{}{}", map_family(family), suffix),
        _ => lowered,
    }
}
