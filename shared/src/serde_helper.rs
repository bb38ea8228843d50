//! 宽松的反序列化辅助函数
//!
//! 统计接口返回的值类型不稳定：数字、数字字符串、`null` 甚至空字符串都会出现。
//! 这里统一按 `Number(x) || 0` 的规则处理。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 把任意 JSON 值解释为非负有限数，无法解释时为 0
pub fn lenient_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// 把任意 JSON 值解释为字符串，数字按其文本形式保留
pub fn lenient_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn de_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value))
}

pub fn de_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_string(&value))
}

pub fn de_lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(lenient_string(&other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_follow_js_coercion() {
        assert_eq!(lenient_number(&json!(42)), 42.0);
        assert_eq!(lenient_number(&json!("17")), 17.0);
        assert_eq!(lenient_number(&json!(" 3.5 ")), 3.5);
        assert_eq!(lenient_number(&json!("abc")), 0.0);
        assert_eq!(lenient_number(&json!(null)), 0.0);
        assert_eq!(lenient_number(&json!("")), 0.0);
        assert_eq!(lenient_number(&json!({"a": 1})), 0.0);
    }

    #[test]
    fn strings_keep_numeric_text() {
        assert_eq!(lenient_string(&json!(120)), "120");
        assert_eq!(lenient_string(&json!("₹5 Cr")), "₹5 Cr");
        assert_eq!(lenient_string(&json!(null)), "");
    }
}
