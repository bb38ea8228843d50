//! 统计数字与日期的展示格式化

use chrono::{DateTime, Utc};

/// About 页面金额换算单位：10^8 个原始单位记为 1 Cr
pub const ABOUT_CURRENCY_UNIT: f64 = 100_000_000.0;

/// 印度数字分组：末三位一组，其余每两位一组 (`1,23,45,678`)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// 等价于 `toLocaleString('en-IN')`：最多保留三位小数
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let int_part = rounded.trunc();
    let frac = format!("{:.3}", rounded - int_part);
    let frac = frac.trim_start_matches('0').trim_end_matches('0');
    let frac = if frac == "." { "" } else { frac };

    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, group_indian(&format!("{:.0}", int_part)), frac)
}

/// `₹X.XX Cr+`
pub fn format_about_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("₹{:.2} Cr+", value / ABOUT_CURRENCY_UNIT)
}

/// 首页 / 加入页的资金计数 `₹X Cr`
pub fn format_crore(value: f64) -> String {
    format!("₹{} Cr", format_count(value))
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_count(value))
}

/// 项目卡片上的创建日期，如 `12 Mar 2024`
pub fn format_display_date(date: &DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

// =========================================================
// StatDisplay
// =========================================================

/// 一个待渲染的统计值
///
/// `placeholder` 为真时以灰色占位样式展示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatDisplay {
    pub text: String,
    pub placeholder: bool,
}

impl StatDisplay {
    fn value(text: String) -> Self {
        Self {
            text,
            placeholder: false,
        }
    }

    fn placeholder(text: &str) -> Self {
        Self {
            text: text.to_string(),
            placeholder: true,
        }
    }

    pub fn count(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            Self::placeholder("0")
        } else {
            Self::value(format_count(value))
        }
    }

    pub fn percent(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            Self::placeholder("0%")
        } else {
            Self::value(format_percent(value))
        }
    }

    pub fn crore(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            Self::placeholder("0")
        } else {
            Self::value(format_crore(value))
        }
    }

    pub fn about_currency(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            Self::placeholder("0")
        } else {
            Self::value(format_about_currency(value))
        }
    }

    /// 透明度页面的预格式化指标
    pub fn metric(text: &str) -> Self {
        match text.trim() {
            "" => Self::placeholder("0%"),
            "0%" | "Not Available" => Self::placeholder(text.trim()),
            other => Self::value(other.to_string()),
        }
    }

    /// 财务概览：`"0"` 展示为 `₹0`
    pub fn financial(text: &str) -> Self {
        match text.trim() {
            "" | "0" | "₹0" => Self::placeholder("₹0"),
            "0%" => Self::placeholder("0%"),
            other => Self::value(other.to_string()),
        }
    }

    /// 追加后缀，如 `+` 或 ` Districts`
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.text.push_str(suffix);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn indian_grouping() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(123456.0), "1,23,456");
        assert_eq!(format_count(12345678.0), "1,23,45,678");
        assert_eq!(format_count(2.5), "2.5");
        assert_eq!(format_count(1234.5678), "1,234.568");
        assert_eq!(format_count(-1500.0), "-1,500");
        assert_eq!(format_count(f64::NAN), "0");
    }

    #[test]
    fn about_currency_uses_crore_units() {
        assert_eq!(format_about_currency(500000000.0), "₹5.00 Cr+");
        assert_eq!(format_about_currency(0.0), "₹0.00 Cr+");
        assert_eq!(format_about_currency(125000000.0), "₹1.25 Cr+");
    }

    #[test]
    fn zero_values_render_placeholders() {
        assert_eq!(StatDisplay::count(0.0), StatDisplay::placeholder("0"));
        assert_eq!(StatDisplay::percent(0.0).text, "0%");
        assert!(StatDisplay::percent(0.0).placeholder);
        assert!(StatDisplay::about_currency(0.0).placeholder);

        let live = StatDisplay::count(1500.0).with_suffix("+");
        assert_eq!(live.text, "1,500+");
        assert!(!live.placeholder);
    }

    #[test]
    fn transparency_values() {
        assert!(StatDisplay::metric("0%").placeholder);
        assert!(StatDisplay::metric("Not Available").placeholder);
        assert_eq!(StatDisplay::metric("98%"), StatDisplay::value("98%".into()));
        assert_eq!(StatDisplay::financial("0").text, "₹0");
        assert!(StatDisplay::financial("0").placeholder);
        assert_eq!(StatDisplay::financial("₹2 Cr").text, "₹2 Cr");
    }

    #[test]
    fn crore_and_percent() {
        assert_eq!(format_crore(2.4), "₹2.4 Cr");
        assert_eq!(format_percent(85.0), "85%");
    }

    #[test]
    fn display_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap();
        assert_eq!(format_display_date(&date), "12 Mar 2024");
    }
}
