//! 统计数据包
//!
//! 四个互相独立、类型松散的键值包，分别由 `/stats`、`/stats-about`、
//! `/stats-join`、`/stats-transparency` 提供，管理员通过 `PATCH /<endpoint>/update` 修改。
//! 读取时统一按 `Number(x) || 0` 宽松解析，缺失字段回落到零值对象。

use crate::serde_helper::{lenient_number, lenient_string};
use serde_json::{Map, Value, json};

// =========================================================
// 编辑字段描述
// =========================================================

/// 字段在管理端编辑器中的输入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 非负整数计数，step=1
    Count,
    /// 以 Cr 为单位的金额数值，step=0.01
    Amount,
    /// 自由文本
    Text,
    /// `₹<n> Cr` 字符串
    Crore,
    /// `<digits>%` 字符串
    Ratio,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Count | FieldKind::Amount)
    }

    pub fn step(&self) -> &'static str {
        match self {
            FieldKind::Amount => "0.01",
            _ => "1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// 管理端编辑器中的四个分区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatSection {
    #[default]
    Hero,
    About,
    Join,
    Transparency,
}

impl StatSection {
    pub const ALL: [StatSection; 4] = [
        StatSection::Hero,
        StatSection::About,
        StatSection::Join,
        StatSection::Transparency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatSection::Hero => "hero",
            StatSection::About => "about",
            StatSection::Join => "join",
            StatSection::Transparency => "transparency",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            StatSection::Hero => "Hero Section",
            StatSection::About => "About Section",
            StatSection::Join => "Join Us Section",
            StatSection::Transparency => "Transparency",
        }
    }
}

// =========================================================
// StatBag trait
// =========================================================

/// 一个统计端点对应的数据包
pub trait StatBag: Clone + Default + PartialEq + Send + Sync + 'static {
    /// 读取路径，如 `/stats`
    const ENDPOINT: &'static str;
    const SECTION: StatSection;
    /// 日志与提示中使用的名称
    const LABEL: &'static str;

    fn from_value(value: &Value) -> Self;

    /// PATCH 请求体
    fn to_body(&self) -> Value;

    fn fields() -> &'static [StatField];

    fn field_value(&self, key: &str) -> String;

    /// 按字段规则写入编辑器中的原始输入
    fn set_field(&mut self, key: &str, raw: &str);

    /// 更新路径 `/<endpoint>/update`
    fn update_path() -> String {
        format!("{}/update", Self::ENDPOINT)
    }

    /// 解析 PATCH 响应；`success: false` 视为未更新
    fn from_update_response(value: &Value) -> Option<Self> {
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return None;
        }
        Some(Self::from_value(envelope(value)))
    }
}

/// `{ success, stats }` 信封中的实际数据
fn envelope(value: &Value) -> &Value {
    match value.get("stats") {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}

/// 读取第一个存在的键
fn pick<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .find(|v| !v.is_null())
}

// =========================================================
// 编辑规则
// =========================================================

/// 数值输入：非数字为 0，负数截断为 0
pub fn clamp_non_negative(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n.max(0.0),
        _ => 0.0,
    }
}

/// 金额输入统一为 `₹<n> Cr`，去掉用户输入中已有的符号
pub fn normalize_crore(raw: &str) -> String {
    let clean: String = raw
        .chars()
        .filter(|c| !matches!(c, '₹' | 'C' | 'r') && !c.is_whitespace())
        .collect();
    format!("₹{} Cr", clean)
}

/// 比率输入统一为 `<digits>%`
pub fn normalize_ratio(raw: &str) -> String {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    format!("{}%", clean)
}

fn number_text(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// =========================================================
// 数值型统计包
// =========================================================

/// 生成纯数值的统计包：每个字段带主键和可选的别名键
macro_rules! numeric_stat_bag {
    (
        $(#[$meta:meta])*
        $name:ident, $endpoint:literal, $section:expr, $label:literal,
        { $($field:ident: $key:literal $(| $alias:literal)* => $flabel:literal, $kind:ident;)* }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct $name {
            $(pub $field: f64,)*
        }

        impl StatBag for $name {
            const ENDPOINT: &'static str = $endpoint;
            const SECTION: StatSection = $section;
            const LABEL: &'static str = $label;

            fn from_value(value: &Value) -> Self {
                Self {
                    $($field: pick(value, &[$key $(, $alias)*])
                        .map(lenient_number)
                        .unwrap_or(0.0),)*
                }
            }

            fn to_body(&self) -> Value {
                let mut map = Map::new();
                $(
                    map.insert($key.to_string(), json!(self.$field));
                    $(map.insert($alias.to_string(), json!(self.$field));)*
                )*
                Value::Object(map)
            }

            fn fields() -> &'static [StatField] {
                &[$(StatField { key: $key, label: $flabel, kind: FieldKind::$kind },)*]
            }

            fn field_value(&self, key: &str) -> String {
                match key {
                    $($key => number_text(self.$field),)*
                    _ => String::new(),
                }
            }

            fn set_field(&mut self, key: &str, raw: &str) {
                match key {
                    $($key => self.$field = clamp_non_negative(raw),)*
                    _ => log::warn!("[Stats] unknown {} field: {}", $label, key),
                }
            }
        }
    };
}

numeric_stat_bag! {
    /// 首页影响力面板
    HeroStats, "/stats", StatSection::Hero, "hero",
    {
        villages: "villages" => "Villages", Count;
        problems: "problems" => "Problems", Count;
        funds: "funds" => "Funds (₹ Cr)", Amount;
        volunteers: "volunteers" => "Volunteers", Count;
    }
}

numeric_stat_bag! {
    /// 关于页面的组织结构与影响力数据
    ///
    /// 旧版后端使用 `activeVolunteers` / `impactGenerated`，读取时作为别名接受，写回时两套键都带上
    AboutStats, "/stats-about", StatSection::About, "about",
    {
        districts: "districts" => "Districts", Count;
        constituencies: "constituencies" => "Constituencies", Count;
        mandals: "mandals" => "Mandals", Count;
        villages: "villages" => "Villages", Count;
        volunteers: "volunteers" | "activeVolunteers" => "Active Volunteers", Count;
        yearly_fund: "yearlyFund" | "impactGenerated" => "Impact Generated", Count;
        villages_covered: "villagesCovered" => "Villages Covered", Count;
        problems_solved: "problemsSolved" => "Problems Solved", Count;
        transparency_score: "transparencyScore" => "Transparency Score (%)", Count;
    }
}

numeric_stat_bag! {
    /// 加入我们页面的招募数据
    JoinStats, "/stats-join", StatSection::Join, "join",
    {
        active_volunteers: "activeVolunteers" => "Active Volunteers", Count;
        constituencies_covered: "constituenciesCovered" => "Constituencies Covered", Count;
        problems_solved: "problemsSolved" => "Problems Solved", Count;
        funds_utilized: "fundsUtilized" => "Funds Utilized (₹L)", Amount;
    }
}

// =========================================================
// 透明度统计包
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStats {
    pub total_income: String,
    pub total_expenses: String,
    pub reserves: String,
    pub efficiency_ratio: String,
}

impl Default for FinancialStats {
    fn default() -> Self {
        Self {
            total_income: "0".to_string(),
            total_expenses: "0".to_string(),
            reserves: "0".to_string(),
            efficiency_ratio: "0%".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightNote {
    pub title: String,
    pub description: String,
}

impl Default for HighlightNote {
    fn default() -> Self {
        Self {
            title: "100% Transparent Operations".to_string(),
            description: "We maintain 100% transparency. Every rupee you contribute helps rebuild our Andhra.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransparencyStats {
    pub transparency_score: String,
    pub utilization_rate: String,
    pub tracking_rate: String,
    pub audit_frequency: String,
    pub financial: FinancialStats,
    pub highlight: HighlightNote,
}

impl Default for TransparencyStats {
    fn default() -> Self {
        Self {
            transparency_score: "0%".to_string(),
            utilization_rate: "0%".to_string(),
            tracking_rate: "0%".to_string(),
            audit_frequency: "Not Set".to_string(),
            financial: FinancialStats::default(),
            highlight: HighlightNote::default(),
        }
    }
}

/// `value || fallback`：空串、null、0 都回落
fn text_or(value: Option<&Value>, fallback: &str) -> String {
    let text = value.map(lenient_string).unwrap_or_default();
    if text.trim().is_empty() || (text == "0" && fallback != "0") {
        fallback.to_string()
    } else {
        text
    }
}

const TRANSPARENCY_FIELDS: &[StatField] = &[
    StatField { key: "transparencyScore", label: "Transparency Score", kind: FieldKind::Text },
    StatField { key: "utilizationRate", label: "Utilization Rate", kind: FieldKind::Text },
    StatField { key: "trackingRate", label: "Tracking Rate", kind: FieldKind::Text },
    StatField { key: "auditFrequency", label: "Audit Frequency", kind: FieldKind::Text },
    StatField { key: "totalIncome", label: "Total Income", kind: FieldKind::Crore },
    StatField { key: "totalExpenses", label: "Total Expenses", kind: FieldKind::Crore },
    StatField { key: "reserves", label: "Reserves", kind: FieldKind::Crore },
    StatField { key: "efficiencyRatio", label: "Efficiency Ratio", kind: FieldKind::Ratio },
    StatField { key: "highlightTitle", label: "Highlight Title", kind: FieldKind::Text },
    StatField { key: "highlightDescription", label: "Highlight Description", kind: FieldKind::Text },
];

impl StatBag for TransparencyStats {
    const ENDPOINT: &'static str = "/stats-transparency";
    const SECTION: StatSection = StatSection::Transparency;
    const LABEL: &'static str = "transparency";

    /// 指标既可能平铺在顶层，也可能嵌套在 `stats` 下
    fn from_value(value: &Value) -> Self {
        let metrics = envelope(value);
        let defaults = Self::default();
        let fin = value
            .get("financialStats")
            .or_else(|| metrics.get("financialStats"))
            .unwrap_or(&Value::Null);
        let note = value
            .get("highlightNote")
            .or_else(|| metrics.get("highlightNote"))
            .unwrap_or(&Value::Null);

        Self {
            transparency_score: text_or(metrics.get("transparencyScore"), &defaults.transparency_score),
            utilization_rate: text_or(metrics.get("utilizationRate"), &defaults.utilization_rate),
            tracking_rate: text_or(metrics.get("trackingRate"), &defaults.tracking_rate),
            audit_frequency: text_or(metrics.get("auditFrequency"), &defaults.audit_frequency),
            financial: FinancialStats {
                total_income: text_or(fin.get("totalIncome"), "0"),
                total_expenses: text_or(fin.get("totalExpenses"), "0"),
                reserves: text_or(fin.get("reserves"), "0"),
                efficiency_ratio: text_or(fin.get("efficiencyRatio"), "0%"),
            },
            highlight: HighlightNote {
                title: text_or(note.get("title"), &defaults.highlight.title),
                description: text_or(note.get("description"), &defaults.highlight.description),
            },
        }
    }

    fn to_body(&self) -> Value {
        json!({
            "transparencyScore": self.transparency_score,
            "utilizationRate": self.utilization_rate,
            "trackingRate": self.tracking_rate,
            "auditFrequency": self.audit_frequency,
            "financialStats": {
                "totalIncome": self.financial.total_income,
                "totalExpenses": self.financial.total_expenses,
                "reserves": self.financial.reserves,
                "efficiencyRatio": self.financial.efficiency_ratio,
            },
            "highlightNote": {
                "title": self.highlight.title,
                "description": self.highlight.description,
            },
        })
    }

    fn fields() -> &'static [StatField] {
        TRANSPARENCY_FIELDS
    }

    fn field_value(&self, key: &str) -> String {
        match key {
            "transparencyScore" => self.transparency_score.clone(),
            "utilizationRate" => self.utilization_rate.clone(),
            "trackingRate" => self.tracking_rate.clone(),
            "auditFrequency" => self.audit_frequency.clone(),
            "totalIncome" => self.financial.total_income.clone(),
            "totalExpenses" => self.financial.total_expenses.clone(),
            "reserves" => self.financial.reserves.clone(),
            "efficiencyRatio" => self.financial.efficiency_ratio.clone(),
            "highlightTitle" => self.highlight.title.clone(),
            "highlightDescription" => self.highlight.description.clone(),
            _ => String::new(),
        }
    }

    fn set_field(&mut self, key: &str, raw: &str) {
        match key {
            "transparencyScore" => self.transparency_score = raw.to_string(),
            "utilizationRate" => self.utilization_rate = raw.to_string(),
            "trackingRate" => self.tracking_rate = raw.to_string(),
            "auditFrequency" => self.audit_frequency = raw.to_string(),
            "totalIncome" => self.financial.total_income = normalize_crore(raw),
            "totalExpenses" => self.financial.total_expenses = normalize_crore(raw),
            "reserves" => self.financial.reserves = normalize_crore(raw),
            "efficiencyRatio" => self.financial.efficiency_ratio = normalize_ratio(raw),
            "highlightTitle" => self.highlight.title = raw.to_string(),
            "highlightDescription" => self.highlight.description = raw.to_string(),
            _ => log::warn!("[Stats] unknown transparency field: {}", key),
        }
    }
}

#[cfg(test)]
mod tests;
