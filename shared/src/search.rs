//! 问题报告检索
//!
//! 一次搜索只发一个请求；地区 / 邮编输入框每次按键都会拉取联想词（不做防抖）。

use crate::ProblemReport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub search: String,
    pub pin_code: String,
    pub district: String,
    pub category: String,
}

impl ReportFilters {
    /// 查询参数，空值不发送
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        [
            ("search", &self.search),
            ("pinCode", &self.pin_code),
            ("district", &self.district),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| (k, v.trim().to_string()))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }

    pub fn set(&mut self, field: SuggestionField, value: impl Into<String>) {
        match field {
            SuggestionField::District => self.district = value.into(),
            SuggestionField::PinCode => self.pin_code = value.into(),
        }
    }
}

/// 支持联想的输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionField {
    District,
    PinCode,
}

impl SuggestionField {
    /// `type` 参数的取值
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionField::District => "district",
            SuggestionField::PinCode => "pinCode",
        }
    }
}

/// 联想查询参数；空白输入返回 `None`，调用方直接清空联想列表而不发请求
pub fn suggestion_query(field: SuggestionField, value: &str) -> Option<Vec<(&'static str, String)>> {
    if value.trim().is_empty() {
        return None;
    }
    Some(vec![
        ("type", field.as_str().to_string()),
        ("query", value.to_string()),
    ])
}

/// 搜索面板状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSearch {
    pub filters: ReportFilters,
    pub has_searched: bool,
    results: Vec<ProblemReport>,
    // 每次搜索或清空都会递增，迟到的响应据此丢弃
    generation: u64,
}

impl ReportSearch {
    pub fn results(&self) -> &[ProblemReport] {
        &self.results
    }

    /// 请求发出时调用，返回本次搜索的编号；结果到达前也不再显示初始提示
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.has_searched = true;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }

    /// 只接受最近一次 `begin` 的结果，返回是否采用
    pub fn set_results(&mut self, ticket: u64, results: Vec<ProblemReport>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.results = results;
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<ProblemReport> {
        let index = self.results.iter().position(|r| r.id == id)?;
        Some(self.results.remove(index))
    }

    pub fn find(&self, id: &str) -> Option<&ProblemReport> {
        self.results.iter().find(|r| r.id == id)
    }

    /// 清空筛选与结果，回到未搜索状态；在途的搜索随之作废
    pub fn clear(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str) -> ProblemReport {
        serde_json::from_value(serde_json::json!({"_id": id, "category": "water"})).unwrap()
    }

    #[test]
    fn empty_filters_are_omitted() {
        let filters = ReportFilters {
            search: " ".into(),
            pin_code: "522201".into(),
            district: String::new(),
            category: "water".into(),
        };
        assert_eq!(
            filters.to_params(),
            vec![
                ("pinCode", "522201".to_string()),
                ("category", "water".to_string())
            ]
        );
        assert!(ReportFilters::default().is_empty());
    }

    #[test]
    fn blank_suggestion_input_skips_fetch() {
        assert_eq!(suggestion_query(SuggestionField::District, "   "), None);
        assert_eq!(
            suggestion_query(SuggestionField::PinCode, "52"),
            Some(vec![
                ("type", "pinCode".to_string()),
                ("query", "52".to_string())
            ])
        );
    }

    #[test]
    fn picking_a_suggestion_fills_the_field() {
        let mut filters = ReportFilters::default();
        filters.set(SuggestionField::District, "Guntur");
        filters.set(SuggestionField::PinCode, "522001");
        assert_eq!(filters.district, "Guntur");
        assert_eq!(filters.pin_code, "522001");
    }

    #[test]
    fn delete_removes_one_result() {
        let mut search = ReportSearch::default();
        assert!(!search.has_searched);
        let ticket = search.begin();
        assert!(search.has_searched);
        assert!(search.set_results(ticket, vec![report("a"), report("b")]));

        assert_eq!(search.remove("a").map(|r| r.id), Some("a".to_string()));
        assert!(search.remove("a").is_none());
        assert_eq!(search.results().len(), 1);
        assert!(search.find("b").is_some());
    }

    #[test]
    fn clear_resets_everything() {
        let mut search = ReportSearch::default();
        search.filters.district = "Guntur".into();
        let ticket = search.begin();
        search.set_results(ticket, vec![report("a")]);
        search.clear();
        assert!(!search.has_searched);
        assert!(search.results().is_empty());
        assert!(search.filters.is_empty());
    }

    #[test]
    fn results_arriving_after_clear_are_dropped() {
        let mut search = ReportSearch::default();
        let ticket = search.begin();
        search.clear();

        assert!(!search.set_results(ticket, vec![report("a")]));
        assert!(!search.has_searched);
        assert!(search.results().is_empty());
    }

    #[test]
    fn only_latest_search_is_applied() {
        let mut search = ReportSearch::default();
        let first = search.begin();
        let second = search.begin();

        assert!(!search.set_results(first, vec![report("old")]));
        assert!(search.set_results(second, vec![report("new")]));
        assert!(search.find("new").is_some());
        assert!(search.find("old").is_none());
    }
}
