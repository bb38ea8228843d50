//! 按端点缓存的查询状态
//!
//! 同一统计数据被多个组件同时挂载时只发一次请求；失败的条目在下次挂载时重试。

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryCache<T> {
    entries: HashMap<String, QueryState<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&QueryState<T>> {
        self.entries.get(key)
    }

    /// 需要发起请求时返回 true 并把条目置为 Loading
    ///
    /// 已在加载或已就绪的条目返回 false，调用方复用现有状态
    pub fn begin(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(QueryState::Loading) | Some(QueryState::Ready(_)) => false,
            Some(QueryState::Failed(_)) | None => {
                self.entries.insert(key.to_string(), QueryState::Loading);
                true
            }
        }
    }

    pub fn resolve(&mut self, key: &str, result: Result<T, String>) {
        let state = match result {
            Ok(value) => QueryState::Ready(value),
            Err(msg) => QueryState::Failed(msg),
        };
        self.entries.insert(key.to_string(), state);
    }

    /// 管理员修改后直接写入最新值
    pub fn set(&mut self, key: &str, value: T) {
        self.entries
            .insert(key.to_string(), QueryState::Ready(value));
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concurrent_mounts_share_one_fetch() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        assert!(cache.begin("/stats"));
        assert!(!cache.begin("/stats"));
        assert!(cache.get("/stats").unwrap().is_loading());

        cache.resolve("/stats", Ok(7));
        assert!(!cache.begin("/stats"));
        assert_eq!(cache.get("/stats").unwrap().ready(), Some(&7));
    }

    #[test]
    fn failed_entries_are_retried() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        assert!(cache.begin("/stats-join"));
        cache.resolve("/stats-join", Err("offline".into()));
        assert_eq!(cache.get("/stats-join").unwrap().error(), Some("offline"));
        assert!(cache.begin("/stats-join"));
    }

    #[test]
    fn keys_are_independent() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        assert!(cache.begin("/stats"));
        assert!(cache.begin("/stats-about"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn set_and_invalidate() {
        let mut cache: QueryCache<u32> = QueryCache::new();
        cache.set("/stats", 3);
        assert!(!cache.begin("/stats"));
        cache.invalidate("/stats");
        assert!(cache.get("/stats").is_none());
        assert!(cache.begin("/stats"));
    }
}
