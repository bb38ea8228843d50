//! 统计数据查询客户端
//!
//! 四个统计端点的数据在应用范围内各缓存一份，任意多个组件挂载同一统计时只请求一次。
//! 缓存保存原始 JSON，读取时按各自的 `StatBag` 宽松解析。

use super::http::BrowserHttpClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use vikasam_shared::cache::{QueryCache, QueryState};
use vikasam_shared::client::ApiClient;
use vikasam_shared::protocol::GetStats;
use vikasam_shared::stats::StatBag;

#[derive(Clone, Copy)]
pub struct QueryClient {
    cache: RwSignal<QueryCache<Value>>,
    base_url: StoredValue<String>,
}

impl QueryClient {
    pub fn new(base_url: String) -> Self {
        Self {
            cache: RwSignal::new(QueryCache::new()),
            base_url: StoredValue::new(base_url),
        }
    }

    /// 条目缺失或上次失败时发起请求，否则复用
    pub fn fetch<S: StatBag>(&self) {
        let should_fetch = self
            .cache
            .try_update(|c| c.begin(S::ENDPOINT))
            .unwrap_or(false);
        if !should_fetch {
            return;
        }

        let cache = self.cache;
        let api = ApiClient::new(BrowserHttpClient::new(), self.base_url.get_value());
        spawn_local(async move {
            let result = api.call(&GetStats::<S>::default()).await.map_err(|e| {
                log::error!("[Query] {} stats failed: {}", S::LABEL, e);
                e.user_message()
            });
            cache.try_update(|c| c.resolve(S::ENDPOINT, result));
        });
    }

    /// 读取某个统计包的当前状态
    pub fn state<S: StatBag>(&self) -> QueryState<S> {
        self.cache.with(|c| match c.get(S::ENDPOINT) {
            Some(QueryState::Ready(raw)) => QueryState::Ready(S::from_value(raw)),
            Some(QueryState::Failed(msg)) => QueryState::Failed(msg.clone()),
            Some(QueryState::Loading) | None => QueryState::Loading,
        })
    }

    /// 管理员保存后写入服务器确认的值，公开页面随之刷新
    pub fn set_stats<S: StatBag>(&self, stats: &S) {
        self.cache.update(|c| c.set(S::ENDPOINT, stats.to_body()));
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().expect("QueryClient should be provided")
}

/// 挂载时触发（或复用）统计请求，返回随缓存更新的状态
pub fn use_stats<S: StatBag>() -> Signal<QueryState<S>> {
    let client = use_query_client();
    client.fetch::<S>();
    Signal::derive(move || client.state::<S>())
}
