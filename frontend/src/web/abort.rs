//! 组件级请求作用域
//!
//! 每个发起请求的组件持有一个 `AbortController`，组件卸载时取消仍在进行的请求，
//! 晚到的响应因此不会写入已销毁的信号。

use super::http::BrowserHttpClient;
use leptos::prelude::*;
use web_sys::AbortController;

#[derive(Clone, Copy)]
pub struct RequestScope {
    controller: StoredValue<Option<AbortController>, LocalStorage>,
}

impl RequestScope {
    /// 创建作用域并注册卸载时的取消
    pub fn new() -> Self {
        let controller = match AbortController::new() {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("[Abort] AbortController unavailable: {:?}", e);
                None
            }
        };
        let scope = Self {
            controller: StoredValue::new_local(controller),
        };
        on_cleanup(move || scope.abort());
        scope
    }

    /// 绑定了本作用域取消信号的 HTTP 客户端
    pub fn http(&self) -> BrowserHttpClient {
        let signal = self
            .controller
            .try_with_value(|c| c.as_ref().map(|c| c.signal()))
            .flatten();
        BrowserHttpClient::with_signal(signal)
    }

    pub fn abort(&self) {
        self.controller.try_with_value(|c| {
            if let Some(c) = c {
                c.abort();
            }
        });
    }
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}
