//! API 客户端
//!
//! 传输层抽象为 `HttpClient`，浏览器里由 gloo-net 实现，测试里由 `MockHttpClient` 实现。

use crate::HEADER_AUTHORIZATION;
use crate::error::{ApiError, ApiResult, ServerMessage};
use crate::protocol::{ApiRequest, GetStats, HttpMethod, UpdateStats};
use crate::stats::StatBag;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(body.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 空响应体按 `null` 解析
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        Ok(serde_json::from_str(text)?)
    }
}

#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// ApiClient
// =========================================================

/// `URLSearchParams` 风格的编码集
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, QUERY_VALUE),
                utf8_percent_encode(v, QUERY_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub struct ApiClient<C> {
    http: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(http: C, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn url_for<R: ApiRequest>(&self, req: &R) -> String {
        let mut url = format!("{}{}", self.base_url, req.path());
        let query = req.query();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(&query));
        }
        url
    }

    fn build<R: ApiRequest>(&self, req: &R) -> ApiResult<HttpRequest> {
        let mut http_req = HttpRequest::new(&self.url_for(req), R::METHOD);

        match &self.token {
            Some(token) => {
                http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
            None if R::AUTH => {
                return Err(ApiError::unauthorized("No authentication token found")
                    .in_op(R::OPERATION));
            }
            None => {}
        }

        if let Some(body) = req.body().map_err(|e| e.in_op(R::OPERATION))? {
            http_req = http_req.with_body(body);
        }
        Ok(http_req)
    }

    /// 发送请求；非 2xx 映射为 `ApiError`，优先使用服务器返回的 `message`
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let http_req = self.build(req)?;
        log::debug!("[Api] {} {}", R::METHOD.as_str(), http_req.url);

        let resp = self
            .http
            .send(http_req)
            .await
            .map_err(|e| e.in_op_with(R::OPERATION, req.path()))?;

        if !resp.is_success() {
            let message = ServerMessage::extract(&resp.body)
                .unwrap_or_else(|| format!("HTTP error! status: {}", resp.status));
            log::warn!("[Api] {} failed with {}: {}", R::OPERATION, resp.status, message);
            return Err(ApiError::from_status(resp.status, message)
                .in_op_with(R::OPERATION, req.path()));
        }

        resp.json::<R::Response>()
            .map_err(|e| e.in_op_with(R::OPERATION, req.path()))
    }

    pub async fn stats<S: StatBag>(&self) -> ApiResult<S> {
        let raw = self.call(&GetStats::<S>::default()).await?;
        Ok(S::from_value(&raw))
    }

    /// 提交修改并返回服务器确认后的值
    pub async fn update_stats<S: StatBag>(&self, stats: S) -> ApiResult<S> {
        let raw = self.call(&UpdateStats { stats }).await?;
        S::from_update_response(&raw).ok_or_else(|| {
            ApiError::new(
                crate::ApiErrorKind::Server,
                format!("Failed to update {} statistics", S::LABEL),
            )
            .in_op("stats.update")
        })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::cell::RefCell;

    pub struct MockHttpClient {
        // (METHOD URL) -> (Status, Response Body)
        responses: RefCell<HashMap<String, (u16, String)>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                responses: RefCell::new(HashMap::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses.borrow_mut().insert(
                format!("{} {}", method.as_str(), url),
                (status, body.to_string()),
            );
        }

        pub fn mock_json(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
            self.mock_response(method, url, status, &body.to_string());
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            let key = format!("{} {}", req.method.as_str(), req.url);
            self.requests.borrow_mut().push(req);

            let responses = self.responses.borrow();
            match responses.get(&key) {
                Some((status, body)) => Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                }),
                None => Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests;
