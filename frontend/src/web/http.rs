//! 浏览器 HTTP 传输层
//!
//! 以 gloo-net 实现共享层的 `HttpClient`，并提供 JSON 以外的两种请求：
//! multipart 上传和 no-cors 转发。

use gloo_net::http::{Request, RequestBuilder, Response};
use vikasam_shared::client::{HttpClient, HttpRequest, HttpResponse};
use vikasam_shared::protocol::HttpMethod;
use vikasam_shared::{ApiError, ApiResult, HEADER_AUTHORIZATION};
use web_sys::{AbortSignal, FormData, RequestMode};

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Delete => Request::delete(url),
        HttpMethod::Patch => Request::patch(url),
    }
}

/// 取消的请求映射为 `Aborted`，其余为网络错误
fn map_send_error(err: gloo_net::Error) -> ApiError {
    match &err {
        gloo_net::Error::JsError(js) if js.name == "AbortError" => ApiError::aborted(),
        _ => ApiError::network(err.to_string()),
    }
}

async fn into_response(resp: Response) -> ApiResult<HttpResponse> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::decode(e.to_string()))?;
    Ok(HttpResponse { status, body })
}

/// 基于 gloo-net 的 HTTP 客户端
///
/// 携带所属组件的取消信号，组件卸载时未完成的请求一并取消。
#[derive(Clone, Default)]
pub struct BrowserHttpClient {
    signal: Option<AbortSignal>,
}

impl BrowserHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signal(signal: Option<AbortSignal>) -> Self {
        Self { signal }
    }

    /// multipart 表单 POST；浏览器自动生成 boundary，不能手动设置 Content-Type
    pub async fn post_form(
        &self,
        url: &str,
        token: Option<&str>,
        form: FormData,
    ) -> ApiResult<HttpResponse> {
        let mut req = Request::post(url).abort_signal(self.signal.as_ref());
        if let Some(token) = token {
            req = req.header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }
        let req = req
            .body(form)
            .map_err(|e| ApiError::network(e.to_string()))?;
        let resp = req.send().await.map_err(map_send_error)?;
        into_response(resp).await
    }

    /// no-cors JSON POST
    ///
    /// 响应不透明，无法读取状态码；请求发出即视为成功。
    pub async fn post_no_cors(&self, url: &str, body: &serde_json::Value) -> ApiResult<()> {
        let req = Request::post(url)
            .mode(RequestMode::NoCors)
            .header("Content-Type", "application/json")
            .abort_signal(self.signal.as_ref())
            .body(body.to_string())
            .map_err(|e| ApiError::network(e.to_string()))?;
        req.send().await.map_err(map_send_error)?;
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = builder(req.method, &req.url).abort_signal(self.signal.as_ref());
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::network(e.to_string()))?;

        let resp = request.send().await.map_err(map_send_error)?;
        into_response(resp).await
    }
}
