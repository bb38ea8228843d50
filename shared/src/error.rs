use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类型枚举
/// 由 HTTP 状态码或传输层失败归类而来
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// 请求未能到达服务器 (断网、CORS、DNS)
    Network,
    /// 401: 会话缺失或已过期
    Unauthorized,
    /// 404: 资源未找到
    NotFound,
    /// 400/422: 请求参数或表单校验失败
    InvalidInput,
    /// 5xx 及其他非成功状态
    Server,
    /// 响应体无法解析为预期结构
    Decode,
    /// 组件卸载导致请求被取消
    Aborted,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ApiErrorKind::InvalidInput => "INVALID_INPUT",
            ApiErrorKind::Server => "SERVER_ERROR",
            ApiErrorKind::Decode => "JSON_PARSE_ERROR",
            ApiErrorKind::Aborted => "ABORTED",
        }
    }
}

/// 把非 2xx 状态码归类
pub fn kind_for_status(status: u16) -> ApiErrorKind {
    match status {
        401 | 403 => ApiErrorKind::Unauthorized,
        404 => ApiErrorKind::NotFound,
        400 | 409 | 422 => ApiErrorKind::InvalidInput,
        _ => ApiErrorKind::Server,
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "projects.update_status"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端侧的 API 错误
///
/// - kind: 错误类别
/// - message: 优先使用服务器返回的 `{ message }`
/// - status: 原始 HTTP 状态码（传输层失败时为空）
/// - spans: 调用追踪
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
            spans: Vec::new(),
        }
    }

    /// 由非成功的 HTTP 响应构造
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(kind_for_status(status), message);
        err.status = Some(status);
        err
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidInput, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn aborted() -> Self {
        Self::new(ApiErrorKind::Aborted, "Request was cancelled")
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_aborted(&self) -> bool {
        self.kind == ApiErrorKind::Aborted
    }

    /// 横幅 / toast 中展示给用户的文本
    pub fn user_message(&self) -> String {
        match self.kind {
            ApiErrorKind::Network => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ApiErrorKind::Unauthorized => "Session expired. Please log in again.".to_string(),
            ApiErrorKind::Decode => "Received an unexpected response from the server.".to_string(),
            _ if self.message.trim().is_empty() => "Something went wrong".to_string(),
            _ => self.message.clone(),
        }
    }
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string()).with_source(e)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 服务器错误响应体 `{ "message": "..." }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServerMessage {
    /// 从原始响应体中提取错误消息
    pub fn extract(body: &str) -> Option<String> {
        let parsed: ServerMessage = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_kinds() {
        assert_eq!(kind_for_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(kind_for_status(404), ApiErrorKind::NotFound);
        assert_eq!(kind_for_status(422), ApiErrorKind::InvalidInput);
        assert_eq!(kind_for_status(500), ApiErrorKind::Server);
        assert_eq!(kind_for_status(418), ApiErrorKind::Server);
    }

    #[test]
    fn display_includes_trace() {
        let err = ApiError::from_status(404, "Project not found")
            .in_op_with("projects.delete", "p1")
            .in_op("board.remove");
        assert_eq!(err.status, Some(404));
        assert_eq!(
            err.to_string(),
            "[RESOURCE_NOT_FOUND] Project not found | trace: projects.delete(p1) -> board.remove"
        );
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::from_status(400, "Title is required");
        assert_eq!(err.user_message(), "Title is required");

        let blank = ApiError::from_status(500, "  ");
        assert_eq!(blank.user_message(), "Something went wrong");

        let expired = ApiError::from_status(401, "jwt expired");
        assert!(expired.is_unauthorized());
        assert_eq!(expired.user_message(), "Session expired. Please log in again.");
    }

    #[test]
    fn server_message_extraction() {
        assert_eq!(
            ServerMessage::extract(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            ServerMessage::extract(r#"{"error":"boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(ServerMessage::extract("<html>502</html>"), None);
        assert_eq!(ServerMessage::extract(r#"{"message":""}"#), None);
    }
}
