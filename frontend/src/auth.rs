//! 认证模块
//!
//! 管理员会话状态，与路由系统解耦：路由服务只读取注入的认证信号，
//! 登出后的跳转由路由的认证监听自动完成。

use crate::web::abort::RequestScope;
use crate::web::http::BrowserHttpClient;
use crate::web::storage::SessionStore;
use leptos::prelude::*;
use vikasam_shared::client::ApiClient;
use vikasam_shared::protocol::AdminLogin;
use vikasam_shared::{AdminProfile, ApiError, ApiResult};

/// 认证状态
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub admin: Option<AdminProfile>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// 从 sessionStorage 恢复；只要令牌存在即视为已登录
    fn restore() -> Self {
        let token = SessionStore::token();
        Self {
            is_authenticated: token.is_some(),
            admin: SessionStore::admin(),
            token,
        }
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
    base_url: StoredValue<String>,
}

impl AuthContext {
    pub fn new(base_url: String) -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            base_url: StoredValue::new(base_url),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }

    pub fn admin(&self) -> Option<AdminProfile> {
        self.state.with_untracked(|s| s.admin.clone())
    }

    pub fn base_url(&self) -> String {
        self.base_url.get_value()
    }

    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    /// 带当前令牌、绑定组件取消信号的 API 客户端
    pub fn api(&self, scope: &RequestScope) -> ApiClient<BrowserHttpClient> {
        ApiClient::new(scope.http(), self.base_url()).with_token(self.token())
    }

    /// 会话失效的请求一律登出
    ///
    /// 返回 true 表示错误已处理，调用方无需再提示
    pub fn handle_error(&self, err: &ApiError) -> bool {
        if err.is_aborted() {
            return true;
        }
        if err.is_unauthorized() && self.state.with_untracked(|s| s.is_authenticated) {
            log::warn!("[Auth] session rejected by server: {}", err);
            logout(self);
            return true;
        }
        false
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 从 sessionStorage 恢复会话
pub fn init_auth(ctx: &AuthContext) {
    let restored = AuthState::restore();
    if restored.is_authenticated {
        log::info!(
            "[Auth] restored session for {}",
            restored
                .admin
                .as_ref()
                .map(|a| a.username.as_str())
                .unwrap_or("admin")
        );
    }
    ctx.set_state.set(restored);
}

/// 登录并写入会话
pub async fn login(
    ctx: &AuthContext,
    scope: &RequestScope,
    username: String,
    password: String,
) -> ApiResult<AdminProfile> {
    let api = ApiClient::new(scope.http(), ctx.base_url());
    let resp = api
        .call(&AdminLogin {
            username: username.trim().to_string(),
            password,
        })
        .await?;

    if resp.token.is_empty() {
        return Err(ApiError::unauthorized("Login failed").in_op("admin.login"));
    }

    SessionStore::save_session(&resp.token, &resp.admin);
    ctx.set_state.set(AuthState {
        token: Some(resp.token),
        admin: Some(resp.admin.clone()),
        is_authenticated: true,
    });
    log::info!("[Auth] logged in as {}", resp.admin.username);
    Ok(resp.admin)
}

/// 注销并清除会话
///
/// 不需要手动导航，路由服务会监听认证状态变化并自动重定向
pub fn logout(ctx: &AuthContext) {
    SessionStore::clear_session();
    ctx.set_state.set(AuthState::default());
}
