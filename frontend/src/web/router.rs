//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 验证 -> 处理 -> 加载"。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 浏览器地址栏中的路径部分
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History
///
/// # Arguments
/// * `path` - 要显示的地址
/// * `use_push` - true 追加记录，false 替换当前记录（重定向时使用）
fn write_history(path: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if result.is_err() {
        log::warn!("[Router] history update failed for {}", path);
    }
}

/// 页面切换后回到顶部
fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 路由守卫
///
/// 返回 `Some(重定向目标)` 表示拒绝访问，`None` 表示放行。
fn guard(target: AppRoute, is_auth: bool) -> Option<AppRoute> {
    if target.requires_auth() && !is_auth {
        log::info!("[Router] Access denied to {}. Redirecting to login.", target);
        return Some(AppRoute::auth_failure_redirect());
    }
    if target.should_redirect_when_authenticated() && is_auth {
        log::info!("[Router] Already authenticated. Redirecting to admin.");
        return Some(AppRoute::auth_success_redirect());
    }
    None
}

/// 路由器服务
///
/// 通过注入的认证信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由
    set_route: WriteSignal<AppRoute>,
    /// 外部注入的认证状态
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 以当前地址创建路由服务
    ///
    /// # Arguments
    /// * `is_authenticated` - 认证状态信号，由 `App` 注入
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial);
        let router = Self {
            current_route,
            set_route,
            is_authenticated,
        };

        // 直接打开受保护地址时同样走守卫
        if let Some(redirect) = guard(initial, is_authenticated.get_untracked()) {
            write_history(redirect.to_path(), false);
            set_route.set(redirect);
        }
        router
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫 -> 写入 History -> 切换视图
    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_path(route.to_path(), true);
    }

    /// 按路径导航
    ///
    /// # Arguments
    /// * `path` - 目标地址，无法识别时渲染 404
    /// * `use_push` - true 使用 pushState，false 使用 replaceState
    fn navigate_to_path(&self, path: &str, use_push: bool) {
        let target = AppRoute::from_path(path);
        let is_auth = self.is_authenticated.get_untracked();

        match guard(target, is_auth) {
            Some(redirect) => {
                write_history(redirect.to_path(), use_push);
                self.set_route.set(redirect);
            }
            None => {
                // 未知地址保留原始 URL，只渲染 404
                let url = if target == AppRoute::NotFound {
                    path
                } else {
                    target.to_path()
                };
                write_history(url, use_push);
                self.set_route.set(target);
            }
        }
        scroll_to_top();
    }

    /// 浏览器后退/前进按钮
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            match guard(target, is_authenticated.get_untracked()) {
                Some(redirect) => {
                    write_history(redirect.to_path(), false);
                    set_route.set(redirect);
                }
                None => set_route.set(target),
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 登录/登出后自动跳转
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                let redirect = AppRoute::auth_success_redirect();
                write_history(redirect.to_path(), true);
                set_route.set(redirect);
                log::info!("[Router] Auth state changed: logged in, redirecting to admin.");
            } else if !is_auth && route.requires_auth() {
                let redirect = AppRoute::auth_failure_redirect();
                write_history(redirect.to_path(), true);
                set_route.set(redirect);
                log::info!("[Router] Auth state changed: logged out, redirecting to login.");
            }
        });
    }
}

/// 创建路由服务，注册监听并放入 Context
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(AppRoute) + Clone + Copy {
    let router = use_router();
    move |to: AppRoute| router.navigate_to(to)
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应放在 App 根部。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);
    children()
}

/// 路由出口组件
///
/// 根据当前路由渲染对应页面。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// 站内链接：拦截点击，交给路由服务处理
///
/// 带修饰键的点击保持浏览器默认行为（新标签页打开等）。
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(into, optional)] class: Signal<String>,
    #[prop(optional)] on_navigate: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.shift_key() || ev.button() != 0 {
            return;
        }
        ev.prevent_default();
        router.navigate_to(to);
        if let Some(cb) = on_navigate {
            cb.run(());
        }
    };

    view! {
        <a href=to.to_path() class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
