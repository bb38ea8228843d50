//! Andhra Vikasam 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `web::query`: 统计数据的应用级缓存
//! - `auth`: 管理员会话
//! - `components`: UI 组件层

mod auth;
mod config;
mod components {
    pub mod common;
    pub mod icons;
    pub mod layout;
    pub mod toast;

    pub mod pages {
        pub mod about;
        pub mod contact;
        pub mod donate;
        pub mod home;
        pub mod join;
        pub mod not_found;
        pub mod projects;
        pub mod report_problem;
        pub mod transparency;
    }

    pub mod admin {
        mod add_project_dialog;
        pub mod dashboard;
        pub mod login;
        mod members;
        pub(crate) mod project_manager;
        mod report_search;
        mod value_updater;
    }
}

// 浏览器 API 封装：HTTP、存储、取消信号、图片预览与路由
pub(crate) mod web {
    pub mod abort;
    pub mod http;
    pub mod preview;
    pub mod query;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::admin::dashboard::AdminDashboard;
use crate::components::admin::login::AdminLoginPage;
use crate::components::layout::{Footer, Header};
use crate::components::pages::{
    about::AboutPage, contact::ContactPage, donate::DonatePage, home::HomePage, join::JoinPage,
    not_found::NotFound, projects::ProjectsPage, report_problem::ReportProblemPage,
    transparency::TransparencyPage,
};
use crate::components::toast::{Toaster, provide_toaster};
use crate::config::AppConfig;
use crate::web::query::QueryClient;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::About => view! { <AboutPage /> }.into_any(),
        AppRoute::Join => view! { <JoinPage /> }.into_any(),
        AppRoute::Projects => view! { <ProjectsPage /> }.into_any(),
        AppRoute::Transparency => view! { <TransparencyPage /> }.into_any(),
        AppRoute::Contact => view! { <ContactPage /> }.into_any(),
        AppRoute::Report => view! { <ReportProblemPage /> }.into_any(),
        AppRoute::Donate => view! { <DonatePage /> }.into_any(),
        AppRoute::AdminLogin => view! { <AdminLoginPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminDashboard /> }.into_any(),
        AppRoute::NotFound => view! { <NotFound /> }.into_any(),
    }
}

/// 公开页面外包站点头部与页脚
#[component]
fn Shell() -> impl IntoView {
    let router = use_router();
    let is_public = Memo::new(move |_| router.current_route().get().is_public());

    view! {
        <Show when=move || is_public.get()>
            <Header />
        </Show>
        <main class="min-h-screen">
            <RouterOutlet matcher=route_matcher />
        </main>
        <Show when=move || is_public.get()>
            <Footer />
        </Show>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建配置
    let config = AppConfig::from_build_env();
    log::debug!("[App] api base url: {}", config.api_base_url);
    provide_context(config.clone());

    // 2. 创建认证上下文，并从 sessionStorage 恢复会话
    let auth_ctx = AuthContext::new(config.api_base_url.clone());
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 3. 应用级统计缓存与通知
    provide_context(QueryClient::new(config.api_base_url));
    provide_toaster();

    // 4. 认证信号注入路由服务实现守卫
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <Shell />
        </Router>
        <Toaster />
    }
}
