//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Home,
    About,
    Join,
    Projects,
    Transparency,
    Contact,
    Report,
    Donate,
    /// 管理员登录
    AdminLogin,
    /// 管理面板 (需要认证)
    Admin,
    NotFound,
}

impl AppRoute {
    /// 公开页面导航栏中的条目，按展示顺序
    pub const NAV: [AppRoute; 6] = [
        AppRoute::Home,
        AppRoute::About,
        AppRoute::Join,
        AppRoute::Projects,
        AppRoute::Transparency,
        AppRoute::Contact,
    ];

    /// 将 URL path 解析为路由枚举
    ///
    /// 末尾斜杠忽略，`/admin/` 与 `/admin` 等价
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("/");
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/about" => Self::About,
            "/join" => Self::Join,
            "/projects" => Self::Projects,
            "/transparency" => Self::Transparency,
            "/contact" => Self::Contact,
            "/report" => Self::Report,
            "/donate" => Self::Donate,
            "/admin/login" => Self::AdminLogin,
            "/admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Join => "/join",
            Self::Projects => "/projects",
            Self::Transparency => "/transparency",
            Self::Contact => "/contact",
            Self::Report => "/report",
            Self::Donate => "/donate",
            Self::AdminLogin => "/admin/login",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// 导航栏文字
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Join => "Join",
            Self::Projects => "Projects",
            Self::Transparency => "Transparency",
            Self::Contact => "Contact",
            Self::Report => "Report Problem",
            Self::Donate => "Donate",
            Self::AdminLogin => "Admin Login",
            Self::Admin => "Admin",
            Self::NotFound => "Not Found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// 已认证用户访问登录页时离开
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::AdminLogin)
    }

    /// 公开页面带站点头部和页脚，管理端页面不带
    pub fn is_public(&self) -> bool {
        !matches!(self, Self::AdminLogin | Self::Admin)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::AdminLogin
    }

    pub fn auth_success_redirect() -> Self {
        Self::Admin
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip_for_every_page() {
        let all = [
            AppRoute::Home,
            AppRoute::About,
            AppRoute::Join,
            AppRoute::Projects,
            AppRoute::Transparency,
            AppRoute::Contact,
            AppRoute::Report,
            AppRoute::Donate,
            AppRoute::AdminLogin,
            AppRoute::Admin,
        ];
        for route in all {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(AppRoute::from_path("/admin/"), AppRoute::Admin);
        assert_eq!(AppRoute::from_path("/projects?page=2"), AppRoute::Projects);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/admin/settings"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/404"), AppRoute::NotFound);
    }

    #[test]
    fn only_admin_is_guarded() {
        assert!(AppRoute::Admin.requires_auth());
        assert!(!AppRoute::AdminLogin.requires_auth());
        assert!(!AppRoute::Report.requires_auth());
        assert!(AppRoute::AdminLogin.should_redirect_when_authenticated());
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::AdminLogin);
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Admin);
    }

    #[test]
    fn admin_pages_have_no_site_chrome() {
        assert!(AppRoute::Home.is_public());
        assert!(AppRoute::NotFound.is_public());
        assert!(!AppRoute::Admin.is_public());
        assert!(!AppRoute::AdminLogin.is_public());
    }
}
