use crate::auth::{logout, use_auth};
use crate::components::admin::members::MemberQueue;
use crate::components::admin::project_manager::ProjectManager;
use crate::components::admin::report_search::ReportSearchPanel;
use crate::components::admin::value_updater::ValueUpdater;
use crate::components::icons::{BarChart, FileText, Folder, LogOut, Menu, Users};
use crate::web::route::AppRoute;
use crate::web::router::use_navigate;
use crate::web::storage::SessionStore;
use leptos::prelude::*;

/// 管理面板的标签页，当前选择保存在 sessionStorage 中
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Projects,
    Members,
    Reports,
    Stats,
}

impl AdminTab {
    pub const ALL: [AdminTab; 4] = [
        AdminTab::Projects,
        AdminTab::Members,
        AdminTab::Reports,
        AdminTab::Stats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::Projects => "projects",
            AdminTab::Members => "members",
            AdminTab::Reports => "reports",
            AdminTab::Stats => "stats",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Projects => "Projects",
            AdminTab::Members => "Members",
            AdminTab::Reports => "Reports",
            AdminTab::Stats => "Update Values",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            AdminTab::Projects => "Project Management",
            AdminTab::Members => "Member Management",
            AdminTab::Reports => "Problem Reports",
            AdminTab::Stats => "Site Statistics",
        }
    }

    /// 未保存或无法识别时回到项目页
    fn restore() -> Self {
        SessionStore::active_tab()
            .as_deref()
            .and_then(Self::parse)
            .unwrap_or_default()
    }
}

#[component]
fn TabIcon(tab: AdminTab) -> impl IntoView {
    match tab {
        AdminTab::Projects => view! { <Folder attr:class="h-5 w-5" /> }.into_any(),
        AdminTab::Members => view! { <Users attr:class="h-5 w-5" /> }.into_any(),
        AdminTab::Reports => view! { <FileText attr:class="h-5 w-5" /> }.into_any(),
        AdminTab::Stats => view! { <BarChart attr:class="h-5 w-5" /> }.into_any(),
    }
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (active_tab, set_active_tab) = signal(AdminTab::restore());
    let (sidebar_open, set_sidebar_open) = signal(true);

    Effect::new(move |_| {
        SessionStore::set_active_tab(active_tab.get().as_str());
    });

    let admin = move || auth.admin();

    let on_logout = move |_| {
        log::info!("[Auth] logout");
        logout(&auth);
        navigate(AppRoute::Home);
    };

    view! {
        <div class="min-h-screen bg-base-200 flex">
            <aside class=move || {
                if sidebar_open.get() {
                    "w-64 lg:w-72 bg-base-100 shadow-xl flex flex-col shrink-0"
                } else {
                    "hidden"
                }
            }>
                <div class="p-6 bg-primary text-primary-content">
                    <h1 class="text-2xl font-bold">"Admin Portal"</h1>
                    <div class="mt-4 flex items-center gap-3">
                        <div class="w-10 h-10 rounded-full bg-white/20 flex items-center justify-center">
                            <Users attr:class="h-5 w-5" />
                        </div>
                        <div>
                            <p class="font-medium">{move || admin().map(|a| a.username).unwrap_or_default()}</p>
                            <p class="text-sm opacity-80">{move || admin().map(|a| a.role).unwrap_or_default()}</p>
                        </div>
                    </div>
                </div>

                <ul class="menu flex-1 p-4 gap-2">
                    {AdminTab::ALL
                        .into_iter()
                        .map(|tab| {
                            view! {
                                <li>
                                    <button
                                        class=move || if active_tab.get() == tab { "active" } else { "" }
                                        on:click=move |_| set_active_tab.set(tab)
                                    >
                                        <TabIcon tab=tab />
                                        {tab.label()}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>

                <div class="p-4 border-t border-base-200">
                    <button on:click=on_logout class="btn btn-outline btn-error w-full gap-2">
                        <LogOut attr:class="h-4 w-4" />
                        "Logout"
                    </button>
                </div>
            </aside>

            <main class="flex-1 min-w-0">
                <div class="navbar bg-base-100 shadow-sm px-4">
                    <button
                        class="btn btn-ghost btn-square"
                        aria-label="Toggle sidebar"
                        on:click=move |_| set_sidebar_open.update(|open| *open = !*open)
                    >
                        <Menu attr:class="h-6 w-6" />
                    </button>
                    <h2 class="text-xl font-semibold ml-2">{move || active_tab.get().heading()}</h2>
                </div>

                <div class="p-4 md:p-8">
                    {move || match active_tab.get() {
                        AdminTab::Projects => view! { <ProjectManager /> }.into_any(),
                        AdminTab::Members => view! { <MemberQueue /> }.into_any(),
                        AdminTab::Reports => view! { <ReportSearchPanel /> }.into_any(),
                        AdminTab::Stats => view! { <ValueUpdater /> }.into_any(),
                    }}
                </div>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_names_round_trip_through_storage_strings() {
        for tab in AdminTab::ALL {
            assert_eq!(AdminTab::parse(tab.as_str()), Some(tab));
        }
        assert_eq!(AdminTab::parse("settings"), None);
        assert_eq!(AdminTab::default(), AdminTab::Projects);
    }
}
