//! 管理端项目列表：状态统计、筛选、分页、状态修改与删除

use crate::auth::use_auth;
use crate::components::admin::add_project_dialog::AddProjectDialog;
use crate::components::common::{ErrorBanner, Pagination, Spinner};
use crate::components::icons::{MapPin, RefreshCw, Trash2};
use crate::components::toast::use_toast;
use crate::web::abort::RequestScope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vikasam_shared::board::ProjectBoard;
use vikasam_shared::protocol::{DeleteProject, ListProjects, UpdateProjectStatus};
use vikasam_shared::{Project, ProjectStatus};

/// 浏览器原生确认框；无法弹出时视为取消
pub(crate) fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn status_border(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Pending => "border-error",
        ProjectStatus::InProgress => "border-warning",
        ProjectStatus::Solved => "border-success",
    }
}

#[component]
fn CountCard(label: &'static str, value: Signal<usize>, accent: &'static str) -> impl IntoView {
    view! {
        <div class="stat">
            <div class="stat-title">{label}</div>
            <div class=format!("stat-value {}", accent)>{move || value.get()}</div>
        </div>
    }
}

#[component]
fn FilterInput(
    label: &'static str,
    list_id: &'static str,
    value: Signal<String>,
    options: Signal<Vec<String>>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="form-control w-full md:w-64">
            <div class="label">
                <span class="label-text">{label}</span>
            </div>
            <input
                type="search"
                class="input input-bordered input-sm"
                list=list_id
                placeholder=format!("Filter by {}", label.to_lowercase())
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <datalist id=list_id>
                {move || {
                    options
                        .get()
                        .into_iter()
                        .map(|o| view! { <option value=o></option> })
                        .collect_view()
                }}
            </datalist>
        </label>
    }
}

#[component]
pub fn ProjectManager() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let scope = RequestScope::new();

    let board = RwSignal::new(ProjectBoard::default());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let load = move || {
        set_loading.set(true);
        set_error.set(None);
        let api = auth.api(&scope);
        spawn_local(async move {
            match api.call(&ListProjects::default()).await {
                Ok(list) => {
                    log::debug!("[Admin] loaded {} projects", list.len());
                    board.update(|b| b.replace(list));
                }
                Err(e) if auth.handle_error(&e) => return,
                Err(e) => {
                    log::error!("[Admin] load projects failed: {}", e);
                    set_error.set(Some("Failed to load projects".into()));
                }
            }
            set_loading.set(false);
        });
    };

    load();

    let change_status = move |id: String, status: ProjectStatus| {
        let mut started = false;
        board.update(|b| started = b.begin_status_update(&id));
        if !started {
            return;
        }
        let api = auth.api(&scope);
        spawn_local(async move {
            let result = api
                .call(&UpdateProjectStatus {
                    id: id.clone(),
                    status,
                })
                .await;
            let applied = match result {
                Ok(_) => {
                    toast.success(format!("Project status updated to {}", status));
                    Some(status)
                }
                Err(e) if auth.handle_error(&e) => None,
                Err(e) => {
                    log::error!("[Admin] status update for {} failed: {}", id, e);
                    toast.error("Failed to update status");
                    None
                }
            };
            board.try_update(|b| b.finish_status_update(&id, applied));
        });
    };

    let delete = move |project: Project| {
        if !confirm(&format!("Delete project \"{}\"?", project.title)) {
            return;
        }
        let api = auth.api(&scope);
        spawn_local(async move {
            match api.call(&DeleteProject { id: project.id.clone() }).await {
                Ok(_) => {
                    board.update(|b| {
                        b.remove(&project.id);
                    });
                    toast.success("Project deleted");
                }
                Err(e) if auth.handle_error(&e) => {}
                Err(e) => {
                    log::error!("[Admin] delete {} failed: {}", project.id, e);
                    toast.error(e.user_message());
                }
            }
        });
    };

    let on_added = Callback::new(move |project: Option<Project>| match project {
        Some(p) => board.update(|b| b.insert(p)),
        None => load(),
    });

    let counts = Memo::new(move |_| board.with(ProjectBoard::counts));
    let page = Memo::new(move |_| board.with(ProjectBoard::page));

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <AddProjectDialog on_added=on_added />
                <button class="btn btn-ghost btn-circle" on:click=move |_| load() disabled=move || loading.get()>
                    <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                </button>
            </div>

            <div class="stats stats-vertical md:stats-horizontal shadow w-full bg-base-100">
                <CountCard label="All Projects" value=Signal::derive(move || counts.get().total) accent="text-primary" />
                <CountCard label="Pending" value=Signal::derive(move || counts.get().pending) accent="text-error" />
                <CountCard label="In Progress" value=Signal::derive(move || counts.get().in_progress) accent="text-warning" />
                <CountCard label="Solved" value=Signal::derive(move || counts.get().solved) accent="text-success" />
            </div>

            <div class="flex flex-wrap items-end gap-4">
                <FilterInput
                    label="Mandal"
                    list_id="mandal-options"
                    value=Signal::derive(move || board.with(|b| b.filter().mandal.clone()))
                    options=Signal::derive(move || board.with(ProjectBoard::mandal_options))
                    on_input=Callback::new(move |v: String| board.update(|b| b.set_mandal_filter(v)))
                />
                <FilterInput
                    label="Constituency"
                    list_id="constituency-options"
                    value=Signal::derive(move || board.with(|b| b.filter().constituency.clone()))
                    options=Signal::derive(move || board.with(ProjectBoard::constituency_options))
                    on_input=Callback::new(move |v: String| board.update(|b| b.set_constituency_filter(v)))
                />
                <Show when=move || !board.with(|b| b.filter().is_empty())>
                    <button class="btn btn-sm btn-ghost" on:click=move |_| board.update(ProjectBoard::clear_filters)>
                        "Clear filters"
                    </button>
                </Show>
            </div>

            <ErrorBanner message=error />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <Show
                        when=move || !(loading.get() && board.with(|b| b.all().is_empty()))
                        fallback=|| view! { <Spinner label="Loading projects..." /> }
                    >
                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Project"</th>
                                        <th class="hidden md:table-cell">"Location"</th>
                                        <th class="hidden lg:table-cell">"Sponsor"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || page.get().total == 0>
                                        <tr>
                                            <td colspan="5" class="text-center py-8 text-base-content/50">
                                                "No projects found"
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || board.with(ProjectBoard::visible)
                                        key={|p| (p.id.clone(), p.status)}
                                        children=move |project| {
                                            let id = project.id.clone();
                                            // 失败时随列表回到原状态
                                            let current = {
                                                let id = id.clone();
                                                move || {
                                                    board
                                                        .with(|b| b.status_of(&id))
                                                        .unwrap_or(project.status)
                                                        .as_str()
                                                }
                                            };
                                            let for_delete = project.clone();
                                            view! {
                                                <tr>
                                                    <td>
                                                        <div class="font-semibold">{project.title.clone()}</div>
                                                        <div class="text-sm opacity-60 line-clamp-1">{project.description.clone()}</div>
                                                    </td>
                                                    <td class="hidden md:table-cell">
                                                        <div class="flex items-center gap-1 text-sm">
                                                            <MapPin attr:class="h-4 w-4 opacity-50" />
                                                            {format!("{}, {}", project.village, project.mandal)}
                                                        </div>
                                                        <div class="text-xs opacity-60">{project.constituency.clone()}</div>
                                                    </td>
                                                    <td class="hidden lg:table-cell text-sm">
                                                        {project.sponsor().map(str::to_string).unwrap_or_else(|| "-".into())}
                                                    </td>
                                                    <td>
                                                        <div class=format!("flex items-center gap-2 border-l-4 pl-2 {}", status_border(project.status))>
                                                            <select
                                                                class="select select-bordered select-sm"
                                                                disabled=move || board.with(ProjectBoard::is_updating)
                                                                prop:value=current
                                                                on:change=move |ev| {
                                                                    if let Some(status) = ProjectStatus::parse(&event_target_value(&ev)) {
                                                                        change_status(id.clone(), status);
                                                                    }
                                                                }
                                                            >
                                                                {ProjectStatus::ALL
                                                                    .into_iter()
                                                                    .map(|s| {
                                                                        view! {
                                                                            <option value=s.as_str() selected=s == project.status>
                                                                                {s.as_str()}
                                                                            </option>
                                                                        }
                                                                    })
                                                                    .collect_view()}
                                                            </select>
                                                        </div>
                                                    </td>
                                                    <td>
                                                        <button
                                                            class="btn btn-ghost btn-sm btn-square text-error"
                                                            aria-label="Delete project"
                                                            on:click=move |_| delete(for_delete.clone())
                                                        >
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                        <Pagination
                            page=page
                            on_change=Callback::new(move |n| board.update(|b| b.set_page(n)))
                        />
                    </Show>
                </div>
            </div>
        </div>
    }
}
