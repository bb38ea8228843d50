use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, Pagination, Spinner};
use crate::components::icons::{MapPin, Users};
use crate::web::abort::RequestScope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vikasam_shared::client::ApiClient;
use vikasam_shared::format::format_display_date;
use vikasam_shared::paginate::Page;
use vikasam_shared::protocol::ListProjects;
use vikasam_shared::{Project, ProjectStatus};

fn status_badge_class(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Solved => "badge badge-success",
        ProjectStatus::InProgress => "badge badge-warning",
        ProjectStatus::Pending => "badge badge-error",
    }
}

#[component]
fn ProjectCard(project: Project) -> impl IntoView {
    let date = project.created_at.as_ref().map(format_display_date);
    let sponsor = project.sponsor().map(str::to_string);
    view! {
        <div class="card bg-base-100 shadow-sm hover:shadow-md transition-shadow overflow-hidden">
            <figure class="relative aspect-[3/2]">
                <img
                    src=project.cover_image().to_string()
                    alt=project.title.clone()
                    loading="lazy"
                    class="w-full h-full object-cover"
                />
                <span class=format!("absolute top-3 right-3 {}", status_badge_class(project.status))>
                    {project.status.as_str()}
                </span>
                {date.map(|d| {
                    view! {
                        <span class="absolute top-3 left-3 bg-black/50 text-white px-2 py-1 rounded text-xs">
                            {d}
                        </span>
                    }
                })}
            </figure>
            <div class="card-body p-4">
                <h3 class="card-title text-lg line-clamp-2">{project.title}</h3>
                <p class="text-sm text-base-content/70 line-clamp-2">{project.description}</p>
                <div class="flex items-center gap-2 text-sm text-base-content/60">
                    <MapPin attr:class="h-4 w-4" />
                    {format!("{}, {}", project.village, project.mandal)}
                </div>
                {sponsor.map(|s| {
                    view! {
                        <div class="flex items-center gap-2 text-sm text-base-content/60">
                            <Users attr:class="h-4 w-4" />
                            {format!("Sponsored by {}", s)}
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let auth = use_auth();
    let scope = RequestScope::new();

    let (filter, set_filter) = signal(Option::<ProjectStatus>::None);
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (current_page, set_current_page) = signal(1usize);
    // 筛选切换后丢弃旧请求的响应
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        let status = filter.get();
        let id = generation.get_value() + 1;
        generation.set_value(id);
        set_loading.set(true);
        set_error.set(None);

        let api = ApiClient::new(scope.http(), auth.base_url());
        spawn_local(async move {
            let result = api.call(&ListProjects { status }).await;
            if generation.try_get_value() != Some(id) {
                return;
            }
            match result {
                Ok(list) => {
                    log::debug!("[Projects] loaded {} projects", list.len());
                    set_projects.set(list);
                }
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::error!("[Projects] load failed: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_loading.set(false);
        });
    });

    let page = Memo::new(move |_| projects.with(|p| Page::of(p.len(), current_page.get())));
    let visible = move || projects.with(|p| page.get().slice(p).to_vec());

    let choose = move |status: Option<ProjectStatus>| {
        set_filter.set(status);
        set_current_page.set(1);
    };

    let filter_button = move |label: &'static str, status: Option<ProjectStatus>| {
        view! {
            <button
                class=move || {
                    if filter.get() == status { "join-item btn btn-sm btn-primary" } else { "join-item btn btn-sm" }
                }
                on:click=move |_| choose(status)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 pt-12 pb-12">
            <div class="max-w-7xl mx-auto px-4">
                <div class="text-center mb-12 space-y-4">
                    <h1 class="text-4xl font-bold">"Community Projects"</h1>
                    <p class="text-lg text-base-content/70">
                        "Track the progress of various development initiatives"
                    </p>
                </div>

                <div class="flex justify-center mb-8 overflow-x-auto">
                    <div class="join">
                        {filter_button("All", None)}
                        {ProjectStatus::ALL
                            .into_iter()
                            .map(|s| filter_button(s.as_str(), Some(s)))
                            .collect_view()}
                    </div>
                </div>

                <ErrorBanner message=error />

                <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Loading projects..." /> }>
                    <Show
                        when=move || projects.with(|p| !p.is_empty())
                        fallback=|| view! {
                            <p class="text-center text-base-content/60 py-12">"No projects found"</p>
                        }
                    >
                        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6 mb-8">
                            <For
                                each=visible
                                key={|p| p.id.clone()}
                                children=|project| view! { <ProjectCard project=project /> }
                            />
                        </div>
                        <Pagination
                            page=page
                            on_change=Callback::new(move |n| set_current_page.set(n))
                        />
                    </Show>
                </Show>
            </div>
        </div>
    }
}
