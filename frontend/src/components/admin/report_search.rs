//! 问题报告检索：筛选、联想输入、结果卡片、详情弹窗与删除

use crate::auth::use_auth;
use crate::components::admin::project_manager::confirm;
use crate::components::common::{ErrorBanner, Spinner};
use crate::components::icons::{Close, FileText, MapPin, Search, Trash2, Users};
use crate::components::toast::use_toast;
use crate::web::abort::RequestScope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use vikasam_shared::protocol::{DeleteProblem, ProblemSuggestions, SearchProblems};
use vikasam_shared::search::{ReportSearch, SuggestionField, suggestion_query};
use vikasam_shared::{ProblemCategory, ProblemReport};

/// 输入框失焦后延迟收起联想列表，让点击先生效
const SUGGESTION_HIDE_DELAY: Duration = Duration::from_millis(200);

#[component]
fn SuggestInput(
    field: SuggestionField,
    placeholder: &'static str,
    search: RwSignal<ReportSearch>,
) -> impl IntoView {
    let auth = use_auth();
    let scope = RequestScope::new();

    let suggestions = RwSignal::new(Vec::<String>::new());
    let (visible, set_visible) = signal(false);
    // 每次按键都会发请求，只保留最后一次的结果
    let generation = StoredValue::new(0u64);

    let value = move || {
        search.with(|s| match field {
            SuggestionField::District => s.filters.district.clone(),
            SuggestionField::PinCode => s.filters.pin_code.clone(),
        })
    };

    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        search.update(|s| s.filters.set(field, text.clone()));
        set_visible.set(true);

        let id = generation.get_value() + 1;
        generation.set_value(id);
        if suggestion_query(field, &text).is_none() {
            suggestions.set(Vec::new());
            return;
        }

        let api = auth.api(&scope);
        spawn_local(async move {
            let result = api.call(&ProblemSuggestions { field, query: text }).await;
            if generation.try_get_value() != Some(id) {
                return;
            }
            match result {
                Ok(list) => {
                    suggestions.try_set(list.0);
                }
                Err(e) if e.is_aborted() || auth.handle_error(&e) => {}
                Err(e) => log::warn!("[Admin] {} suggestions failed: {}", field.as_str(), e),
            }
        });
    };

    let on_blur = move |_| {
        set_timeout(
            move || {
                set_visible.try_set(false);
            },
            SUGGESTION_HIDE_DELAY,
        );
    };

    let pick = move |choice: String| {
        search.update(|s| s.filters.set(field, choice));
        set_visible.set(false);
    };

    view! {
        <div class="relative flex-1 min-w-[200px]">
            <input
                type="text"
                class="input input-bordered w-full"
                placeholder=placeholder
                autocomplete="off"
                prop:value=value
                on:input=on_input
                on:blur=on_blur
            />
            <Show when=move || visible.get() && suggestions.with(|s| !s.is_empty())>
                <ul class="menu absolute z-10 w-full mt-1 bg-base-100 rounded-box shadow-lg max-h-48 overflow-y-auto flex-nowrap">
                    {move || {
                        suggestions
                            .get()
                            .into_iter()
                            .map(|choice| {
                                let label = choice.clone();
                                view! {
                                    <li>
                                        <button type="button" on:click=move |_| pick(choice.clone())>
                                            {label}
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}

/// 详情弹窗，点击遮罩或按 Escape 关闭
#[component]
fn ReportModal(report: ProblemReport, on_close: Callback<()>) -> impl IntoView {
    let handle = window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let ProblemReport {
        location,
        details,
        images,
        ..
    } = report.clone();

    view! {
        <div
            class="fixed inset-0 bg-black/50 z-50 flex items-center justify-center p-4"
            on:click=move |_| on_close.run(())
        >
            <div
                class="card bg-base-100 shadow-2xl max-w-3xl w-full max-h-[90vh] overflow-y-auto"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="flex items-center justify-between p-4 border-b border-base-200">
                    <h2 class="text-xl font-semibold">"Problem Details"</h2>
                    <button class="btn btn-ghost btn-sm btn-square" aria-label="Close" on:click=move |_| on_close.run(())>
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                <div class="p-4 space-y-6">
                    <span class="badge badge-ghost">{report.category_title()}</span>
                    <div>
                        <h3 class="text-lg font-medium mb-2">{details.title}</h3>
                        <p class="text-base-content/70 whitespace-pre-wrap">{details.description}</p>
                    </div>

                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-4 bg-base-200 p-4 rounded-lg text-sm">
                        <div class="space-y-2">
                            <h4 class="font-medium">"Location Details"</h4>
                            <p><span class="opacity-60">"Village: "</span>{location.village}</p>
                            <p><span class="opacity-60">"District: "</span>{location.district}</p>
                            <p><span class="opacity-60">"State: "</span>{location.state}</p>
                            <p><span class="opacity-60">"PIN Code: "</span>{location.pin_code}</p>
                            {(!location.landmark.is_empty()).then(|| view! {
                                <p><span class="opacity-60">"Landmark: "</span>{location.landmark.clone()}</p>
                            })}
                        </div>
                        <div class="space-y-2">
                            <h4 class="font-medium">"Contact Information"</h4>
                            <p><span class="opacity-60">"Name: "</span>{details.name}</p>
                            <p><span class="opacity-60">"Phone: "</span>{details.contact}</p>
                            {(!details.email.is_empty()).then(|| view! {
                                <p><span class="opacity-60">"Email: "</span>{details.email.clone()}</p>
                            })}
                            <p><span class="opacity-60">"Urgency: "</span>{details.urgency_level.as_str()}</p>
                        </div>
                    </div>

                    {(!images.is_empty()).then(|| view! {
                        <div>
                            <h4 class="font-medium mb-3">"Images"</h4>
                            <div class="grid grid-cols-2 sm:grid-cols-3 gap-4">
                                {images
                                    .iter()
                                    .enumerate()
                                    .map(|(i, src)| view! {
                                        <img
                                            src=src.clone()
                                            alt=format!("Problem {}", i + 1)
                                            class="rounded-lg object-cover w-full aspect-video"
                                        />
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    })}
                </div>
            </div>
        </div>
    }
}

#[component]
fn ReportCard(report: ProblemReport, on_open: Callback<String>, on_delete: Callback<String>) -> impl IntoView {
    let open_id = report.id.clone();
    let delete_id = report.id.clone();
    let extra = report.extra_image_count();
    let thumbnail = report.images.first().cloned();

    view! {
        <div
            class="card card-side bg-base-100 shadow-sm hover:shadow-md cursor-pointer group overflow-hidden"
            on:click=move |_| on_open.run(open_id.clone())
        >
            <figure class="w-40 sm:w-48 shrink-0 bg-base-200 relative">
                {match thumbnail {
                    Some(src) => view! {
                        <img src=src alt="Problem thumbnail" class="w-full h-full object-cover" />
                    }.into_any(),
                    None => view! { <FileText attr:class="h-8 w-8 opacity-40" /> }.into_any(),
                }}
                {(extra > 0).then(|| view! {
                    <span class="absolute bottom-2 right-2 badge badge-neutral badge-sm">{format!("+{}", extra)}</span>
                })}
            </figure>
            <div class="card-body p-4">
                <div class="flex items-center justify-between">
                    <span class="badge badge-primary badge-outline">{report.category_title()}</span>
                    <button
                        class="btn btn-ghost btn-sm btn-square text-error opacity-0 group-hover:opacity-100"
                        title="Delete report"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_delete.run(delete_id.clone());
                        }
                    >
                        <Trash2 attr:class="h-5 w-5" />
                    </button>
                </div>
                <h3 class="font-medium text-lg line-clamp-1">{report.details.title.clone()}</h3>
                <p class="text-sm text-base-content/70 line-clamp-2">{report.details.description.clone()}</p>
                <div class="flex flex-wrap gap-4 text-sm text-base-content/60">
                    <span class="flex items-center gap-1">
                        <MapPin attr:class="h-4 w-4" />
                        {format!("{}, {}", report.location.village, report.location.district)}
                    </span>
                    <span>{report.location.pin_code.clone()}</span>
                    <span class="flex items-center gap-1">
                        <Users attr:class="h-4 w-4" />
                        {report.details.name.clone()}
                    </span>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ReportSearchPanel() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let scope = RequestScope::new();

    let search = RwSignal::new(ReportSearch::default());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (selected, set_selected) = signal(Option::<ProblemReport>::None);

    let run_search = move || {
        if loading.get_untracked() {
            return;
        }
        let mut ticket = 0;
        search.update(|s| ticket = s.begin());
        set_loading.set(true);
        set_error.set(None);

        let filters = search.with_untracked(|s| s.filters.clone());
        let api = auth.api(&scope);
        spawn_local(async move {
            let result = api.call(&SearchProblems { filters }).await;
            // 清空之后到达的响应直接丢弃
            if search.try_with_untracked(|s| s.is_current(ticket)) != Some(true) {
                log::debug!("[Admin] dropping stale search #{}", ticket);
                return;
            }
            match result {
                Ok(results) => {
                    log::debug!("[Admin] search returned {} reports", results.len());
                    search.update(|s| {
                        s.set_results(ticket, results);
                    });
                }
                Err(e) if e.is_aborted() => return,
                Err(e) if auth.handle_error(&e) => {}
                Err(e) => {
                    log::error!("[Admin] report search failed: {}", e);
                    set_error.set(Some("Failed to fetch reports".into()));
                }
            }
            set_loading.set(false);
        });
    };

    let clear = move |_| {
        search.update(ReportSearch::clear);
        set_error.set(None);
        set_loading.set(false);
    };

    let open = Callback::new(move |id: String| {
        set_selected.set(search.with_untracked(|s| s.find(&id).cloned()));
    });

    let delete = Callback::new(move |id: String| {
        if !confirm("Are you sure you want to delete this report?") {
            return;
        }
        let api = auth.api(&scope);
        spawn_local(async move {
            match api.call(&DeleteProblem { id: id.clone() }).await {
                Ok(_) => {
                    search.update(|s| {
                        s.remove(&id);
                    });
                    if selected.with_untracked(|r| r.as_ref().is_some_and(|r| r.id == id)) {
                        set_selected.set(None);
                    }
                    toast.success("Report deleted successfully");
                }
                Err(e) if e.is_aborted() || auth.handle_error(&e) => {}
                Err(e) => {
                    log::error!("[Admin] delete report {} failed: {}", id, e);
                    toast.error("Failed to delete report");
                }
            }
        });
    });

    let close_modal = Callback::new(move |_| set_selected.set(None));

    view! {
        <div class="space-y-6">
            <form
                class="card bg-base-100 shadow-sm"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    run_search();
                }
            >
                <div class="card-body flex-row flex-wrap gap-4">
                    <input
                        type="search"
                        class="input input-bordered flex-1 min-w-[200px]"
                        placeholder="Search title or description"
                        prop:value=move || search.with(|s| s.filters.search.clone())
                        on:input=move |ev| search.update(|s| s.filters.search = event_target_value(&ev))
                    />
                    <SuggestInput field=SuggestionField::PinCode placeholder="Search by PIN code" search=search />
                    <SuggestInput field=SuggestionField::District placeholder="Search by district" search=search />
                    <select
                        class="select select-bordered flex-1 min-w-[200px]"
                        prop:value=move || search.with(|s| s.filters.category.clone())
                        on:change=move |ev| search.update(|s| s.filters.category = event_target_value(&ev))
                    >
                        <option value="">"All Categories"</option>
                        {ProblemCategory::ALL
                            .into_iter()
                            .map(|c| view! { <option value=c.id()>{c.title()}</option> })
                            .collect_view()}
                    </select>
                    <div class="flex gap-2">
                        <button type="submit" class="btn btn-primary gap-2" disabled=move || loading.get()>
                            <Search attr:class="h-4 w-4" />
                            "Search"
                        </button>
                        <button type="button" class="btn btn-ghost" on:click=clear>"Clear"</button>
                    </div>
                </div>
            </form>

            <ErrorBanner message=error />

            {move || {
                if !search.with(|s| s.has_searched) {
                    view! {
                        <div class="text-center py-12">
                            <div class="w-16 h-16 bg-primary/10 rounded-full flex items-center justify-center mx-auto mb-4">
                                <Search attr:class="h-8 w-8 text-primary" />
                            </div>
                            <h3 class="text-lg font-medium mb-2">"Search for Problem Reports"</h3>
                            <p class="text-base-content/60">
                                "Use the filters above to search for specific problem reports"
                            </p>
                        </div>
                    }
                    .into_any()
                } else if loading.get() {
                    view! { <Spinner label="Loading reports..." /> }.into_any()
                } else if error.with(Option::is_some) {
                    ().into_any()
                } else if search.with(|s| s.results().is_empty()) {
                    view! {
                        <p class="text-center py-12 text-base-content/60">
                            "No reports found matching your search criteria"
                        </p>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="space-y-4">
                            <For
                                each=move || search.with(|s| s.results().to_vec())
                                key={|r| r.id.clone()}
                                children=move |report| view! {
                                    <ReportCard report=report on_open=open on_delete=delete />
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}

            {move || {
                selected
                    .get()
                    .map(|report| view! { <ReportModal report=report on_close=close_modal /> })
            }}
        </div>
    }
}
