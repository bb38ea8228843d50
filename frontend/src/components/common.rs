//! 页面间复用的小组件

use crate::components::icons::{AlertTriangle, ChevronLeft, ChevronRight};
use leptos::prelude::*;
use vikasam_shared::cache::QueryState;
use vikasam_shared::format::StatDisplay;
use vikasam_shared::paginate::Page;

/// 统计数值；零值以灰色占位样式显示
#[component]
pub fn StatValue(
    #[prop(into)] display: Signal<StatDisplay>,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    view! {
        <span class=move || {
            if display.with(|d| d.placeholder) {
                format!("{} text-base-content/40", class)
            } else {
                class.to_string()
            }
        }>{move || display.with(|d| d.text.clone())}</span>
    }
}

/// 统计包加载状态映射为展示值；加载中与失败都显示占位
pub fn stat_display<S: Clone>(
    state: &QueryState<S>,
    f: impl FnOnce(&S) -> StatDisplay,
    fallback: &str,
) -> StatDisplay {
    match state.ready() {
        Some(stats) => f(stats),
        None => StatDisplay {
            text: fallback.to_string(),
            placeholder: true,
        },
    }
}

#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <div role="alert" class="alert alert-error text-sm py-2">
                <AlertTriangle attr:class="h-5 w-5" />
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn Spinner(#[prop(optional)] label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-8 text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            {label}
        </div>
    }
}

/// 分页控件：上一页、页码、下一页与 "Showing a-b of n"
#[component]
pub fn Pagination(#[prop(into)] page: Signal<Page>, on_change: Callback<usize>) -> impl IntoView {
    view! {
        <div class="flex flex-col md:flex-row items-center justify-between gap-2 p-4">
            <span class="text-sm text-base-content/70">{move || page.get().label()}</span>
            <Show when=move || page.with(|p| p.page_count > 1)>
                <div class="join">
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || !page.get().has_prev()
                        on:click=move |_| on_change.run(page.get_untracked().current - 1)
                    >
                        <ChevronLeft attr:class="h-4 w-4" />
                    </button>
                    <For
                        each={move || page.get().numbers().collect::<Vec<_>>()}
                        key={|n| *n}
                        children={move |n| {
                            view! {
                                <button
                                    class=move || {
                                        if page.get().current == n {
                                            "join-item btn btn-sm btn-active"
                                        } else {
                                            "join-item btn btn-sm"
                                        }
                                    }
                                    on:click=move |_| on_change.run(n)
                                >
                                    {n}
                                </button>
                            }
                        }}
                    />
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || !page.get().has_next()
                        on:click=move |_| on_change.run(page.get_untracked().current + 1)
                    >
                        <ChevronRight attr:class="h-4 w-4" />
                    </button>
                </div>
            </Show>
        </div>
    }
}

/// 把表单结构体中的一个字符串字段拆成读信号与写回调
pub fn lens<T: Send + Sync + 'static>(
    state: RwSignal<T>,
    get: fn(&T) -> &String,
    set: fn(&mut T) -> &mut String,
) -> (Signal<String>, Callback<String>) {
    (
        Signal::derive(move || state.with(|s| get(s).clone())),
        Callback::new(move |value: String| state.update(|s| *set(s) = value)),
    )
}

/// 带标签的单行输入框
#[component]
pub fn TextField(
    label: &'static str,
    field: (Signal<String>, Callback<String>),
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let (value, on_input) = field;
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text font-semibold">
                    {label}
                    {required.then_some(" *")}
                </span>
            </div>
            <input
                type=input_type
                class="input input-bordered w-full"
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </label>
    }
}

/// 带标签的多行输入框
#[component]
pub fn TextArea(
    label: &'static str,
    field: (Signal<String>, Callback<String>),
    #[prop(default = 3)] rows: u32,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let (value, on_input) = field;
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text font-semibold">
                    {label}
                    {required.then_some(" *")}
                </span>
            </div>
            <textarea
                class="textarea textarea-bordered w-full"
                rows=rows
                placeholder=placeholder
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </label>
    }
}
