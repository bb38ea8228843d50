//! 站点统计数值编辑
//!
//! 每个分区编辑一个统计包；保存成功后把服务器确认的值写回应用缓存，公开页面随之更新。

use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, Spinner};
use crate::components::toast::use_toast;
use crate::web::abort::RequestScope;
use crate::web::query::{use_query_client, use_stats};
use crate::web::storage::SessionStore;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vikasam_shared::cache::QueryState;
use vikasam_shared::stats::{
    AboutStats, HeroStats, JoinStats, StatBag, StatField, StatSection, TransparencyStats,
};

fn restore_section() -> StatSection {
    SessionStore::stats_section()
        .as_deref()
        .and_then(StatSection::parse)
        .unwrap_or_default()
}

fn field_input<S: StatBag>(field: StatField, draft: RwSignal<S>, dirty: StoredValue<bool>) -> impl IntoView {
    let key = field.key;
    let input_type = if field.kind.is_numeric() { "number" } else { "text" };
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text font-semibold">{field.label}</span>
            </div>
            <input
                type=input_type
                min=field.kind.is_numeric().then_some("0")
                step=field.kind.is_numeric().then(|| field.kind.step())
                class="input input-bordered w-full"
                prop:value=move || draft.with(|d| d.field_value(key))
                // 失焦或回车时才规范化，避免输入小数点时被改写
                on:change=move |ev| {
                    let raw = event_target_value(&ev);
                    dirty.set_value(true);
                    draft.update(|d| d.set_field(key, &raw));
                }
            />
        </label>
    }
}

/// 单个统计包的编辑表单
fn stat_editor<S: StatBag>() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let query = use_query_client();
    let scope = RequestScope::new();

    let stats = use_stats::<S>();
    let draft = RwSignal::new(S::default());
    // 本地已修改时不再被缓存中的值覆盖
    let dirty = StoredValue::new(false);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    Effect::new(move |_| {
        if let QueryState::Ready(value) = stats.get() {
            if !dirty.get_value() {
                draft.set(value);
            }
        }
    });

    let load_error = Signal::derive(move || {
        stats
            .with(|s| s.error().map(|_| format!("Failed to load {} statistics", S::LABEL)))
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        set_error.set(None);

        let api = auth.api(&scope);
        let value = draft.get_untracked();
        spawn_local(async move {
            match api.update_stats(value).await {
                Ok(confirmed) => {
                    log::info!("[Admin] {} statistics updated", S::LABEL);
                    dirty.set_value(false);
                    query.set_stats(&confirmed);
                    draft.try_set(confirmed);
                    toast.success(format!("{} statistics updated successfully", S::SECTION.tab_label()));
                }
                Err(e) if e.is_aborted() => return,
                Err(e) if auth.handle_error(&e) => {}
                Err(e) => {
                    log::error!("[Admin] {} statistics update failed: {}", S::LABEL, e);
                    toast.error(e.user_message());
                    set_error.set(Some(e.user_message()));
                }
            }
            set_saving.try_set(false);
        });
    };

    view! {
        <Show
            when=move || !(stats.with(QueryState::is_loading) && !dirty.get_value())
            fallback=|| view! { <Spinner label="Loading statistics..." /> }
        >
            <form class="space-y-6" on:submit=on_submit>
                <ErrorBanner message=load_error />
                <ErrorBanner message=error />
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    {S::fields()
                        .iter()
                        .map(|&field| field_input(field, draft, dirty))
                        .collect_view()}
                </div>
                <div class="flex justify-end">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() {
                            view! { <span class="loading loading-spinner"></span> "Updating..." }.into_any()
                        } else {
                            format!("Update {}", S::SECTION.tab_label()).into_any()
                        }}
                    </button>
                </div>
            </form>
        </Show>
    }
}

#[component]
pub fn ValueUpdater() -> impl IntoView {
    let (section, set_section) = signal(restore_section());

    Effect::new(move |_| {
        SessionStore::set_stats_section(section.get().as_str());
    });

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body space-y-6">
                <div role="tablist" class="tabs tabs-boxed flex-wrap">
                    {StatSection::ALL
                        .into_iter()
                        .map(|s| {
                            view! {
                                <button
                                    role="tab"
                                    class=move || if section.get() == s { "tab tab-active" } else { "tab" }
                                    on:click=move |_| set_section.set(s)
                                >
                                    {s.tab_label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                {move || match section.get() {
                    StatSection::Hero => stat_editor::<HeroStats>().into_any(),
                    StatSection::About => stat_editor::<AboutStats>().into_any(),
                    StatSection::Join => stat_editor::<JoinStats>().into_any(),
                    StatSection::Transparency => stat_editor::<TransparencyStats>().into_any(),
                }}
            </div>
        </div>
    }
}
