//! 成员审批队列：按状态筛选，待审批成员可批准或拒绝，成功后重新拉取列表

use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, Spinner};
use crate::components::icons::{CheckCircle, Users, XCircle};
use crate::components::toast::use_toast;
use crate::web::abort::RequestScope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vikasam_shared::members::{MemberAction, MemberFilter, transition};
use vikasam_shared::protocol::{ListMembers, UpdateMemberStatus};
use vikasam_shared::{Member, MemberStatus};

fn status_badge(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Approved => "badge badge-success",
        MemberStatus::Rejected => "badge badge-error",
        MemberStatus::Pending => "badge badge-warning",
    }
}

#[component]
fn ActionButton(action: MemberAction, on_click: Callback<MemberAction>) -> impl IntoView {
    let (class, icon) = match action {
        MemberAction::Approve => (
            "btn btn-ghost btn-sm btn-square text-success",
            view! { <CheckCircle attr:class="h-5 w-5" /> }.into_any(),
        ),
        MemberAction::Reject => (
            "btn btn-ghost btn-sm btn-square text-error",
            view! { <XCircle attr:class="h-5 w-5" /> }.into_any(),
        ),
    };
    view! {
        <button class=class title=action.label() aria-label=action.label() on:click=move |_| on_click.run(action)>
            {icon}
        </button>
    }
}

#[component]
pub fn MemberQueue() -> impl IntoView {
    let auth = use_auth();
    let toast = use_toast();
    let scope = RequestScope::new();

    let base_filter = MemberFilter::for_admin(auth.admin().as_ref());
    let (status, set_status) = signal(base_filter.status);
    let (members, set_members) = signal(Vec::<Member>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    // 状态切换时递增，丢弃过期响应
    let generation = StoredValue::new(0u64);
    let filter = StoredValue::new(base_filter);

    let fetch = move |status: MemberStatus| {
        let id = generation.get_value() + 1;
        generation.set_value(id);
        set_loading.set(true);
        set_error.set(None);

        let req = ListMembers {
            filter: filter.get_value().with_status(status),
        };
        let api = auth.api(&scope);
        spawn_local(async move {
            let result = api.call(&req).await;
            if generation.try_get_value() != Some(id) {
                return;
            }
            match result {
                Ok(list) => {
                    log::debug!("[Admin] loaded {} {} members", list.len(), status);
                    set_members.set(list);
                }
                Err(e) if e.is_aborted() => return,
                Err(e) if auth.handle_error(&e) => return,
                Err(e) => {
                    log::error!("[Admin] load members failed: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| fetch(status.get()));

    let decide = move |member: Member, action: MemberAction| {
        let target = match transition(member.status, action.target()) {
            Ok(target) => target,
            Err(e) => {
                log::warn!("[Admin] {}", e);
                toast.error(e.message().to_string());
                return;
            }
        };
        let api = auth.api(&scope);
        spawn_local(async move {
            let req = UpdateMemberStatus {
                id: member.id.clone(),
                status: target,
            };
            match api.call(&req).await {
                Ok(_) => {
                    log::info!("[Admin] member {} set to {}", member.id, target);
                    toast.success(format!("{} is now {}", member.name, target));
                    fetch(status.get_untracked());
                }
                Err(e) if e.is_aborted() || auth.handle_error(&e) => {}
                Err(e) => {
                    log::error!("[Admin] member {} update failed: {}", member.id, e);
                    toast.error(e.user_message());
                }
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body flex-col sm:flex-row sm:items-center justify-between gap-4">
                    <div>
                        <h2 class="card-title">"Member Management"</h2>
                        <p class="text-sm text-base-content/60">"Manage and approve member requests"</p>
                    </div>
                    <select
                        class="select select-bordered"
                        prop:value=move || status.get().as_str()
                        on:change=move |ev| {
                            if let Some(s) = MemberStatus::parse(&event_target_value(&ev)) {
                                set_status.set(s);
                            }
                        }
                    >
                        {MemberStatus::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.filter_label()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <ErrorBanner message=error />

            <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Loading members..." /> }>
                <Show
                    when=move || members.with(|m| !m.is_empty())
                    fallback=move || view! {
                        <div class="card bg-base-100 shadow-sm">
                            <div class="card-body items-center text-center py-12">
                                <div class="w-16 h-16 rounded-full bg-primary/10 flex items-center justify-center mb-4">
                                    <Users attr:class="h-8 w-8 text-primary" />
                                </div>
                                <h3 class="text-lg font-semibold">"No members found"</h3>
                                <p class="text-base-content/60">
                                    {move || format!("There are no members currently {}", status.get())}
                                </p>
                            </div>
                        </div>
                    }
                >
                    <div class="card bg-base-100 shadow-sm overflow-x-auto">
                        <table class="table w-full">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th class="hidden sm:table-cell">"Role"</th>
                                    <th class="hidden md:table-cell">"District"</th>
                                    <th class="hidden lg:table-cell">"Contact"</th>
                                    <th>"Status"</th>
                                    <th class="text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || members.get()
                                    key={|m| (m.id.clone(), m.status)}
                                    children=move |member| {
                                        let actions = member.status.actions();
                                        let row = StoredValue::new(member.clone());
                                        let on_action = Callback::new(move |action| decide(row.get_value(), action));
                                        view! {
                                            <tr class="hover">
                                                <td>
                                                    <div class="font-medium">{member.name.clone()}</div>
                                                    <div class="text-sm opacity-60 sm:hidden">{member.role.clone()}</div>
                                                </td>
                                                <td class="hidden sm:table-cell">{member.role.clone()}</td>
                                                <td class="hidden md:table-cell">{member.district.clone()}</td>
                                                <td class="hidden lg:table-cell">{member.contact.clone()}</td>
                                                <td>
                                                    <span class=status_badge(member.status)>{member.status.as_str()}</span>
                                                </td>
                                                <td>
                                                    <div class="flex justify-end gap-2">
                                                        {actions
                                                            .iter()
                                                            .map(|&action| view! { <ActionButton action=action on_click=on_action /> })
                                                            .collect_view()}
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </Show>
            </Show>
        </div>
    }
}
