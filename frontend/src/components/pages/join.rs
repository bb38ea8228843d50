use crate::components::common::{ErrorBanner, StatValue, TextArea, TextField, lens, stat_display};
use crate::components::icons::{CheckCircle, Heart, MapPin, Users};
use crate::config::use_config;
use crate::web::abort::RequestScope;
use crate::web::query::use_stats;
use leptos::prelude::*;
use leptos::task::spawn_local;
use vikasam_shared::VolunteerRole;
use vikasam_shared::format::StatDisplay;
use vikasam_shared::stats::JoinStats;
use vikasam_shared::validate::JoinApplication;

/// 以 "₹12L" 的形式展示资金
fn lakh_display(value: f64) -> StatDisplay {
    let d = StatDisplay::count(value);
    StatDisplay {
        text: format!("₹{}L", d.text),
        placeholder: d.placeholder,
    }
}

#[component]
fn JoinStatsStrip() -> impl IntoView {
    let stats = use_stats::<JoinStats>();
    let items = [
        (
            "Active Volunteers",
            Signal::derive(move || {
                stats.with(|s| stat_display(s, |j| StatDisplay::count(j.active_volunteers), "0"))
            }),
        ),
        (
            "Constituencies Covered",
            Signal::derive(move || {
                stats.with(|s| {
                    stat_display(s, |j| StatDisplay::count(j.constituencies_covered), "0")
                })
            }),
        ),
        (
            "Problems Solved",
            Signal::derive(move || {
                stats.with(|s| stat_display(s, |j| StatDisplay::count(j.problems_solved), "0"))
            }),
        ),
        (
            "Funds Utilized",
            Signal::derive(move || {
                stats.with(|s| stat_display(s, |j| lakh_display(j.funds_utilized), "₹0L"))
            }),
        ),
    ];

    view! {
        <div class="stats stats-vertical md:stats-horizontal shadow w-full mb-12">
            {items
                .into_iter()
                .map(|(label, value)| {
                    view! {
                        <div class="stat place-items-center">
                            <div class="stat-title">{label}</div>
                            <StatValue display=value class="stat-value text-primary" />
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn MissionCard(title: &'static str, text: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="flex items-start gap-4 p-4 rounded-xl bg-base-200">
            <div class="text-primary">{children()}</div>
            <div>
                <div class="font-semibold">{title}</div>
                <div class="text-sm text-base-content/70">{text}</div>
            </div>
        </div>
    }
}

#[component]
pub fn JoinPage() -> impl IntoView {
    let config = use_config();
    let scope = RequestScope::new();
    let form = RwSignal::new(JoinApplication::default());
    let (submitting, set_submitting) = signal(false);
    let (submitted, set_submitted) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let relay_url = StoredValue::new(config.join_relay_url);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let application = form.get_untracked();
        if let Err(e) = application.validate() {
            set_error.set(Some(e.user_message()));
            return;
        }
        set_error.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            let body = match serde_json::to_value(&application) {
                Ok(body) => body,
                Err(e) => {
                    log::error!("[Join] failed to encode application: {}", e);
                    set_error.set(Some("Failed to submit. Please try again.".into()));
                    set_submitting.set(false);
                    return;
                }
            };
            let result = scope
                .http()
                .post_no_cors(&relay_url.get_value(), &body)
                .await;
            match result {
                Ok(()) => {
                    log::info!("[Join] application sent for {}", application.name);
                    set_submitted.set(true);
                    form.set(JoinApplication::default());
                }
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::error!("[Join] submit failed: {}", e);
                    set_error.set(Some("Failed to submit. Please try again.".into()));
                }
            }
            set_submitting.set(false);
        });
    };

    let form_view = move || {
        view! {
            <form class="space-y-4" on:submit=on_submit>
                <ErrorBanner message=error />
                <TextField
                    label="Full Name"
                    field=lens(form, |f| &f.name, |f| &mut f.name)
                    placeholder="Enter your full name"
                    required=true
                />
                <label class="form-control w-full">
                    <div class="label">
                        <span class="label-text font-semibold">"Role *"</span>
                    </div>
                    <select
                        class="select select-bordered w-full"
                        required
                        prop:value=move || form.with(|f| f.role.clone())
                        on:change=move |ev| {
                            let role = event_target_value(&ev);
                            form.update(|f| f.role = role);
                        }
                    >
                        <option value="">"Select your role"</option>
                        {VolunteerRole::ALL
                            .into_iter()
                            .map(|role| view! { <option value=role.label()>{role.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <TextField
                        label="District"
                        field=lens(form, |f| &f.district, |f| &mut f.district)
                        required=true
                    />
                    <TextField
                        label="Mandal"
                        field=lens(form, |f| &f.mandal, |f| &mut f.mandal)
                        required=true
                    />
                    <TextField
                        label="Village"
                        field=lens(form, |f| &f.village, |f| &mut f.village)
                        required=true
                    />
                </div>
                <TextField
                    label="College / Profession"
                    field=lens(form, |f| &f.college_profession, |f| &mut f.college_profession)
                    required=true
                />
                <TextField
                    label="Contact Number"
                    field=lens(form, |f| &f.contact, |f| &mut f.contact)
                    input_type="tel"
                    required=true
                />
                <TextArea
                    label="Why do you want to join?"
                    field=lens(form, |f| &f.motivation, |f| &mut f.motivation)
                    rows=4
                    required=true
                />
                <button type="submit" class="btn btn-primary w-full" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Submitting..." } else { "Join Andhra Vikasam" }}
                </button>
            </form>
        }
    };

    let success_view = move || {
        view! {
            <div class="text-center space-y-4 py-8">
                <CheckCircle attr:class="h-16 w-16 mx-auto text-success" />
                <h2 class="text-3xl font-bold">"Welcome to Andhra Vikasam!"</h2>
                <p class="text-base-content/70">
                    "You've successfully joined Andhra Vikasam. Your application is under review. Together, let's build our Andhra."
                </p>
                <button class="btn btn-outline" on:click=move |_| set_submitted.set(false)>
                    "Submit Another Application"
                </button>
            </div>
        }
    };

    view! {
        <div class="min-h-screen bg-base-100 py-16">
            <div class="max-w-7xl mx-auto px-4">
                <div class="text-center mb-12">
                    <h1 class="text-5xl font-bold text-primary mb-4">"Join the Movement"</h1>
                    <p class="text-xl text-base-content/70">
                        "Be the change. Work with youth across Andhra Pradesh to solve real village problems."
                    </p>
                </div>

                <JoinStatsStrip />

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-12">
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <Show when=move || submitted.get() fallback=form_view>
                                {success_view}
                            </Show>
                        </div>
                    </div>

                    <div class="space-y-4">
                        <h2 class="text-3xl font-bold">"Join Our Mission"</h2>
                        <MissionCard title="Empower" text="Work directly with villages">
                            <MapPin attr:class="h-6 w-6" />
                        </MissionCard>
                        <MissionCard title="Connect" text="Build youth networks">
                            <Users attr:class="h-6 w-6" />
                        </MissionCard>
                        <MissionCard title="Impact" text="Create real solutions">
                            <Heart attr:class="h-6 w-6" />
                        </MissionCard>
                    </div>
                </div>
            </div>
        </div>
    }
}
