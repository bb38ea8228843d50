//! 问题上报向导页面
//!
//! 向导状态（步骤、分类、表单、预览）保存在 `ReportWizard<PhotoPreview>` 中，
//! 与之顺序一致的 `File` 另存于本地 `StoredValue`，提交时才读取。

use crate::auth::use_auth;
use crate::components::common::{TextArea, TextField, lens};
use crate::components::icons::{Camera, Check, ChevronLeft, ChevronRight, MapPin, Trash2};
use crate::components::toast::use_toast;
use crate::config::{ImageUploadTarget, use_config};
use crate::web::abort::RequestScope;
use crate::web::http::BrowserHttpClient;
use crate::web::preview::{PhotoPreview, object_url, revoke, revoke_all, take_selected_files};
use leptos::prelude::*;
use leptos::task::spawn_local;
use vikasam_shared::client::ApiClient;
use vikasam_shared::wizard::{
    GEO_TIMEOUT_MS, GeoError, MAX_PHOTOS, ReportWizard, WizardStep,
};
use vikasam_shared::{ApiError, ApiResult, ProblemCategory, UrgencyLevel};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{File, FormData, Position, PositionError, PositionOptions};

type Wizard = ReportWizard<PhotoPreview>;

/// 逐张上传到图床，返回可公开访问的地址
async fn upload_images(
    http: &BrowserHttpClient,
    target: &ImageUploadTarget,
    files: &[File],
) -> ApiResult<Vec<String>> {
    let mut urls = Vec::with_capacity(files.len());
    for file in files {
        let form = FormData::new().map_err(|e| ApiError::network(format!("{:?}", e)))?;
        form.append_with_blob("file", file)
            .and_then(|_| form.append_with_str("upload_preset", &target.preset))
            .map_err(|e| ApiError::network(format!("{:?}", e)))?;

        let resp = http.post_form(&target.url, None, form).await?;
        if !resp.is_success() {
            return Err(ApiError::from_status(resp.status, "Image upload failed")
                .in_op_with("images.upload", file.name()));
        }
        let body: serde_json::Value = resp.json()?;
        match body.get("secure_url").and_then(|v| v.as_str()) {
            Some(url) => urls.push(url.to_string()),
            None => {
                return Err(ApiError::decode("Upload response has no secure_url")
                    .in_op_with("images.upload", file.name()));
            }
        }
    }
    Ok(urls)
}

/// 请求一次高精度定位，结果写回向导
fn request_gps(wizard: RwSignal<Wizard>) {
    let geolocation = web_sys::window().and_then(|w| w.navigator().geolocation().ok());
    let Some(geolocation) = geolocation else {
        wizard.update(|w| w.set_gps_error(GeoError::Unsupported));
        return;
    };

    let on_success = Closure::once_into_js(move |pos: Position| {
        let coords = pos.coords();
        log::debug!("[Report] gps fix {},{}", coords.latitude(), coords.longitude());
        wizard.try_update(|w| w.set_gps(coords.latitude(), coords.longitude()));
    });
    let on_error = Closure::once_into_js(move |err: PositionError| {
        let error = GeoError::from_code(err.code());
        log::warn!("[Report] gps failed: {}", error);
        wizard.try_update(|w| w.set_gps_error(error));
    });

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(GEO_TIMEOUT_MS);
    options.set_maximum_age(0);

    if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
        on_success.unchecked_ref(),
        Some(on_error.unchecked_ref()),
        &options,
    ) {
        log::warn!("[Report] getCurrentPosition threw: {:?}", e);
        wizard.update(|w| w.set_gps_error(GeoError::Unknown));
    }
}

#[component]
fn CategoryStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Select Problem Category"</h2>
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                {ProblemCategory::ALL
                    .into_iter()
                    .map(|category| {
                        let selected = move || wizard.with(|w| w.category == Some(category));
                        view! {
                            <button
                                type="button"
                                class=move || {
                                    if selected() {
                                        "card bg-primary text-primary-content ring-2 ring-primary ring-offset-2 p-4 text-center"
                                    } else {
                                        "card bg-base-100 border border-base-300 hover:bg-base-200 p-4 text-center"
                                    }
                                }
                                on:click=move |_| wizard.update(|w| w.select_category(category))
                            >
                                <h3 class="font-semibold text-lg mb-2">{category.title()}</h3>
                                <p class="text-sm opacity-80 mb-2">{category.description()}</p>
                                <div class="text-xs font-medium">{category.timeline()}</div>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn LocationStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let gps = move || wizard.with(|w| w.location.gps_location.clone());
    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Problem Location"</h2>
            <div>
                <button type="button" class="btn btn-outline btn-primary w-full gap-2" on:click=move |_| request_gps(wizard)>
                    <MapPin attr:class="h-5 w-5" />
                    {move || if gps().is_empty() { "Get GPS Location" } else { "Update Location" }}
                </button>
                <Show when=move || !gps().is_empty()>
                    <p class="mt-2 text-sm text-success text-center">
                        {move || format!("Location obtained: {}", gps())}
                    </p>
                </Show>
                {move || {
                    wizard
                        .with(|w| w.gps_error)
                        .map(|e| view! { <p class="mt-2 text-sm text-error text-center">{e.message()}</p> })
                }}
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <TextField
                    label="Village/Area"
                    field=lens(wizard, |w| &w.location.village, |w| &mut w.location.village)
                    placeholder="Enter village or area name"
                    required=true
                />
                <TextField
                    label="District"
                    field=lens(wizard, |w| &w.location.district, |w| &mut w.location.district)
                    placeholder="Enter district"
                    required=true
                />
                <TextField
                    label="State"
                    field=lens(wizard, |w| &w.location.state, |w| &mut w.location.state)
                    placeholder="Enter state"
                    required=true
                />
                <TextField
                    label="PIN Code"
                    field=lens(wizard, |w| &w.location.pin_code, |w| &mut w.location.pin_code)
                    placeholder="Enter PIN code"
                />
            </div>
            <TextArea
                label="Landmark"
                field=lens(wizard, |w| &w.location.landmark, |w| &mut w.location.landmark)
                placeholder="Provide specific location details or nearby landmarks"
            />
        </div>
    }
}

#[component]
fn PhotosStep(
    wizard: RwSignal<Wizard>,
    files: StoredValue<Vec<File>, LocalStorage>,
) -> impl IntoView {
    let toast = use_toast();

    let on_select = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let selected = take_selected_files(&input);
        if selected.is_empty() {
            return;
        }
        let previews: Vec<PhotoPreview> = selected.iter().filter_map(object_url).collect();
        if previews.len() != selected.len() {
            revoke_all(&previews);
            toast.error("Could not read the selected photos");
            return;
        }
        match wizard.try_update(|w| w.add_photos(previews.clone())) {
            Some(Ok(count)) => {
                files.update_value(|f| f.extend(selected));
                log::debug!("[Report] {} photos attached", count);
            }
            Some(Err(e)) => {
                revoke_all(&previews);
                toast.error(e.to_string());
            }
            None => revoke_all(&previews),
        }
    };

    let remove = move |index: usize| {
        if let Some(Some(photo)) = wizard.try_update(|w| w.remove_photo(index)) {
            revoke(&photo.url);
            files.update_value(|f| {
                if index < f.len() {
                    f.remove(index);
                }
            });
        }
    };

    if !wizard.with_untracked(Wizard::photos_enabled) {
        return view! {
            <div class="space-y-6">
                <h2 class="text-2xl font-bold">"Upload Photos"</h2>
                <div role="alert" class="alert alert-warning">
                    <Camera attr:class="h-6 w-6" />
                    <span>
                        "Photo upload is currently unavailable. You can still submit your report without photos."
                    </span>
                </div>
            </div>
        }
        .into_any();
    }

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Upload Photos"</h2>
            <label class="flex flex-col items-center justify-center border-2 border-dashed border-base-300 rounded-xl p-8 cursor-pointer hover:bg-base-200">
                <Camera attr:class="h-10 w-10 text-primary mb-2" />
                <span class="font-medium">"Click to add photos"</span>
                <span class="text-sm text-base-content/60">
                    {move || format!("{} of {} photos", wizard.with(|w| w.photos().len()), MAX_PHOTOS)}
                </span>
                <input type="file" accept="image/*" multiple class="hidden" on:change=on_select />
            </label>
            <div class="grid grid-cols-2 md:grid-cols-5 gap-4">
                {move || {
                    wizard
                        .with(|w| w.photos().to_vec())
                        .into_iter()
                        .enumerate()
                        .map(|(index, photo)| {
                            view! {
                                <div class="relative group">
                                    <img src=photo.url alt=photo.name class="w-full h-24 object-cover rounded-lg" />
                                    <button
                                        type="button"
                                        class="btn btn-error btn-xs btn-circle absolute top-1 right-1"
                                        aria-label="Remove photo"
                                        on:click=move |_| remove(index)
                                    >
                                        <Trash2 attr:class="h-3 w-3" />
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn DetailsStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Problem Details"</h2>
            <TextField
                label="Problem Title"
                field=lens(wizard, |w| &w.details.title, |w| &mut w.details.title)
                placeholder="Brief, clear title describing the problem"
                required=true
            />
            <TextArea
                label="Description"
                field=lens(wizard, |w| &w.details.description, |w| &mut w.details.description)
                rows=4
                placeholder="Provide a detailed description of the problem..."
                required=true
            />
            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <TextField
                    label="People Affected"
                    field=lens(wizard, |w| &w.details.people_affected, |w| &mut w.details.people_affected)
                    input_type="number"
                    placeholder="Approximate number"
                />
                <label class="form-control w-full">
                    <div class="label">
                        <span class="label-text font-semibold">"Urgency Level"</span>
                    </div>
                    <select
                        class="select select-bordered w-full"
                        prop:value=move || wizard.with(|w| w.details.urgency_level.as_str())
                        on:change=move |ev| {
                            if let Some(level) = UrgencyLevel::parse(&event_target_value(&ev)) {
                                wizard.update(|w| w.details.urgency_level = level);
                            }
                        }
                    >
                        {UrgencyLevel::ALL
                            .into_iter()
                            .map(|l| view! { <option value=l.as_str()>{l.as_str()}</option> })
                            .collect_view()}
                    </select>
                </label>
            </div>
            <h3 class="text-lg font-semibold pt-2">"Contact Information"</h3>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <TextField
                    label="Your Name"
                    field=lens(wizard, |w| &w.details.name, |w| &mut w.details.name)
                    placeholder="Enter your full name"
                    required=true
                />
                <TextField
                    label="Contact Number"
                    field=lens(wizard, |w| &w.details.contact, |w| &mut w.details.contact)
                    input_type="tel"
                    placeholder="10-digit mobile number"
                    required=true
                />
                <TextField
                    label="Email"
                    field=lens(wizard, |w| &w.details.email, |w| &mut w.details.email)
                    input_type="email"
                    placeholder="Enter your email"
                />
            </div>
        </div>
    }
}

#[component]
fn StepIndicator(wizard: RwSignal<Wizard>) -> impl IntoView {
    view! {
        <ul class="steps w-full mb-8">
            {WizardStep::ALL
                .into_iter()
                .map(|step| {
                    view! {
                        <li class=move || {
                            if wizard.with(|w| w.step_number()) >= step.number() { "step step-primary" } else { "step" }
                        }>{step.title()}</li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
pub fn ReportProblemPage() -> impl IntoView {
    let auth = use_auth();
    let config = use_config();
    let toast = use_toast();
    let scope = RequestScope::new();

    let upload_target = StoredValue::new(config.image_upload);
    let wizard = RwSignal::new(if upload_target.with_value(Option::is_some) {
        Wizard::new()
    } else {
        log::info!("[Report] no image upload target configured, photo step disabled");
        Wizard::without_photos()
    });
    let files = StoredValue::new_local(Vec::<File>::new());
    let (submitting, set_submitting) = signal(false);

    on_cleanup(move || {
        wizard.try_with_untracked(|w| revoke_all(w.photos()));
    });

    let on_submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        if let Err(e) = wizard.with_untracked(Wizard::validate) {
            toast.error(e.to_string());
            return;
        }
        set_submitting.set(true);
        let selected = files.get_value();
        let http = scope.http();
        let api = ApiClient::new(http.clone(), auth.base_url());

        spawn_local(async move {
            let images = match upload_target.get_value() {
                Some(target) => upload_images(&http, &target, &selected).await,
                None => Ok(Vec::new()),
            };

            let result = match images {
                Ok(images) => match wizard.with_untracked(|w| w.to_submission(images)) {
                    Ok(request) => api.call(&request).await.map(|_| ()),
                    Err(e) => Err(ApiError::invalid_input(e.to_string())),
                },
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    log::info!("[Report] problem submitted");
                    wizard.update(|w| {
                        revoke_all(w.photos());
                        w.take_photos();
                        w.submitted = true;
                    });
                    files.set_value(Vec::new());
                }
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::error!("[Report] submit failed: {}", e);
                    toast.error("Failed to submit problem. Please try again.");
                }
            }
            set_submitting.set(false);
        });
    };

    let step_view = move || match wizard.with(|w| w.step()) {
        WizardStep::Category => view! { <CategoryStep wizard=wizard /> }.into_any(),
        WizardStep::Location => view! { <LocationStep wizard=wizard /> }.into_any(),
        WizardStep::Photos => view! { <PhotosStep wizard=wizard files=files /> }.into_any(),
        WizardStep::Details => view! { <DetailsStep wizard=wizard /> }.into_any(),
    };

    let thank_you = move || {
        view! {
            <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
                <div class="card-body items-center text-center">
                    <Check attr:class="h-16 w-16 text-success" />
                    <h2 class="text-3xl font-bold">"Report Submitted!"</h2>
                    <p class="text-base-content/70">
                        "Thank you for reporting this issue. Our team will review and take necessary action."
                    </p>
                    <button class="btn btn-primary mt-4" on:click=move |_| wizard.update(Wizard::reset)>
                        "Report Another Problem"
                    </button>
                </div>
            </div>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 py-16">
            <div class="max-w-6xl mx-auto px-4">
                <Show when=move || !wizard.with(|w| w.submitted) fallback=thank_you>
                    <div class="text-center mb-10">
                        <h1 class="text-4xl font-bold mb-2">"Report a Problem"</h1>
                        <p class="text-base-content/70">
                            "Help us identify and solve problems in your community"
                        </p>
                    </div>
                    <StepIndicator wizard=wizard />
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            {step_view}
                            <div class="flex justify-between mt-8">
                                <Show when=move || { wizard.with(|w| w.step_number()) > 1 } fallback=|| view! { <span></span> }>
                                    <button type="button" class="btn btn-ghost gap-1" on:click=move |_| {
                                        wizard.update(|w| {
                                            w.back();
                                        });
                                    }>
                                        <ChevronLeft attr:class="h-5 w-5" />
                                        "Back"
                                    </button>
                                </Show>
                                <Show
                                    when=move || !wizard.with(Wizard::is_last_step)
                                    fallback=move || view! {
                                        <button type="button" class="btn btn-primary gap-1" disabled=move || submitting.get() on:click=on_submit>
                                            {move || if submitting.get() { "Submitting..." } else { "Submit Report" }}
                                        </button>
                                    }
                                >
                                    <button
                                        type="button"
                                        class="btn btn-primary gap-1"
                                        disabled=move || !wizard.with(Wizard::can_advance)
                                        on:click=move |_| {
                                            wizard.update(|w| {
                                                w.next();
                                            });
                                        }
                                    >
                                        "Next"
                                        <ChevronRight attr:class="h-5 w-5" />
                                    </button>
                                </Show>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
