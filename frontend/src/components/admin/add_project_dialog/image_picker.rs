//! 项目图片选择与预览

use crate::components::icons::{Close, Upload};
use crate::web::preview::take_selected_files;
use leptos::prelude::*;
use vikasam_shared::validate::MAX_PROJECT_IMAGES;

use super::form_state::FormState;

#[component]
pub fn ImagePicker(state: FormState, on_error: Callback<String>) -> impl IntoView {
    let on_select = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let selected = take_selected_files(&input);
        if selected.is_empty() {
            return;
        }
        if let Err(e) = state.add_images(selected) {
            log::warn!("[Admin] image selection rejected: {}", e);
            on_error.run(e.message().to_string());
        }
    };

    view! {
        <div class="form-control w-full">
            <div class="label">
                <span class="label-text font-semibold">"Images"</span>
                <span class="label-text-alt">
                    {move || format!("{}/{}", state.image_count(), MAX_PROJECT_IMAGES)}
                </span>
            </div>
            <label class=move || {
                if state.image_count() >= MAX_PROJECT_IMAGES {
                    "flex items-center justify-center gap-2 border-2 border-dashed border-base-300 rounded-lg p-4 opacity-50 pointer-events-none"
                } else {
                    "flex items-center justify-center gap-2 border-2 border-dashed border-base-300 rounded-lg p-4 cursor-pointer hover:bg-base-200"
                }
            }>
                <Upload attr:class="h-5 w-5" />
                <span class="text-sm">"Upload images"</span>
                <input type="file" accept="image/*" multiple class="hidden" on:change=on_select />
            </label>

            <div class="grid grid-cols-3 md:grid-cols-5 gap-2 mt-3">
                {move || {
                    state
                        .previews
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, preview)| {
                            view! {
                                <div class="relative aspect-square">
                                    <img
                                        src=preview.url
                                        alt=preview.name
                                        class="w-full h-full object-cover rounded-lg"
                                    />
                                    <button
                                        type="button"
                                        class="btn btn-circle btn-xs btn-error absolute -top-2 -right-2"
                                        aria-label="Remove image"
                                        on:click=move |_| state.remove_image(index)
                                    >
                                        <Close attr:class="h-3 w-3" />
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
