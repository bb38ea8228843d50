use crate::components::icons::{Check, Copy, Heart};
use crate::components::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use wasm_bindgen_futures::JsFuture;

const ACCOUNT_NAME: &str = "Koder Spark Private Limited";
const ACCOUNT_NUMBER: &str = "50200102024375";
const IFSC: &str = "HDFC0000189";
const UPI_ID: &str = "9866293371@hdfcbank";
const RAZORPAY_LINK: &str = "https://razorpay.me/@kodersparkprivatelimited";

const COPIED_FLAG_MS: u64 = 2_000;

/// 写入剪贴板；浏览器拒绝时返回错误描述
async fn write_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{:?}", e))
}

/// 一行可复制的收款信息，复制成功后 2 秒内显示勾选图标
#[component]
fn CopyRow(label: &'static str, value: &'static str) -> impl IntoView {
    let toast = use_toast();
    let (copied, set_copied) = signal(false);

    let on_copy = move |_| {
        spawn_local(async move {
            match write_clipboard(value).await {
                Ok(()) => {
                    set_copied.try_set(true);
                    toast.success("Copied to clipboard!");
                    set_timeout(
                        move || {
                            set_copied.try_set(false);
                        },
                        Duration::from_millis(COPIED_FLAG_MS),
                    );
                }
                Err(e) => {
                    log::warn!("[Donate] clipboard write failed: {}", e);
                    toast.error("Could not copy. Please copy it manually.");
                }
            }
        });
    };

    view! {
        <div>
            <div class="text-sm text-base-content/60">{label}</div>
            <div class="flex items-center gap-2">
                <span class="text-lg font-medium font-mono">{value}</span>
                <button class="btn btn-ghost btn-xs" aria-label=format!("Copy {}", label) on:click=on_copy>
                    {move || {
                        if copied.get() {
                            view! { <Check attr:class="h-4 w-4 text-success" /> }.into_any()
                        } else {
                            view! { <Copy attr:class="h-4 w-4" /> }.into_any()
                        }
                    }}
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn DonatePage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-neutral text-neutral-content">
            <div class="max-w-4xl mx-auto px-4 py-16">
                <div class="text-center mb-12">
                    <Heart attr:class="h-10 w-10 mx-auto text-primary mb-4" />
                    <h1 class="text-4xl font-bold mb-4">"Support Our Cause"</h1>
                    <p class="text-lg opacity-70 max-w-2xl mx-auto">
                        "Your contribution helps us build a better Andhra Pradesh. Every donation makes a difference."
                    </p>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                    <div class="card bg-base-100 text-base-content">
                        <div class="card-body space-y-4">
                            <h2 class="card-title">"Bank Transfer Details"</h2>
                            <div>
                                <div class="text-sm text-base-content/60">"Account Holder Name"</div>
                                <div class="text-lg font-medium">{ACCOUNT_NAME}</div>
                            </div>
                            <CopyRow label="Account Number" value=ACCOUNT_NUMBER />
                            <CopyRow label="IFSC Code" value=IFSC />
                            <CopyRow label="UPI ID" value=UPI_ID />
                            <a
                                href=RAZORPAY_LINK
                                target="_blank"
                                rel="noopener noreferrer"
                                class="btn btn-success w-full mt-4"
                            >
                                "Pay with Razorpay"
                            </a>
                        </div>
                    </div>

                    <div class="card bg-base-100 text-base-content">
                        <div class="card-body items-center">
                            <h2 class="card-title">"Scan QR Code"</h2>
                            <img
                                src="/assets/images/upi-qr.png"
                                alt="UPI QR Code"
                                class="max-w-[240px] w-full h-auto bg-white p-4 rounded-xl"
                            />
                            <p class="text-center text-base-content/60 mt-4">
                                "Scan the QR code with any UPI app to make a payment"
                            </p>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
