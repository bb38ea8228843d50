use crate::components::common::{ErrorBanner, TextArea, TextField, lens};
use crate::components::icons::{Mail, MapPin, Phone};
use crate::config::use_config;
use crate::web::abort::RequestScope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;
use vikasam_shared::ApiError;
use vikasam_shared::client::{HttpClient, HttpRequest};
use vikasam_shared::protocol::HttpMethod;
use vikasam_shared::validate::ContactMessage;

const THANK_YOU_MS: u64 = 5_000;

#[component]
fn ContactLine(title: &'static str, text: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="flex items-start gap-4">
            <div class="bg-primary/10 text-primary p-3 rounded-lg">{children()}</div>
            <div>
                <h3 class="font-semibold mb-1">{title}</h3>
                <p class="text-base-content/70">{text}</p>
            </div>
        </div>
    }
}

#[component]
pub fn ContactPage() -> impl IntoView {
    let config = use_config();
    let scope = RequestScope::new();
    let form = RwSignal::new(ContactMessage::default());
    let (sending, set_sending) = signal(false);
    let (submitted, set_submitted) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let relay = StoredValue::new((config.contact_relay_url, config.contact_access_key));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if sending.get_untracked() {
            return;
        }
        let message = form.get_untracked();
        if let Err(e) = message.validate() {
            set_error.set(Some(e.user_message()));
            return;
        }
        let (url, access_key) = relay.get_value();
        let Some(access_key) = access_key else {
            log::error!("[Contact] no relay access key configured");
            set_error.set(Some(
                "The contact form is not available right now. Please email us instead.".into(),
            ));
            return;
        };

        set_error.set(None);
        set_sending.set(true);
        let request = HttpRequest::new(&url, HttpMethod::Post)
            .with_header("Accept", "application/json")
            .with_body(message.relay_body(&access_key));

        spawn_local(async move {
            let result = scope.http().send(request).await.and_then(|resp| {
                if resp.is_success() {
                    Ok(())
                } else {
                    Err(ApiError::from_status(resp.status, "Relay rejected the message"))
                }
            });
            match result {
                Ok(()) => {
                    form.set(ContactMessage::default());
                    set_submitted.set(true);
                    set_timeout(
                        move || {
                            set_submitted.try_set(false);
                        },
                        Duration::from_millis(THANK_YOU_MS),
                    );
                }
                Err(e) if e.is_aborted() => return,
                Err(e) => {
                    log::error!("[Contact] send failed: {}", e);
                    set_error.set(Some("Failed to send message. Please try again.".into()));
                }
            }
            set_sending.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-100 pt-16 pb-16">
            <div class="max-w-7xl mx-auto px-4">
                <div class="text-center mb-12">
                    <Mail attr:class="h-16 w-16 text-primary mx-auto mb-4" />
                    <h1 class="text-4xl font-bold mb-4">"Get In Touch"</h1>
                    <p class="text-xl text-base-content/70">"Have questions? We'd love to hear from you"</p>
                </div>

                <div class="grid grid-cols-1 lg:grid-cols-2 gap-8">
                    <div class="card bg-base-100 shadow-xl h-fit">
                        <div class="card-body space-y-6">
                            <h2 class="text-2xl font-bold">"Contact Information"</h2>
                            <ContactLine title="Email" text="support@andhravikasam.in">
                                <Mail attr:class="h-6 w-6" />
                            </ContactLine>
                            <ContactLine title="Address" text="Andhra Pradesh, India">
                                <MapPin attr:class="h-6 w-6" />
                            </ContactLine>
                            <ContactLine title="Phone" text="Coming soon">
                                <Phone attr:class="h-6 w-6" />
                            </ContactLine>
                        </div>
                    </div>

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="text-2xl font-bold mb-4">"Send us a Message"</h2>
                            <Show when=move || submitted.get()>
                                <div role="status" class="alert alert-success mb-4">
                                    "Thank you for your message! We'll get back to you soon."
                                </div>
                            </Show>
                            <form class="space-y-4" on:submit=on_submit>
                                <ErrorBanner message=error />
                                <TextField
                                    label="Your Name"
                                    field=lens(form, |f| &f.name, |f| &mut f.name)
                                    placeholder="Enter your name"
                                    required=true
                                />
                                <TextField
                                    label="Email Address"
                                    field=lens(form, |f| &f.email, |f| &mut f.email)
                                    input_type="email"
                                    placeholder="your@email.com"
                                    required=true
                                />
                                <TextArea
                                    label="Message"
                                    field=lens(form, |f| &f.message, |f| &mut f.message)
                                    rows=6
                                    placeholder="Tell us how we can help..."
                                    required=true
                                />
                                <button type="submit" class="btn btn-primary w-full" disabled=move || sending.get()>
                                    {move || if sending.get() { "Sending..." } else { "Send Message" }}
                                </button>
                            </form>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
