use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="hero min-h-[60vh] bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-6xl font-bold text-primary">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <p class="text-base-content/60">
                        "The page you are looking for does not exist or has been moved."
                    </p>
                    <Link to=AppRoute::Home class="btn btn-primary">
                        "Back to Home"
                    </Link>
                </div>
            </div>
        </div>
    }
}
