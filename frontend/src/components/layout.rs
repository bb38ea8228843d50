//! 公开页面的站点头部与页脚

use crate::components::icons::{Close, Heart, Mail, MapPin, Menu, Phone};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let router = use_router();
    let (menu_open, set_menu_open) = signal(false);
    let close_menu = Callback::new(move |_| set_menu_open.set(false));

    let nav_class = move |route: AppRoute| {
        Signal::derive(move || {
            if router.current_route().get() == route {
                "font-semibold text-primary".to_string()
            } else {
                "hover:text-primary".to_string()
            }
        })
    };

    view! {
        <header class="navbar bg-base-100 shadow sticky top-0 z-40">
            <div class="navbar-start">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl gap-2">
                    <span class="text-2xl">"🌿"</span>
                    <span class="text-warning">"Andhra Vikasam"</span>
                </Link>
            </div>

            <nav class="navbar-center hidden lg:flex">
                <ul class="menu menu-horizontal px-1">
                    {AppRoute::NAV
                        .into_iter()
                        .map(|route| {
                            view! {
                                <li>
                                    <Link to=route class=nav_class(route)>
                                        {route.title()}
                                    </Link>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>

            <div class="navbar-end gap-2">
                <div class="hidden md:flex gap-2">
                    <Link to=AppRoute::Report class="btn btn-warning btn-sm">
                        "Report Problem"
                    </Link>
                    <Link to=AppRoute::Donate class="btn btn-success btn-sm gap-1">
                        <Heart attr:class="h-4 w-4" />
                        "Donate"
                    </Link>
                    <Link to=AppRoute::Join class="btn btn-primary btn-sm">
                        "Join the Movement"
                    </Link>
                </div>
                <button
                    class="btn btn-ghost btn-square lg:hidden"
                    aria-label="Toggle menu"
                    on:click=move |_| set_menu_open.update(|open| *open = !*open)
                >
                    {move || {
                        if menu_open.get() {
                            view! { <Close attr:class="h-6 w-6" /> }.into_any()
                        } else {
                            view! { <Menu attr:class="h-6 w-6" /> }.into_any()
                        }
                    }}
                </button>
            </div>
        </header>

        <Show when=move || menu_open.get()>
            <nav class="lg:hidden bg-base-100 shadow-lg border-t border-base-200">
                <ul class="menu p-4">
                    {AppRoute::NAV
                        .into_iter()
                        .chain([AppRoute::Report, AppRoute::Donate])
                        .map(|route| {
                            view! {
                                <li>
                                    <Link to=route class=nav_class(route) on_navigate=close_menu>
                                        {route.title()}
                                    </Link>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </nav>
        </Show>
    }
}

const FOOTER_LINKS: [AppRoute; 7] = [
    AppRoute::About,
    AppRoute::Join,
    AppRoute::Projects,
    AppRoute::Transparency,
    AppRoute::Report,
    AppRoute::Contact,
    AppRoute::Donate,
];

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="bg-neutral text-neutral-content">
            <div class="footer p-10 max-w-7xl mx-auto">
                <aside>
                    <p class="text-lg font-bold">"Andhra Vikasam"</p>
                    <p class="max-w-xs opacity-80">
                        "A youth movement for real change. Building our Andhra together, one village at a time."
                    </p>
                </aside>
                <nav>
                    <h6 class="footer-title">"Quick Links"</h6>
                    {FOOTER_LINKS
                        .into_iter()
                        .map(|route| {
                            view! { <Link to=route class="link link-hover">{route.title()}</Link> }
                        })
                        .collect_view()}
                </nav>
                <nav>
                    <h6 class="footer-title">"Contact"</h6>
                    <span class="flex items-center gap-2">
                        <Phone attr:class="h-4 w-4" />
                        "+91 123 456 7890"
                    </span>
                    <span class="flex items-center gap-2">
                        <Mail attr:class="h-4 w-4" />
                        "support@andhravikasam.in"
                    </span>
                    <span class="flex items-center gap-2">
                        <MapPin attr:class="h-4 w-4" />
                        "Andhra Pradesh, India"
                    </span>
                </nav>
            </div>
            <div class="text-center text-sm opacity-70 pb-6">
                "© Andhra Vikasam | Mana Andhra, Mana Bharosa"
            </div>
        </footer>
    }
}
