use crate::components::common::{StatValue, stat_display};
use crate::components::icons::{CheckCircle, IndianRupee, MapPin, Users};
use crate::web::query::use_stats;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use vikasam_shared::format::StatDisplay;
use vikasam_shared::stats::HeroStats;

const SLIDE_INTERVAL_MS: u32 = 5_000;

struct Slide {
    url: &'static str,
    alt: &'static str,
    title: &'static str,
    text: &'static str,
}

const SLIDES: [Slide; 6] = [
    Slide {
        url: "https://images.unsplash.com/uploads/141247613151541c06062/c15fb37d?auto=format&fit=crop&q=80&w=1170",
        alt: "Andhra Pradesh Village",
        title: "Our Andhra, Our Trust",
        text: "Building a better future together",
    },
    Slide {
        url: "https://images.unsplash.com/photo-1520052203542-d3095f1b6cf0?auto=format&fit=crop&q=80&w=1170",
        alt: "Rural India",
        title: "మన ఆంధ్ర, మన భరోసా",
        text: "మన భవిష్యత్తు మన చేతుల్లో",
    },
    Slide {
        url: "https://images.unsplash.com/photo-1491497895121-1334fc14d8c9?auto=format&fit=crop&q=80&w=2070",
        alt: "Youth Volunteers",
        title: "Together, Let's Build Andhra",
        text: "Empowering youth for change",
    },
    Slide {
        url: "https://cdn1.expresscomputer.in/wp-content/uploads/2020/01/15153001/Untitled-design-24.png",
        alt: "Village Development",
        title: "మనం కలిసి ఆంధ్రను నిర్మిద్దాం",
        text: "యువత తో అభివృద్ధి",
    },
    Slide {
        url: "https://images.unsplash.com/photo-1491497895121-1334fc14d8c9?auto=format&fit=crop&q=80&w=2070",
        alt: "Education",
        title: "Youth For Andhra's Future",
        text: "Creating opportunities for all",
    },
    Slide {
        url: "https://images.unsplash.com/uploads/141247613151541c06062/c15fb37d?auto=format&fit=crop&q=80&w=1170",
        alt: "Community",
        title: "ఆంధ్ర భవిష్యత్తు కోసం యువత",
        text: "నేటి యువత రేపటి నాయకులు",
    },
];

/// 轮播图，每 5 秒切换一次，卸载时停止计时
#[component]
fn HeroSlider() -> impl IntoView {
    let (current, set_current) = signal(0usize);

    let timer = Interval::new(SLIDE_INTERVAL_MS, move || {
        set_current.try_update(|i| *i = (*i + 1) % SLIDES.len());
    });
    let timer = StoredValue::new_local(Some(timer));
    on_cleanup(move || {
        // drop 即 clearInterval
        timer.try_update_value(|t| t.take());
    });

    view! {
        <div class="relative h-[80svh] min-h-[480px] overflow-hidden bg-neutral">
            {SLIDES
                .iter()
                .enumerate()
                .map(|(index, slide)| {
                    view! {
                        <img
                            src=slide.url
                            alt=slide.alt
                            loading=if index == 0 { "eager" } else { "lazy" }
                            class=move || {
                                if current.get() == index {
                                    "absolute inset-0 w-full h-full object-cover transition-opacity duration-1000 opacity-100"
                                } else {
                                    "absolute inset-0 w-full h-full object-cover transition-opacity duration-1000 opacity-0"
                                }
                            }
                        />
                    }
                })
                .collect_view()}
            <div class="absolute inset-0 bg-gradient-to-t from-black/70 via-transparent to-black/20"></div>
            <div class="relative h-full flex flex-col items-center justify-center text-center px-4 space-y-4">
                <h1 class="text-4xl md:text-6xl font-bold text-white drop-shadow">
                    {move || SLIDES[current.get()].title}
                </h1>
                <p class="text-lg md:text-2xl text-white/90">{move || SLIDES[current.get()].text}</p>
            </div>
        </div>
    }
}

#[component]
fn ImpactCard(
    #[prop(into)] value: Signal<StatDisplay>,
    label: &'static str,
    caption: &'static str,
    accent: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <div class="text-xs text-base-content/50">"LIVE COUNT"</div>
                <div class=format!("flex items-center gap-2 {}", accent)>
                    {children()}
                    <StatValue display=value class="text-4xl font-bold" />
                </div>
                <div class="font-medium">{label}</div>
                <div class="text-sm text-base-content/60">{caption}</div>
            </div>
        </div>
    }
}

/// 首页影响力面板，数据来自 `/stats`
#[component]
fn ImpactDashboard() -> impl IntoView {
    let stats = use_stats::<HeroStats>();
    let villages = Signal::derive(move || {
        stats.with(|s| stat_display(s, |h| StatDisplay::count(h.villages), "0"))
    });
    let problems = Signal::derive(move || {
        stats.with(|s| stat_display(s, |h| StatDisplay::count(h.problems), "0"))
    });
    let funds = Signal::derive(move || {
        stats.with(|s| stat_display(s, |h| StatDisplay::crore(h.funds), "0"))
    });
    let volunteers = Signal::derive(move || {
        stats.with(|s| stat_display(s, |h| StatDisplay::count(h.volunteers), "0"))
    });

    view! {
        <section class="py-16 bg-base-200">
            <div class="max-w-7xl mx-auto px-4">
                <div class="text-center mb-12">
                    <h2 class="text-4xl font-bold mb-4">"Live Impact Dashboard"</h2>
                    <p class="text-lg text-base-content/60 max-w-3xl mx-auto">
                        "Real-time metrics showing the power of youth-led governance. Every number represents lives touched, problems solved, and communities transformed."
                    </p>
                </div>
                <div class="grid grid-cols-1 md:grid-cols-4 gap-8">
                    <ImpactCard value=villages label="Villages Covered" caption="Across Andhra Pradesh" accent="text-warning">
                        <MapPin attr:class="h-6 w-6" />
                    </ImpactCard>
                    <ImpactCard value=problems label="Problems Solved" caption="Real issues, real solutions" accent="text-success">
                        <CheckCircle attr:class="h-6 w-6" />
                    </ImpactCard>
                    <ImpactCard value=funds label="Funds Utilized" caption="100% transparent allocation" accent="text-accent">
                        <IndianRupee attr:class="h-6 w-6" />
                    </ImpactCard>
                    <ImpactCard value=volunteers label="Active Volunteers" caption="Youth leaders making change" accent="text-success">
                        <Users attr:class="h-6 w-6" />
                    </ImpactCard>
                </div>
                <p class="mt-10 text-center text-sm text-success">"Updates from Admin Dashboard"</p>
            </div>
        </section>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="flex flex-col">
            <HeroSlider />

            <section class="py-16 bg-base-100">
                <div class="max-w-5xl mx-auto px-4 text-center space-y-4">
                    <h2 class="text-3xl md:text-4xl font-bold">
                        "How Andhra Vikasam Transforms Civic Engagement"
                    </h2>
                    <p class="text-lg text-base-content/70">
                        "Every village problem gets a digital solution. GPS-enabled problem reporting, real-time photo documentation and transparent fund tracking connect rural challenges with youth volunteers."
                    </p>
                </div>
            </section>

            <ImpactDashboard />

            <section class="py-16 bg-base-100">
                <div class="max-w-7xl mx-auto px-4">
                    <h2 class="text-4xl font-bold text-center mb-12">"Ready to Create Change?"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-8">
                        <div class="card bg-base-100 shadow-lg">
                            <div class="card-body">
                                <h3 class="card-title">"Report a Problem"</h3>
                                <p>"See an issue in your village? Report it and watch our volunteers spring into action."</p>
                                <Link to=AppRoute::Report class="btn btn-error">"Report Now"</Link>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow-lg">
                            <div class="card-body">
                                <h3 class="card-title">"Join the Movement"</h3>
                                <p>"Become part of a youth-led governance initiative. Your skills can transform communities."</p>
                                <Link to=AppRoute::Join class="btn btn-warning">"Join Now"</Link>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow-lg">
                            <div class="card-body">
                                <h3 class="card-title">"Support the Cause"</h3>
                                <p>"Every rupee is tracked and reported. See exactly where your contribution goes."</p>
                                <Link to=AppRoute::Donate class="btn btn-success">"Donate Now"</Link>
                            </div>
                        </div>
                    </div>
                </div>
            </section>
        </div>
    }
}
