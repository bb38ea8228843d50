use crate::components::common::{StatValue, stat_display};
use crate::web::query::use_stats;
use leptos::prelude::*;
use vikasam_shared::format::StatDisplay;
use vikasam_shared::stats::AboutStats;

/// 五级组织结构中的一级
struct Tier {
    level: &'static str,
    unit: &'static str,
    responsibility: &'static str,
    count: fn(&AboutStats) -> f64,
}

const STRUCTURE: [Tier; 5] = [
    Tier {
        level: "District Incharge",
        unit: " Districts",
        responsibility: "Leads all constituency incharges within the district",
        count: |s| s.districts,
    },
    Tier {
        level: "Constituency Incharge",
        unit: " Constituencies",
        responsibility: "Manages all mandal and village incharges, uploads verified problems",
        count: |s| s.constituencies,
    },
    Tier {
        level: "Mandal Incharge",
        unit: " Mandals",
        responsibility: "Supervises all village-level incharges and ensures weekly reports",
        count: |s| s.mandals,
    },
    Tier {
        level: "Village Incharge",
        unit: " Villages",
        responsibility: "Collects all problems from volunteers and sends weekly updates",
        count: |s| s.villages,
    },
    Tier {
        level: "Volunteers",
        unit: " Active Volunteers",
        responsibility: "Identify local problems, assist in projects, collect reports",
        count: |s| s.volunteers,
    },
];

#[component]
pub fn AboutPage() -> impl IntoView {
    let stats = use_stats::<AboutStats>();

    let tiers = STRUCTURE
        .into_iter()
        .map(|tier| {
            let count = tier.count;
            let unit = tier.unit;
            let display = Signal::derive(move || {
                stats.with(|s| stat_display(s, |a| StatDisplay::count(count(a)), "0"))
                    .with_suffix(unit)
            });
            view! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h3 class="card-title">{tier.level}</h3>
                        <StatValue display=display class="text-primary font-medium" />
                        <p class="text-base-content/70">{tier.responsibility}</p>
                    </div>
                </div>
            }
        })
        .collect_view();

    let strip = [
        ("Active Members", Signal::derive(move || {
            stats.with(|s| stat_display(s, |a| StatDisplay::count(a.volunteers), "0")).with_suffix("+")
        })),
        ("Districts Covered", Signal::derive(move || {
            stats.with(|s| stat_display(s, |a| StatDisplay::count(a.districts), "0"))
        })),
        ("Problems Solved", Signal::derive(move || {
            stats.with(|s| stat_display(s, |a| StatDisplay::count(a.problems_solved), "0")).with_suffix("+")
        })),
        ("Transparency Score", Signal::derive(move || {
            stats.with(|s| stat_display(s, |a| StatDisplay::percent(a.transparency_score), "0%"))
        })),
        ("Impact Generated", Signal::derive(move || {
            stats.with(|s| stat_display(s, |a| StatDisplay::about_currency(a.yearly_fund), "0"))
        })),
    ];

    view! {
        <div class="min-h-screen bg-base-100">
            <section class="py-24">
                <div class="max-w-7xl mx-auto px-4 grid grid-cols-1 lg:grid-cols-2 gap-16 items-center">
                    <div>
                        <h1 class="text-5xl font-bold mb-8 text-primary">"About Andhra Vikasam"</h1>
                        <p class="text-xl text-base-content/70 leading-relaxed">
                            "To unite youth under one transparent system where every problem, from every village, reaches the top, and every rupee, every solution, is visible to the people."
                        </p>
                    </div>
                    <img
                        src="https://img.freepik.com/free-photo/close-up-adult-working-his-laptop-office_23-2148377751.jpg"
                        alt="Andhra Vikasam Community"
                        class="rounded-2xl shadow-2xl w-full h-[420px] object-cover"
                    />
                </div>
            </section>

            <section class="py-20 bg-base-200">
                <div class="max-w-7xl mx-auto px-4">
                    <h2 class="text-4xl font-bold text-center mb-12">"Organizational Structure"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">{tiers}</div>
                </div>
            </section>

            <section class="py-20 bg-primary text-primary-content">
                <div class="max-w-7xl mx-auto px-4 grid grid-cols-2 md:grid-cols-5 gap-8 text-center">
                    {strip
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <div>
                                    <StatValue display=value class="text-4xl font-bold" />
                                    <div class="opacity-80">{label}</div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="py-16 text-center">
                <h2 class="text-4xl font-bold mb-6 text-primary">"Join Our Movement"</h2>
                <p class="text-xl text-base-content/70">
                    "Be part of the change you want to see in Andhra Pradesh"
                </p>
            </section>
        </div>
    }
}
