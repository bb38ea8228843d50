use crate::components::common::{StatValue, stat_display};
use crate::components::icons::{BarChart, CheckCircle, FileText, IndianRupee, ShieldCheck, Users};
use crate::web::query::use_stats;
use leptos::prelude::*;
use vikasam_shared::format::StatDisplay;
use vikasam_shared::stats::TransparencyStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timeframe {
    Monthly,
    Quarterly,
    YearToDate,
}

impl Timeframe {
    const ALL: [Timeframe; 3] = [Timeframe::Monthly, Timeframe::Quarterly, Timeframe::YearToDate];

    fn label(&self) -> &'static str {
        match self {
            Timeframe::Monthly => "Monthly",
            Timeframe::Quarterly => "Quarterly",
            Timeframe::YearToDate => "Year to Date",
        }
    }
}

/// 财务金额统一带 ₹ 前缀
fn rupees(text: &str) -> StatDisplay {
    let d = StatDisplay::financial(text);
    if d.placeholder || d.text.starts_with('₹') {
        d
    } else {
        StatDisplay {
            text: format!("₹{}", d.text),
            placeholder: false,
        }
    }
}

struct Metric {
    title: &'static str,
    description: &'static str,
    accent: &'static str,
    pick: fn(&TransparencyStats) -> StatDisplay,
}

const METRICS: [Metric; 4] = [
    Metric {
        title: "Financial Transparency Score",
        description: "Based on independent audit ratings",
        accent: "text-3xl font-bold text-success",
        pick: |s| StatDisplay::metric(&s.transparency_score),
    },
    Metric {
        title: "Fund Utilization Efficiency",
        description: "Direct project impact vs operational costs",
        accent: "text-3xl font-bold text-warning",
        pick: |s| StatDisplay::metric(&s.utilization_rate),
    },
    Metric {
        title: "Real-time Tracking",
        description: "All transactions logged and verified",
        accent: "text-3xl font-bold text-info",
        pick: |s| StatDisplay::metric(&s.tracking_rate),
    },
    Metric {
        title: "Third-party Audits",
        description: "Independent financial verification",
        accent: "text-3xl font-bold text-accent",
        pick: |s| StatDisplay::metric(&s.audit_frequency),
    },
];

const FINANCIALS: [(&str, fn(&TransparencyStats) -> StatDisplay); 4] = [
    ("Total Income", |s| rupees(&s.financial.total_income)),
    ("Total Expenses", |s| rupees(&s.financial.total_expenses)),
    ("Reserves", |s| rupees(&s.financial.reserves)),
    ("Efficiency Ratio", |s| StatDisplay::metric(&s.financial.efficiency_ratio)),
];

#[component]
pub fn TransparencyPage() -> impl IntoView {
    let stats = use_stats::<TransparencyStats>();
    let (timeframe, set_timeframe) = signal(Timeframe::Monthly);

    let highlight = Signal::derive(move || {
        stats.with(|s| s.ready().map(|t| t.highlight.clone()).unwrap_or_default())
    });

    let metrics = METRICS
        .into_iter()
        .map(|metric| {
            let pick = metric.pick;
            let value = Signal::derive(move || stats.with(|s| stat_display(s, pick, "0%")));
            view! {
                <div class="card bg-base-100 shadow-sm hover:shadow-lg transition-all">
                    <div class="card-body">
                        <h3 class="text-sm font-medium text-base-content/70">{metric.title}</h3>
                        <StatValue display=value class=metric.accent />
                        <p class="text-sm text-base-content/60">{metric.description}</p>
                    </div>
                </div>
            }
        })
        .collect_view();

    let financials = FINANCIALS
        .into_iter()
        .map(|(title, pick)| {
            let value = Signal::derive(move || stats.with(|s| stat_display(s, pick, "₹0")));
            view! {
                <div class="rounded-xl bg-base-200 p-6">
                    <div class="flex justify-between items-start mb-4 text-sm text-base-content/70">
                        {title}
                        <BarChart attr:class="h-5 w-5" />
                    </div>
                    <StatValue display=value class="text-2xl font-bold" />
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen bg-base-100 pt-16 pb-16">
            <div class="max-w-7xl mx-auto px-4">
                <div class="text-center mb-12">
                    <div class="flex justify-center items-center gap-2 mb-4 text-primary">
                        <ShieldCheck attr:class="h-6 w-6" />
                        <span class="font-medium">"100% Transparent Operations"</span>
                    </div>
                    <h1 class="text-5xl font-bold mb-6">"Transparency Engine"</h1>
                    <p class="text-xl text-base-content/60 max-w-4xl mx-auto">
                        "\"Transparency isn't just policy, it's our promise.\" Every rupee tracked, every project documented, every impact measured in real-time."
                    </p>
                </div>

                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6 mb-12">
                    {metrics}
                </div>

                <div class="card bg-base-100 shadow-xl mb-12">
                    <div class="card-body">
                        <div class="flex flex-col md:flex-row justify-between md:items-center gap-4 mb-6">
                            <div>
                                <h2 class="text-2xl font-bold">"Financial Overview"</h2>
                                <p class="text-base-content/60">
                                    "Comprehensive financial performance and fund utilization"
                                </p>
                            </div>
                            <div role="tablist" class="tabs tabs-boxed">
                                {Timeframe::ALL
                                    .into_iter()
                                    .map(|tf| {
                                        view! {
                                            <button
                                                role="tab"
                                                class=move || if timeframe.get() == tf { "tab tab-active" } else { "tab" }
                                                on:click=move |_| set_timeframe.set(tf)
                                            >
                                                {tf.label()}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                        <div class="grid grid-cols-1 md:grid-cols-4 gap-6">{financials}</div>
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-8 max-w-4xl mx-auto mb-12">
                    <div class="card bg-base-100 shadow-lg">
                        <div class="card-body">
                            <CheckCircle attr:class="h-6 w-6 text-primary" />
                            <h3 class="card-title">"Clear Accountability"</h3>
                            <p class="text-base-content/70">
                                "Every donation and expense is meticulously tracked and publicly available."
                            </p>
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow-lg">
                        <div class="card-body">
                            <IndianRupee attr:class="h-6 w-6 text-primary" />
                            <h3 class="card-title">"Fund Utilization"</h3>
                            <p class="text-base-content/70">
                                "90% of funds go directly to community projects. Only 10% is used for operational costs and sustainability."
                            </p>
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow-lg">
                        <div class="card-body">
                            <Users attr:class="h-6 w-6 text-primary" />
                            <h3 class="card-title">"Community Trust"</h3>
                            <p class="text-base-content/70">
                                "Built on trust and maintained through regular updates, audits, and community involvement in decision-making."
                            </p>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl mb-12">
                    <div class="card-body max-w-3xl mx-auto">
                        <h2 class="text-2xl font-bold text-center mb-4">"Our Commitment to Transparency"</h2>
                        <div class="grid grid-cols-1 sm:grid-cols-2 gap-8">
                            <div class="rounded-lg bg-base-200 p-6">
                                <h3 class="font-semibold text-lg mb-4">"Regular Updates"</h3>
                                <ul class="list-disc list-inside space-y-2 text-base-content/70">
                                    <li>"Monthly financial reports"</li>
                                    <li>"Quarterly progress updates"</li>
                                    <li>"Annual audit statements"</li>
                                    <li>"Project-wise expenditure details"</li>
                                </ul>
                            </div>
                            <div class="rounded-lg bg-base-200 p-6">
                                <h3 class="font-semibold text-lg mb-4 flex items-center gap-2">
                                    <FileText attr:class="h-5 w-5" />
                                    "Documentation Access"
                                </h3>
                                <ul class="list-disc list-inside space-y-2 text-base-content/70">
                                    <li>"Downloadable financial reports"</li>
                                    <li>"Audit certificates"</li>
                                    <li>"Legal compliance documents"</li>
                                    <li>"Project completion reports"</li>
                                </ul>
                            </div>
                        </div>
                    </div>
                </div>

                <div class="rounded-2xl bg-primary text-primary-content shadow-2xl p-8 text-center">
                    <h2 class="text-3xl font-bold mb-4">{move || highlight.get().title}</h2>
                    <p class="text-xl">{move || highlight.get().description}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupee_prefix_is_added_once() {
        assert_eq!(rupees("12,00,000").text, "₹12,00,000");
        assert_eq!(rupees("₹5L").text, "₹5L");
        let zero = rupees("0");
        assert!(zero.placeholder);
        assert_eq!(zero.text, "₹0");
    }
}
