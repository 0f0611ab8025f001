//! Budget
//!
//! Income and expense totals, the transaction ledger, and per-category
//! analytics for a recent period.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::palette::glyph;
use crate::components::{DeleteConfirmButton, TransactionDialog};
use crate::context::use_app_context;
use crate::models::{BudgetCategory, CategoryTotal, Summary, Transaction, TransactionKind};

const PERIODS: &[(u32, &str)] = &[(7, "Неделя"), (30, "Месяц"), (90, "Квартал"), (365, "Год")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Transactions,
    Analytics,
}

fn rubles(amount: f64) -> String {
    format!("{amount:.2} ₽")
}

#[component]
pub fn BudgetPage() -> impl IntoView {
    let ctx = use_app_context();
    let (categories, set_categories) = signal(Vec::<BudgetCategory>::new());
    let (transactions, set_transactions) = signal(Vec::<Transaction>::new());
    let (summary, set_summary) = signal(Summary::default());
    let (totals, set_totals) = signal(Vec::<CategoryTotal>::new());
    let (period, set_period) = signal(30u32);
    let (tab, set_tab) = signal(Tab::Transactions);
    let (adding, set_adding) = signal(false);
    let (loading, set_loading) = signal(true);

    let load_ledger = move || {
        let api = ctx.api();
        spawn_local(async move {
            let (loaded_categories, page) = futures::join!(api.list_categories(), api.list_transactions(None, None));
            match loaded_categories {
                Ok(loaded) => set_categories.set(loaded),
                Err(e) => ctx.error("Не удалось загрузить категории", &e),
            }
            match page {
                Ok(page) => {
                    set_transactions.set(page.transactions);
                    set_summary.set(page.summary);
                }
                Err(e) => ctx.error("Не удалось загрузить операции", &e),
            }
            set_loading.set(false);
        });
    };
    load_ledger();

    // Analytics follow the selected period
    Effect::new(move |_| {
        let days = period.get();
        let api = ctx.api();
        spawn_local(async move {
            match api.analytics(days).await {
                Ok(loaded) => set_totals.set(loaded),
                Err(e) => ctx.error("Не удалось загрузить аналитику", &e),
            }
        });
    });

    let refresh_analytics = move || set_period.update(|_| {});

    let delete = move |transaction_id: i64| {
        let api = ctx.api();
        spawn_local(async move {
            match api.delete_transaction(transaction_id).await {
                Ok(()) => {
                    ctx.success("Операция удалена");
                    load_ledger();
                    refresh_analytics();
                }
                Err(e) => ctx.error("Не удалось удалить операцию", &e),
            }
        });
    };

    let totals_of = move |kind: TransactionKind| {
        totals
            .get()
            .into_iter()
            .filter(|t| t.kind == kind && t.total != 0.0)
            .collect::<Vec<_>>()
    };

    let analytics_section = move |kind: TransactionKind, title: &'static str| {
        view! {
            <section class="analytics-section">
                <h2>{title}</h2>
                {move || {
                    let rows = totals_of(kind);
                    if rows.is_empty() {
                        return view! { <p class="empty">"Нет данных за период"</p> }.into_any();
                    }
                    let sum: f64 = rows.iter().map(|r| r.total).sum();
                    rows.into_iter()
                        .map(|row| {
                            let share = if sum > 0.0 { row.total / sum * 100.0 } else { 0.0 };
                            view! {
                                <div class="analytics-row">
                                    <span class=format!("category-dot {}", row.color)>{glyph(&row.icon)}</span>
                                    <span class="analytics-name">{row.name.clone()}</span>
                                    <div class="progress-track">
                                        <div class="progress-bar" style=format!("width: {share:.0}%")></div>
                                    </div>
                                    <span class="amount">{rubles(row.total)}</span>
                                </div>
                            }
                        })
                        .collect_view()
                        .into_any()
                }}
            </section>
        }
    };

    view! {
        <div class="page budget-page">
            <header class="page-header">
                <h1>"Бюджет"</h1>
                <button type="button" on:click=move |_| set_adding.set(true)>"+ Операция"</button>
            </header>

            <div class="summary-cards">
                <div class="summary-card income">
                    <div class="summary-label">"Доходы"</div>
                    <div class="summary-value">{move || rubles(summary.get().total_income)}</div>
                </div>
                <div class="summary-card expense">
                    <div class="summary-label">"Расходы"</div>
                    <div class="summary-value">{move || rubles(summary.get().total_expense)}</div>
                </div>
                <div class="summary-card balance">
                    <div class="summary-label">"Баланс"</div>
                    <div class="summary-value">{move || rubles(summary.get().balance())}</div>
                </div>
            </div>

            <div class="tabs">
                <button
                    type="button"
                    class=move || if tab.get() == Tab::Transactions { "tab active" } else { "tab" }
                    on:click=move |_| set_tab.set(Tab::Transactions)
                >
                    "Операции"
                </button>
                <button
                    type="button"
                    class=move || if tab.get() == Tab::Analytics { "tab active" } else { "tab" }
                    on:click=move |_| set_tab.set(Tab::Analytics)
                >
                    "Аналитика"
                </button>
            </div>

            <Show when=move || !loading.get() fallback=|| view! { <p class="muted">"Загрузка..."</p> }>
                <Show
                    when=move || tab.get() == Tab::Transactions
                    fallback=move || {
                        view! {
                            <div class="period-picker">
                                {PERIODS
                                    .iter()
                                    .map(|(days, label)| {
                                        let days = *days;
                                        view! {
                                            <button
                                                type="button"
                                                class=move || if period.get() == days { "chip active" } else { "chip" }
                                                on:click=move |_| set_period.set(days)
                                            >
                                                {*label}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            {analytics_section(TransactionKind::Expense, "Расходы по категориям")}
                            {analytics_section(TransactionKind::Income, "Доходы по категориям")}
                        }
                    }
                >
                    <Show
                        when=move || !transactions.get().is_empty()
                        fallback=|| view! { <p class="empty">"Операций пока нет"</p> }
                    >
                        <For
                            each=move || transactions.get()
                            key=|t| t.id
                            children=move |t| {
                                let id = t.id;
                                let sign = if t.kind == TransactionKind::Income { "+" } else { "−" };
                                let amount_class = if t.kind == TransactionKind::Income { "amount income" } else { "amount expense" };
                                view! {
                                    <div class="list-row">
                                        <span class=format!("category-dot {}", t.color.clone().unwrap_or_default())>
                                            {glyph(t.icon.as_deref().unwrap_or_default())}
                                        </span>
                                        <div class="list-main">
                                            <div class="list-title">
                                                {t.category_name.clone().unwrap_or_else(|| t.kind.label().to_string())}
                                            </div>
                                            <div class="list-sub">
                                                {t.date.format("%d.%m.%Y").to_string()}
                                                {t.description.clone().map(|d| format!(" · {d}"))}
                                            </div>
                                        </div>
                                        <span class=amount_class>{format!("{sign}{}", rubles(t.amount))}</span>
                                        <DeleteConfirmButton on_confirm=move |_| delete(id) />
                                    </div>
                                }
                            }
                        />
                    </Show>
                </Show>
            </Show>

            <Show when=move || adding.get()>
                <TransactionDialog
                    categories=categories.get_untracked()
                    on_close=move |_| set_adding.set(false)
                    on_added=move |_: Transaction| {
                        set_adding.set(false);
                        load_ledger();
                        refresh_analytics();
                    }
                />
            </Show>
        </div>
    }
}
