//! Receipt Scanning
//!
//! Camera scan or manual entry of a fiscal QR code, followed by the lookup of
//! the receipt lines and their submission to the receipts resource.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::components::TextAreaField;
use crate::context::use_app_context;
use crate::forms::ValidationError;
use crate::models::{ProcessedReceipt, Receipt};
use crate::scanner;

#[component]
pub fn ScanReceiptPage() -> impl IntoView {
    let ctx = use_app_context();
    let (receipts, set_receipts) = signal(Vec::<Receipt>::new());
    let (busy, set_busy) = signal(false);
    let (last, set_last) = signal(None::<ProcessedReceipt>);
    let manual_code = RwSignal::new(String::new());

    let load = move || {
        let api = ctx.api();
        spawn_local(async move {
            match api.list_receipts().await {
                Ok(loaded) => set_receipts.set(loaded),
                Err(e) => ctx.error("Не удалось загрузить чеки", &e),
            }
        });
    };
    load();

    let process = move |code: String| {
        let api = ctx.api();
        set_busy.set(true);
        spawn_local(async move {
            match actions::process_scanned_code(&api, &code).await {
                Ok(processed) => {
                    ctx.success(format!(
                        "Чек обработан: {} позиций на {:.2} ₽",
                        processed.items_count, processed.total_amount
                    ));
                    set_last.set(Some(processed));
                    manual_code.set(String::new());
                    load();
                }
                Err(e) => ctx.error("Не удалось обработать чек", &e),
            }
            set_busy.set(false);
        });
    };

    let scan = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            let scanned = match scanner::request_camera().await {
                Ok(()) => scanner::scan_code().await,
                Err(e) => Err(e),
            };
            set_busy.set(false);
            match scanned {
                Ok(code) => {
                    log::info!("scanned receipt code ({} chars)", code.len());
                    process(code);
                }
                Err(e) => ctx.error("Сканирование не удалось", &e),
            }
        });
    };

    let submit_manual = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let code = manual_code.get();
        if code.trim().is_empty() {
            return ctx.invalid(&ValidationError::Required("Данные QR-кода"));
        }
        process(code);
    };

    view! {
        <div class="page scan-receipt-page">
            <header class="page-header">
                <h1>"Сканировать чек"</h1>
            </header>

            <section class="scan-card">
                <p class="muted">"Наведите камеру на QR-код кассового чека"</p>
                <button type="button" class="scan-btn" disabled=move || busy.get() on:click=scan>
                    {move || if busy.get() { "Обработка..." } else { "📷 Открыть камеру" }}
                </button>
            </section>

            <section class="scan-card">
                <h2>"Ввести вручную"</h2>
                <form class="dialog-form" on:submit=submit_manual>
                    <TextAreaField label="Данные QR-кода" value=manual_code />
                    <button type="submit" disabled=move || busy.get()>"Обработать"</button>
                </form>
            </section>

            {move || {
                last.get()
                    .map(|processed| {
                        view! {
                            <section class="scan-result">
                                <div>{format!("Позиций: {}", processed.items_count)}</div>
                                <div>{format!("Сумма: {:.2} ₽", processed.total_amount)}</div>
                            </section>
                        }
                    })
            }}

            <section class="list-section">
                <h2>"Обработанные чеки"</h2>
                <Show
                    when=move || !receipts.get().is_empty()
                    fallback=|| view! { <p class="empty">"Чеков пока нет"</p> }
                >
                    <For
                        each=move || receipts.get()
                        key=|receipt| receipt.id
                        children=|receipt| {
                            view! {
                                <div class="list-row">
                                    <div class="list-main">
                                        <div class="list-title">{receipt.scan_date.format("%d.%m.%Y %H:%M").to_string()}</div>
                                        <div class="list-sub">{receipt.status.clone()}</div>
                                    </div>
                                    <div class="amount">
                                        {receipt.total_amount.map(|t| format!("{t:.2} ₽")).unwrap_or_default()}
                                    </div>
                                </div>
                            }
                        }
                    />
                </Show>
            </section>
        </div>
    }
}
