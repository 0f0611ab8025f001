use leptos::prelude::*;

use crate::context::use_app_context;
use crate::route::Route;

#[component]
pub fn NotFoundPage(path: String) -> impl IntoView {
    let ctx = use_app_context();
    log::warn!("unknown route: {path}");

    view! {
        <div class="page not-found-page">
            <h1>"404"</h1>
            <p>{format!("Страница «/{path}» не найдена")}</p>
            <button type="button" on:click=move |_| ctx.navigate(Route::Home)>"На главную"</button>
        </div>
    }
}
