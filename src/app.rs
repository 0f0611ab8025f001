//! Pantry Frontend App
//!
//! Sidebar plus the page selected by the URL hash.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::ApiClient;
use crate::components::{Sidebar, Toaster};
use crate::config::Endpoints;
use crate::context::AppContext;
use crate::pages::{
    BudgetPage, FoodDiaryPage, HomePage, MenuPage, NotFoundPage, ProductCatalogPage, RecipeDetailPage,
    ScanReceiptPage, ShoppingListPage, StorageDetailPage, StorageManagementPage,
};
use crate::route::Route;
use crate::store::PantryState;

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    let (route, set_route) = signal(Route::parse(&current_hash()));
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let api = ApiClient::new(Endpoints::from_env());
    log::info!("using storage resource at {}", api.endpoints().storage);
    let ctx = AppContext::new((route, set_route), (reload_trigger, set_reload_trigger), api);

    // Provide context to all children
    provide_context(ctx);
    provide_context(Store::new(PantryState::default()));

    // Back/forward buttons and typed URLs
    let handle = window_event_listener(leptos::ev::hashchange, move |_| {
        ctx.sync_route(Route::parse(&current_hash()));
    });
    on_cleanup(move || handle.remove());

    view! {
        <div class="app-layout">
            <Sidebar />
            <main class="main-content">
                {move || match ctx.route.get() {
                    Route::Home => view! { <HomePage /> }.into_any(),
                    Route::StorageDetail(id) => view! { <StorageDetailPage location_id=id /> }.into_any(),
                    Route::StorageManagement => view! { <StorageManagementPage /> }.into_any(),
                    Route::ShoppingList => view! { <ShoppingListPage /> }.into_any(),
                    Route::ScanReceipt => view! { <ScanReceiptPage /> }.into_any(),
                    Route::Budget => view! { <BudgetPage /> }.into_any(),
                    Route::Menu => view! { <MenuPage /> }.into_any(),
                    Route::Recipe(id) => view! { <RecipeDetailPage recipe_id=id /> }.into_any(),
                    Route::FoodDiary => view! { <FoodDiaryPage /> }.into_any(),
                    Route::ProductCatalog => view! { <ProductCatalogPage /> }.into_any(),
                    Route::NotFound(path) => view! { <NotFoundPage path=path /> }.into_any(),
                }}
            </main>
            <Toaster />
        </div>
    }
}
