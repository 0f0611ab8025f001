//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::StorageLocation;

/// Data shared between the sidebar and the pages
#[derive(Clone, Debug, Default, Store)]
pub struct PantryState {
    /// Storage locations, as last loaded
    pub locations: Vec<StorageLocation>,
    /// Whether `locations` has been loaded at least once
    pub locations_loaded: bool,
}

/// Type alias for the store
pub type PantryStore = Store<PantryState>;

/// Get the pantry store from context
pub fn use_pantry_store() -> PantryStore {
    expect_context::<PantryStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_locations(store: &PantryStore) -> Vec<StorageLocation> {
    store.locations().get()
}

pub fn store_find_location(store: &PantryStore, location_id: i64) -> Option<StorageLocation> {
    store.locations().read().iter().find(|l| l.id == location_id).cloned()
}

pub fn store_set_locations(store: &PantryStore, locations: Vec<StorageLocation>) {
    *store.locations().write() = locations;
    store.locations_loaded().set(true);
}

/// Insert a location, or replace the one with the same ID
pub fn store_upsert_location(store: &PantryStore, location: StorageLocation) {
    let field = store.locations();
    let mut locations = field.write();
    match locations.iter_mut().find(|l| l.id == location.id) {
        Some(existing) => *existing = location,
        None => locations.push(location),
    }
}

pub fn store_remove_location(store: &PantryStore, location_id: i64) {
    store.locations().write().retain(|l| l.id != location_id);
}
