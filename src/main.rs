//! Pantry Frontend Entry Point

mod models;
mod config;
mod logging;
mod api;
mod qr;
mod matching;
mod forms;
mod actions;
mod route;
mod context;
mod store;
mod scanner;
mod components;
mod pages;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(if cfg!(debug_assertions) { log::LevelFilter::Debug } else { log::LevelFilter::Info });
    mount_to_body(App);
}
