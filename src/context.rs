//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::ActionError;
use crate::api::{ApiClient, ApiError};
use crate::forms::ValidationError;
use crate::qr::ScanError;
use crate::route::Route;

const TOAST_MILLIS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub route: ReadSignal<Route>,
    /// Current page - write
    set_route: WriteSignal<Route>,
    /// Bumped after storage locations change - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped after storage locations change - write
    set_reload_trigger: WriteSignal<u32>,
    /// Visible notifications, oldest first
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
    api: StoredValue<ApiClient>,
}

impl AppContext {
    pub fn new(route: (ReadSignal<Route>, WriteSignal<Route>), reload_trigger: (ReadSignal<u32>, WriteSignal<u32>), api: ApiClient) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            toasts: RwSignal::new(Vec::new()),
            next_toast: StoredValue::new(0),
            api: StoredValue::new(api),
        }
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Switch page and mirror it in the URL hash
    pub fn navigate(&self, route: Route) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_hash(&route.to_hash()) {
                log::warn!("could not update location hash: {e:?}");
            }
        }
        self.set_route.set(route);
    }

    /// Called when the hash changes outside the app (back button, typed URL)
    pub fn sync_route(&self, route: Route) {
        if self.route.get_untracked() != route {
            self.set_route.set(route);
        }
    }

    /// Trigger a reload of the storage locations
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message.into());
    }

    /// Log a failure and show it as a toast
    pub fn error(&self, what: &str, err: &impl Notice) {
        log::error!("{what}: {err}");
        self.push_toast(ToastKind::Error, format!("{what}: {}", err.notice()));
    }

    /// A form that did not pass validation
    pub fn invalid(&self, err: &ValidationError) {
        log::debug!("form rejected: {err}");
        self.push_toast(ToastKind::Error, err.to_string());
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, kind, message }));

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            ctx.dismiss(id);
        });
    }
}

/// Text of an error suitable for a toast
pub trait Notice: std::fmt::Display {
    fn notice(&self) -> String {
        self.to_string()
    }
}

impl Notice for ApiError {
    fn notice(&self) -> String {
        self.user_message()
    }
}

impl Notice for ValidationError {}

impl Notice for ScanError {
    fn notice(&self) -> String {
        match self {
            ScanError::Lookup(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

impl Notice for ActionError {
    fn notice(&self) -> String {
        match self {
            ActionError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
