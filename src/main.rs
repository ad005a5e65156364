#![allow(warnings)]
//! Pocket Dash Frontend Entry Point

mod app;
mod components;
mod context;
mod models;
mod notes;
mod persist;
mod sw;
mod todo;
mod weather;

use app::App;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn main() {
    console_error_panic_hook::set_once();

    // The same wasm bundle also initializes inside the service worker,
    // where there is no window and nothing to mount; sw.js drives the
    // exported worker_* functions instead.
    if web_sys::window().is_none() {
        return;
    }

    // Register the cache worker; the app is fully usable without it
    spawn_local(async {
        match sw::runtime::register("/sw.js").await {
            Ok(()) => web_sys::console::log_1(&"[SW] registered".into()),
            Err(err) => web_sys::console::warn_1(&err),
        }
    });

    mount_to_body(App);
}
