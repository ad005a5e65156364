//! Pocket Dash App Shell
//!
//! Builds the persistence port once, provides it via context, and lays
//! the three widgets out side by side. Each widget owns its own panel
//! and its own storage key; the shell never touches widget state.

use leptos::prelude::*;

use crate::components::{NotesEditor, TodoList, WeatherPanel};
use crate::context::StoreContext;

#[component]
pub fn App() -> impl IntoView {
    let store = StoreContext::from_browser();
    let degraded = store.degraded;
    provide_context(store);

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Pocket Dash"</h1>
            </header>

            <Show when=move || degraded>
                <div class="storage-warning">
                    "Local storage is unavailable. Your changes will be lost when this page closes."
                </div>
            </Show>

            <main class="dashboard-grid">
                <section class="panel" id="todo-container">
                    <h2>"To-Do"</h2>
                    <TodoList />
                </section>

                <section class="panel" id="weather-container">
                    <h2>"Weather"</h2>
                    <WeatherPanel />
                </section>

                <section class="panel" id="notes-container">
                    <h2>"Notes"</h2>
                    <NotesEditor />
                </section>
            </main>
        </div>
    }
}
