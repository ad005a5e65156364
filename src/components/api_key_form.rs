//! API Key Capture Form
//!
//! Shown by the weather widget until an OpenWeatherMap key is stored.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

#[component]
pub fn ApiKeyForm(on_save: Callback<String>) -> impl IntoView {
    let (value, set_value) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let key = value.get().trim().to_string();
        if key.is_empty() {
            return;
        }
        on_save.run(key);
    };

    view! {
        <form class="api-key-form" on:submit=submit>
            <p>"Please enter your OpenWeatherMap API key:"</p>
            <input
                type="text"
                placeholder="API Key"
                required=true
                prop:value=move || value.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_value.set(input.value());
                }
            />
            <button type="submit" class="api-key-button">"Save API Key"</button>
        </form>
        <a href="https://openweathermap.org/api" target="_blank" class="api-key-help">
            "Get an API key here"
        </a>
    }
}
