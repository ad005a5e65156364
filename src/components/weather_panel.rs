//! Weather Widget
//!
//! Four-phase renderer over {api key, snapshot, error}. The snapshot is
//! transient; only the API key persists. Refreshes every 30 minutes
//! while the page stays open, with no retry between refreshes.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::ApiKeyForm;
use crate::context::use_store;
use crate::models::WeatherSnapshot;
use crate::weather::{self, WeatherPhase};

const REFRESH_INTERVAL_MS: u32 = 30 * 60 * 1000;

#[component]
pub fn WeatherPanel() -> impl IntoView {
    let store = use_store();
    let (api_key, set_api_key) = signal(weather::load_api_key(store.port()));
    let (snapshot, set_snapshot) = signal(None::<WeatherSnapshot>);
    let (failed, set_failed) = signal(false);

    // In-flight fetches race freely; the last one to resolve wins the
    // render, matching a fresh refresh racing a stale one.
    let refresh = move || {
        let Some(key) = api_key.get_untracked() else {
            return;
        };
        set_failed.set(false);
        spawn_local(async move {
            match weather::fetch_weather(&key).await {
                Ok(snap) => {
                    set_snapshot.set(Some(snap));
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("[WEATHER] fetch failed: {}", err).into());
                    set_failed.set(true);
                }
            }
        });
    };

    // First fetch plus the periodic refresh, started once a key exists
    let refresh_timer = StoredValue::new_local(None::<Interval>);
    Effect::new(move |_| {
        if api_key.get().is_none() {
            return;
        }
        refresh();
        refresh_timer.update_value(|slot| {
            if slot.is_none() {
                *slot = Some(Interval::new(REFRESH_INTERVAL_MS, refresh));
            }
        });
    });

    let save_key = Callback::new(move |key: String| {
        if let Err(err) = weather::save_api_key(store.port(), &key) {
            web_sys::console::warn_1(&format!("[WEATHER] key save failed: {}", err).into());
        }
        set_api_key.set(Some(key));
    });

    view! {
        {move || match weather::phase(api_key.get().is_some(), snapshot.get().is_some(), failed.get()) {
            WeatherPhase::NeedsApiKey => view! {
                <ApiKeyForm on_save=save_key />
            }.into_any(),
            WeatherPhase::Loading => view! {
                <div class="weather-loading">"Loading weather data..."</div>
            }.into_any(),
            WeatherPhase::Failed => view! {
                <div class="weather-error">
                    "Could not fetch weather data. Please check your API key or try again later."
                </div>
                <button class="weather-retry" on:click=move |_| refresh()>"Retry"</button>
            }.into_any(),
            WeatherPhase::Ready => match snapshot.get() {
                Some(snap) => weather_info(snap),
                None => view! {
                    <div class="weather-loading">"Loading weather data..."</div>
                }.into_any(),
            },
        }}
    }
}

/// Render one snapshot: icon, temperature, location, description, and
/// the details grid, plus the fetch timestamp.
fn weather_info(snap: WeatherSnapshot) -> AnyView {
    let condition = snap.weather.first().cloned().unwrap_or_default();
    let details = [
        ("Feels like", format!("{:.0}°C", snap.main.feels_like)),
        ("Humidity", format!("{}%", snap.main.humidity)),
        ("Wind", format!("{:.0} m/s", snap.wind.speed)),
        ("Pressure", format!("{} hPa", snap.main.pressure)),
    ];
    let updated = js_sys::Date::new_0().to_locale_time_string("en-US");

    view! {
        <div class="weather-info">
            <img
                src=format!("https://openweathermap.org/img/wn/{}@2x.png", condition.icon)
                alt=condition.description.clone()
            />
            <div class="weather-temp">{format!("{:.0}°C", snap.main.temp)}</div>
            <div class="weather-location">{snap.name.clone()}</div>
            <div class="weather-description">{condition.description.clone()}</div>
            <div class="weather-details">
                {details.into_iter().map(|(label, value)| view! {
                    <div class="weather-detail-item">
                        <div class="weather-detail-label">{label}</div>
                        <div class="weather-detail-value">{value}</div>
                    </div>
                }).collect_view()}
            </div>
            <div class="weather-update-time">{format!("Updated: {}", updated)}</div>
        </div>
    }
    .into_any()
}
