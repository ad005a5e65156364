//! Weather Client
//!
//! Geolocation plus a single GET against the OpenWeatherMap current
//! weather endpoint. One attempt per refresh, no retry or backoff; any
//! failure surfaces as a retry affordance in the widget.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::models::WeatherSnapshot;
use crate::persist::{KeyValueStore, StoreError, API_KEY_KEY};

const ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
/// How long a single geolocation attempt may take
const GEOLOCATION_TIMEOUT_MS: u32 = 5_000;
/// A position up to ten minutes old is fresh enough for weather
const GEOLOCATION_MAX_AGE_MS: u32 = 10 * 60 * 1000;

/// Weather fetch errors
#[derive(Debug, Clone)]
pub enum WeatherError {
    /// Geolocation denied, unsupported, or timed out
    Geolocation,
    /// The request never produced a response
    Network,
    /// Non-success HTTP status
    Http(u16),
    /// The body did not decode as a weather snapshot
    Decode,
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Geolocation => write!(f, "could not determine location"),
            WeatherError::Network => write!(f, "network request failed"),
            WeatherError::Http(status) => write!(f, "weather endpoint returned status {}", status),
            WeatherError::Decode => write!(f, "weather response body was malformed"),
        }
    }
}

impl std::error::Error for WeatherError {}

/// The widget's four render states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherPhase {
    NeedsApiKey,
    Loading,
    Ready,
    Failed,
}

/// Pure render-state selector for the widget. With a key present and
/// neither data nor error, the widget is by definition loading: a
/// refresh clears the error flag the moment it starts.
pub fn phase(has_key: bool, has_data: bool, has_error: bool) -> WeatherPhase {
    if !has_key {
        WeatherPhase::NeedsApiKey
    } else if has_error {
        WeatherPhase::Failed
    } else if has_data {
        WeatherPhase::Ready
    } else {
        WeatherPhase::Loading
    }
}

/// Build the endpoint URL for a coordinate pair and API key
pub fn request_url(lat: f64, lon: f64, api_key: &str) -> String {
    format!(
        "{}?lat={}&lon={}&units=metric&appid={}",
        ENDPOINT, lat, lon, api_key
    )
}

/// Load the persisted API key, if any
pub fn load_api_key(store: &dyn KeyValueStore) -> Option<String> {
    store.get(API_KEY_KEY)
}

/// Persist the API key
pub fn save_api_key(store: &dyn KeyValueStore, api_key: &str) -> Result<(), StoreError> {
    store.set(API_KEY_KEY, api_key)
}

/// Single geolocation attempt wrapped into a future
async fn current_position() -> Result<(f64, f64), WeatherError> {
    let geolocation = web_sys::window()
        .and_then(|w| w.navigator().geolocation().ok())
        .ok_or(WeatherError::Geolocation)?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let options = web_sys::PositionOptions::new();
        options.set_enable_high_accuracy(false);
        options.set_timeout(GEOLOCATION_TIMEOUT_MS);
        options.set_maximum_age(GEOLOCATION_MAX_AGE_MS);

        let on_success = Closure::once_into_js(move |position: web_sys::Position| {
            let _ = resolve.call1(&JsValue::NULL, &position);
        });
        let on_error = Closure::once_into_js(move |err: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &err);
        });

        if geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.unchecked_ref(),
                Some(on_error.unchecked_ref()),
                &options,
            )
            .is_err()
        {
            web_sys::console::warn_1(&"[WEATHER] geolocation call rejected".into());
        }
    });

    let position = JsFuture::from(promise)
        .await
        .map_err(|_| WeatherError::Geolocation)?;
    let position: web_sys::Position = position.unchecked_into();
    let coords = position.coords();
    Ok((coords.latitude(), coords.longitude()))
}

/// Locate the user, call the endpoint, decode the snapshot
pub async fn fetch_weather(api_key: &str) -> Result<WeatherSnapshot, WeatherError> {
    let (lat, lon) = current_position().await?;
    let url = request_url(lat, lon, api_key);

    let window = web_sys::window().ok_or(WeatherError::Network)?;
    let response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|_| WeatherError::Network)?;
    let response: web_sys::Response = response.unchecked_into();

    if !response.ok() {
        return Err(WeatherError::Http(response.status()));
    }

    let body_promise = response.json().map_err(|_| WeatherError::Decode)?;
    let body = JsFuture::from(body_promise)
        .await
        .map_err(|_| WeatherError::Decode)?;
    serde_wasm_bindgen::from_value(body).map_err(|_| WeatherError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemStore;

    #[test]
    fn test_no_api_key_means_capture_form() {
        // Fresh store: no key, no data, no error
        assert_eq!(phase(false, false, false), WeatherPhase::NeedsApiKey);
        // A missing key wins over everything else
        assert_eq!(phase(false, true, true), WeatherPhase::NeedsApiKey);
    }

    #[test]
    fn test_phase_precedence_with_key() {
        assert_eq!(phase(true, false, false), WeatherPhase::Loading);
        assert_eq!(phase(true, true, false), WeatherPhase::Ready);
        // A failed refresh replaces the data view until retried
        assert_eq!(phase(true, true, true), WeatherPhase::Failed);
    }

    #[test]
    fn test_request_url_shape() {
        let url = request_url(51.5, -0.12, "secret");
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/weather?lat=51.5&lon=-0.12&units=metric&appid=secret"
        );
    }

    #[test]
    fn test_api_key_round_trip() {
        let store = MemStore::default();
        assert_eq!(load_api_key(&store), None);
        save_api_key(&store, "abc123").unwrap();
        assert_eq!(load_api_key(&store).as_deref(), Some("abc123"));
    }
}
