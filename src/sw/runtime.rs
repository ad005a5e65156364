//! Service Worker Runtime
//!
//! wasm-bindgen exports wired to lifecycle events by the `sw.js` shim,
//! plus the page-side registration call. Install failures reject and
//! abort the install; runtime cache errors degrade to network-only
//! behavior and never reach the page context.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::policy;

fn worker_scope() -> web_sys::ServiceWorkerGlobalScope {
    js_sys::global().unchecked_into()
}

async fn open_bucket(scope: &web_sys::ServiceWorkerGlobalScope) -> Result<web_sys::Cache, JsValue> {
    let opened = JsFuture::from(scope.caches()?.open(policy::CACHE_NAME)).await?;
    Ok(opened.unchecked_into())
}

fn response_type_name(response: &web_sys::Response) -> &'static str {
    match response.type_() {
        web_sys::ResponseType::Basic => "basic",
        web_sys::ResponseType::Cors => "cors",
        web_sys::ResponseType::Opaque => "opaque",
        _ => "other",
    }
}

/// Decide synchronously whether a fetch event should be handled at all.
/// Called by the shim before `respondWith`.
#[wasm_bindgen]
pub fn worker_should_intercept(url: &str) -> bool {
    let origin = worker_scope().location().origin();
    match web_sys::Url::new(url) {
        Ok(url) => policy::should_intercept(&origin, &url.origin(), &url.pathname()),
        Err(_) => false,
    }
}

/// Install: precache the static manifest into the versioned bucket.
/// `addAll` is all-or-nothing; any failed entry rejects the promise and
/// the browser aborts the install (partial asset sets are worse than no
/// cache).
#[wasm_bindgen]
pub async fn worker_install() -> Result<(), JsValue> {
    let scope = worker_scope();
    let bucket = open_bucket(&scope).await?;

    let manifest = js_sys::Array::new();
    for path in policy::STATIC_ASSETS {
        manifest.push(&JsValue::from_str(path));
    }
    JsFuture::from(bucket.add_all_with_str_sequence(&manifest)).await?;

    JsFuture::from(scope.skip_waiting()?).await?;
    web_sys::console::log_1(&format!("[SW] installed {}", policy::CACHE_NAME).into());
    Ok(())
}

/// Activate: delete every bucket from older versions, then claim open
/// clients so this worker controls already-open tabs without a reload.
#[wasm_bindgen]
pub async fn worker_activate() -> Result<(), JsValue> {
    let scope = worker_scope();
    let caches = scope.caches()?;

    let names = JsFuture::from(caches.keys()).await?;
    let names: Vec<String> = js_sys::Array::from(&names)
        .iter()
        .filter_map(|value| value.as_string())
        .collect();

    for stale in policy::stale_caches(&names) {
        web_sys::console::log_1(&format!("[SW] deleting stale cache {}", stale).into());
        JsFuture::from(caches.delete(&stale)).await?;
    }

    JsFuture::from(scope.clients().claim()).await?;
    Ok(())
}

/// Fetch: cache-first with network fallback and cache population.
///
/// Hits are served as-is, never revalidated. Misses go to the network;
/// a cacheable response is cloned into the bucket (a body can only be
/// consumed once, so the clone is stored and the original returned).
/// Offline, HTML navigations fall back to the cached root document;
/// anything else rejects, failing that single resource load.
#[wasm_bindgen]
pub async fn worker_handle_fetch(
    request: web_sys::Request,
) -> Result<web_sys::Response, JsValue> {
    let scope = worker_scope();
    let bucket = open_bucket(&scope).await?;

    let hit = JsFuture::from(bucket.match_with_request(&request)).await?;
    if hit.is_instance_of::<web_sys::Response>() {
        return Ok(hit.unchecked_into());
    }

    match JsFuture::from(scope.fetch_with_request(&request)).await {
        Ok(fetched) => {
            let response: web_sys::Response = fetched.unchecked_into();
            if policy::is_cacheable(
                &request.method(),
                response.status(),
                response_type_name(&response),
            ) {
                if let Ok(copy) = response.clone() {
                    if let Err(err) = JsFuture::from(bucket.put_with_request(&request, &copy)).await
                    {
                        // Degrade to network-only for this resource
                        web_sys::console::warn_1(&err);
                    }
                }
            }
            Ok(response)
        }
        Err(err) => {
            let path = web_sys::Url::new(&request.url())
                .map(|url| url.pathname())
                .unwrap_or_default();
            if let Some(fallback) = policy::offline_fallback(&path) {
                let cached = JsFuture::from(bucket.match_with_str(fallback)).await?;
                if cached.is_instance_of::<web_sys::Response>() {
                    return Ok(cached.unchecked_into());
                }
            }
            Err(err)
        }
    }
}

/// Page-side registration, called once at startup. Failure is logged
/// and otherwise ignored; the app works without the worker.
pub async fn register(script_url: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let container = window.navigator().service_worker();
    JsFuture::from(container.register(script_url)).await?;
    Ok(())
}
