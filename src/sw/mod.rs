//! Service Worker Cache Controller
//!
//! Split into pure policy decisions (host-testable) and the wasm glue
//! that runs inside the worker's global scope. `sw.js` is a plain event
//! shim; every decision it acts on lives in `policy`.

pub mod policy;
pub mod runtime;
