//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The client name reported to the hosted backend in the `X-Client-Info` header.
/// Feel free to override it when initing this library.
pub static CLIENT_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("habit-grid".to_string())));
