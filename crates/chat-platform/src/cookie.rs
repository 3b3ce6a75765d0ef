//! Cookie lookup for the CSRF header.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// Value of cookie `name` in a `document.cookie` string, undecoded.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Read and URI-decode cookie `name` from the current document.
///
/// `None` outside a browser document or when the cookie is not set.
pub fn document_cookie(name: &str) -> Option<String> {
    let document = web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()?;
    let cookies = document.cookie().ok()?;
    let raw = cookie_value(&cookies, name)?;
    match js_sys::decode_uri_component(&raw) {
        Ok(decoded) => decoded.as_string(),
        Err(_) => Some(raw),
    }
}
