use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Storage, Url, Window};

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Retrieve the document object for DOM interactions.
///
/// # Panics
/// Panics when the document cannot be accessed from the current browser window.
#[must_use]
pub fn document() -> Document {
    window()
        .document()
        .expect("`document` should exist in browser context")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Ask the user a yes/no question via the native confirm dialog.
#[must_use]
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

/// Schedule an animation-frame callback, returning its cancellation handle.
///
/// # Errors
/// Returns an error if the browser refuses to schedule the frame.
pub fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window().request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Cancel a previously scheduled animation-frame callback.
pub fn cancel_animation_frame(handle: i32) {
    let _ = window().cancel_animation_frame(handle);
}

/// Offer `contents` to the user as a JSON file download.
///
/// # Errors
/// Returns an error if the blob, object URL, or anchor cannot be created.
pub fn download_json(filename: &str, contents: &str) -> anyhow::Result<()> {
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|err| anyhow!("blob creation failed: {}", js_error_message(&err)))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|err| anyhow!("object url failed: {}", js_error_message(&err)))?;

    let anchor: HtmlAnchorElement = document()
        .create_element("a")
        .map_err(|err| anyhow!("anchor creation failed: {}", js_error_message(&err)))?
        .dyn_into()
        .map_err(|_| anyhow!("anchor element has the wrong type"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = Url::revoke_object_url(&url);
    Ok(())
}
