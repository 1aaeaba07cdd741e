//! Browser file downloads through a temporary anchor element.

use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::AppError;

/// Offer `blob` as a download named `file_name`.
pub fn download_blob(blob: &Blob, file_name: &str) -> Result<(), AppError> {
	let url = Url::create_object_url_with_blob(blob).map_err(|e| AppError::dom("createObjectURL", e))?;
	click_anchor(&url, file_name, true)
}

/// Offer a `data:` or object URL as a download.
pub fn download_url(url: &str, file_name: &str) -> Result<(), AppError> {
	click_anchor(url, file_name, false)
}

pub fn download_text(text: &str, mime_type: &str, file_name: &str) -> Result<(), AppError> {
	let options = BlobPropertyBag::new();
	options.set_type(mime_type);
	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
		.map_err(|e| AppError::dom("new Blob", e))?;
	download_blob(&blob, file_name)
}

fn click_anchor(url: &str, file_name: &str, revoke: bool) -> Result<(), AppError> {
	let window = web_sys::window().ok_or_else(|| AppError::missing("window"))?;
	let document = window.document().ok_or_else(|| AppError::missing("document"))?;
	let body = document.body().ok_or_else(|| AppError::missing("document body"))?;

	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(|e| AppError::dom("createElement", e))?
		.dyn_into()
		.map_err(|_| AppError::missing("anchor element"))?;
	let _ = anchor.style().set_property("display", "none");
	anchor.set_href(url);
	anchor.set_download(file_name);
	body.append_child(&anchor).map_err(|e| AppError::dom("appendChild", e))?;

	// Click on the next frame so the anchor is attached before navigation.
	let url = url.to_string();
	let click = Closure::once_into_js(move || {
		anchor.click();
		if revoke {
			let _ = Url::revoke_object_url(&url);
		}
		anchor.remove();
	});
	window
		.request_animation_frame(click.unchecked_ref())
		.map_err(|e| AppError::dom("requestAnimationFrame", e))?;
	log::debug!("download of {file_name} queued");
	Ok(())
}
