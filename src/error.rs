//! Application error type.

use wasm_bindgen::JsValue;

use crate::data::hydrate::HydrateError;

/// Anything that can go wrong outside the pure data layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	/// A browser API call failed or returned nothing.
	#[error("dom error: {0}")]
	Dom(String),

	/// `localStorage` is unavailable or refused the write.
	#[error("storage error: {0}")]
	Storage(String),

	/// Nothing has been saved yet.
	#[error("no saved chart under \"{0}\"")]
	NothingSaved(String),

	/// Saved data could not be (de)serialized.
	#[error("serialization error: {0}")]
	Serde(#[from] serde_json::Error),

	/// Loaded data is not a valid family forest.
	#[error("hydration error: {0}")]
	Hydrate(#[from] HydrateError),
}

impl AppError {
	/// Wrap a rejected browser call.
	pub fn dom(context: &str, value: JsValue) -> Self {
		AppError::Dom(format!("{context}: {value:?}"))
	}

	/// A browser object that should exist did not.
	pub fn missing(what: &str) -> Self {
		AppError::Dom(format!("{what} is not available"))
	}
}
