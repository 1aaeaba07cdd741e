//! Royal family tree: a Leptos client-side app that draws a family chart,
//! grouping members into sub-families by their head of family.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info, warn};

// Modules
mod components;
pub mod config;
pub mod data;
mod dom;
pub mod error;
mod pages;
pub mod theme;

// Top-Level pages
use crate::config::ChartConfig;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::theme::{Palette, Theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the family chart and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let palette = Theme::from_document().map(|t| t.palette()).unwrap_or_else(|e| {
		warn!("theme unavailable, using default colours: {e}");
		Palette::default()
	});
	provide_context(palette);
	provide_context(ChartConfig::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Royal Family Tree" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
