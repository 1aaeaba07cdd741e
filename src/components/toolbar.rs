//! Chart actions: add members, undo/redo, save/load, export, group toggle.

use leptos::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::ChartConfig;
use crate::data::edit::{add_member, retain_selection};
use crate::data::history::History;
use crate::data::hydrate::GroupHydrator;
use crate::data::storage;
use crate::data::types::{FamilyMember, Gender, MemberKey};
use crate::dom::download::{download_text, download_url};
use crate::error::AppError;

type Members = RwSignal<Vec<FamilyMember>>;
type MemberHistory = RwSignal<History<Vec<FamilyMember>>>;

type Selection = RwSignal<Option<MemberKey>>;

/// Install `next`, dropping a selection that no longer points at anyone.
fn replace(members: Members, selected: Selection, next: Vec<FamilyMember>) {
	let current = selected.get_untracked();
	let kept = retain_selection(current, &next);
	if kept != current {
		selected.set(kept);
	}
	members.set(next);
}

/// Replace the member list, remembering the old one for undo.
fn commit(members: Members, history: MemberHistory, next: Vec<FamilyMember>) {
	let previous = members.get_untracked();
	history.update(|h| h.record(previous));
	members.set(next);
}

fn add(members: Members, history: MemberHistory, selected: Selection, gender: Gender) {
	let mut next = members.get_untracked();
	let year = js_sys::Date::new_0().get_full_year().to_string();
	let key = add_member(&mut next, gender, selected.get_untracked(), &year);
	commit(members, history, next);
	selected.set(Some(key));
	log::info!("added member {key}");
}

fn step(members: Members, history: MemberHistory, selected: Selection, forward: bool) {
	let current = members.get_untracked();
	let mut restored = None;
	history.update(|h| {
		restored = if forward { h.redo(current) } else { h.undo(current) };
	});
	if let Some(next) = restored {
		replace(members, selected, next);
	}
}

fn load(members: Members, history: MemberHistory, selected: Selection, storage_key: &str) -> Result<(), AppError> {
	let loaded = storage::load(storage_key, &GroupHydrator::royal())?;
	history.update(|h| h.record(members.get_untracked()));
	replace(members, selected, loaded);
	Ok(())
}

fn export_png(canvas_ref: NodeRef<leptos::html::Canvas>, file_name: &str) -> Result<(), AppError> {
	let canvas: HtmlCanvasElement = canvas_ref
		.get()
		.ok_or_else(|| AppError::missing("chart canvas"))?
		.into();
	let url = canvas
		.to_data_url_with_type("image/png")
		.map_err(|e| AppError::dom("toDataURL", e))?;
	download_url(&url, file_name)
}

fn export_json(members: &[FamilyMember], file_name: &str) -> Result<(), AppError> {
	let json = storage::encode_members(members)?;
	download_text(&json, "application/json", file_name)
}

fn report(action: &str, result: Result<(), AppError>) {
	if let Err(e) = result {
		log::error!("{action} failed: {e}");
	}
}

#[component]
pub fn Toolbar(
	members: Members,
	history: MemberHistory,
	show_groups: RwSignal<bool>,
	selected: Selection,
	canvas_ref: NodeRef<leptos::html::Canvas>,
) -> impl IntoView {
	let config = use_context::<ChartConfig>().unwrap_or_default();
	let (save_key, load_key) = (config.storage_key.clone(), config.storage_key.clone());
	let (png_name, json_name) = (config.png_file_name.clone(), config.json_file_name.clone());

	let can_undo = move || history.with(History::can_undo);
	let can_redo = move || history.with(History::can_redo);
	let groups_label = move || if show_groups.get() { "Hide groups" } else { "Show groups" };

	view! {
		<div class="toolbar">
			<button id="add-girl-button" on:click=move |_| add(members, history, selected, Gender::Female)>
				"Add girl"
			</button>
			<button id="add-boy-button" on:click=move |_| add(members, history, selected, Gender::Male)>
				"Add boy"
			</button>
			<button
				id="undo-button"
				prop:disabled=move || !can_undo()
				on:click=move |_| step(members, history, selected, false)
			>
				"Undo"
			</button>
			<button
				id="redo-button"
				prop:disabled=move || !can_redo()
				on:click=move |_| step(members, history, selected, true)
			>
				"Redo"
			</button>
			<button
				id="save-button"
				on:click=move |_| report("save", storage::save(&save_key, &members.get_untracked()))
			>
				"Save"
			</button>
			<button id="load-button" on:click=move |_| report("load", load(members, history, selected, &load_key))>
				"Load"
			</button>
			<button
				id="export-to-png-button"
				on:click=move |_| report("png export", export_png(canvas_ref, &png_name))
			>
				"Export PNG"
			</button>
			<button
				id="export-to-json-button"
				on:click=move |_| report("json export", members.with_untracked(|m| export_json(m, &json_name)))
			>
				"Export JSON"
			</button>
			<button id="toggle-groups-button" on:click=move |_| show_groups.update(|v| *v = !*v)>
				{groups_label}
			</button>
		</div>
	}
}
