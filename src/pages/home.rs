use leptos::prelude::*;

use crate::components::family_chart::{ChartData, FamilyChart, LinkTooltip};
use crate::components::toolbar::Toolbar;
use crate::config::ChartConfig;
use crate::data::history::History;
use crate::data::hydrate::GroupHydrator;
use crate::data::sample::royal_family;
use crate::data::types::MemberKey;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<ChartConfig>().unwrap_or_default();
	let members = RwSignal::new(royal_family());
	let history = RwSignal::new(History::new(config.history_limit));
	let show_groups = RwSignal::new(true);
	let selected = RwSignal::new(None::<MemberKey>);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let hovered_link = RwSignal::new(None::<LinkTooltip>);

	let chart = Memo::new(move |_| {
		members.with(|m| ChartData::from_nodes(&GroupHydrator::royal().hydrate(m)))
	});
	let selected_person = move || {
		selected
			.get()
			.and_then(|key| {
				members.with(|m| m.iter().find(|p| p.key == key).map(|p| format!("{} ({})", p.name, p.lifespan())))
			})
			.unwrap_or_else(|| "nobody".to_string())
	};
	let tooltip_style = move || {
		hovered_link.with(|link| match link {
			Some(l) => format!("display: block; left: {}px; top: {}px;", l.x + 12.0, l.y + 12.0),
			None => "display: none;".to_string(),
		})
	};
	let link_end = move |pick: fn(&LinkTooltip) -> &str| {
		move || hovered_link.with(|link| link.as_ref().map(|l| pick(l).to_string()).unwrap_or_default())
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<FamilyChart
					data=chart
					show_groups=show_groups
					selected=selected
					hovered_link=hovered_link
					canvas_ref=canvas_ref
					fullscreen=true
				/>
				<div id="tooltip" class="tooltip" style=tooltip_style>
					<span id="tooltip-from">{link_end(|l| &l.from)}</span>
					" → "
					<span id="tooltip-to">{link_end(|l| &l.to)}</span>
				</div>
				<div class="graph-overlay">
					<h1>"Royal Family Tree"</h1>
					<p class="subtitle">"Click a member to select it. Drag to reposition, scroll to zoom."</p>
					<p class="selected">"Selected: " <span id="selected-person">{selected_person}</span></p>
					<Toolbar
						members=members
						history=history
						show_groups=show_groups
						selected=selected
						canvas_ref=canvas_ref
					/>
				</div>
			</div>
		</ErrorBoundary>
	}
}
