//! Save and load of the member list.
//!
//! The saved form is a JSON array. Loading also accepts a hydrated export
//! (members mixed with group records); group records and stale group tags
//! are dropped since hydration derives them again. A loaded chart must be
//! a clean forest for the registry or it is rejected.

use web_sys::Storage;

use super::hydrate::GroupHydrator;
use super::types::{ChartNode, FamilyMember};
use crate::error::AppError;

/// Pretty JSON without group tags.
pub fn encode_members(members: &[FamilyMember]) -> Result<String, AppError> {
	let stripped: Vec<FamilyMember> = members
		.iter()
		.map(|m| FamilyMember {
			group: None,
			..m.clone()
		})
		.collect();
	Ok(serde_json::to_string_pretty(&stripped)?)
}

/// Members from a saved list or a hydrated export.
pub fn decode_members(json: &str) -> Result<Vec<FamilyMember>, AppError> {
	let nodes: Vec<ChartNode> = serde_json::from_str(json)?;
	Ok(nodes
		.into_iter()
		.filter_map(|node| match node {
			ChartNode::Member(member) => Some(FamilyMember { group: None, ..member }),
			ChartNode::Group(_) => None,
		})
		.collect())
}

/// Decode and check against `hydrator`'s registry, failing on any
/// [`HydrateIssue`](super::hydrate::HydrateIssue).
pub fn decode_chart(json: &str, hydrator: &GroupHydrator<'_>) -> Result<Vec<FamilyMember>, AppError> {
	let members = decode_members(json)?;
	hydrator.try_hydrate(&members)?;
	Ok(members)
}

fn local_storage() -> Result<Storage, AppError> {
	web_sys::window()
		.ok_or_else(|| AppError::missing("window"))?
		.local_storage()
		.map_err(|e| AppError::Storage(format!("{e:?}")))?
		.ok_or_else(|| AppError::Storage("localStorage is disabled".into()))
}

/// Write `members` to `localStorage` under `key`.
pub fn save(key: &str, members: &[FamilyMember]) -> Result<(), AppError> {
	let json = encode_members(members)?;
	local_storage()?
		.set_item(key, &json)
		.map_err(|e| AppError::Storage(format!("{e:?}")))?;
	log::info!("saved {} members under \"{key}\"", members.len());
	Ok(())
}

/// Read back what [`save`] wrote, rejecting invalid charts.
pub fn load(key: &str, hydrator: &GroupHydrator<'_>) -> Result<Vec<FamilyMember>, AppError> {
	let json = local_storage()?
		.get_item(key)
		.map_err(|e| AppError::Storage(format!("{e:?}")))?
		.ok_or_else(|| AppError::NothingSaved(key.to_string()))?;
	let members = decode_chart(&json, hydrator)?;
	log::info!("loaded {} members from \"{key}\"", members.len());
	Ok(members)
}
