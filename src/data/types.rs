//! Records exchanged between the data layer and the chart.

use serde::{Deserialize, Serialize};

/// Identifier of a [`FamilyMember`].
pub type MemberKey = i64;

/// Identifier of a [`FamilyGroup`]. Negative by convention so it never
/// collides with a member key.
pub type GroupKey = i64;

/// Serialized as `"M"` / `"F"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
	/// `"M"`
	#[serde(rename = "M")]
	Male,
	/// `"F"`
	#[serde(rename = "F")]
	Female,
}

/// One person on the chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
	/// Unique among members.
	pub key: MemberKey,
	/// `None` for a root of the tree.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<MemberKey>,
	/// Derived by hydration; never trusted on input.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group: Option<GroupKey>,
	/// Display name.
	pub name: String,
	/// Picks the node colour.
	pub gender: Gender,
	/// Free-form year text.
	pub birth_year: String,
	/// Absent while alive.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub death_year: Option<String>,
	/// Years on the throne, e.g. `"1952-2022"`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reign: Option<String>,
	/// Image URL, carried through untouched.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub photo: Option<String>,
}

impl FamilyMember {
	/// A member with only the required descriptive fields set.
	pub fn new(key: MemberKey, name: impl Into<String>, gender: Gender, birth_year: impl Into<String>) -> Self {
		Self {
			key,
			parent: None,
			group: None,
			name: name.into(),
			gender,
			birth_year: birth_year.into(),
			death_year: None,
			reign: None,
			photo: None,
		}
	}

	/// Builder: set the parent.
	pub fn with_parent(mut self, parent: MemberKey) -> Self {
		self.parent = Some(parent);
		self
	}

	/// Builder: set the year of death.
	pub fn with_death_year(mut self, year: impl Into<String>) -> Self {
		self.death_year = Some(year.into());
		self
	}

	/// Builder: set the reign.
	pub fn with_reign(mut self, reign: impl Into<String>) -> Self {
		self.reign = Some(reign.into());
		self
	}

	/// "1926 - 2022", or "b. 1948" while alive.
	pub fn lifespan(&self) -> String {
		match &self.death_year {
			Some(death) => format!("{} - {}", self.birth_year, death),
			None => format!("b. {}", self.birth_year),
		}
	}
}

/// A named sub-family rooted at its head of family.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyGroup {
	/// Unique among groups.
	pub key: GroupKey,
	/// Label drawn above the group bubble.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Always true; tags the record when mixed with members.
	pub is_group: bool,
	/// Root of the subtree this group owns.
	pub head_of_family: MemberKey,
}

impl FamilyGroup {
	/// A named group record.
	pub fn new(key: GroupKey, head_of_family: MemberKey, name: impl Into<String>) -> Self {
		Self {
			key,
			name: Some(name.into()),
			is_group: true,
			head_of_family,
		}
	}
}

/// Hydrated output: annotated members followed by the group records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartNode {
	/// A group record. Listed first so `isGroup` decides the variant on input.
	Group(FamilyGroup),
	/// A member, possibly tagged with its group.
	Member(FamilyMember),
}

impl ChartNode {
	/// Member or group key.
	pub fn key(&self) -> i64 {
		match self {
			ChartNode::Member(m) => m.key,
			ChartNode::Group(g) => g.key,
		}
	}

	/// True for group records.
	pub fn is_group(&self) -> bool {
		matches!(self, ChartNode::Group(_))
	}

	/// The member, if this is one.
	pub fn as_member(&self) -> Option<&FamilyMember> {
		match self {
			ChartNode::Member(m) => Some(m),
			ChartNode::Group(_) => None,
		}
	}

	/// The group, if this is one.
	pub fn as_group(&self) -> Option<&FamilyGroup> {
		match self {
			ChartNode::Group(g) => Some(g),
			ChartNode::Member(_) => None,
		}
	}
}

/// Parent to child link drawn on the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Relationship {
	/// Parent
	pub from: MemberKey,
	/// Child
	pub to: MemberKey,
}

/// Every parent link whose parent is present in `members`.
pub fn relationships(members: &[FamilyMember]) -> Vec<Relationship> {
	let keys: std::collections::HashSet<MemberKey> = members.iter().map(|m| m.key).collect();
	members
		.iter()
		.filter_map(|m| {
			m.parent
				.filter(|p| keys.contains(p))
				.map(|p| Relationship { from: p, to: m.key })
		})
		.collect()
}
