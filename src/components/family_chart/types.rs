use crate::data::types::{ChartNode, Gender, GroupKey, MemberKey, Relationship, relationships};

#[derive(Clone, Debug, PartialEq)]
pub struct ChartMember {
	pub key: MemberKey,
	pub parent: Option<MemberKey>,
	pub name: String,
	pub lifespan: String,
	pub gender: Gender,
	pub reigned: bool,
	pub group: Option<GroupKey>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartGroup {
	pub key: GroupKey,
	pub name: String,
	/// Position in the registry, used to pick a colour.
	pub index: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
	pub members: Vec<ChartMember>,
	pub links: Vec<Relationship>,
	pub groups: Vec<ChartGroup>,
}

impl ChartData {
	/// Split hydrated output into what the canvas draws.
	pub fn from_nodes(nodes: &[ChartNode]) -> Self {
		let raw: Vec<_> = nodes.iter().filter_map(ChartNode::as_member).cloned().collect();
		let members = raw
			.iter()
			.map(|m| ChartMember {
				key: m.key,
				parent: m.parent,
				name: m.name.clone(),
				lifespan: m.lifespan(),
				gender: m.gender,
				reigned: m.reign.is_some(),
				group: m.group,
			})
			.collect();
		let groups = nodes
			.iter()
			.filter_map(ChartNode::as_group)
			.enumerate()
			.map(|(index, g)| ChartGroup {
				key: g.key,
				name: g.name.clone().unwrap_or_else(|| format!("Group {}", g.key)),
				index,
			})
			.collect();

		Self {
			members,
			links: relationships(&raw),
			groups,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::hydrate::GroupHydrator;
	use crate::data::sample::royal_family;

	#[test]
	fn royal_chart_has_every_member_link_and_group() {
		let members = royal_family();
		let data = ChartData::from_nodes(&GroupHydrator::royal().hydrate(&members));

		assert_eq!(data.members.len(), members.len());
		assert_eq!(data.links.len(), members.len() - 1);
		assert_eq!(data.groups.len(), 9);
		assert_eq!(data.groups[0].name, "Family of Elizabeth II");
		assert_eq!(data.groups[8].index, 8);
		let charles = data.members.iter().find(|m| m.key == 16).unwrap();
		assert!(charles.reigned);
		assert_eq!(charles.group, Some(-1));
	}
}
