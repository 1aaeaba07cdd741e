//! Group hydration: tags every member with the family group whose head of
//! family it descends from, and appends the group records for the chart.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::groups::royal_family_groups;
use super::types::{ChartNode, FamilyGroup, FamilyMember, GroupKey, MemberKey};

/// Problem found in a member list, relative to a group registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HydrateIssue {
	/// The member's parent is not in the list.
	#[error("member {member} points to unknown parent {parent}")]
	DanglingParent {
		/// Member holding the reference
		member: MemberKey,
		/// Parent key that matched nothing
		parent: MemberKey,
	},

	/// The group's head of family is not in the list.
	#[error("group {group} is headed by unknown member {head}")]
	UnknownHead {
		/// Group whose head is missing
		group: GroupKey,
		/// Missing head key
		head: MemberKey,
	},

	/// Two groups reach the same member. The later group wins.
	#[error("member {member} is claimed by group {first} and then by group {second}")]
	OverlappingGroups {
		/// Member claimed twice
		member: MemberKey,
		/// Group that claimed it first
		first: GroupKey,
		/// Group it ends up in
		second: GroupKey,
	},

	/// Following parents from this member leads back to it.
	#[error("member {member} is its own ancestor")]
	CyclicParentChain {
		/// First member of the cycle that was found
		member: MemberKey,
	},

	/// Two members share a key.
	#[error("member key {key} is used more than once")]
	DuplicateMemberKey {
		/// The repeated key
		key: MemberKey,
	},
}

/// Returned by [`GroupHydrator::try_hydrate`] when the data is not a clean
/// partition of disjoint family trees.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid family data ({} issue(s))", .issues.len())]
pub struct HydrateError {
	/// Everything that was wrong, in detection order.
	pub issues: Vec<HydrateIssue>,
}

/// Member to group mapping produced by one traversal pass.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
	groups: HashMap<MemberKey, GroupKey>,
	/// Overlaps and cycles noticed during the traversal.
	pub issues: Vec<HydrateIssue>,
}

impl Assignment {
	/// Group that claimed `member`, if any.
	pub fn group_of(&self, member: MemberKey) -> Option<GroupKey> {
		self.groups.get(&member).copied()
	}

	/// Number of keys claimed by some group. Includes heads that are not
	/// present in the member list.
	pub fn len(&self) -> usize {
		self.groups.len()
	}

	/// True when no group claimed anything.
	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}
}

/// Classifies members into the groups of a registry.
///
/// Every call builds its own children map and assignment map; nothing is
/// carried over between calls.
#[derive(Clone, Copy, Debug)]
pub struct GroupHydrator<'a> {
	groups: &'a [FamilyGroup],
}

impl GroupHydrator<'static> {
	/// Hydrator over the built-in royal family registry.
	pub fn royal() -> Self {
		Self::new(royal_family_groups())
	}
}

impl<'a> GroupHydrator<'a> {
	/// Hydrator over `groups`, traversed in slice order.
	pub fn new(groups: &'a [FamilyGroup]) -> Self {
		Self { groups }
	}

	/// The registry this hydrator appends to its output.
	pub fn groups(&self) -> &'a [FamilyGroup] {
		self.groups
	}

	/// Annotated members in input order, followed by the registry's groups.
	///
	/// Never fails. Dangling parents and unknown heads simply leave members
	/// untagged, overlapping groups resolve to the group that comes last in
	/// the registry, and cycles are cut where a member would be revisited.
	pub fn hydrate(&self, members: &[FamilyMember]) -> Vec<ChartNode> {
		let assignment = self.assign(members);
		for issue in &assignment.issues {
			warn!("{issue}");
		}
		self.annotate(members, &assignment)
	}

	/// Like [`hydrate`](Self::hydrate) but rejects data with any
	/// [`HydrateIssue`].
	pub fn try_hydrate(&self, members: &[FamilyMember]) -> Result<Vec<ChartNode>, HydrateError> {
		let issues = self.validate(members);
		if !issues.is_empty() {
			return Err(HydrateError { issues });
		}
		Ok(self.annotate(members, &self.assign(members)))
	}

	/// Depth-first walk from each head, in registry order.
	pub fn assign(&self, members: &[FamilyMember]) -> Assignment {
		let children = children_by_parent(members);
		let mut assignment = Assignment::default();

		for group in self.groups {
			let mut visited = HashSet::new();
			// Keys from the head down to the entry being expanded.
			let mut path: Vec<MemberKey> = Vec::new();
			let mut stack = vec![(group.head_of_family, 0usize)];

			while let Some((key, depth)) = stack.pop() {
				path.truncate(depth);
				if path.contains(&key) {
					warn!(
						"member {key} is its own ancestor, cutting the walk from head {}",
						group.head_of_family
					);
					let issue = HydrateIssue::CyclicParentChain { member: key };
					if !assignment.issues.contains(&issue) {
						assignment.issues.push(issue);
					}
					continue;
				}
				if !visited.insert(key) {
					warn!(
						"member {key} reached twice from head {}, skipping",
						group.head_of_family
					);
					continue;
				}
				if let Some(previous) = assignment.groups.insert(key, group.key) {
					if previous != group.key {
						assignment.issues.push(HydrateIssue::OverlappingGroups {
							member: key,
							first: previous,
							second: group.key,
						});
					}
				}
				path.push(key);
				if let Some(kids) = children.get(&key) {
					// Reversed so the first child is popped first.
					stack.extend(kids.iter().rev().map(|&kid| (kid, depth + 1)));
				}
			}
		}

		assignment
	}

	/// Every issue in `members`, relative to this registry.
	pub fn validate(&self, members: &[FamilyMember]) -> Vec<HydrateIssue> {
		let mut issues = Vec::new();

		let mut keys = HashSet::with_capacity(members.len());
		for member in members {
			if !keys.insert(member.key) {
				issues.push(HydrateIssue::DuplicateMemberKey { key: member.key });
			}
		}
		for member in members {
			if let Some(parent) = member.parent {
				if !keys.contains(&parent) {
					issues.push(HydrateIssue::DanglingParent {
						member: member.key,
						parent,
					});
				}
			}
		}
		for group in self.groups {
			if !keys.contains(&group.head_of_family) {
				issues.push(HydrateIssue::UnknownHead {
					group: group.key,
					head: group.head_of_family,
				});
			}
		}
		issues.extend(find_cycles(members));
		for issue in self.assign(members).issues {
			if !issues.contains(&issue) {
				issues.push(issue);
			}
		}

		issues
	}

	fn annotate(&self, members: &[FamilyMember], assignment: &Assignment) -> Vec<ChartNode> {
		let mut nodes = Vec::with_capacity(members.len() + self.groups.len());
		nodes.extend(members.iter().map(|member| {
			ChartNode::Member(FamilyMember {
				group: assignment.group_of(member.key),
				..member.clone()
			})
		}));
		nodes.extend(self.groups.iter().cloned().map(ChartNode::Group));

		debug!(
			"hydrated {} members into {} groups ({} claimed)",
			members.len(),
			self.groups.len(),
			assignment.len()
		);
		nodes
	}
}

/// Parent key to child keys, children in input order.
fn children_by_parent(members: &[FamilyMember]) -> HashMap<MemberKey, Vec<MemberKey>> {
	let mut children: HashMap<MemberKey, Vec<MemberKey>> = HashMap::new();
	for member in members {
		if let Some(parent) = member.parent {
			children.entry(parent).or_default().push(member.key);
		}
	}
	children
}

/// One issue per distinct cycle in the parent relation.
fn find_cycles(members: &[FamilyMember]) -> Vec<HydrateIssue> {
	let parent_of: HashMap<MemberKey, MemberKey> = members
		.iter()
		.filter_map(|m| m.parent.map(|p| (m.key, p)))
		.collect();
	let mut settled = HashSet::new();
	let mut issues = Vec::new();

	for member in members {
		let mut path = Vec::new();
		let mut on_path = HashSet::new();
		let mut current = Some(member.key);

		while let Some(key) = current {
			if settled.contains(&key) {
				break;
			}
			if !on_path.insert(key) {
				issues.push(HydrateIssue::CyclicParentChain { member: key });
				break;
			}
			path.push(key);
			current = parent_of.get(&key).copied();
		}
		settled.extend(path);
	}

	issues
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::data::sample::royal_family;
	use crate::data::types::Gender;

	fn member(key: MemberKey, parent: Option<MemberKey>) -> FamilyMember {
		FamilyMember {
			parent,
			..FamilyMember::new(key, format!("member {key}"), Gender::Female, "1900")
		}
	}

	fn groups_of(nodes: &[ChartNode]) -> Vec<(MemberKey, Option<GroupKey>)> {
		nodes
			.iter()
			.filter_map(ChartNode::as_member)
			.map(|m| (m.key, m.group))
			.collect()
	}

	#[test]
	fn tags_the_whole_subtree_of_a_head() {
		let registry = vec![FamilyGroup::new(-1, 7, "Family of 7")];
		let members = vec![member(7, None), member(8, Some(7)), member(9, Some(8))];

		let nodes = GroupHydrator::new(&registry).hydrate(&members);

		assert_eq!(groups_of(&nodes), vec![(7, Some(-1)), (8, Some(-1)), (9, Some(-1))]);
		assert_eq!(nodes.last(), Some(&ChartNode::Group(registry[0].clone())));
	}

	#[test]
	fn output_is_members_in_order_then_groups_in_order() {
		let registry = vec![
			FamilyGroup::new(-1, 1, "first"),
			FamilyGroup::new(-2, 2, "second"),
		];
		let members = vec![member(3, Some(2)), member(1, None), member(2, None), member(4, None)];

		let nodes = GroupHydrator::new(&registry).hydrate(&members);

		assert_eq!(nodes.len(), members.len() + registry.len());
		let keys: Vec<i64> = nodes.iter().map(ChartNode::key).collect();
		assert_eq!(keys, vec![3, 1, 2, 4, -1, -2]);
		assert_eq!(
			groups_of(&nodes),
			vec![(3, Some(-2)), (1, Some(-1)), (2, Some(-2)), (4, None)]
		);
	}

	#[test]
	fn unreached_members_keep_their_payload_and_lose_stale_groups() {
		let registry = vec![FamilyGroup::new(-1, 1, "only")];
		let mut stray = member(5, None).with_reign("1900-1910");
		stray.group = Some(-42);
		let members = vec![member(1, None), stray.clone()];

		let nodes = GroupHydrator::new(&registry).hydrate(&members);

		let out = nodes[1].as_member().unwrap();
		assert_eq!(out.group, None);
		assert_eq!(FamilyMember { group: Some(-42), ..out.clone() }, stray);
	}

	#[test]
	fn rehydrating_output_gives_the_same_groups() {
		let hydrator = GroupHydrator::royal();
		let first = hydrator.hydrate(&royal_family());
		let members: Vec<FamilyMember> = first.iter().filter_map(ChartNode::as_member).cloned().collect();

		let second = hydrator.hydrate(&members);

		assert_eq!(first, second);
	}

	#[test]
	fn dangling_parent_is_only_tagged_when_it_heads_a_group() {
		let registry = vec![FamilyGroup::new(-1, 7, "Family of 7")];
		let members = vec![member(7, Some(99)), member(8, Some(99)), member(9, Some(7))];

		let hydrator = GroupHydrator::new(&registry);
		let nodes = hydrator.hydrate(&members);

		assert_eq!(groups_of(&nodes), vec![(7, Some(-1)), (8, None), (9, Some(-1))]);
		assert_eq!(
			hydrator.validate(&members),
			vec![
				HydrateIssue::DanglingParent { member: 7, parent: 99 },
				HydrateIssue::DanglingParent { member: 8, parent: 99 },
			]
		);
	}

	#[test]
	fn unknown_head_tags_nobody() {
		let registry = vec![FamilyGroup::new(-1, 42, "ghosts")];
		let members = vec![member(1, None), member(2, Some(1))];

		let hydrator = GroupHydrator::new(&registry);
		let nodes = hydrator.hydrate(&members);

		assert_eq!(groups_of(&nodes), vec![(1, None), (2, None)]);
		assert_eq!(hydrator.assign(&members).group_of(42), Some(-1));
		assert_eq!(
			hydrator.validate(&members),
			vec![HydrateIssue::UnknownHead { group: -1, head: 42 }]
		);
	}

	#[test]
	fn overlapping_groups_resolve_to_the_last_group() {
		let registry = vec![
			FamilyGroup::new(-1, 7, "outer"),
			FamilyGroup::new(-2, 8, "inner"),
		];
		let members = vec![member(7, None), member(8, Some(7)), member(9, Some(8)), member(10, Some(7))];

		let hydrator = GroupHydrator::new(&registry);
		let nodes = hydrator.hydrate(&members);

		assert_eq!(
			groups_of(&nodes),
			vec![(7, Some(-1)), (8, Some(-2)), (9, Some(-2)), (10, Some(-1))]
		);
		assert_eq!(
			hydrator.assign(&members).issues,
			vec![
				HydrateIssue::OverlappingGroups { member: 8, first: -1, second: -2 },
				HydrateIssue::OverlappingGroups { member: 9, first: -1, second: -2 },
			]
		);
	}

	#[test]
	fn heads_on_a_cycle_terminate_and_the_last_group_wins() {
		let registry = vec![
			FamilyGroup::new(-1, 7, "first"),
			FamilyGroup::new(-2, 8, "second"),
		];
		let members = vec![member(7, Some(8)), member(8, Some(7))];

		let hydrator = GroupHydrator::new(&registry);
		let nodes = hydrator.hydrate(&members);

		assert_eq!(groups_of(&nodes), vec![(7, Some(-2)), (8, Some(-2))]);
		let issues = hydrator.validate(&members);
		assert!(issues.contains(&HydrateIssue::CyclicParentChain { member: 7 }));
	}

	#[test]
	fn walking_into_a_cycle_records_it_in_the_assignment() {
		let registry = vec![FamilyGroup::new(-1, 7, "Family of 7")];
		let members = vec![member(7, Some(8)), member(8, Some(7))];

		let assignment = GroupHydrator::new(&registry).assign(&members);

		assert_eq!(assignment.issues, vec![HydrateIssue::CyclicParentChain { member: 7 }]);
		assert_eq!(assignment.group_of(7), Some(-1));
		assert_eq!(assignment.group_of(8), Some(-1));
	}

	#[test]
	fn cycle_found_both_ways_is_reported_once() {
		let registry = vec![FamilyGroup::new(-1, 7, "Family of 7")];
		let members = vec![member(7, Some(8)), member(8, Some(7))];

		let issues = GroupHydrator::new(&registry).validate(&members);

		assert_eq!(issues, vec![HydrateIssue::CyclicParentChain { member: 7 }]);
	}

	#[test]
	fn cycles_away_from_any_head_are_still_reported() {
		let registry = vec![FamilyGroup::new(-1, 1, "root")];
		let members = vec![member(1, None), member(2, Some(3)), member(3, Some(2)), member(4, Some(4))];

		let issues = GroupHydrator::new(&registry).validate(&members);

		assert_eq!(
			issues,
			vec![
				HydrateIssue::CyclicParentChain { member: 2 },
				HydrateIssue::CyclicParentChain { member: 4 },
			]
		);
	}

	#[test]
	fn duplicate_keys_are_reported() {
		let registry = vec![FamilyGroup::new(-1, 1, "root")];
		let members = vec![member(1, None), member(2, Some(1)), member(2, Some(1))];

		let issues = GroupHydrator::new(&registry).validate(&members);

		assert_eq!(issues, vec![HydrateIssue::DuplicateMemberKey { key: 2 }]);
	}

	#[test]
	fn state_does_not_leak_between_calls() {
		let registry = vec![FamilyGroup::new(-1, 7, "Family of 7")];
		let hydrator = GroupHydrator::new(&registry);

		let before = hydrator.hydrate(&[member(7, None), member(8, Some(7))]);
		let after = hydrator.hydrate(&[member(7, None), member(8, None)]);

		assert_eq!(groups_of(&before), vec![(7, Some(-1)), (8, Some(-1))]);
		assert_eq!(groups_of(&after), vec![(7, Some(-1)), (8, None)]);
	}

	#[test]
	fn zero_is_an_ordinary_key() {
		let registry = vec![FamilyGroup::new(-1, 0, "zero")];
		let members = vec![member(0, None), member(1, Some(0))];

		let nodes = GroupHydrator::new(&registry).hydrate(&members);

		assert_eq!(groups_of(&nodes), vec![(0, Some(-1)), (1, Some(-1))]);
	}

	#[test]
	fn strict_hydration_collects_every_issue() {
		let registry = vec![FamilyGroup::new(-1, 42, "ghosts")];
		let members = vec![member(1, Some(99))];

		let err = GroupHydrator::new(&registry).try_hydrate(&members).unwrap_err();

		assert_eq!(
			err.issues,
			vec![
				HydrateIssue::DanglingParent { member: 1, parent: 99 },
				HydrateIssue::UnknownHead { group: -1, head: 42 },
			]
		);
		assert_eq!(err.to_string(), "invalid family data (2 issue(s))");
	}

	#[test]
	fn royal_family_partitions_cleanly() {
		let hydrator = GroupHydrator::royal();
		let members = royal_family();

		let nodes = hydrator.try_hydrate(&members).unwrap();
		let by_key: HashMap<MemberKey, Option<GroupKey>> = groups_of(&nodes).into_iter().collect();

		assert_eq!(by_key[&1], None);
		assert_eq!(by_key[&3], None);
		assert_eq!(by_key[&7], Some(-1));
		assert_eq!(by_key[&16], Some(-1));
		assert_eq!(by_key[&26], Some(-1));
		assert_eq!(by_key[&34], Some(-2));
		assert_eq!(by_key[&40], Some(-4));
		assert_eq!(by_key[&11], Some(-5));
		assert_eq!(by_key[&50], Some(-9));
		assert_eq!(nodes.iter().filter(|n| n.is_group()).count(), 9);
	}
}
