//! Initial node placement: a top-down tree, leaves spread left to right and
//! parents centred over their children.
//!
//! Positions are keyed by member key. When keys repeat, only the first
//! member with that key is laid out; the chart skips the others too.

use std::collections::{HashMap, HashSet};

use super::types::ChartMember;
use crate::data::types::MemberKey;

pub fn tree_positions(
	members: &[ChartMember],
	sibling_gap: f64,
	generation_gap: f64,
) -> HashMap<MemberKey, (f64, f64)> {
	let mut keys = HashSet::with_capacity(members.len());
	let members: Vec<&ChartMember> = members.iter().filter(|m| keys.insert(m.key)).collect();
	let mut children: HashMap<MemberKey, Vec<MemberKey>> = HashMap::new();
	for member in &members {
		if let Some(parent) = member.parent.filter(|p| keys.contains(p)) {
			children.entry(parent).or_default().push(member.key);
		}
	}
	let roots: Vec<MemberKey> = members
		.iter()
		.filter(|m| m.parent.is_none_or(|p| !keys.contains(&p)))
		.map(|m| m.key)
		.collect();

	let mut positions = HashMap::with_capacity(members.len());
	let mut visited = HashSet::with_capacity(members.len());
	let mut next_x = 0.0;

	for root in roots {
		// (key, depth, children already placed)
		let mut stack = vec![(root, 0usize, false)];
		while let Some((key, depth, expanded)) = stack.pop() {
			if expanded {
				let xs: Vec<f64> = children
					.get(&key)
					.into_iter()
					.flatten()
					.filter_map(|c| positions.get(c).map(|&(x, _)| x))
					.collect();
				let x = if xs.is_empty() {
					let x = next_x;
					next_x += sibling_gap;
					x
				} else {
					let (lo, hi) = xs
						.iter()
						.fold((f64::MAX, f64::MIN), |(lo, hi), &x| (lo.min(x), hi.max(x)));
					(lo + hi) / 2.0
				};
				positions.insert(key, (x, depth as f64 * generation_gap));
				continue;
			}
			if !visited.insert(key) {
				continue;
			}
			stack.push((key, depth, true));
			if let Some(kids) = children.get(&key) {
				stack.extend(kids.iter().rev().map(|&c| (c, depth + 1, false)));
			}
		}
	}

	// Members on a parent cycle have no root; line them up at the top.
	for member in &members {
		positions.entry(member.key).or_insert_with(|| {
			let x = next_x;
			next_x += sibling_gap;
			(x, 0.0)
		});
	}

	let shift = (next_x - sibling_gap).max(0.0) / 2.0;
	for (x, _) in positions.values_mut() {
		*x -= shift;
	}
	positions
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::types::Gender;

	fn member(key: MemberKey, parent: Option<MemberKey>) -> ChartMember {
		ChartMember {
			key,
			parent,
			name: key.to_string(),
			lifespan: String::new(),
			gender: Gender::Male,
			reigned: false,
			group: None,
		}
	}

	#[test]
	fn parent_is_centred_above_its_children() {
		let members = vec![member(1, None), member(2, Some(1)), member(3, Some(1))];

		let positions = tree_positions(&members, 50.0, 80.0);

		assert_eq!(positions[&2], (-25.0, 80.0));
		assert_eq!(positions[&3], (25.0, 80.0));
		assert_eq!(positions[&1], (0.0, 0.0));
	}

	#[test]
	fn separate_trees_do_not_overlap() {
		let members = vec![member(1, None), member(2, Some(1)), member(3, None)];

		let positions = tree_positions(&members, 10.0, 10.0);

		assert!(positions[&3].0 > positions[&2].0);
		assert_eq!(positions[&1].0, positions[&2].0);
	}

	#[test]
	fn repeated_keys_follow_the_first_member() {
		let members = vec![member(1, None), member(2, Some(1)), member(3, None), member(2, Some(3))];

		let positions = tree_positions(&members, 10.0, 10.0);

		assert_eq!(positions.len(), 3);
		assert_eq!(positions[&2].0, positions[&1].0);
		assert_ne!(positions[&2].0, positions[&3].0);
	}

	#[test]
	fn cyclic_members_still_get_a_place() {
		let members = vec![member(1, Some(2)), member(2, Some(1))];

		let positions = tree_positions(&members, 10.0, 10.0);

		assert_eq!(positions.len(), 2);
		assert_ne!(positions[&1], positions[&2]);
	}
}
