//! The fixed registry of royal sub-families shown as chart groups.

use std::sync::LazyLock;

use super::types::FamilyGroup;

static ROYAL_FAMILY_GROUPS: LazyLock<Vec<FamilyGroup>> = LazyLock::new(|| {
	vec![
		FamilyGroup::new(-1, 7, "Family of Elizabeth II"),
		FamilyGroup::new(-2, 8, "Family of Princess Margaret"),
		FamilyGroup::new(-3, 9, "Family of George Lascelles"),
		FamilyGroup::new(-4, 10, "Family of Gerald Lascelles"),
		FamilyGroup::new(-5, 11, "Family of Prince William of Gloucester"),
		FamilyGroup::new(-6, 12, "Family of Prince Richard"),
		FamilyGroup::new(-7, 13, "Family of Prince Edward"),
		FamilyGroup::new(-8, 14, "Family of Princess Alexandra"),
		FamilyGroup::new(-9, 15, "Family of Prince Michael of Kent"),
	]
});

/// Registry order is also the traversal order during hydration.
pub fn royal_family_groups() -> &'static [FamilyGroup] {
	&ROYAL_FAMILY_GROUPS
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn group_keys_are_negative_and_distinct() {
		let groups = royal_family_groups();
		let keys: HashSet<_> = groups.iter().map(|g| g.key).collect();
		assert_eq!(keys.len(), groups.len());
		assert!(groups.iter().all(|g| g.key < 0 && g.is_group));
	}

	#[test]
	fn heads_are_distinct() {
		let heads: HashSet<_> = royal_family_groups().iter().map(|g| g.head_of_family).collect();
		assert_eq!(heads.len(), royal_family_groups().len());
	}
}
