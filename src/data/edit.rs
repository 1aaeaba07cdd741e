//! Edits applied from the toolbar.

use super::types::{FamilyMember, Gender, MemberKey};

/// One past the largest key in use, never below 1.
pub fn next_key(members: &[FamilyMember]) -> MemberKey {
	members.iter().map(|m| m.key).max().map_or(1, |k| (k + 1).max(1))
}

/// Append a new member as a child of `parent`, or as a root when no member
/// is selected. Returns the new key.
pub fn add_member(
	members: &mut Vec<FamilyMember>,
	gender: Gender,
	parent: Option<MemberKey>,
	birth_year: &str,
) -> MemberKey {
	let key = next_key(members);
	let name = match gender {
		Gender::Female => "New girl",
		Gender::Male => "New boy",
	};
	let mut member = FamilyMember::new(key, name, gender, birth_year);
	member.parent = parent.filter(|p| members.iter().any(|m| m.key == *p));
	members.push(member);
	key
}

/// `selected` if that member is still in `members`.
pub fn retain_selection(selected: Option<MemberKey>, members: &[FamilyMember]) -> Option<MemberKey> {
	selected.filter(|key| members.iter().any(|m| m.key == *key))
}
