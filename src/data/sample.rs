//! Initial chart contents: the descendants of George V.

use super::types::{FamilyMember, Gender::*};

/// George V and four generations of descendants, keys 1 to 50.
pub fn royal_family() -> Vec<FamilyMember> {
	vec![
		FamilyMember::new(1, "George V", Male, "1865").with_death_year("1936").with_reign("1910-1936"),
		FamilyMember::new(2, "Edward VIII", Male, "1894")
			.with_parent(1)
			.with_death_year("1972")
			.with_reign("1936"),
		FamilyMember::new(3, "George VI", Male, "1895")
			.with_parent(1)
			.with_death_year("1952")
			.with_reign("1936-1952"),
		FamilyMember::new(4, "Mary, Princess Royal", Female, "1897").with_parent(1).with_death_year("1965"),
		FamilyMember::new(5, "Prince Henry, Duke of Gloucester", Male, "1900").with_parent(1).with_death_year("1974"),
		FamilyMember::new(6, "Prince George, Duke of Kent", Male, "1902").with_parent(1).with_death_year("1942"),
		FamilyMember::new(7, "Elizabeth II", Female, "1926")
			.with_parent(3)
			.with_death_year("2022")
			.with_reign("1952-2022"),
		FamilyMember::new(8, "Princess Margaret", Female, "1930").with_parent(3).with_death_year("2002"),
		FamilyMember::new(9, "George Lascelles", Male, "1923").with_parent(4).with_death_year("2011"),
		FamilyMember::new(10, "Gerald Lascelles", Male, "1924").with_parent(4).with_death_year("1998"),
		FamilyMember::new(11, "Prince William of Gloucester", Male, "1941").with_parent(5).with_death_year("1972"),
		FamilyMember::new(12, "Prince Richard, Duke of Gloucester", Male, "1944").with_parent(5),
		FamilyMember::new(13, "Prince Edward, Duke of Kent", Male, "1935").with_parent(6),
		FamilyMember::new(14, "Princess Alexandra", Female, "1936").with_parent(6),
		FamilyMember::new(15, "Prince Michael of Kent", Male, "1942").with_parent(6),
		FamilyMember::new(16, "Charles III", Male, "1948").with_parent(7).with_reign("2022-"),
		FamilyMember::new(17, "Anne, Princess Royal", Female, "1950").with_parent(7),
		FamilyMember::new(18, "Prince Andrew", Male, "1960").with_parent(7),
		FamilyMember::new(19, "Prince Edward, Duke of Edinburgh", Male, "1964").with_parent(7),
		FamilyMember::new(20, "William, Prince of Wales", Male, "1982").with_parent(16),
		FamilyMember::new(21, "Prince Harry, Duke of Sussex", Male, "1984").with_parent(16),
		FamilyMember::new(22, "Prince George of Wales", Male, "2013").with_parent(20),
		FamilyMember::new(23, "Princess Charlotte of Wales", Female, "2015").with_parent(20),
		FamilyMember::new(24, "Prince Louis of Wales", Male, "2018").with_parent(20),
		FamilyMember::new(25, "Prince Archie of Sussex", Male, "2019").with_parent(21),
		FamilyMember::new(26, "Princess Lilibet of Sussex", Female, "2021").with_parent(21),
		FamilyMember::new(27, "Peter Phillips", Male, "1977").with_parent(17),
		FamilyMember::new(28, "Zara Tindall", Female, "1981").with_parent(17),
		FamilyMember::new(29, "Princess Beatrice", Female, "1988").with_parent(18),
		FamilyMember::new(30, "Princess Eugenie", Female, "1990").with_parent(18),
		FamilyMember::new(31, "Lady Louise Windsor", Female, "2003").with_parent(19),
		FamilyMember::new(32, "James, Earl of Wessex", Male, "2007").with_parent(19),
		FamilyMember::new(33, "David Armstrong-Jones", Male, "1961").with_parent(8),
		FamilyMember::new(34, "Lady Sarah Chatto", Female, "1964").with_parent(8),
		FamilyMember::new(35, "David Lascelles", Male, "1950").with_parent(9),
		FamilyMember::new(36, "James Lascelles", Male, "1953").with_parent(9),
		FamilyMember::new(37, "Jeremy Lascelles", Male, "1955").with_parent(9),
		FamilyMember::new(38, "Mark Lascelles", Male, "1964").with_parent(9),
		FamilyMember::new(39, "Henry Lascelles", Male, "1953").with_parent(10),
		FamilyMember::new(40, "Martin Lascelles", Male, "1962").with_parent(10),
		FamilyMember::new(41, "Alexander Windsor, Earl of Ulster", Male, "1974").with_parent(12),
		FamilyMember::new(42, "Lady Davina Windsor", Female, "1977").with_parent(12),
		FamilyMember::new(43, "Lady Rose Gilman", Female, "1980").with_parent(12),
		FamilyMember::new(44, "George Windsor, Earl of St Andrews", Male, "1962").with_parent(13),
		FamilyMember::new(45, "Lady Helen Taylor", Female, "1964").with_parent(13),
		FamilyMember::new(46, "Lord Nicholas Windsor", Male, "1970").with_parent(13),
		FamilyMember::new(47, "James Ogilvy", Male, "1964").with_parent(14),
		FamilyMember::new(48, "Marina Ogilvy", Female, "1966").with_parent(14),
		FamilyMember::new(49, "Lord Frederick Windsor", Male, "1979").with_parent(15),
		FamilyMember::new(50, "Lady Gabriella Kingston", Female, "1981").with_parent(15),
	]
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::data::groups::royal_family_groups;

	#[test]
	fn keys_are_unique_and_parents_resolve() {
		let members = royal_family();
		let keys: HashSet<_> = members.iter().map(|m| m.key).collect();
		assert_eq!(keys.len(), members.len());
		for member in &members {
			if let Some(parent) = member.parent {
				assert!(keys.contains(&parent), "{} has unknown parent {parent}", member.name);
			}
		}
	}

	#[test]
	fn every_head_of_family_is_present() {
		let keys: HashSet<_> = royal_family().iter().map(|m| m.key).collect();
		for group in royal_family_groups() {
			assert!(keys.contains(&group.head_of_family));
		}
	}
}
