//! Snapshot undo/redo for chart edits.

use std::collections::VecDeque;

/// Undo/redo over whole snapshots of the edited value.
#[derive(Clone, Debug, PartialEq)]
pub struct History<T> {
	undo: VecDeque<T>,
	redo: Vec<T>,
	limit: usize,
}

impl<T: Clone> History<T> {
	/// Keeps at most `limit` undo steps (at least one).
	pub fn new(limit: usize) -> Self {
		Self {
			undo: VecDeque::new(),
			redo: Vec::new(),
			limit: limit.max(1),
		}
	}

	/// Remember `previous` before it gets replaced. Clears the redo stack.
	pub fn record(&mut self, previous: T) {
		if self.undo.len() == self.limit {
			self.undo.pop_front();
		}
		self.undo.push_back(previous);
		self.redo.clear();
	}

	/// Swap `current` for the last recorded state.
	pub fn undo(&mut self, current: T) -> Option<T> {
		let previous = self.undo.pop_back()?;
		self.redo.push(current);
		Some(previous)
	}

	/// Swap `current` for the last undone state.
	pub fn redo(&mut self, current: T) -> Option<T> {
		let next = self.redo.pop()?;
		self.undo.push_back(current);
		Some(next)
	}

	/// Something to undo.
	pub fn can_undo(&self) -> bool {
		!self.undo.is_empty()
	}

	/// Something to redo.
	pub fn can_redo(&self) -> bool {
		!self.redo.is_empty()
	}

	/// Forget both stacks.
	pub fn clear(&mut self) {
		self.undo.clear();
		self.redo.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn undo_then_redo_walks_back_and_forth() {
		let mut history = History::new(10);
		history.record(1);
		history.record(2);

		assert_eq!(history.undo(3), Some(2));
		assert_eq!(history.undo(2), Some(1));
		assert_eq!(history.undo(1), None);
		assert_eq!(history.redo(1), Some(2));
		assert_eq!(history.redo(2), Some(3));
		assert!(!history.can_redo());
	}

	#[test]
	fn new_edit_discards_redo() {
		let mut history = History::new(10);
		history.record("a");
		assert_eq!(history.undo("b"), Some("a"));
		assert!(history.can_redo());

		history.record("a");
		assert!(!history.can_redo());
	}

	#[test]
	fn oldest_snapshot_falls_off_at_the_limit() {
		let mut history = History::new(2);
		history.record(1);
		history.record(2);
		history.record(3);

		assert_eq!(history.undo(4), Some(3));
		assert_eq!(history.undo(3), Some(2));
		assert_eq!(history.undo(2), None);
	}
}
