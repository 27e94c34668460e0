//! Hierarchical review cursor.
//!
//! Walks a two-level collection (outer items, each owning an ordered list of
//! inner items) one inner item at a time. Traversal crosses outer-item
//! boundaries in both directions and stops silently at either end.
//!
//! Traversal position and mastery are tracked independently: `progress()`
//! reports how far the cursor has moved, while the mastered set records what
//! the user asserted they know.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use crate::error::CollectionError;
use crate::types::{InnerItem, ItemKey, OuterItem};

/// Cursor position, 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub outer: usize,
    pub inner: usize,
}

impl Position {
    pub fn new(outer: usize, inner: usize) -> Self {
        Self { outer, inner }
    }
}

/// Position-based traversal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.total)
    }
}

/// Cursor over a non-empty two-level collection.
#[derive(Debug, Clone)]
pub struct ReviewCursor {
    items: Vec<OuterItem>,
    /// `offsets[i]` is the number of inner items before outer item `i`.
    offsets: Vec<usize>,
    total: usize,
    position: Position,
    mastered: HashSet<ItemKey>,
}

impl ReviewCursor {
    /// Build a cursor at `(0, 0)` with an empty mastered set.
    pub fn new(items: Vec<OuterItem>) -> Result<Self, CollectionError> {
        validate(&items)?;

        let mut offsets = Vec::with_capacity(items.len());
        let mut total = 0;
        for item in &items {
            offsets.push(total);
            total += item.inner.len();
        }

        Ok(Self {
            items,
            offsets,
            total,
            position: Position::default(),
            mastered: HashSet::new(),
        })
    }

    /// Replace the collection, resetting position and mastered set.
    ///
    /// On error the cursor is left untouched.
    pub fn reset(&mut self, items: Vec<OuterItem>) -> Result<(), CollectionError> {
        *self = Self::new(items)?;
        Ok(())
    }

    pub fn items(&self) -> &[OuterItem] {
        &self.items
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Outer and inner item under the cursor.
    pub fn current(&self) -> (&OuterItem, &InnerItem) {
        let outer = &self.items[self.position.outer];
        (outer, &outer.inner[self.position.inner])
    }

    pub fn current_key(&self) -> ItemKey {
        let (outer, inner) = self.current();
        ItemKey::new(outer, inner)
    }

    pub fn has_next(&self) -> bool {
        self.flat_index() + 1 < self.total
    }

    pub fn has_previous(&self) -> bool {
        self.flat_index() > 0
    }

    /// Advance one inner item. Returns `false` at the last item.
    pub fn next(&mut self) -> bool {
        let Position { outer, inner } = self.position;
        if inner + 1 < self.items[outer].inner.len() {
            self.position.inner += 1;
        } else if outer + 1 < self.items.len() {
            self.position = Position::new(outer + 1, 0);
        } else {
            return false;
        }
        true
    }

    /// Step back one inner item. Returns `false` at `(0, 0)`.
    pub fn previous(&mut self) -> bool {
        let Position { outer, inner } = self.position;
        if inner > 0 {
            self.position.inner -= 1;
        } else if outer > 0 {
            let last = self.items[outer - 1].inner.len() - 1;
            self.position = Position::new(outer - 1, last);
        } else {
            return false;
        }
        true
    }

    /// Flip mastery of the current item. Returns the new membership.
    pub fn toggle_mastered(&mut self) -> bool {
        let key = self.current_key();
        if self.mastered.remove(&key) {
            false
        } else {
            self.mastered.insert(key);
            true
        }
    }

    pub fn is_mastered(&self) -> bool {
        self.mastered.contains(&self.current_key())
    }

    pub fn is_key_mastered(&self, key: &ItemKey) -> bool {
        self.mastered.contains(key)
    }

    pub fn mastered_count(&self) -> usize {
        self.mastered.len()
    }

    /// Items up to and including the cursor, out of all inner items.
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.flat_index() + 1,
            total: self.total,
        }
    }

    /// Index of the cursor in the flattened collection.
    pub fn flat_index(&self) -> usize {
        self.offsets[self.position.outer] + self.position.inner
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Flat indices shown by the pager dots around the cursor.
    pub fn dot_window(&self, before: usize, after: usize) -> Range<usize> {
        let index = self.flat_index();
        let start = index.saturating_sub(before);
        let end = (index + after + 1).min(self.total);
        start..end
    }
}

fn validate(items: &[OuterItem]) -> Result<(), CollectionError> {
    if items.is_empty() {
        return Err(CollectionError::Empty);
    }
    if let Some(item) = items.iter().find(|item| item.inner.is_empty()) {
        return Err(CollectionError::EmptyItem {
            id: item.id.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inner(id: &str) -> InnerItem {
        InnerItem {
            id: id.to_string(),
            remote_id: None,
            text: format!("text {}", id),
            transliteration: String::new(),
            translation: String::new(),
            keyword: None,
            keyword_transliteration: None,
        }
    }

    fn outer(id: &str, inner_ids: &[&str]) -> OuterItem {
        OuterItem {
            id: id.to_string(),
            remote_id: None,
            word: id.to_string(),
            transliteration: String::new(),
            meaning: String::new(),
            inner: inner_ids.iter().map(|i| inner(i)).collect(),
        }
    }

    fn scenario() -> Vec<OuterItem> {
        vec![outer("A", &["a1", "a2"]), outer("B", &["b1"])]
    }

    fn shapes() -> Vec<Vec<OuterItem>> {
        vec![
            vec![outer("A", &["a1"])],
            scenario(),
            vec![outer("A", &["1", "2", "3"]), outer("B", &["1"]), outer("C", &["1", "2"])],
            vec![outer("A", &["1"]), outer("B", &["1"]), outer("C", &["1"]), outer("D", &["1"])],
        ]
    }

    #[test]
    fn scenario_walkthrough() {
        let mut cursor = ReviewCursor::new(scenario()).unwrap();
        assert_eq!(cursor.position(), Position::new(0, 0));
        assert_eq!(cursor.progress(), Progress { completed: 1, total: 3 });

        assert!(cursor.next());
        assert_eq!(cursor.position(), Position::new(0, 1));
        assert_eq!(cursor.progress(), Progress { completed: 2, total: 3 });

        assert!(cursor.next());
        assert_eq!(cursor.position(), Position::new(1, 0));
        assert_eq!(cursor.progress(), Progress { completed: 3, total: 3 });
        assert!(!cursor.has_next());

        assert!(cursor.previous());
        assert_eq!(cursor.position(), Position::new(0, 1));
    }

    #[test]
    fn current_returns_outer_and_inner() {
        let mut cursor = ReviewCursor::new(scenario()).unwrap();
        cursor.next();
        let (o, i) = cursor.current();
        assert_eq!(o.id, "A");
        assert_eq!(i.id, "a2");
    }

    #[test]
    fn next_reaches_terminal_after_total_minus_one_steps() {
        for items in shapes() {
            let mut cursor = ReviewCursor::new(items).unwrap();
            let total = cursor.total();
            for _ in 0..total - 1 {
                assert!(cursor.next());
            }
            assert!(!cursor.has_next());
            let before = cursor.position();
            assert!(!cursor.next());
            assert_eq!(cursor.position(), before);
            assert_eq!(cursor.progress(), Progress { completed: total, total });
        }
    }

    #[test]
    fn previous_is_noop_at_start() {
        let mut cursor = ReviewCursor::new(scenario()).unwrap();
        assert!(!cursor.has_previous());
        assert!(!cursor.previous());
        assert_eq!(cursor.position(), Position::new(0, 0));
    }

    #[test]
    fn previous_lands_on_last_inner_of_previous_outer() {
        let items = vec![outer("A", &["1", "2", "3"]), outer("B", &["1"])];
        let mut cursor = ReviewCursor::new(items).unwrap();
        for _ in 0..3 {
            cursor.next();
        }
        assert_eq!(cursor.position(), Position::new(1, 0));
        cursor.previous();
        assert_eq!(cursor.position(), Position::new(0, 2));
    }

    #[test]
    fn next_then_previous_restores_interior_position() {
        for items in shapes() {
            let mut cursor = ReviewCursor::new(items).unwrap();
            let total = cursor.total();
            for step in 1..total.saturating_sub(1) {
                cursor.reset(cursor.items().to_vec()).unwrap();
                for _ in 0..step {
                    cursor.next();
                }
                let before = cursor.position();
                cursor.next();
                cursor.previous();
                assert_eq!(cursor.position(), before);
            }
        }
    }

    #[test]
    fn progress_is_monotonic() {
        for items in shapes() {
            let mut cursor = ReviewCursor::new(items).unwrap();
            let mut last = cursor.progress().completed;
            while cursor.next() {
                let now = cursor.progress().completed;
                assert!(now >= last);
                assert_eq!(cursor.progress().is_complete(), !cursor.has_next());
                last = now;
            }
            while cursor.previous() {
                let now = cursor.progress().completed;
                assert!(now <= last);
                assert!(!cursor.progress().is_complete());
                last = now;
            }
        }
    }

    #[test]
    fn single_item_collection() {
        let cursor = ReviewCursor::new(vec![outer("A", &["a1"])]).unwrap();
        assert!(!cursor.has_next());
        assert!(!cursor.has_previous());
        assert_eq!(cursor.progress(), Progress { completed: 1, total: 1 });
    }

    #[test]
    fn toggle_mastered_twice_restores_membership() {
        let mut cursor = ReviewCursor::new(scenario()).unwrap();
        assert!(!cursor.is_mastered());
        assert!(cursor.toggle_mastered());
        assert!(cursor.is_mastered());
        assert!(!cursor.toggle_mastered());
        assert!(!cursor.is_mastered());
        assert_eq!(cursor.mastered_count(), 0);
    }

    #[test]
    fn mastered_is_scoped_by_outer_item() {
        let items = vec![outer("A", &["1"]), outer("B", &["1"])];
        let mut cursor = ReviewCursor::new(items).unwrap();
        cursor.toggle_mastered();
        cursor.next();
        assert!(!cursor.is_mastered());
        assert!(cursor.is_key_mastered(&ItemKey {
            outer: "A".to_string(),
            inner: "1".to_string(),
        }));
    }

    #[test]
    fn mastered_does_not_affect_progress() {
        let mut cursor = ReviewCursor::new(scenario()).unwrap();
        cursor.toggle_mastered();
        assert_eq!(cursor.progress().completed, 1);
    }

    #[test]
    fn reset_clears_position_and_mastered() {
        let mut cursor = ReviewCursor::new(scenario()).unwrap();
        cursor.next();
        cursor.toggle_mastered();
        cursor
            .reset(vec![outer("X", &["x1", "x2"]), outer("Y", &["y1"])])
            .unwrap();
        assert_eq!(cursor.position(), Position::new(0, 0));
        assert_eq!(cursor.mastered_count(), 0);
        assert_eq!(cursor.current().0.id, "X");
    }

    #[test]
    fn reset_with_invalid_collection_keeps_state() {
        let mut cursor = ReviewCursor::new(scenario()).unwrap();
        cursor.next();
        assert_eq!(cursor.reset(vec![]), Err(CollectionError::Empty));
        assert_eq!(cursor.position(), Position::new(0, 1));
    }

    #[test]
    fn reject_empty_collection() {
        assert!(matches!(ReviewCursor::new(vec![]), Err(CollectionError::Empty)));
    }

    #[test]
    fn reject_outer_item_without_inner() {
        let result = ReviewCursor::new(vec![outer("A", &["a1"]), outer("B", &[])]);
        assert!(matches!(result, Err(CollectionError::EmptyItem { id }) if id == "B"));
    }

    #[test]
    fn dot_window_clamps_to_bounds() {
        let items = vec![outer("A", &["1", "2", "3", "4", "5"])];
        let mut cursor = ReviewCursor::new(items).unwrap();
        assert_eq!(cursor.dot_window(1, 2), 0..3);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.dot_window(1, 2), 1..5);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.dot_window(1, 2), 3..5);
    }

    #[test]
    fn progress_displays_as_fraction_label() {
        let cursor = ReviewCursor::new(scenario()).unwrap();
        assert_eq!(cursor.progress().to_string(), "1/3");
    }
}
