//! The authoritative thought collection.
//!
//! All mutation goes through the operations below; rendering treats the
//! collection as an immutable snapshot between updates. Operations are
//! synchronous and atomic with respect to the single-threaded event loop.

use mindsweep_types::{Bounds, Category, Point, Thought, ThoughtId};
use rand::Rng;

use crate::hint::classify_hint;

/// Keep new bubbles off the board's left/top edge.
const SPAWN_INSET_X: u16 = 2;
const SPAWN_INSET_Y: u16 = 1;
/// Room reserved on the right/bottom so a full-width bubble stays on screen.
const SPAWN_MARGIN_RIGHT: u16 = 30;
const SPAWN_MARGIN_BOTTOM: u16 = 4;

#[derive(Debug, Default)]
pub struct ThoughtStore {
    /// Insertion order preserved for stable rendering.
    thoughts: Vec<Thought>,
    ritual_active: bool,
    next_id: u64,
}

impl ThoughtStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn thoughts(&self) -> &[Thought] {
        &self.thoughts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ThoughtId) -> Option<&Thought> {
        self.thoughts.iter().find(|thought| thought.id == id)
    }

    #[must_use]
    pub fn count_in(&self, category: Category) -> usize {
        self.thoughts
            .iter()
            .filter(|thought| thought.category == category)
            .count()
    }

    #[must_use]
    pub fn ritual_active(&self) -> bool {
        self.ritual_active
    }

    pub fn set_ritual_active(&mut self, active: bool) {
        self.ritual_active = active;
    }

    /// Append a batch of thoughts. Each text is trimmed, classified for a
    /// hint, given a fresh id, and placed randomly within `board` (inset so
    /// the bubble is never created off-screen). Empty texts are skipped.
    ///
    /// Returns the number of thoughts actually added.
    pub fn add_thoughts<I, S>(&mut self, texts: I, board: Bounds) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for text in texts {
            let text = text.as_ref().trim();
            if text.is_empty() {
                continue;
            }

            let id = ThoughtId::new(self.next_id);
            self.next_id += 1;

            let hint = classify_hint(text);
            let position = spawn_position(board);
            self.thoughts
                .push(Thought::new(id, text.to_string(), hint, position));
            added += 1;
        }
        added
    }

    /// No-op if `id` is absent.
    pub fn update_category(&mut self, id: ThoughtId, category: Category) {
        if let Some(thought) = self.thoughts.iter_mut().find(|thought| thought.id == id) {
            thought.category = category;
        }
    }

    /// No-op if `id` is absent.
    pub fn update_position(&mut self, id: ThoughtId, position: Point) {
        if let Some(thought) = self.thoughts.iter_mut().find(|thought| thought.id == id) {
            thought.position = position;
        }
    }

    /// No-op if `id` is absent.
    pub fn remove(&mut self, id: ThoughtId) {
        self.thoughts.retain(|thought| thought.id != id);
    }

    /// Empty the collection and force the ritual flag off.
    pub fn clear_all(&mut self) {
        self.thoughts.clear();
        self.ritual_active = false;
    }
}

fn spawn_position(board: Bounds) -> Point {
    let mut rng = rand::rng();

    let min_x = board.x.saturating_add(SPAWN_INSET_X);
    let max_x = board.right().saturating_sub(SPAWN_MARGIN_RIGHT).max(min_x);
    let min_y = board.y.saturating_add(SPAWN_INSET_Y);
    let max_y = board.bottom().saturating_sub(SPAWN_MARGIN_BOTTOM).max(min_y);

    Point::new(
        rng.random_range(min_x..=max_x),
        rng.random_range(min_y..=max_y),
    )
}

#[cfg(test)]
mod tests {
    use super::ThoughtStore;
    use mindsweep_types::{Bounds, Category, Point, ThoughtId};

    const BOARD: Bounds = Bounds::new(0, 3, 120, 40);

    #[test]
    fn batch_add_assigns_distinct_ids_and_in_bounds_positions() {
        let mut store = ThoughtStore::new();
        let added = store.add_thoughts(["call mom", "buy milk", "breathe"], BOARD);
        assert_eq!(added, 3);

        let thoughts = store.thoughts();
        assert_eq!(thoughts.len(), 3);

        for pair in thoughts.windows(2) {
            assert_ne!(pair[0].id, pair[1].id);
        }
        for thought in thoughts {
            assert_eq!(thought.category, Category::Unassigned);
            assert!(BOARD.contains(thought.position));
        }
    }

    #[test]
    fn add_trims_and_skips_empty_texts() {
        let mut store = ThoughtStore::new();
        let added = store.add_thoughts(["  call mom  ", "   ", ""], BOARD);
        assert_eq!(added, 1);
        assert_eq!(store.thoughts()[0].text, "call mom");
    }

    #[test]
    fn add_survives_a_degenerate_board() {
        let mut store = ThoughtStore::new();
        store.add_thoughts(["call mom"], Bounds::new(0, 0, 1, 1));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_category_touches_only_the_target() {
        let mut store = ThoughtStore::new();
        store.add_thoughts(["one one", "two two"], BOARD);
        let first = store.thoughts()[0].id;

        store.update_category(first, Category::Keep);
        assert_eq!(store.thoughts()[0].category, Category::Keep);
        assert_eq!(store.thoughts()[1].category, Category::Unassigned);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = ThoughtStore::new();
        store.add_thoughts(["call mom"], BOARD);

        let ghost = ThoughtId::new(999);
        store.update_category(ghost, Category::Keep);
        store.update_position(ghost, Point::new(1, 1));
        store.remove(ghost);

        assert_eq!(store.len(), 1);
        assert_eq!(store.thoughts()[0].category, Category::Unassigned);
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut store = ThoughtStore::new();
        store.add_thoughts(["one one", "two two"], BOARD);
        let first = store.thoughts()[0].id;

        store.remove(first);
        assert_eq!(store.len(), 1);
        assert!(store.get(first).is_none());
    }

    #[test]
    fn clear_all_empties_any_size_and_resets_flag() {
        for count in [0usize, 1, 7] {
            let mut store = ThoughtStore::new();
            store.add_thoughts(vec!["a thought"; count], BOARD);
            store.set_ritual_active(count % 2 == 0);

            store.clear_all();
            assert!(store.is_empty());
            assert!(!store.ritual_active());
        }
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut store = ThoughtStore::new();
        store.add_thoughts(["one one"], BOARD);
        let first = store.thoughts()[0].id;
        store.remove(first);

        store.add_thoughts(["two two"], BOARD);
        assert_ne!(store.thoughts()[0].id, first);
    }

    #[test]
    fn count_in_tracks_categories() {
        let mut store = ThoughtStore::new();
        store.add_thoughts(["one one", "two two", "three three"], BOARD);
        let ids: Vec<_> = store.thoughts().iter().map(|t| t.id).collect();

        store.update_category(ids[0], Category::Keep);
        store.update_category(ids[1], Category::LetGo);

        assert_eq!(store.count_in(Category::Keep), 1);
        assert_eq!(store.count_in(Category::LetGo), 1);
        assert_eq!(store.count_in(Category::Unassigned), 1);
    }
}
