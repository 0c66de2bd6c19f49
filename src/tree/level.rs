use super::Tree;

impl Tree {
    /// Depth of `id` with the root at level 1, or `None` when the id is not
    /// in the tree. Levels are fixed when a slot is created, so this is a
    /// lookup rather than a search.
    pub fn level(&self, id: &str) -> Option<usize> {
        self.slot_of(id).map(|slot| self.slot_level(slot))
    }

    /// Deepest level present.
    pub fn depth(&self) -> usize {
        (0..self.len())
            .map(|slot| self.slot_level(slot))
            .max()
            .unwrap_or(0)
    }
}
