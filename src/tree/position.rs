use super::Tree;
use crate::error::{DepmindError, Result};

/// Relative order of two same-level nodes in the drawn tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalOrder {
    /// The first node's branch comes before the second's.
    Above,
    Below,
}

impl VerticalOrder {
    pub fn sign(self) -> i32 {
        match self {
            Self::Above => 1,
            Self::Below => -1,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }
}

impl Tree {
    /// Ids from the root down to `id`, both ends included.
    pub fn path_to(&self, id: &str) -> Option<Vec<&str>> {
        self.slot_path(id).map(|path| {
            path.into_iter()
                .map(|slot| self.slot_id(slot))
                .collect()
        })
    }

    /// Compares where `first` and `second` sit among the children of their
    /// lowest common ancestor.
    ///
    /// Returns `Ok(None)` when either id is absent, and
    /// [`DepmindError::LevelMismatch`] when they sit at different depths. A
    /// node compared with itself is `Below`.
    pub fn compare_vertical_position(
        &self,
        first: &str,
        second: &str,
    ) -> Result<Option<VerticalOrder>> {
        let (Some(first_path), Some(second_path)) = (self.slot_path(first), self.slot_path(second))
        else {
            return Ok(None);
        };
        if first_path.len() != second_path.len() {
            return Err(DepmindError::LevelMismatch {
                first: first.to_string(),
                second: second.to_string(),
            });
        }

        let shared = first_path
            .iter()
            .zip(&second_path)
            .take_while(|(a, b)| a == b)
            .count();
        if shared == first_path.len() {
            return Ok(Some(VerticalOrder::Below));
        }
        // Both paths start at the root, so `shared` is at least 1 here.
        let ancestor = first_path[shared - 1];
        let siblings = self.slot_children(ancestor);
        let first_index = siblings.iter().position(|&slot| slot == first_path[shared]);
        let second_index = siblings.iter().position(|&slot| slot == second_path[shared]);
        let order = match (first_index, second_index) {
            (Some(a), Some(b)) if a < b => VerticalOrder::Above,
            _ => VerticalOrder::Below,
        };
        Ok(Some(order))
    }

    fn slot_path(&self, id: &str) -> Option<Vec<usize>> {
        let mut slot = self.slot_of(id)?;
        let mut path = vec![slot];
        while let Some(parent) = self.slot_parent(slot) {
            path.push(parent);
            slot = parent;
        }
        path.reverse();
        Some(path)
    }
}
