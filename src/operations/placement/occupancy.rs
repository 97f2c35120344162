use std::collections::HashSet;

use crate::model::VoxelCoord;

/// Sparse set of occupied cells built up during one placement run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyIndex {
    cells: HashSet<VoxelCoord>,
    top: Option<i32>,
}

impl OccupancyIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn is_occupied(&self, coord: VoxelCoord) -> bool {
        self.cells.contains(&coord)
    }

    /// Highest occupied `y`, if any.
    #[must_use]
    pub fn top(&self) -> Option<i32> {
        self.top
    }

    /// Returns `true` if any `(x, z)` in `footprint` is occupied at `y`.
    pub fn any_occupied<I>(&self, footprint: I, y: i32) -> bool
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        footprint
            .into_iter()
            .any(|(x, z)| self.cells.contains(&VoxelCoord::new(x, y, z)))
    }

    /// Marks every `(x, z)` in `footprint` occupied at `y`.
    pub(crate) fn occupy<I>(&mut self, footprint: I, y: i32)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let before = self.cells.len();
        self.cells
            .extend(footprint.into_iter().map(|(x, z)| VoxelCoord::new(x, y, z)));
        if self.cells.len() > before {
            self.top = Some(self.top.map_or(y, |top| top.max(y)));
        }
    }

    /// Returns the occupied cells in canonical `(y, z, x)` order.
    #[must_use]
    pub fn sorted_cells(&self) -> Vec<VoxelCoord> {
        let mut cells: Vec<VoxelCoord> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupy_and_query_footprint() {
        let mut index = OccupancyIndex::new();
        index.occupy([(0, 0), (1, 0)], 2);
        assert_eq!(index.len(), 2);
        assert!(index.is_occupied(VoxelCoord::new(1, 2, 0)));
        assert!(index.any_occupied([(5, 5), (1, 0)], 2));
        assert!(!index.any_occupied([(1, 0)], 1));
        assert_eq!(index.top(), Some(2));
    }

    #[test]
    fn sorted_cells_follow_canonical_order() {
        let mut index = OccupancyIndex::new();
        index.occupy([(3, 0)], 1);
        index.occupy([(0, 1), (5, 0)], 0);
        assert_eq!(
            index.sorted_cells(),
            vec![
                VoxelCoord::new(5, 0, 0),
                VoxelCoord::new(0, 0, 1),
                VoxelCoord::new(3, 1, 0),
            ]
        );
    }
}
