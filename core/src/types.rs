/// Single coordinate axis used for board rows and columns.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

/// Flat, row-major position of a tile on the board.
pub type TileIndex = usize;

/// Points accumulated over a game.
pub type Score = u32;

/// Board dimensions, `(rows, columns)`.
pub const BOARD_SIZE: Coord2 = (4, 4);

/// Number of tiles on the board.
pub const TILE_COUNT: usize = BOARD_SIZE.0 as usize * BOARD_SIZE.1 as usize;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Converts a flat index into coordinates on a board of the given size.
pub const fn index_to_coords(index: TileIndex, size: Coord2) -> Coord2 {
    let cols = size.1 as TileIndex;
    ((index / cols) as Coord, (index % cols) as Coord)
}

/// Converts coordinates into a flat index on a board of the given size.
pub const fn coords_to_index(coords: Coord2, size: Coord2) -> TileIndex {
    coords.0 as TileIndex * size.1 as TileIndex + coords.1 as TileIndex
}

// up, down, left, right
const DISPLACEMENTS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(dr.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(dc.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the orthogonal neighbours of a tile: 2 at corners, 3 on edges, 4 inside.
#[derive(Debug, Clone)]
pub struct AdjacentIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl AdjacentIter {
    pub fn new(center: TileIndex, bounds: Coord2) -> Self {
        Self {
            center: index_to_coords(center, bounds),
            bounds,
            index: 0,
        }
    }
}

impl Iterator for AdjacentIter {
    type Item = TileIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if let Some(coords) = next_item {
                return Some(coords_to_index(coords, self.bounds));
            }
        }
    }
}

/// Orthogonally adjacent indices of `index` on the standard board.
pub fn adjacent_indices(index: TileIndex) -> AdjacentIter {
    AdjacentIter::new(index, BOARD_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn index_and_coords_follow_row_major_layout() {
        assert_eq!(index_to_coords(0, BOARD_SIZE), (0, 0));
        assert_eq!(index_to_coords(6, BOARD_SIZE), (1, 2));
        assert_eq!(index_to_coords(15, BOARD_SIZE), (3, 3));
        assert_eq!(coords_to_index((2, 1), BOARD_SIZE), 9);
    }

    #[test]
    fn adjacency_is_bounded_by_grid_edges() {
        assert_eq!(adjacent_indices(0).collect::<Vec<_>>(), [4, 1]);
        assert_eq!(adjacent_indices(3).collect::<Vec<_>>(), [7, 2]);
        assert_eq!(adjacent_indices(13).collect::<Vec<_>>(), [9, 12, 14]);
        assert_eq!(adjacent_indices(5).collect::<Vec<_>>(), [1, 9, 4, 6]);
    }

    #[test]
    fn neighbour_counts_by_position() {
        let counts: Vec<usize> = (0..TILE_COUNT).map(|i| adjacent_indices(i).count()).collect();
        assert_eq!(
            counts,
            [2, 3, 3, 2, 3, 4, 4, 3, 3, 4, 4, 3, 2, 3, 3, 2]
        );
    }
}
