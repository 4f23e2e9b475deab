use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many cards of each category a full deck holds.
pub const COPIES_PER_CATEGORY: u8 = 4;

/// The 4×4 grid of cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<Tile>", into = "Array2<Tile>")]
pub struct Board {
    tiles: Array2<Tile>,
}

impl Board {
    /// Full deck in category order, before shuffling.
    pub fn full_deck() -> Vec<Tile> {
        Category::ALL
            .iter()
            .flat_map(|&category| {
                (0..COPIES_PER_CATEGORY).map(move |ordinal| Tile::new(category, ordinal))
            })
            .collect()
    }

    /// Deals the full deck in a uniformly random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::full_deck();
        deck.shuffle(rng);
        log::debug!("dealt a new board");
        Self::from_deck(&deck)
    }

    /// Builds a board from an explicit row-major layout. Ordinals are assigned per category in
    /// reading order.
    pub fn from_categories(categories: &[Category]) -> Result<Self> {
        if categories.len() != TILE_COUNT {
            return Err(GameError::InvalidBoardShape);
        }

        let mut ordinals = [0u8; Category::ALL.len()];
        let deck: Vec<Tile> = categories
            .iter()
            .map(|&category| {
                let ordinal = &mut ordinals[category as usize];
                let tile = Tile::new(category, *ordinal);
                *ordinal = ordinal.saturating_add(1);
                tile
            })
            .collect();

        Ok(Self::from_deck(&deck))
    }

    /// Marks the given tiles as already cleared, for setting up positions mid-game.
    pub fn with_removed(mut self, indices: &[TileIndex]) -> Result<Self> {
        for &index in indices {
            let index = self.validate_index(index)?;
            self.tile_mut(index).set_removed();
        }
        Ok(self)
    }

    fn from_deck(deck: &[Tile]) -> Self {
        let (_, cols) = BOARD_SIZE;
        let tiles = Array2::from_shape_fn(BOARD_SIZE.to_nd_index(), |(row, col)| {
            deck[row * usize::from(cols) + col]
        });
        Self { tiles }
    }

    pub fn size(&self) -> Coord2 {
        BOARD_SIZE
    }

    pub fn validate_index(&self, index: TileIndex) -> Result<TileIndex> {
        if index < self.tiles.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn get(&self, index: TileIndex) -> Option<&Tile> {
        self.validate_index(index).ok().map(|index| &self[index])
    }

    /// Tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn remaining_count(&self) -> usize {
        self.iter().filter(|tile| !tile.is_removed()).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.iter().filter(|tile| tile.is_revealed()).count()
    }

    pub fn count_of(&self, category: Category) -> usize {
        self.iter()
            .filter(|tile| tile.category() == category)
            .count()
    }

    pub fn adjacent_indices(&self, index: TileIndex) -> AdjacentIter {
        AdjacentIter::new(index, self.size())
    }

    pub(crate) fn tile_mut(&mut self, index: TileIndex) -> &mut Tile {
        let coords = index_to_coords(index, self.size());
        &mut self.tiles[coords.to_nd_index()]
    }

    /// Exchanges the contents of two cells, flags included.
    pub(crate) fn swap(&mut self, a: TileIndex, b: TileIndex) {
        let size = self.size();
        self.tiles.swap(
            index_to_coords(a, size).to_nd_index(),
            index_to_coords(b, size).to_nd_index(),
        );
    }

    pub(crate) fn conceal_all(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.set_revealed(false);
        }
    }
}

impl TryFrom<Array2<Tile>> for Board {
    type Error = GameError;

    fn try_from(tiles: Array2<Tile>) -> Result<Self> {
        let [rows, cols] = BOARD_SIZE.to_nd_index();
        if tiles.dim() != (rows, cols) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { tiles })
    }
}

impl From<Board> for Array2<Tile> {
    fn from(board: Board) -> Self {
        board.tiles
    }
}

impl Index<TileIndex> for Board {
    type Output = Tile;

    fn index(&self, index: TileIndex) -> &Self::Output {
        &self.tiles[index_to_coords(index, self.size()).to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn shuffled_board_keeps_four_of_each_category() {
        for seed in 0..32 {
            let board = Board::shuffled(&mut SmallRng::seed_from_u64(seed));
            for category in Category::ALL {
                assert_eq!(board.count_of(category), 4, "seed {seed}, {category:?}");
            }
            assert_eq!(board.remaining_count(), TILE_COUNT);
            assert_eq!(board.revealed_count(), 0);
        }
    }

    #[test]
    fn shuffling_only_permutes_the_deck() {
        let board = Board::shuffled(&mut SmallRng::seed_from_u64(11));
        let mut dealt: Vec<TileId> = board.iter().map(Tile::id).collect();
        let mut deck: Vec<TileId> = Board::full_deck().iter().map(Tile::id).collect();
        dealt.sort_by_key(|id| id.to_string());
        deck.sort_by_key(|id| id.to_string());
        assert_eq!(dealt, deck);
    }

    #[test]
    fn different_seeds_deal_different_layouts() {
        let layouts: Vec<Vec<Category>> = (0..8)
            .map(|seed| {
                Board::shuffled(&mut SmallRng::seed_from_u64(seed))
                    .iter()
                    .map(Tile::category)
                    .collect()
            })
            .collect();
        assert!(layouts.iter().any(|layout| *layout != layouts[0]));
    }

    #[test]
    fn layout_must_cover_the_whole_board() {
        let short = [Category::Sun; 15];
        assert_eq!(
            Board::from_categories(&short),
            Err(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn layout_is_read_row_major() {
        let mut layout = [Category::Water; TILE_COUNT];
        layout[6] = Category::Grasshopper;
        let board = Board::from_categories(&layout).unwrap();

        assert_eq!(board[6].category(), Category::Grasshopper);
        assert_eq!(board.tiles[[1, 2]].category(), Category::Grasshopper);
        assert_eq!(board[7].id().to_string(), "water-6");
    }

    #[test]
    fn removed_tiles_are_not_counted() {
        let board = Board::from_categories(&[Category::Sun; TILE_COUNT])
            .unwrap()
            .with_removed(&[0, 5, 15])
            .unwrap();
        assert_eq!(board.remaining_count(), 13);
        assert!(board[5].is_removed());
        assert_eq!(
            Board::from_categories(&[Category::Sun; TILE_COUNT])
                .unwrap()
                .with_removed(&[16]),
            Err(GameError::InvalidIndex)
        );
    }

    #[test]
    fn deserializing_checks_the_grid_shape() {
        let board = Board::shuffled(&mut SmallRng::seed_from_u64(3));
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let tiles: Vec<Tile> = board.iter().copied().collect();
        let wide = Array2::from_shape_vec((2, 8), tiles).unwrap();
        let json = serde_json::to_string(&wide).unwrap();
        let err = serde_json::from_str::<Board>(&json).unwrap_err();
        assert!(err.to_string().contains("does not match the board size"));
    }

    #[test]
    fn swap_moves_tile_contents() {
        let mut layout = [Category::Sun; TILE_COUNT];
        layout[3] = Category::Grasshopper;
        let mut board = Board::from_categories(&layout).unwrap();
        board.tile_mut(3).set_revealed(true);

        board.swap(3, 7);

        assert_eq!(board[7].category(), Category::Grasshopper);
        assert!(board[7].is_revealed());
        assert_eq!(board[3].category(), Category::Sun);
        assert!(!board[3].is_revealed());
    }
}
