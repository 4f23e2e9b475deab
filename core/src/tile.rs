use core::fmt;
use serde::{Deserialize, Serialize};

/// What is printed on the face of a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Sun,
    Co2,
    Water,
    Grasshopper,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Sun, Self::Co2, Self::Water, Self::Grasshopper];

    /// The three categories that score when combined.
    pub const RESOURCES: [Self; 3] = [Self::Sun, Self::Co2, Self::Water];

    /// Whether revealing this category ends the turn without scoring.
    pub const fn is_disruptor(self) -> bool {
        matches!(self, Self::Grasshopper)
    }

    pub const fn name(self) -> &'static str {
        use Category::*;
        match self {
            Sun => "Sun",
            Co2 => "CO2",
            Water => "Water",
            Grasshopper => "Grasshopper",
        }
    }

    pub const fn emoji(self) -> &'static str {
        use Category::*;
        match self {
            Sun => "☀️",
            Co2 => "💨",
            Water => "💧",
            Grasshopper => "🦗",
        }
    }

    const fn slug(self) -> &'static str {
        use Category::*;
        match self {
            Sun => "sun",
            Co2 => "co2",
            Water => "water",
            Grasshopper => "grasshopper",
        }
    }
}

/// Stable identity of a card, only meaningful for keying rendered elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId {
    category: Category,
    ordinal: u8,
}

impl TileId {
    pub const fn new(category: Category, ordinal: u8) -> Self {
        Self { category, ordinal }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.slug(), self.ordinal)
    }
}

/// One card on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    category: Category,
    id: TileId,
    revealed: bool,
    removed: bool,
}

impl Tile {
    pub const fn new(category: Category, ordinal: u8) -> Self {
        Self {
            category,
            id: TileId::new(category, ordinal),
            revealed: false,
            removed: false,
        }
    }

    pub const fn category(&self) -> Category {
        self.category
    }

    pub const fn id(&self) -> TileId {
        self.id
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    /// Face-down and still in play.
    pub const fn is_selectable(&self) -> bool {
        !self.revealed && !self.removed
    }

    pub(crate) fn set_revealed(&mut self, revealed: bool) {
        self.revealed = revealed;
    }

    pub(crate) fn set_removed(&mut self) {
        self.removed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn only_grasshopper_disrupts() {
        assert!(Category::Grasshopper.is_disruptor());
        assert!(Category::RESOURCES.iter().all(|c| !c.is_disruptor()));
    }

    #[test]
    fn tile_id_renders_category_and_ordinal() {
        assert_eq!(Tile::new(Category::Co2, 3).id().to_string(), "co2-3");
    }

    #[test]
    fn removed_or_revealed_tiles_are_not_selectable() {
        let mut tile = Tile::new(Category::Sun, 0);
        assert!(tile.is_selectable());

        tile.set_revealed(true);
        assert!(!tile.is_selectable());

        tile.set_revealed(false);
        tile.set_removed();
        assert!(!tile.is_selectable());
    }
}
